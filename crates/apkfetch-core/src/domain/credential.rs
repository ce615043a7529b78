//! Store account credentials.
//!
//! Credentials are supplied pre-formed through configuration as a JSON
//! document of the form `{"accounts": [{"lang", "timezone", "device",
//! "gsf_id", "token"}, ...]}` and are never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Locale and device shape of a remote session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleProfile {
    /// Language tag, e.g. `en_US`.
    pub language: String,
    /// IANA timezone, e.g. `Europe/Rome`.
    pub timezone: String,
    /// Device codename the store should emulate.
    pub device_profile: String,
}

/// One account used to authenticate against the remote store.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    #[serde(rename = "lang")]
    pub language: String,
    pub timezone: String,
    #[serde(rename = "device")]
    pub device_profile: String,
    /// Numeric device/account identity (`gsf_id`).
    #[serde(rename = "gsf_id", deserialize_with = "numeric_id_from_any")]
    pub numeric_id: u64,
    #[serde(rename = "token")]
    pub auth_token: String,
}

impl Credential {
    pub fn new(
        language: impl Into<String>,
        timezone: impl Into<String>,
        device_profile: impl Into<String>,
        numeric_id: u64,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            timezone: timezone.into(),
            device_profile: device_profile.into(),
            numeric_id,
            auth_token: auth_token.into(),
        }
    }

    /// The locale/device part of this credential.
    pub fn locale_profile(&self) -> LocaleProfile {
        LocaleProfile {
            language: self.language.clone(),
            timezone: self.timezone.clone(),
            device_profile: self.device_profile.clone(),
        }
    }
}

// The auth token never reaches logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("language", &self.language)
            .field("timezone", &self.timezone)
            .field("device_profile", &self.device_profile)
            .field("numeric_id", &self.numeric_id)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// `gsf_id` shows up both as a JSON number and as a decimal string.
fn numeric_id_from_any<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumericId {
        Number(u64),
        Text(String),
    }

    match NumericId::deserialize(deserializer)? {
        NumericId::Number(n) => Ok(n),
        NumericId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// The accounts document supplied at process start.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
    pub accounts: Vec<Credential>,
}

impl AccountsConfig {
    /// Parse the accounts JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
