//! URL construction helpers for the gateway API.

use url::Url;

use crate::error::GatewayResult;

/// Append `segment` to the base URL's path.
fn join_path(base: &Url, segment: &str) -> Url {
    let mut url = base.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{segment}"));
    url.set_query(None);
    url
}

/// `{base}/auth`
pub fn build_auth_url(base: &Url) -> Url {
    join_path(base, "auth")
}

/// `{base}/packages/{package_id}`
pub fn build_package_url(base: &Url, package_id: &str) -> Url {
    join_path(base, &format!("packages/{}", urlencoding::encode(package_id)))
}

/// Resolve a `download_url` from package details, which may be absolute or
/// relative to the gateway.
pub fn resolve_download_url(base: &Url, download_url: &str) -> GatewayResult<Url> {
    Ok(base.join(download_url)?)
}

/// Whether `url` points at the gateway itself (and may carry the session).
pub fn same_origin(base: &Url, url: &Url) -> bool {
    base.origin() == url.origin()
}
