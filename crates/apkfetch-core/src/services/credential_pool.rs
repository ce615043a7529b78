//! Round-robin credential rotation.
//!
//! Every credential is handed out with equal frequency over time. The pool
//! does not track credential health: a credential whose last use failed is
//! served again when its turn comes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Credential;
use crate::ports::CoreError;

/// Ordered, fixed-size pool of credentials with a shared rotation cursor.
#[derive(Debug)]
pub struct CredentialPool {
    credentials: Vec<Arc<Credential>>,
    /// Index of the next credential to serve. Always `< credentials.len()`.
    cursor: AtomicUsize,
}

impl CredentialPool {
    /// Build a pool. Fails when `credentials` is empty.
    pub fn new(credentials: Vec<Credential>) -> Result<Self, CoreError> {
        if credentials.is_empty() {
            return Err(CoreError::Configuration(
                "credential pool requires at least one account".to_string(),
            ));
        }

        Ok(Self {
            credentials: credentials.into_iter().map(Arc::new).collect(),
            cursor: AtomicUsize::new(0),
        })
    }

    /// Hand out the credential at the cursor and advance it, wrapping at the end.
    ///
    /// Safe under concurrent callers: the read-advance step is a single
    /// compare-and-swap, so callers within one rotation get distinct
    /// credentials.
    pub fn next(&self) -> Arc<Credential> {
        let (index, _) = self.next_indexed();
        Arc::clone(&self.credentials[index])
    }

    /// Like [`next`](Self::next), also returning the credential's position.
    pub fn next_indexed(&self) -> (usize, Arc<Credential>) {
        let len = self.credentials.len();
        let index = match self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some((current + 1) % len)
            }) {
            Ok(previous) | Err(previous) => previous,
        };
        (index, Arc::clone(&self.credentials[index]))
    }

    /// Number of credentials in the pool.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always false: an empty pool cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
