//! Credential service
//!
//! Opaque identity collaborator: hashes passwords and issues/verifies
//! bearer tokens. The ledger never sees any of this; the API middleware
//! resolves tokens to user ids before handlers run.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

/// Password + token operations behind one seam
pub trait CredentialService: Send + Sync {
    /// Derive a storable digest from a raw password
    fn hash_password(&self, raw: &str) -> String;

    /// Check a raw password against a stored digest
    fn verify_password(&self, raw: &str, digest: &str) -> bool;

    /// Issue a bearer token for a user id
    fn issue_token(&self, user_id: &str) -> String;

    /// Resolve a bearer token to its user id, if valid
    fn verify_token(&self, token: &str) -> Option<String>;

    /// Invalidate a token (logout)
    fn revoke_token(&self, token: &str);
}

/// In-memory implementation: salted SHA-256 digests and uuid session
/// tokens held in a token table. Suitable for the demo deployment; a
/// real deployment swaps in a proper credential backend at this trait.
pub struct InMemoryCredentials {
    salt: String,
    tokens: DashMap<String, String>,
}

impl InMemoryCredentials {
    pub fn new(salt: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            salt: salt.into(),
            tokens: DashMap::new(),
        })
    }
}

impl CredentialService for InMemoryCredentials {
    fn hash_password(&self, raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn verify_password(&self, raw: &str, digest: &str) -> bool {
        self.hash_password(raw) == digest
    }

    fn issue_token(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    fn verify_token(&self, token: &str) -> Option<String> {
        self.tokens.get(token).map(|entry| entry.value().clone())
    }

    fn revoke_token(&self, token: &str) {
        self.tokens.remove(token);
    }
}
