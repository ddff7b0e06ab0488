//! In-memory account store.

use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Outcome of a credential check, kept three-way so the log can tell
/// an unknown user apart from a wrong password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    Verified,
    WrongPassword,
    UnknownUser,
}

/// Concurrency-safe mapping from username to password.
///
/// The store lives for the lifetime of the process; accounts are
/// created once and never deleted, and nothing is persisted. Passwords
/// are stored and compared in plaintext, faithfully to the reference
/// service — do not use this as-is outside a demo.
///
/// One `RwLock` guards the whole map: credential checks take the read
/// lock and run concurrently, account creation takes the write lock
/// and excludes everything else.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<String, String>>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the account if the username is absent.
    ///
    /// Returns `true` on insert and `false` if the username already
    /// exists. A duplicate signup is a normal outcome, not an error.
    /// The check and the insert happen under one write lock, so two
    /// concurrent signups for the same username cannot both succeed.
    pub fn create_account(&self, username: &str, password: &str) -> bool {
        let mut accounts = self.accounts.write();
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(password.to_string());
                true
            }
        }
    }

    /// Returns `true` iff the username exists and the stored password
    /// equals `password` byte for byte.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.check_credentials(username, password) == CredentialCheck::Verified
    }

    /// Checks credentials, reporting why a check failed.
    ///
    /// The whole check runs under one read lock, so it observes a
    /// consistent snapshot of the account.
    pub fn check_credentials(&self, username: &str, password: &str) -> CredentialCheck {
        let accounts = self.accounts.read();
        match accounts.get(username) {
            Some(stored) if stored == password => CredentialCheck::Verified,
            Some(_) => CredentialCheck::WrongPassword,
            None => CredentialCheck::UnknownUser,
        }
    }

    /// Returns the number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_create_then_verify() {
        let store = AccountStore::new();

        assert!(store.create_account("a", "p1"));
        assert!(!store.create_account("a", "p2"));

        assert!(store.verify_credentials("a", "p1"));
        assert!(!store.verify_credentials("a", "p2"));
    }

    #[test]
    fn test_duplicate_signup_keeps_original_password() {
        let store = AccountStore::new();
        store.create_account("a", "first");
        store.create_account("a", "second");

        assert!(store.verify_credentials("a", "first"));
        assert!(!store.verify_credentials("a", "second"));
    }

    #[test]
    fn test_verify_unknown_user() {
        let store = AccountStore::new();
        assert!(!store.verify_credentials("nobody", "anything"));
    }

    #[test]
    fn test_check_distinguishes_unknown_user_from_wrong_password() {
        let store = AccountStore::new();
        store.create_account("alice", "secret");

        assert_eq!(
            store.check_credentials("alice", "secret"),
            CredentialCheck::Verified
        );
        assert_eq!(
            store.check_credentials("alice", "wrong"),
            CredentialCheck::WrongPassword
        );
        assert_eq!(
            store.check_credentials("bob", "secret"),
            CredentialCheck::UnknownUser
        );
    }

    #[test]
    fn test_password_compare_is_case_sensitive() {
        let store = AccountStore::new();
        store.create_account("a", "Secret");
        assert!(!store.verify_credentials("a", "secret"));
        assert!(store.verify_credentials("a", "Secret"));
    }

    #[test]
    fn test_len() {
        let store = AccountStore::new();
        assert!(store.is_empty());
        store.create_account("a", "p");
        store.create_account("b", "p");
        store.create_account("a", "p");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_signup_race() {
        let store = Arc::new(AccountStore::new());
        let threads = 16;

        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.create_account("alice", &format!("pw-{i}")))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|created| *created)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(store.len(), 1);
    }
}
