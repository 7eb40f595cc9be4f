//! Local accounts and the signed-in identity.
//!
//! Accounts live in the key-value store next to everything else. Passwords are
//! kept as a salted SHA-256 digest; there is no server to verify against.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{AuthError, StorageError};
use crate::fields::is_valid_email;
use crate::kv::KeyValueStore;
use crate::profile::{Profile, ProfileUpdate};
use crate::submission::UNKNOWN_SUBMITTER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Read-only view of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    /// Identity written into submission records.
    pub fn submitter(&self) -> &str {
        match self.email() {
            Some(email) if !email.trim().is_empty() => email,
            _ => UNKNOWN_SUBMITTER,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAccount {
    salt: String,
    password_digest: String,
    profile: Profile,
}

type AccountMap = BTreeMap<String, StoredAccount>;

pub struct AccountStore<S> {
    store: S,
    accounts_key: String,
    session_key: String,
    min_password_len: usize,
}

impl<S: KeyValueStore> AccountStore<S> {
    pub fn new(store: S, config: &AppConfig) -> Self {
        Self {
            store,
            accounts_key: config.storage_key("accounts.v1"),
            session_key: config.storage_key("session.v1"),
            min_password_len: config.min_password_len,
        }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load_accounts(&self) -> Result<AccountMap, StorageError> {
        Ok(self.store.get_json(&self.accounts_key)?.unwrap_or_default())
    }

    fn save_accounts(&mut self, accounts: &AccountMap) -> Result<(), StorageError> {
        self.store.set_json(&self.accounts_key, accounts)
    }

    /// Creates an account and signs it in.
    pub fn signup(&mut self, req: &SignupRequest) -> Result<User, AuthError> {
        let email = normalize_email(&req.email);
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if req.password.chars().count() < self.min_password_len {
            return Err(AuthError::PasswordTooShort {
                min: self.min_password_len,
            });
        }
        if req.password != req.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let mut accounts = self.load_accounts()?;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let account = StoredAccount {
            password_digest: password_digest(&salt, &req.password),
            salt,
            profile: Profile {
                name: name.to_string(),
                email: email.clone(),
                ..Profile::default()
            },
        };
        accounts.insert(email.clone(), account);
        self.save_accounts(&accounts)?;
        self.store.set(&self.session_key, &email)?;

        info!(email = %email, "account created");
        Ok(User {
            email,
            name: name.to_string(),
        })
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        let accounts = self.load_accounts()?;
        let Some(account) = accounts.get(&email) else {
            warn!(email = %email, "login for unknown account");
            return Err(AuthError::InvalidCredentials);
        };
        if password_digest(&account.salt, password) != account.password_digest {
            warn!(email = %email, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.store.set(&self.session_key, &email)?;
        info!(email = %email, "signed in");
        Ok(User {
            email,
            name: account.profile.name.clone(),
        })
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        debug!("signed out");
        self.store.remove(&self.session_key)
    }

    /// Restores the signed-in identity from the persisted session.
    ///
    /// A session pointing at a missing account is treated as signed out.
    pub fn session(&self) -> Result<AuthState, StorageError> {
        let Some(email) = self.store.get(&self.session_key)? else {
            return Ok(AuthState::anonymous());
        };
        let accounts = self.load_accounts()?;
        Ok(match accounts.get(&email) {
            Some(account) => AuthState::signed_in(User {
                email,
                name: account.profile.name.clone(),
            }),
            None => AuthState::anonymous(),
        })
    }

    pub fn profile(&self, email: &str) -> Result<Option<Profile>, StorageError> {
        let accounts = self.load_accounts()?;
        Ok(accounts
            .get(&normalize_email(email))
            .map(|a| a.profile.clone()))
    }

    pub fn update_profile(
        &mut self,
        email: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, AuthError> {
        let email = normalize_email(email);
        let mut accounts = self.load_accounts()?;
        let Some(account) = accounts.get_mut(&email) else {
            return Err(AuthError::UnknownAccount(email));
        };
        update.apply(&mut account.profile)?;
        let profile = account.profile.clone();
        self.save_accounts(&accounts)?;
        debug!(email = %email, "profile updated");
        Ok(profile)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn accounts() -> AccountStore<MemoryStore> {
        AccountStore::new(MemoryStore::new(), &AppConfig::default())
    }

    fn signup_req(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "engine42".to_string(),
            confirm_password: "engine42".to_string(),
        }
    }

    #[test]
    fn signup_signs_in_and_session_restores() {
        let mut store = accounts();
        let user = store.signup(&signup_req(" Ada@Example.com ")).unwrap();
        assert_eq!(user.email, "ada@example.com");

        let auth = store.session().unwrap();
        assert!(auth.is_authenticated());
        assert_eq!(auth.submitter(), "ada@example.com");
        assert_eq!(auth.user().map(|u| u.name.as_str()), Some("Ada Lovelace"));
    }

    #[test]
    fn signup_validation() {
        let mut store = accounts();

        let mut req = signup_req("not-an-email");
        assert!(matches!(store.signup(&req), Err(AuthError::InvalidEmail)));

        req = signup_req("ada@example.com");
        req.password = "abc".to_string();
        req.confirm_password = "abc".to_string();
        assert!(matches!(
            store.signup(&req),
            Err(AuthError::PasswordTooShort { min: 6 })
        ));

        req = signup_req("ada@example.com");
        req.confirm_password = "different".to_string();
        assert!(matches!(store.signup(&req), Err(AuthError::PasswordMismatch)));

        req = signup_req("ada@example.com");
        req.name = " ".to_string();
        assert!(matches!(store.signup(&req), Err(AuthError::EmptyName)));
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let mut store = accounts();
        store.signup(&signup_req("ada@example.com")).unwrap();
        assert!(matches!(
            store.signup(&signup_req("ADA@example.com")),
            Err(AuthError::EmailTaken)
        ));
    }

    #[test]
    fn login_logout_cycle() {
        let mut store = accounts();
        store.signup(&signup_req("ada@example.com")).unwrap();
        store.logout().unwrap();
        assert!(!store.session().unwrap().is_authenticated());

        assert!(matches!(
            store.login("ada@example.com", "wrong-pass"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login("nobody@example.com", "engine42"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!store.session().unwrap().is_authenticated());

        let user = store.login("ada@example.com", "engine42").unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert!(store.session().unwrap().is_authenticated());
    }

    #[test]
    fn password_is_not_stored_in_clear() {
        let mut store = accounts();
        store.signup(&signup_req("ada@example.com")).unwrap();
        let raw = store
            .into_inner()
            .get("nanofi.accounts.v1")
            .unwrap()
            .unwrap();
        assert!(!raw.contains("engine42"));
    }

    #[test]
    fn profile_update_persists() {
        let mut store = accounts();
        store.signup(&signup_req("ada@example.com")).unwrap();

        let mut update = ProfileUpdate::from_profile(
            &store.profile("ada@example.com").unwrap().unwrap(),
        );
        update.organization = "Analytical Engines Ltd".to_string();
        update.name = "Augusta Ada King".to_string();
        store.update_profile("ada@example.com", &update).unwrap();

        let p = store.profile("ada@example.com").unwrap().unwrap();
        assert_eq!(p.organization, "Analytical Engines Ltd");
        assert_eq!(
            store.session().unwrap().user().map(|u| u.name.clone()),
            Some("Augusta Ada King".to_string())
        );

        update.name = String::new();
        assert!(matches!(
            store.update_profile("ada@example.com", &update),
            Err(AuthError::Profile(_))
        ));
        assert!(matches!(
            store.update_profile("ghost@example.com", &ProfileUpdate::default()),
            Err(AuthError::UnknownAccount(_))
        ));
    }

    #[test]
    fn anonymous_submitter_is_unknown() {
        assert_eq!(AuthState::anonymous().submitter(), "unknown");
        assert!(!AuthState::default().is_authenticated());
    }
}
