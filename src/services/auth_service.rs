use std::rc::Rc;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::error::{StoreError, StoreResult};
use crate::events::{AppEvent, EventBus};
use crate::models::User;
use crate::storage::Storage;

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

/// Simulated identity provider: one locally registered account, argon2
/// hashed, with an on-disk session. Checkout only consumes
/// `is_authenticated` and `current_user`.
pub struct AuthService {
    storage: Rc<Storage>,
    events: Rc<EventBus>,
    current: Option<User>,
}

impl AuthService {
    /// Reopens a persisted session when it still matches the account.
    pub fn new(storage: Rc<Storage>, events: Rc<EventBus>) -> Self {
        let current = match (storage.load_account(), storage.load_session()) {
            (Some(account), Some(email)) if account.email == email => Some(account),
            _ => None,
        };
        Self {
            storage,
            events,
            current,
        }
    }

    pub fn register(&mut self, name: &str, email: &str, password: &str) -> StoreResult<User> {
        if !valid_email(email) {
            return Err(StoreError::BadRequest("Invalid email".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(StoreError::BadRequest(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let name = name.trim();
        if name.len() < MIN_NAME_LEN {
            return Err(StoreError::BadRequest(format!(
                "Name must be at least {MIN_NAME_LEN} characters"
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::Internal(anyhow::anyhow!(e.to_string())))?
            .to_string();

        let user = User::new(email, name, password_hash);
        self.storage.save_account(&user);
        self.storage.save_session(&user.email);
        self.events.publish(&AppEvent::UserLoggedIn {
            email: user.email.clone(),
        });
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Verifies the stored account's hash; unknown emails and bad
    /// passwords get the same answer.
    pub fn login(&mut self, email: &str, password: &str) -> StoreResult<User> {
        let account = self
            .storage
            .load_account()
            .filter(|a| a.email == email)
            .ok_or_else(|| StoreError::BadRequest("Invalid email or password".into()))?;

        let parsed_hash = PasswordHash::new(&account.password_hash)
            .map_err(|_| StoreError::Internal(anyhow::anyhow!("Invalid password hash")))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            return Err(StoreError::BadRequest("Invalid email or password".into()));
        }

        self.storage.save_session(&account.email);
        self.events.publish(&AppEvent::UserLoggedIn {
            email: account.email.clone(),
        });
        self.current = Some(account.clone());
        Ok(account)
    }

    pub fn logout(&mut self) {
        self.current = None;
        self.storage.remove_session();
        self.events.publish(&AppEvent::UserLoggedOut);
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }
}

fn valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let clean = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);
    clean(local) && clean(domain) && domain.split('.').count() >= 2 && domain.split('.').all(clean)
}
