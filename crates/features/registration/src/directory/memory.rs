use super::{AccountDirectory, DirectoryError, NewAccount};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, TimeDelta, Utc};
use fxhash::FxHashMap;
use getrandom::fill;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use signup_domain::profile::{ActivationKey, RegistrationProfile};
use signup_domain::site::Site;
use signup_domain::user::{User, UserId};
use signup_kernel::safe_nanoid;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

const SALT_BYTES: usize = 8;
const PASSWORD_SALT_BYTES: usize = 16;
const KEY_LEN: usize = 64;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

struct Account {
    user: User,
    password_hash: String,
    site: Site,
    activation_email_requested: bool,
    profile: RegistrationProfile,
}

#[derive(Default)]
struct Store {
    accounts: FxHashMap<UserId, Account>,
    usernames: FxHashMap<String, UserId>,
    keys: FxHashMap<ActivationKey, UserId>,
}

/// Process-local [`AccountDirectory`] keeping users and profiles behind one lock.
///
/// Activation keys are `hex(sha256(salt + username))` and expire
/// `activation_days` after the account was created. Passwords are stored as
/// Argon2id PHC strings.
pub struct InMemoryAccountDirectory {
    activation_days: u32,
    clock: Clock,
    store: RwLock<Store>,
}

impl InMemoryAccountDirectory {
    #[must_use]
    pub fn new(activation_days: u32) -> Self {
        Self { activation_days, clock: Arc::new(Utc::now), store: RwLock::new(Store::default()) }
    }

    /// Replaces the wall clock, e.g. to move time forward in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub const fn activation_days(&self) -> u32 {
        self.activation_days
    }

    /// Number of stored accounts (each one has exactly one profile).
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        let store = self.store.read();
        let id = store.usernames.get(username)?;
        store.accounts.get(id).map(|a| a.user.clone())
    }

    #[must_use]
    pub fn profile_for(&self, user_id: &UserId) -> Option<RegistrationProfile> {
        self.store.read().accounts.get(user_id).map(|a| a.profile.clone())
    }

    /// The site the account was registered under.
    #[must_use]
    pub fn site_for(&self, user_id: &UserId) -> Option<Site> {
        self.store.read().accounts.get(user_id).map(|a| a.site.clone())
    }

    /// Whether the creator asked for the activation link to be mailed to the user.
    #[must_use]
    pub fn activation_email_requested(&self, user_id: &UserId) -> Option<bool> {
        self.store.read().accounts.get(user_id).map(|a| a.activation_email_requested)
    }

    /// Checks `password` against the stored hash.
    #[must_use]
    pub fn check_password(&self, username: &str, password: &str) -> bool {
        let store = self.store.read();
        let Some(account) = store.usernames.get(username).and_then(|id| store.accounts.get(id)) else {
            return false;
        };
        PasswordHash::new(&account.password_hash)
            .and_then(|hash| Argon2::default().verify_password(password.as_bytes(), &hash))
            .is_ok()
    }

    /// The stored PHC password hash string.
    #[must_use]
    pub fn password_hash(&self, username: &str) -> Option<String> {
        let store = self.store.read();
        let id = store.usernames.get(username)?;
        store.accounts.get(id).map(|a| a.password_hash.clone())
    }

    /// `true` once the key was used, or when its activation window has elapsed.
    #[must_use]
    pub fn activation_key_expired(&self, profile: &RegistrationProfile) -> bool {
        if profile.is_activated() {
            return true;
        }
        let store = self.store.read();
        store
            .accounts
            .get(&profile.user_id)
            .is_none_or(|a| self.window_elapsed(a.user.date_joined, (self.clock)()))
    }

    /// Removes inactive accounts whose activation key expired.
    ///
    /// Returns the number of accounts removed.
    pub fn delete_expired_users(&self) -> usize {
        let now = (self.clock)();
        let mut store = self.store.write();

        let expired: Vec<UserId> = store
            .accounts
            .iter()
            .filter(|(_, a)| {
                !a.user.is_active
                    && (a.profile.is_activated() || self.window_elapsed(a.user.date_joined, now))
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(account) = store.accounts.remove(id) {
                store.usernames.remove(&account.user.username);
                store.keys.remove(&account.profile.activation_key);
                debug!(username = %account.user.username, "Expired registration removed");
            }
        }

        if !expired.is_empty() {
            info!(removed = expired.len(), "Expired registrations cleaned up");
        }
        expired.len()
    }

    fn window_elapsed(&self, joined: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        joined
            .checked_add_signed(TimeDelta::days(i64::from(self.activation_days)))
            .is_none_or(|expires| expires <= now)
    }

    fn create(&self, account: NewAccount) -> Result<User, DirectoryError> {
        let password_hash = hash_password(&account.password)?;
        let key_salt = hex::encode(random_bytes::<SALT_BYTES>()?);
        let activation_key = ActivationKey::new(sha256_hex(&key_salt, &account.username));

        let mut store = self.store.write();

        if store.usernames.contains_key(&account.username) {
            return Err(DirectoryError::DuplicateUsername { username: account.username, context: None });
        }
        let email = account.email.to_lowercase();
        if store.accounts.values().any(|a| a.user.email.to_lowercase() == email) {
            return Err(DirectoryError::DuplicateEmail { email: account.email, context: None });
        }

        let id = UserId::new(safe_nanoid!());
        let user = User {
            id: id.clone(),
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            is_active: false,
            date_joined: (self.clock)(),
        };
        let profile = RegistrationProfile { user_id: id.clone(), activation_key: activation_key.clone() };

        if account.send_email {
            debug!(username = %user.username, site = %account.site, "Activation email requested for user");
        }

        store.usernames.insert(user.username.clone(), id.clone());
        store.keys.insert(activation_key, id.clone());
        store.accounts.insert(
            id,
            Account {
                user: user.clone(),
                password_hash,
                site: account.site,
                activation_email_requested: account.send_email,
                profile,
            },
        );

        trace!(username = %user.username, "Inactive account stored");
        Ok(user)
    }

    fn activate(&self, activation_key: &str) -> Option<User> {
        if !is_activation_key(activation_key) {
            trace!("Rejected malformed activation key");
            return None;
        }

        let now = (self.clock)();
        let key = ActivationKey::new(activation_key);
        let mut store = self.store.write();

        let id = store.keys.get(&key)?.clone();
        let account = store.accounts.get_mut(&id)?;
        if self.window_elapsed(account.user.date_joined, now) {
            trace!(username = %account.user.username, "Activation key expired");
            return None;
        }

        account.user.is_active = true;
        account.profile.activation_key = ActivationKey::activated();
        let user = account.user.clone();
        store.keys.remove(&key);

        Some(user)
    }
}

impl Default for InMemoryAccountDirectory {
    fn default() -> Self {
        Self::new(7)
    }
}

impl fmt::Debug for InMemoryAccountDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryAccountDirectory")
            .field("activation_days", &self.activation_days)
            .field("accounts", &self.len())
            .finish_non_exhaustive()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    async fn create_inactive_user(&self, account: NewAccount) -> Result<User, DirectoryError> {
        self.create(account)
    }

    async fn activate_user(&self, activation_key: &str) -> Result<Option<User>, DirectoryError> {
        Ok(self.activate(activation_key))
    }
}

fn random_bytes<const N: usize>() -> Result<[u8; N], DirectoryError> {
    let mut bytes = [0u8; N];
    fill(&mut bytes).map_err(|e| DirectoryError::Internal {
        message: e.to_string().into(),
        context: Some("Failed to generate salt".into()),
    })?;
    Ok(bytes)
}

fn hash_password(password: &str) -> Result<String, DirectoryError> {
    let hashing_failed = |e: argon2::password_hash::Error| DirectoryError::Internal {
        message: e.to_string().into(),
        context: Some("Failed to hash password".into()),
    };
    let salt =
        SaltString::encode_b64(&random_bytes::<PASSWORD_SALT_BYTES>()?).map_err(hashing_failed)?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), salt.as_salt())
        .map_err(hashing_failed)?;
    Ok(hash.to_string())
}

fn sha256_hex(salt: &str, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

fn is_activation_key(key: &str) -> bool {
    key.len() == KEY_LEN && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_key_shape() {
        assert!(is_activation_key(&sha256_hex("salt", "jdoe")));
        assert!(!is_activation_key("ALREADY_ACTIVATED"));
        assert!(!is_activation_key(&"A".repeat(KEY_LEN)));
        assert!(!is_activation_key(""));
    }

    #[test]
    fn activation_digest_is_salted() {
        assert_ne!(sha256_hex("a", "jdoe"), sha256_hex("b", "jdoe"));
        assert_eq!(sha256_hex("a", "jdoe"), sha256_hex("a", "jdoe"));
    }

    #[test]
    fn password_hash_is_argon2_phc() {
        let stored = hash_password("s3cret").unwrap();
        let parsed = PasswordHash::new(&stored).unwrap();

        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(parsed.salt.is_some());
        assert!(Argon2::default().verify_password(b"s3cret", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn password_hashes_use_fresh_salts() {
        assert_ne!(hash_password("s3cret").unwrap(), hash_password("s3cret").unwrap());
    }
}
