mod fixtures;

use argon2::password_hash::PasswordHash;
use fixtures::TestClock;
use signup_domain::request::RequestContext;
use signup_domain::site::Site;
use signup_registration::{AccountDirectory, DirectoryError, InMemoryAccountDirectory, NewAccount};

fn account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: username.to_owned(),
        email: email.to_owned(),
        password: "s3cret".to_owned(),
        first_name: String::new(),
        last_name: String::new(),
        site: Site::from_request(&RequestContext::new("example.com")),
        send_email: true,
    }
}

fn directory(days: u32) -> (InMemoryAccountDirectory, TestClock) {
    let clock = TestClock::default();
    let ticking = clock.clone();
    (InMemoryAccountDirectory::new(days).with_clock(move || ticking.now()), clock)
}

#[tokio::test]
async fn activation_key_is_64_lowercase_hex() {
    let (dir, _) = directory(7);
    let user = dir.create_inactive_user(account("alice", "alice@example.org")).await.unwrap();

    let key = dir.profile_for(&user.id).unwrap().activation_key;
    assert_eq!(key.as_str().len(), 64);
    assert!(key.as_str().bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    assert_eq!(dir.activation_email_requested(&user.id), Some(true));
}

#[tokio::test]
async fn stored_password_is_a_phc_hash() {
    let (dir, _) = directory(7);
    dir.create_inactive_user(account("alice", "alice@example.org")).await.unwrap();

    let stored = dir.password_hash("alice").unwrap();
    assert!(!stored.contains("s3cret"));
    let parsed = PasswordHash::new(&stored).unwrap();
    assert_eq!(parsed.algorithm.as_str(), "argon2id");

    assert!(dir.check_password("alice", "s3cret"));
    assert!(!dir.check_password("alice", "S3cret"));
    assert!(!dir.check_password("bob", "s3cret"));
}

#[tokio::test]
async fn keys_differ_for_same_username_across_directories() {
    let (a, _) = directory(7);
    let (b, _) = directory(7);
    let ua = a.create_inactive_user(account("alice", "alice@example.org")).await.unwrap();
    let ub = b.create_inactive_user(account("alice", "alice@example.org")).await.unwrap();

    assert_ne!(
        a.profile_for(&ua.id).unwrap().activation_key,
        b.profile_for(&ub.id).unwrap().activation_key
    );
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let (dir, _) = directory(7);
    dir.create_inactive_user(account("alice", "alice@example.org")).await.unwrap();

    assert!(dir.create_inactive_user(account("Alice", "alice2@example.org")).await.is_ok());
    let err = dir.create_inactive_user(account("alice", "alice3@example.org")).await.unwrap_err();
    assert!(matches!(err, DirectoryError::DuplicateUsername { ref username, .. } if username == "alice"));
    assert!(err.is_duplicate());
}

#[tokio::test]
async fn activation_key_expired_tracks_window_and_use() {
    let (dir, clock) = directory(3);
    let user = dir.create_inactive_user(account("alice", "alice@example.org")).await.unwrap();
    let profile = dir.profile_for(&user.id).unwrap();

    assert!(!dir.activation_key_expired(&profile));
    clock.advance_days(1);
    assert!(!dir.activation_key_expired(&profile));

    dir.activate_user(profile.activation_key.as_str()).await.unwrap().unwrap();
    let used = dir.profile_for(&user.id).unwrap();
    assert!(dir.activation_key_expired(&used));

    let (other, clock) = directory(3);
    let pending = other.create_inactive_user(account("bob", "bob@example.org")).await.unwrap();
    clock.advance_days(3);
    assert!(other.activation_key_expired(&other.profile_for(&pending.id).unwrap()));
}

#[tokio::test]
async fn delete_expired_users_keeps_active_and_fresh_accounts() {
    let (dir, clock) = directory(2);
    let stale = dir.create_inactive_user(account("stale", "stale@example.org")).await.unwrap();
    let active = dir.create_inactive_user(account("active", "active@example.org")).await.unwrap();
    let key = dir.profile_for(&active.id).unwrap().activation_key;
    dir.activate_user(key.as_str()).await.unwrap().unwrap();

    clock.advance_days(3);
    let fresh = dir.create_inactive_user(account("fresh", "fresh@example.org")).await.unwrap();

    assert_eq!(dir.delete_expired_users(), 1);
    assert!(dir.user_by_username("stale").is_none());
    assert!(dir.profile_for(&stale.id).is_none());
    assert!(dir.user_by_username("active").is_some());
    assert!(dir.user_by_username("fresh").is_some_and(|u| u.id == fresh.id));
    assert_eq!(dir.len(), 2);

    // The freed username can be registered again.
    assert!(dir.create_inactive_user(account("stale", "stale@example.org")).await.is_ok());
    assert_eq!(dir.delete_expired_users(), 0);
}
