use signup_kernel::{SAFE_ALPHABET, safe_nanoid};
use std::collections::BTreeSet;

#[test]
fn default_ids_use_only_unambiguous_characters() {
    let id = safe_nanoid!();

    assert_eq!(id.chars().count(), 12);
    assert!(id.chars().all(|c| SAFE_ALPHABET.contains(&c)), "unexpected character in {id}");
    assert!(!id.contains(['0', '1', 'I', 'O', 'l']));
}

#[test]
fn explicit_size_is_honoured() {
    assert_eq!(safe_nanoid!(6).len(), 6);
    assert_eq!(safe_nanoid!(32).len(), 32);
}

#[test]
fn request_ids_do_not_collide() {
    let ids: BTreeSet<String> = (0..500).map(|_| safe_nanoid!()).collect();
    assert_eq!(ids.len(), 500);
}
