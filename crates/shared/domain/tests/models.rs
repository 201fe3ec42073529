use chrono::Utc;
use signup_domain::constants::{ACTIVATED, FIELD_PASSWORD, REGISTRATION_COMPLETE};
use signup_domain::events::{BackendTag, UserActivated, UserRegistered};
use signup_domain::forms::{FieldFlags, FieldKind, FieldSpec, FormDescriptor};
use signup_domain::profile::ActivationKey;
use signup_domain::request::RequestContext;
use signup_domain::routes::RouteReference;
use signup_domain::site::Site;
use signup_domain::user::{User, UserId};

fn user(first: &str, last: &str) -> User {
    User {
        id: UserId::new("u1"),
        username: "jdoe".to_owned(),
        email: "jdoe@example.org".to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        is_active: false,
        date_joined: Utc::now(),
    }
}

#[test]
fn display_name_falls_back_to_username() {
    assert_eq!(user("Jane", "Doe").display_name(), "Jane Doe");
    assert_eq!(user("Jane", "").display_name(), "Jane");
    assert_eq!(user("", "").display_name(), "jdoe");
}

#[test]
fn request_site_mirrors_host() {
    let request = RequestContext::new("signup.example.org").secure(true);
    let site = Site::from_request(&request);

    assert!(site.is_request_site());
    assert_eq!(site.domain, "signup.example.org");
    assert_eq!(site.name, "signup.example.org");
    assert_eq!(request.scheme(), "https");
}

#[test]
fn request_context_serializes_its_fields() {
    let request = RequestContext::new("signup.example.org").request_id("req-7");
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "host": "signup.example.org", "secure": false, "requestId": "req-7" })
    );
}

#[test]
fn activation_key_debug_is_redacted() {
    let key = ActivationKey::new("d2b7c0ffee");
    assert_eq!(format!("{key:?}"), "ActivationKey(..)");
    assert!(!key.is_activated());

    let used = ActivationKey::activated();
    assert!(used.is_activated());
    assert_eq!(used.as_str(), ACTIVATED);
}

#[test]
fn named_route_has_no_arguments() {
    let route = RouteReference::named(REGISTRATION_COMPLETE);
    assert_eq!(route.name, REGISTRATION_COMPLETE);
    assert!(!route.has_arguments());
}

#[test]
fn form_descriptor_lookups() {
    static FIELDS: [FieldSpec; 2] = [
        FieldSpec {
            name: "username",
            label: "Username",
            kind: FieldKind::Text,
            max_length: Some(30),
            flags: FieldFlags::REQUIRED,
        },
        FieldSpec {
            name: FIELD_PASSWORD,
            label: "Password",
            kind: FieldKind::Password,
            max_length: None,
            flags: FieldFlags::REQUIRED.union(FieldFlags::SECRET),
        },
    ];
    let form = FormDescriptor { name: "demo", fields: &FIELDS };

    assert!(form.field(FIELD_PASSWORD).is_some_and(|f| f.flags.contains(FieldFlags::SECRET)));
    assert!(form.field("nickname").is_none());
    assert_eq!(form.required_fields().count(), 2);
}

#[test]
fn events_serialize_with_sender_name() {
    let event = UserRegistered {
        user: user("", ""),
        request: RequestContext::new("example.com"),
        sender: BackendTag::new("manual_activation"),
    };
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["sender"], "manual_activation");
    assert_eq!(value["user"]["username"], "jdoe");
    assert_eq!(UserRegistered::NAME, "user_registered");
    assert_eq!(UserActivated::NAME, "user_activated");
}
