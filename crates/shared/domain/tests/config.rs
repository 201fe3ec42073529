use signup_domain::config::{AppConfig, LoggingConfig, RegistrationConfig, SitesConfig};
use signup_domain::site::{Site, SiteId};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let registration = RegistrationConfig::default();
    assert!(registration.open, "registration is open unless configured otherwise");
    assert_eq!(registration.activation_days, 7);
    assert!(registration.admins.is_empty());

    let sites = SitesConfig::default();
    assert!(!sites.installed);
    assert_eq!(sites.current.id, 1);
    assert_eq!(sites.current.domain, "example.com");

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.directory.is_none());
}

#[test]
fn missing_registration_open_defaults_to_true() {
    let cfg: AppConfig =
        serde_json::from_value(json!({ "registration": { "activation_days": 3 } })).unwrap();
    assert!(cfg.registration.open);
    assert_eq!(cfg.registration.activation_days, 3);
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "registration": { "open": false, "admins": ["ops@example.org"] },
        "sites": { "installed": true, "current": { "id": 4, "domain": "lab.example.org", "name": "Lab" } },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert!(!cfg.registration.open);
    assert_eq!(cfg.registration.admins, vec!["ops@example.org".to_owned()]);
    assert!(cfg.sites.installed);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);

    let site = Site::from(&cfg.sites.current);
    assert_eq!(site.id, Some(SiteId(4)));
    assert_eq!(site.name, "Lab");
}

#[test]
fn clones_share_until_mutated() {
    let base = AppConfig::default();
    let mut closed = base.clone();
    closed.registration.open = false;

    assert!(base.registration.open);
    assert!(!closed.registration.open);
}
