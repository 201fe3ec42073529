use signup_cli::args::DemoArgs;
use signup_cli::handlers::{config, demo};
use signup_domain::config::AppConfig;
use signup_domain::constants::{ACTIVATION_COMPLETE, REGISTRATION_COMPLETE};
use signup_domain::events::{UserActivated, UserRegistered};

fn args() -> DemoArgs {
    DemoArgs {
        username: "jdoe".into(),
        email: "jdoe@example.org".into(),
        password: "s3cret".into(),
        password2: None,
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        host: "signup.example.org".into(),
        skip_activation: false,
    }
}

#[tokio::test]
async fn demo_registers_mails_and_activates() {
    let mut cfg = AppConfig::default();
    cfg.registration.admins = vec!["ops@example.org".into()];

    let report = demo::run(&cfg, args()).await.unwrap();

    assert_eq!(report.registration_redirect.name, REGISTRATION_COMPLETE);
    assert!(report.activated.as_ref().is_some_and(|u| u.is_active));
    assert_eq!(report.activation_redirect.unwrap().name, ACTIVATION_COMPLETE);
    assert_eq!(report.mailed.len(), 1);
    assert_eq!(report.mailed[0].recipients, ["ops@example.org"]);
    assert_eq!(report.events, [UserRegistered::NAME, UserActivated::NAME]);
}

#[tokio::test]
async fn demo_can_leave_account_pending() {
    let report =
        demo::run(&AppConfig::default(), DemoArgs { skip_activation: true, ..args() }).await.unwrap();

    assert!(!report.registered.is_active);
    assert!(report.activated.is_none());
    assert_eq!(report.events, [UserRegistered::NAME]);
}

#[tokio::test]
async fn demo_refuses_when_closed() {
    let mut cfg = AppConfig::default();
    cfg.registration.open = false;

    let err = demo::run(&cfg, args()).await.unwrap_err();
    assert!(err.to_string().contains("closed"));
}

#[tokio::test]
async fn demo_reports_form_errors() {
    let err = demo::run(&AppConfig::default(), DemoArgs { password2: Some("nope".into()), ..args() })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("password2"));
}

#[test]
fn config_render_lists_registration_settings() {
    let out = config::render(&AppConfig::default());
    assert!(out.contains("registration.open           = true"));
    assert!(out.contains("registration.activation_days = 7"));
    assert!(!out.contains("sites.current"));
}

#[test]
fn config_render_shows_installed_site() {
    let mut cfg = AppConfig::default();
    cfg.sites.installed = true;
    cfg.registration.admins = vec!["ops@example.org".into(), "it@example.org".into()];

    let out = config::render(&cfg);
    assert!(out.contains("sites.current               = #1 example.com (example.com)"));
    assert!(out.contains("registration.admins         = [ops@example.org, it@example.org]"));
    assert!(out.ends_with("logging.level               = info\n"));
}
