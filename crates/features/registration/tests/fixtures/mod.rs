#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use signup_domain::config::RegistrationConfig;
use signup_domain::request::RequestContext;
use signup_event_bus::EventBus;
use signup_registration::{
    AdminNotification, AdminNotifier, InMemoryAccountDirectory, ManualActivationBackend,
    NotifyError, RegistrationRequest, SiteResolver,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Keeps every notification it is asked to deliver.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<AdminNotification>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<AdminNotification> {
        self.sent.lock().clone()
    }
}

impl AdminNotifier for RecordingNotifier {
    async fn notify(&self, notification: AdminNotification) -> Result<(), NotifyError> {
        self.sent.lock().push(notification);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FailingNotifier;

impl AdminNotifier for FailingNotifier {
    async fn notify(&self, _notification: AdminNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery { message: "smtp unreachable".into(), context: None })
    }
}

/// A clock the test can move forward.
#[derive(Debug, Clone, Default)]
pub struct TestClock {
    offset_secs: Arc<AtomicI64>,
}

impl TestClock {
    pub fn advance_days(&self, days: i64) {
        self.offset_secs.fetch_add(days * 86_400, Ordering::SeqCst);
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now() + TimeDelta::seconds(self.offset_secs.load(Ordering::SeqCst))
    }
}

pub type Backend = ManualActivationBackend<Arc<InMemoryAccountDirectory>, RecordingNotifier>;

pub struct Harness {
    pub backend: Backend,
    pub directory: Arc<InMemoryAccountDirectory>,
    pub notifier: RecordingNotifier,
    pub bus: EventBus,
    pub clock: TestClock,
}

pub fn harness() -> Harness {
    harness_with(RegistrationConfig {
        admins: vec!["admin@example.org".to_owned()],
        ..RegistrationConfig::default()
    })
}

pub fn harness_with(config: RegistrationConfig) -> Harness {
    let clock = TestClock::default();
    let ticking = clock.clone();
    let directory = Arc::new(
        InMemoryAccountDirectory::new(config.activation_days).with_clock(move || ticking.now()),
    );
    let notifier = RecordingNotifier::default();
    let bus = EventBus::new();
    let backend = ManualActivationBackend::new(
        config,
        SiteResolver::Request,
        Arc::clone(&directory),
        notifier.clone(),
        bus.clone(),
    );

    Harness { backend, directory, notifier, bus, clock }
}

pub fn request() -> RequestContext {
    RequestContext::new("signup.example.org").request_id("req-1")
}

pub fn jdoe() -> RegistrationRequest {
    RegistrationRequest::new("jdoe", "jdoe@example.org", "s3cret").with_name("Jane", "Doe")
}
