//! Out-of-band notification of administrators about accounts awaiting activation.

mod error;

pub use error::{NotifyError, NotifyErrorExt};

use serde::Serialize;
use signup_domain::site::Site;
use signup_domain::user::{User, UserId};
use signup_event_bus::EventBus;
use std::future::Future;
use tracing::{info, warn};

/// A message telling administrators that a new inactive account exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNotification {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub user_id: UserId,
    pub username: String,
}

impl AdminNotification {
    #[must_use]
    pub fn compose(user: &User, site: &Site, admins: &[String]) -> Self {
        let subject = format!("[{}] New account awaiting activation: {}", site.name, user.username);
        let body = format!(
            "A new account is waiting for manual activation on {domain}.\n\n\
             Username: {username}\n\
             Name: {name}\n\
             Email: {email}\n\
             Joined: {joined}\n",
            domain = site.domain,
            username = user.username,
            name = user.display_name(),
            email = user.email,
            joined = user.date_joined.to_rfc3339(),
        );

        Self {
            recipients: admins.to_vec(),
            subject,
            body,
            user_id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

/// Delivers [`AdminNotification`]s. The transport is up to the implementor.
pub trait AdminNotifier: Send + Sync {
    fn notify(
        &self,
        notification: AdminNotification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl AdminNotifier for LogNotifier {
    async fn notify(&self, notification: AdminNotification) -> Result<(), NotifyError> {
        if notification.recipients.is_empty() {
            warn!(username = %notification.username, "No administrators configured for activation notices");
        }
        info!(
            recipients = ?notification.recipients,
            subject = %notification.subject,
            "Admin notification"
        );
        Ok(())
    }
}

/// Hands notifications to a mailer task through the bus work queue.
///
/// The consumer takes them with `bus.subscribe_mpsc::<AdminNotification>(..)`.
/// When the queue is full `notify` waits for the mailer to catch up.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    bus: EventBus,
}

impl ChannelNotifier {
    #[must_use]
    pub const fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl AdminNotifier for ChannelNotifier {
    async fn notify(&self, notification: AdminNotification) -> Result<(), NotifyError> {
        self.bus.publish_mpsc_async(notification).await.map_err(|e| NotifyError::Delivery {
            message: e.to_string().into(),
            context: Some("Failed to queue admin notification".into()),
        })
    }
}
