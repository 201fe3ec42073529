use crate::args::DemoArgs;
use anyhow::{Context, Result, bail};
use signup_domain::config::AppConfig;
use signup_domain::events::{UserActivated, UserRegistered};
use signup_domain::request::RequestContext;
use signup_domain::routes::RouteReference;
use signup_domain::user::User;
use signup_event_bus::{EventBus, EventReceiverExt};
use signup_kernel::safe_nanoid;
use signup_registration::{
    AdminNotification, ChannelNotifier, InMemoryAccountDirectory, ManualActivationBackend,
    RegistrationBackend, RegistrationForm, SiteResolver,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

const MAIL_QUEUE: usize = 16;

/// Outcome of one demo session.
#[derive(Debug)]
pub struct DemoReport {
    pub registered: User,
    pub registration_redirect: RouteReference,
    pub activated: Option<User>,
    pub activation_redirect: Option<RouteReference>,
    /// Notifications picked up by the mailer task.
    pub mailed: Vec<AdminNotification>,
    /// Lifecycle events seen by the listener, by name.
    pub events: Vec<&'static str>,
}

/// Drives register, notify and activate against an in-memory directory.
///
/// # Errors
/// Fails when registration is closed, the form is invalid, or a collaborator fails.
pub async fn run(cfg: &AppConfig, args: DemoArgs) -> Result<DemoReport> {
    let bus = EventBus::new();
    let directory = Arc::new(InMemoryAccountDirectory::new(cfg.registration.activation_days));
    let backend = ManualActivationBackend::new(
        cfg.registration.clone(),
        SiteResolver::from_config(&cfg.sites),
        Arc::clone(&directory),
        ChannelNotifier::new(bus.clone()),
        bus.clone(),
    );

    let mailer = spawn_mailer(&bus)?;
    let listener = spawn_listener(&bus)?;

    let request = RequestContext::new(args.host.as_str()).request_id(safe_nanoid!());
    if !backend.registration_allowed(&request) {
        bail!("Registration is closed");
    }

    let form = RegistrationForm {
        password2: args.password2.unwrap_or_else(|| args.password.clone()),
        username: args.username,
        email: args.email,
        password1: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
            bail!("{errors}: {}", details.join("; "));
        },
    };

    let registered = backend.register(&request, input).await.context("Registration failed")?;
    let registration_redirect = backend.post_registration_redirect(&request, &registered);

    let (activated, activation_redirect) = if args.skip_activation {
        (None, None)
    } else {
        let key = directory
            .profile_for(&registered.id)
            .map(|p| p.activation_key)
            .context("Registration profile missing")?;
        info!(username = %registered.username, "Activating as administrator");

        let activated = backend.activate(&request, key.as_str()).await.context("Activation failed")?;
        let redirect = activated.as_ref().map(|u| backend.post_activation_redirect(&request, u));
        (activated, redirect)
    };

    let _ = bus.shutdown();
    let mailed = mailer.await.context("Mailer task failed")?;
    let events = listener.await.context("Event listener failed")?;

    Ok(DemoReport { registered, registration_redirect, activated, activation_redirect, mailed, events })
}

fn spawn_mailer(bus: &EventBus) -> Result<JoinHandle<Vec<AdminNotification>>> {
    let mut queue = bus.subscribe_mpsc::<AdminNotification>(MAIL_QUEUE)?;

    Ok(tokio::spawn(async move {
        let mut mailed = Vec::new();
        while let Some(notification) = queue.next_event().await {
            info!(to = ?notification.recipients, subject = %notification.subject, "Mail sent");
            mailed.push((*notification).clone());
        }
        mailed
    }))
}

fn spawn_listener(bus: &EventBus) -> Result<JoinHandle<Vec<&'static str>>> {
    let mut registered = bus.subscribe::<UserRegistered>()?;
    let mut activated = bus.subscribe::<UserActivated>()?;

    Ok(tokio::spawn(async move {
        let mut seen = Vec::new();
        let (mut registered_open, mut activated_open) = (true, true);

        while registered_open || activated_open {
            tokio::select! {
                biased;

                event = registered.next_event(), if registered_open => match event {
                    Some(event) => {
                        info!(username = %event.user.username, sender = %event.sender, "user_registered");
                        seen.push(UserRegistered::NAME);
                    },
                    None => registered_open = false,
                },
                event = activated.next_event(), if activated_open => match event {
                    Some(event) => {
                        info!(username = %event.user.username, sender = %event.sender, "user_activated");
                        seen.push(UserActivated::NAME);
                    },
                    None => activated_open = false,
                },
            }
        }
        seen
    }))
}
