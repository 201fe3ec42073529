use crate::backend::RegistrationBackend;
use crate::directory::{AccountDirectory, NewAccount};
use crate::error::{RegistrationError, RegistrationErrorExt};
use crate::form::{REGISTRATION_FORM, RegistrationRequest};
use crate::notify::{AdminNotification, AdminNotifier};
use crate::sites::SiteResolver;
use signup_domain::config::RegistrationConfig;
use signup_domain::constants::{ACTIVATION_COMPLETE, REGISTRATION_COMPLETE};
use signup_domain::events::{BackendTag, UserActivated, UserRegistered};
use signup_domain::forms::FormDescriptor;
use signup_domain::request::RequestContext;
use signup_domain::routes::RouteReference;
use signup_domain::user::User;
use signup_event_bus::EventBus;
use tracing::{debug, info};

/// Sign-up workflow where an administrator activates new accounts by hand.
///
/// 1. The user signs up and an inactive account is created.
/// 2. Administrators are notified.
/// 3. An administrator activates the account with its activation key.
///
/// The activation link is never mailed to the user.
#[derive(Debug)]
pub struct ManualActivationBackend<D, N> {
    config: RegistrationConfig,
    sites: SiteResolver,
    directory: D,
    notifier: N,
    bus: EventBus,
}

impl<D, N> ManualActivationBackend<D, N>
where
    D: AccountDirectory,
    N: AdminNotifier,
{
    /// Sender tag attached to every event this backend publishes.
    pub const TAG: BackendTag = BackendTag::new("ManualActivation");

    pub const fn new(
        config: RegistrationConfig,
        sites: SiteResolver,
        directory: D,
        notifier: N,
        bus: EventBus,
    ) -> Self {
        Self { config, sites, directory, notifier, bus }
    }

    pub const fn directory(&self) -> &D {
        &self.directory
    }

    pub const fn config(&self) -> &RegistrationConfig {
        &self.config
    }
}

impl<D, N> RegistrationBackend for ManualActivationBackend<D, N>
where
    D: AccountDirectory,
    N: AdminNotifier,
{
    async fn register(
        &self,
        request: &RequestContext,
        input: RegistrationRequest,
    ) -> Result<User, RegistrationError> {
        let site = self.sites.resolve(request);

        let account = NewAccount {
            username: input.username,
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
            site: site.clone(),
            send_email: false,
        };
        let user = self.directory.create_inactive_user(account).await?;

        self.notifier
            .notify(AdminNotification::compose(&user, &site, &self.config.admins))
            .await
            .context("Failed to notify administrators")?;

        let event = UserRegistered { user: user.clone(), request: request.clone(), sender: Self::TAG };
        let delivered = self.bus.publish(event).context(UserRegistered::NAME)?;

        info!(username = %user.username, site = %site, delivered, "User registered, awaiting activation");
        Ok(user)
    }

    async fn activate(
        &self,
        request: &RequestContext,
        activation_key: &str,
    ) -> Result<Option<User>, RegistrationError> {
        let Some(user) = self.directory.activate_user(activation_key).await? else {
            debug!(host = %request.host, "Activation key invalid, expired or already used");
            return Ok(None);
        };

        let event = UserActivated { user: user.clone(), request: request.clone(), sender: Self::TAG };
        let delivered = self.bus.publish(event).context(UserActivated::NAME)?;

        info!(username = %user.username, delivered, "User activated");
        Ok(Some(user))
    }

    fn registration_allowed(&self, _request: &RequestContext) -> bool {
        self.config.open
    }

    fn form_class(&self, _request: &RequestContext) -> &'static FormDescriptor {
        &REGISTRATION_FORM
    }

    fn post_registration_redirect(&self, _request: &RequestContext, _user: &User) -> RouteReference {
        RouteReference::named(REGISTRATION_COMPLETE)
    }

    fn post_activation_redirect(&self, _request: &RequestContext, _user: &User) -> RouteReference {
        RouteReference::named(ACTIVATION_COMPLETE)
    }
}
