use crate::error::RegistrationError;
use crate::form::RegistrationRequest;
use signup_domain::forms::FormDescriptor;
use signup_domain::request::RequestContext;
use signup_domain::routes::RouteReference;
use signup_domain::user::User;
use std::future::Future;

/// Capability set shared by interchangeable registration workflows.
///
/// The calling layer (HTTP handlers, CLI) talks to a backend only through this
/// trait. Implementations hold no per-request state; one instance serves every
/// request.
pub trait RegistrationBackend: Send + Sync {
    /// Creates a new, inactive account.
    fn register(
        &self,
        request: &RequestContext,
        input: RegistrationRequest,
    ) -> impl Future<Output = Result<User, RegistrationError>> + Send;

    /// Activates the account owning `activation_key`.
    ///
    /// `Ok(None)` means the key was unknown, expired or already used.
    fn activate(
        &self,
        request: &RequestContext,
        activation_key: &str,
    ) -> impl Future<Output = Result<Option<User>, RegistrationError>> + Send;

    fn registration_allowed(&self, request: &RequestContext) -> bool;

    /// Input schema the calling layer should validate submissions against.
    fn form_class(&self, request: &RequestContext) -> &'static FormDescriptor;

    fn post_registration_redirect(&self, request: &RequestContext, user: &User) -> RouteReference;

    fn post_activation_redirect(&self, request: &RequestContext, user: &User) -> RouteReference;
}
