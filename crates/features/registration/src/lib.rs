//! # Registration
//!
//! Account sign-up with manual activation. A user registers, an inactive
//! account is created, administrators are notified, and the account is later
//! activated with its single-use activation key.
//!
//! The workflow is a thin orchestration over collaborators passed in at
//! construction:
//!
//! * [`AccountDirectory`]: owns users and registration profiles
//!   ([`InMemoryAccountDirectory`] ships as a process-local implementation).
//! * [`AdminNotifier`]: delivers the "account awaiting activation" notice.
//! * [`SiteResolver`]: installed site or request-derived pseudo-site.
//! * [`signup_event_bus::EventBus`]: receives `UserRegistered` / `UserActivated`.
//!
//! ```rust
//! use signup_event_bus::EventBus;
//! use signup_registration::{
//!     InMemoryAccountDirectory, LogNotifier, ManualActivationBackend, RegistrationBackend,
//!     RegistrationRequest, SiteResolver,
//! };
//! use signup_domain::{config::RegistrationConfig, request::RequestContext};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), signup_registration::RegistrationError> {
//! let directory = Arc::new(InMemoryAccountDirectory::new(7));
//! let backend = ManualActivationBackend::new(
//!     RegistrationConfig::default(),
//!     SiteResolver::Request,
//!     Arc::clone(&directory),
//!     LogNotifier,
//!     EventBus::new(),
//! );
//!
//! let request = RequestContext::new("signup.example.org");
//! let user = backend.register(&request, RegistrationRequest::new("jdoe", "jdoe@example.org", "s3cret")).await?;
//! assert!(!user.is_active);
//!
//! let key = directory.profile_for(&user.id).map(|p| p.activation_key).unwrap();
//! let active = backend.activate(&request, key.as_str()).await?;
//! assert!(active.is_some_and(|u| u.is_active));
//! # Ok(())
//! # }
//! ```

mod backend;
pub mod directory;
mod error;
pub mod form;
mod manual;
pub mod notify;
mod sites;

pub use backend::RegistrationBackend;
pub use directory::{AccountDirectory, DirectoryError, InMemoryAccountDirectory, NewAccount};
pub use error::{RegistrationError, RegistrationErrorExt};
pub use form::{FormError, FormErrors, REGISTRATION_FORM, RegistrationForm, RegistrationRequest};
pub use manual::ManualActivationBackend;
pub use notify::{AdminNotification, AdminNotifier, ChannelNotifier, LogNotifier, NotifyError};
pub use sites::SiteResolver;
