//! # Event Bus
//!
//! A type-safe, in-process publish/subscribe bus. It replaces framework-level
//! signal dispatch: producers publish plain Rust values, consumers subscribe by
//! type, and neither side knows about the other.
//!
//! ## Channel kinds
//!
//! * **Broadcast**: every live subscriber receives its own copy (fan-out). Used for
//!   lifecycle notifications such as "a user registered".
//! * **MPSC**: a bounded work queue with exactly one consumer. Used to hand work
//!   (for example outgoing admin mail) to a background task.
//!
//! A given event type is bound to one channel kind for the lifetime of the bus.
//!
//! # Example
//!
//! ```rust
//! use signup_event_bus::{EventBus, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct AccountCreated { username: String }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<AccountCreated>()?;
//!     let delivered = bus.publish(AccountCreated { username: "jdoe".into() })?;
//!     assert_eq!(delivered, 1);
//!
//!     let event = rx.recv().await.unwrap();
//!     assert_eq!(event.username, "jdoe");
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
