//! # Domain Models
//!
//! Pure data types for the signup workflow with minimal dependencies
//! (`serde`, `bitflags`, `chrono`). Keep it lean: no I/O or heavy logic, just
//! data and simple helpers shared by the kernel, the registration slice and
//! the binaries.

pub mod config;
pub mod constants;
pub mod events;
pub mod forms;
pub mod profile;
pub mod request;
pub mod routes;
pub mod site;
pub mod user;
