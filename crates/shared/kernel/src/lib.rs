//! Kernel utilities shared by the registration slice and the binaries.
//!
//! Re-exports the domain models as [`domain`] and provides:
//!
//! * [`config::load_config`]: file plus `SIGNUP__*` environment layering.
//! * [`safe_nanoid!`]: short random identifiers for users and requests.
//!
//! ```rust
//! # use signup_kernel::safe_nanoid;
//! let request_id = safe_nanoid!(16);
//! assert_eq!(request_id.len(), 16);
//! ```
pub mod config;

/// Digits and letters minus the look-alikes `0 1 I O l`.
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use nanoid::nanoid;
pub use signup_domain as domain;

/// `NanoID` over [`SAFE_ALPHABET`]; 12 characters unless a size is given.
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
