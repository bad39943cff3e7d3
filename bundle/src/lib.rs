//! latu-bundle - Launch-script property derivation for LATU bundles
//!
//! A deployable LATU bundle wraps the service binary in a generated shell
//! launch script. The script template carries `${key}` placeholders; this
//! crate produces the property set those placeholders are filled from.
//! The substitution itself happens in the packaging step, not here.
//!
//! Merge policy, in order of precedence:
//!
//! 1. Explicit user properties (always win, never overwritten)
//! 2. Derived defaults via ordered fallback candidates, where absent and
//!    empty values are silently skipped - never errors

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(missing_docs)]

/// Launch script configuration and text transforms
pub mod launch;

pub use launch::{augment_line_breaks, remove_line_breaks, LaunchScript};
