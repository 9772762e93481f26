//! Foundation types for member resolution.
//!
//! This module provides fundamental types used throughout the engine:
//! - [`SignatureKey`] - Identity of a member (name, kind, parameter types)
//! - [`Modifiers`] - Declaration modifier bits
//! - Domain constants (root type, boxed primitives, annotation names)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod modifiers;
mod signature;

pub use modifiers::Modifiers;
pub use signature::{MemberKind, SignatureKey};
