//! # groovy-complete-base
//!
//! Member resolution and completion ranking for Groovy editor tooling.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Providers, merge policy, resolution engine, completion items
//!   ↓
//! hir       → Declaration model, type resolvers, hierarchy walker
//!   ↓
//! base      → Primitives (SignatureKey, Modifiers, well-known type names)
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → ide)
// ============================================================================

/// Foundation types: SignatureKey, Modifiers, constants
pub mod base;

/// Declaration model, collaborators, hierarchy walking
pub mod hir;

/// Resolution engine and completion features
pub mod ide;

// Re-export foundation types
pub use base::{MemberKind, Modifiers, SignatureKey};
