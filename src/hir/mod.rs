//! High-level IR (HIR): declarations and type hierarchies.
//!
//! This module contains everything the resolution engine knows about types
//! before any ranking happens: the declaration model, the collaborators that
//! supply declarations, and the hierarchy walker.
//!
//! ## Key Types
//!
//! - [`TypeDecl`], [`MemberDecl`] - Declarations shared by all sources
//! - [`TypeResolver`] - Direct-supertype lookup, layered via [`TypeLayers`]
//! - [`Document`] - The edited compilation unit behind a read/write lock
//! - [`ClassIndex`] / [`HostModel`] - Compiled host-language classes
//! - [`ExpandoRegistry`] / [`MetaRuntime`] - Runtime metaclass additions
//! - [`HierarchyWalker`] - Ordered, cycle-safe supertype enumeration
//!
//! ## Layers
//!
//! ```text
//! Document (source)   ClassIndex (compiled)
//!        \               /
//!         TypeLayers (TypeResolver)
//!                │
//!                ▼
//!         HierarchyWalker
//! ```

mod error;
mod index;
mod model;
mod runtime;
mod source;
mod types;
mod walker;

pub use error::{ModelError, ResolveError};
pub use index::{ClassIndex, HostModel};
pub use model::{Annotation, DeclKind, MemberDecl, TypeDecl, TypeKind};
pub use runtime::{ExpandoRegistry, MetaRuntime, Registration};
pub use source::{Document, SourceUnit};
pub use types::{TypeInfo, TypeLayers, TypeResolver};
pub use walker::{HierarchyWalk, HierarchyWalker, WalkStep, normalize_type_name};
