//! Visibility filtering relative to the calling context.

use crate::base::Modifiers;
use crate::hir::HierarchyWalker;

use super::candidate::Candidate;

bitflags::bitflags! {
    /// Access levels applicable at a call site.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AccessContext: u8 {
        const PUBLIC    = 1 << 0;
        const PROTECTED = 1 << 1;
        const PACKAGE   = 1 << 2;
        const PRIVATE   = 1 << 3;
    }
}

impl Default for AccessContext {
    fn default() -> Self {
        AccessContext::PUBLIC
    }
}

/// How the calling code's type relates to the receiver's declaring type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    SameType,
    Subtype,
    SamePackage,
    Unrelated,
}

impl Relation {
    /// Classify `caller` relative to `declaring`.
    pub fn between(walker: &HierarchyWalker<'_>, caller: &str, declaring: &str) -> Self {
        if caller == declaring {
            Relation::SameType
        } else if package_of(caller) == package_of(declaring) {
            Relation::SamePackage
        } else if walker.is_assignable(declaring, caller) {
            Relation::Subtype
        } else {
            Relation::Unrelated
        }
    }
}

fn package_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
}

impl AccessContext {
    /// The levels a caller with the given relation may see.
    pub fn for_relation(relation: Relation) -> Self {
        match relation {
            Relation::SameType => AccessContext::all(),
            Relation::SamePackage => {
                AccessContext::PUBLIC | AccessContext::PROTECTED | AccessContext::PACKAGE
            }
            Relation::Subtype => AccessContext::PUBLIC | AccessContext::PROTECTED,
            Relation::Unrelated => AccessContext::PUBLIC,
        }
    }

    /// Whether any level in this context accepts a declaration with `modifiers`.
    pub fn accepts(self, modifiers: Modifiers) -> bool {
        (self.contains(AccessContext::PUBLIC) && modifiers.contains(Modifiers::PUBLIC))
            || (self.contains(AccessContext::PROTECTED) && modifiers.contains(Modifiers::PROTECTED))
            || (self.contains(AccessContext::PRIVATE) && modifiers.contains(Modifiers::PRIVATE))
            || (self.contains(AccessContext::PACKAGE) && modifiers.is_package_private())
    }
}

/// Applies access rules to candidates.
#[derive(Clone, Copy, Debug)]
pub struct AccessPolicy {
    honour_access_modifiers: bool,
}

impl AccessPolicy {
    pub fn new(honour_access_modifiers: bool) -> Self {
        Self {
            honour_access_modifiers,
        }
    }

    pub fn is_visible(&self, candidate: &Candidate, access: AccessContext, static_only: bool) -> bool {
        if !self.honour_access_modifiers {
            return true;
        }
        if static_only && !candidate.is_static() {
            return false;
        }
        access.accepts(candidate.modifiers())
    }
}
