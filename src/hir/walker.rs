//! Hierarchy traversal.
//!
//! Produces the ordered sequence of types whose members are visible on a
//! receiver: the type itself, its superclass chain, every interface reachable
//! from those classes, and finally the root object type.
//!
//! # Order and distances
//!
//! ```text
//! Derived(0) → Base(1) → ...chain...        superclass hops, depth first
//!     ↓
//! Set(1), Collection(1), Iterable(2) ...     interfaces, min-heap by distance
//!     ↓
//! java.lang.Object(last chain + 1)           exactly once, always last
//! ```
//!
//! Distances are non-decreasing within each phase. An interface can be closer
//! than a late superclass, so consumers must not assume global monotonicity.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::constants::{OBJECT_TYPE, boxed_type, erasure};

use super::error::ResolveError;
use super::types::{TypeInfo, TypeResolver};

/// One type yielded by a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkStep {
    pub info: TypeInfo,
    /// Hops from the starting type (0 = the starting type itself).
    pub distance: u32,
}

/// Normalize a receiver type name: erase generics, box primitives.
pub fn normalize_type_name(name: &str) -> &str {
    let erased = erasure(name);
    boxed_type(erased).unwrap_or(erased)
}

/// Walks type hierarchies through a [`TypeResolver`].
#[derive(Clone, Copy)]
pub struct HierarchyWalker<'a> {
    types: &'a dyn TypeResolver,
}

impl<'a> HierarchyWalker<'a> {
    pub fn new(types: &'a dyn TypeResolver) -> Self {
        Self { types }
    }

    /// Lazily walk the hierarchy of `start`.
    ///
    /// An unresolvable start type yields nothing.
    pub fn walk(&self, start: &str) -> HierarchyWalk<'a> {
        let name = normalize_type_name(start);
        let mut walk = HierarchyWalk {
            types: self.types,
            phase: Phase::Done,
            visited: FxHashSet::default(),
            next_class: None,
            pending: BinaryHeap::new(),
            seq: 0,
            root_distance: 0,
        };

        if name == OBJECT_TYPE {
            walk.phase = Phase::Root;
            return walk;
        }

        match self.types.type_info(name) {
            Some(info) => {
                walk.next_class = Some((info, 0));
                walk.phase = Phase::Chain;
            }
            None => {
                tracing::debug!("[WALK] {}", ResolveError::UnresolvableType(Arc::from(name)));
            }
        }
        walk
    }

    /// Whether a value of type `source` can be assigned to `target`.
    pub fn is_assignable(&self, target: &str, source: &str) -> bool {
        let target = normalize_type_name(target);
        let source = normalize_type_name(source);
        if target == source {
            return true;
        }
        self.walk(source)
            .any(|step| step.info.name.as_ref() == target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Chain,
    Interfaces,
    Root,
    Done,
}

/// Iterator returned by [`HierarchyWalker::walk`].
pub struct HierarchyWalk<'a> {
    types: &'a dyn TypeResolver,
    phase: Phase,
    visited: FxHashSet<Arc<str>>,
    next_class: Option<(TypeInfo, u32)>,
    /// Interfaces awaiting a visit: (distance, discovery order, name).
    pending: BinaryHeap<Reverse<(u32, u64, Arc<str>)>>,
    seq: u64,
    root_distance: u32,
}

impl HierarchyWalk<'_> {
    fn queue_interfaces(&mut self, info: &TypeInfo, distance: u32) {
        for iface in &info.interfaces {
            let name: Arc<str> = Arc::from(erasure(iface));
            self.pending.push(Reverse((distance + 1, self.seq, name)));
            self.seq += 1;
        }
    }

    /// The next class in the superclass chain, if it should be visited.
    fn next_in_chain(&self, info: &TypeInfo, distance: u32) -> Option<(TypeInfo, u32)> {
        let superclass = erasure(info.superclass.as_deref()?);
        if superclass == OBJECT_TYPE {
            return None;
        }
        if self.visited.contains(superclass) {
            tracing::debug!(
                "[WALK] {} (from {})",
                ResolveError::HierarchyCycleDetected(Arc::from(superclass)),
                info.name
            );
            return None;
        }
        match self.types.type_info(superclass) {
            Some(next) => Some((next, distance + 1)),
            None => {
                tracing::trace!("[WALK] superclass '{}' of '{}' unresolved", superclass, info.name);
                None
            }
        }
    }
}

impl Iterator for HierarchyWalk<'_> {
    type Item = WalkStep;

    fn next(&mut self) -> Option<WalkStep> {
        loop {
            match self.phase {
                Phase::Chain => {
                    let Some((info, distance)) = self.next_class.take() else {
                        self.phase = Phase::Interfaces;
                        continue;
                    };
                    self.visited.insert(info.name.clone());
                    self.root_distance = distance + 1;
                    self.queue_interfaces(&info, distance);
                    self.next_class = self.next_in_chain(&info, distance);
                    return Some(WalkStep { info, distance });
                }
                Phase::Interfaces => {
                    let Some(Reverse((distance, _, name))) = self.pending.pop() else {
                        self.phase = Phase::Root;
                        continue;
                    };
                    if name.as_ref() == OBJECT_TYPE || self.visited.contains(&name) {
                        continue;
                    }
                    self.visited.insert(name.clone());
                    let Some(info) = self.types.type_info(&name) else {
                        tracing::trace!("[WALK] interface '{}' unresolved", name);
                        continue;
                    };
                    self.queue_interfaces(&info, distance);
                    return Some(WalkStep { info, distance });
                }
                Phase::Root => {
                    self.phase = Phase::Done;
                    let info = self
                        .types
                        .type_info(OBJECT_TYPE)
                        .unwrap_or_else(|| TypeInfo::bare(OBJECT_TYPE));
                    return Some(WalkStep {
                        info,
                        distance: self.root_distance,
                    });
                }
                Phase::Done => return None,
            }
        }
    }
}
