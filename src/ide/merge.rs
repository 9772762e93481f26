//! Candidate merging and tie-breaking.
//!
//! Every candidate produced while walking the hierarchy is folded into one
//! [`ResultSet`]. When two candidates claim the same signature, the winner is a
//! pure function of modifiers, override distance and declaring-type
//! specificity, so the result does not depend on which source answered first.
//!
//! ## Decision order (same masked modifiers)
//!
//! 1. A root-type (`java.lang.Object`) declaration always loses.
//! 2. The declaration closer to the queried type wins.
//! 3. At equal distance, the narrower standard interface wins
//!    (see [`InterfacePreferences`]).
//! 4. Otherwise the incoming declaration wins if its declaring type is a
//!    supertype of (or equal to) the current one. This last step is a
//!    heuristic kept for parity with collection-type behaviour users expect.
//!
//! Candidates whose masked modifiers differ (static vs instance, public vs
//! private) are never collapsed; the later one is stored under a variant key.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::SignatureKey;
use crate::base::constants::DEFAULT_INTERFACE_RANKS;
use crate::hir::HierarchyWalker;

use super::candidate::{Candidate, ResultSet};

/// Which of two competing candidates survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Current,
    Incoming,
}

/// Ranking of standard interfaces by how narrow their contract is.
///
/// A ranked type beats an unranked one; between ranked types the higher rank
/// wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfacePreferences {
    ranks: FxHashMap<Arc<str>, u8>,
}

impl Default for InterfacePreferences {
    fn default() -> Self {
        let mut preferences = Self::empty();
        for (name, rank) in DEFAULT_INTERFACE_RANKS {
            preferences.ranks.insert(Arc::from(*name), *rank);
        }
        preferences
    }
}

impl InterfacePreferences {
    /// No preferences: equal-distance ties go straight to the fallback.
    pub fn empty() -> Self {
        Self {
            ranks: FxHashMap::default(),
        }
    }

    /// Add or replace a ranked type.
    pub fn with_rank(mut self, type_name: impl Into<Arc<str>>, rank: u8) -> Self {
        self.ranks.insert(type_name.into(), rank);
        self
    }

    pub fn rank(&self, type_name: &str) -> Option<u8> {
        self.ranks.get(type_name).copied()
    }

    /// Decide between two declaring types, if the table discriminates.
    pub fn compare(&self, current: &str, incoming: &str) -> Option<Winner> {
        match (self.rank(current), self.rank(incoming)) {
            (Some(c), Some(i)) if i > c => Some(Winner::Incoming),
            (Some(c), Some(i)) if c > i => Some(Winner::Current),
            (None, Some(_)) => Some(Winner::Incoming),
            (Some(_), None) => Some(Winner::Current),
            _ => None,
        }
    }
}

/// Folds candidates into a result set.
pub struct CandidateMerger<'a> {
    walker: HierarchyWalker<'a>,
    preferences: &'a InterfacePreferences,
}

impl<'a> CandidateMerger<'a> {
    pub fn new(walker: HierarchyWalker<'a>, preferences: &'a InterfacePreferences) -> Self {
        Self {
            walker,
            preferences,
        }
    }

    /// Merge one candidate into `results`.
    pub fn merge(&self, results: &mut ResultSet, incoming: Candidate) {
        let base = incoming.key().base();
        let Some(current) = results.get(&base) else {
            results.insert(incoming.rekeyed(base));
            return;
        };

        if !current.key().same_member(incoming.key()) {
            tracing::trace!("[MERGE] key mismatch {} vs {}", current.key(), incoming.key());
            return;
        }

        let incoming_mask = incoming.modifiers().masked();
        if current.modifiers().masked() != incoming_mask {
            let variant = base.with_variant(incoming_mask);
            tracing::trace!(
                "[MERGE] {} keeps both: {:?} vs {:?}",
                base,
                current.modifiers().masked(),
                incoming_mask
            );
            self.settle(results, variant.clone(), incoming.rekeyed(variant));
            return;
        }

        self.settle(results, base, incoming);
    }

    /// Store `incoming` at `key`, tie-breaking against any occupant.
    fn settle(&self, results: &mut ResultSet, key: SignatureKey, incoming: Candidate) {
        let winner = results
            .get(&key)
            .map(|current| self.prefer(current, &incoming));

        match winner {
            None | Some(Winner::Incoming) => {
                if winner.is_some() {
                    tracing::trace!(
                        "[MERGE] {} from {} ({}) replaces earlier declaration",
                        key,
                        incoming.declaring_type(),
                        incoming.origin().name()
                    );
                }
                results.insert(incoming);
            }
            Some(Winner::Current) => {
                tracing::trace!(
                    "[MERGE] {} from {} ({}) dropped",
                    key,
                    incoming.declaring_type(),
                    incoming.origin().name()
                );
            }
        }
    }

    /// Pick the winner between two candidates with the same key and mask.
    pub fn prefer(&self, current: &Candidate, incoming: &Candidate) -> Winner {
        if current.is_root_declared() {
            return Winner::Incoming;
        }
        if incoming.is_root_declared() {
            return Winner::Current;
        }

        match current.override_distance().cmp(&incoming.override_distance()) {
            std::cmp::Ordering::Less => return Winner::Current,
            std::cmp::Ordering::Greater => return Winner::Incoming,
            std::cmp::Ordering::Equal => {}
        }

        if let Some(winner) = self
            .preferences
            .compare(current.declaring_type(), incoming.declaring_type())
        {
            return winner;
        }

        if self
            .walker
            .is_assignable(incoming.declaring_type(), current.declaring_type())
        {
            Winner::Incoming
        } else {
            Winner::Current
        }
    }
}
