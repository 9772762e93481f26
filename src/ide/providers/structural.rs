//! Members implied by AST transform annotations.
//!
//! Groovy's AST transforms generate members at compile time that never appear
//! in the source text:
//!
//! - `@Singleton` adds a static `instance` field and `getInstance()` accessor
//!   (renamed through the `property` attribute).
//! - `@Delegate` on a field exposes every public instance member of the field's
//!   type on the owning class.
//!
//! Delegate targets are not reached by the hierarchy walk of the owner, so this
//! provider looks them up itself: the target type plus one level of its
//! supertypes.

use std::sync::Arc;

use crate::base::constants::{
    DELEGATE_ANNOTATION, OBJECT_TYPE, SINGLETON_ANNOTATION, SINGLETON_DEFAULT_PROPERTY, erasure,
};
use crate::base::{Modifiers, SignatureKey};
use crate::hir::{
    Annotation, DeclKind, Document, MemberDecl, ResolveError, TypeDecl, TypeResolver,
    normalize_type_name,
};
use crate::ide::candidate::{Candidate, Origin};

use super::{
    HostDeclaredProvider, MemberProvider, Members, ProviderQuery, StaticDeclaredProvider,
    capitalize, insert_first,
};

/// Derives synthetic members from transform annotations on source types.
#[derive(Clone)]
pub struct StructuralTransformProvider {
    document: Document,
    types: Arc<dyn TypeResolver>,
    declared: StaticDeclaredProvider,
    host: HostDeclaredProvider,
}

impl StructuralTransformProvider {
    pub fn new(
        document: Document,
        types: Arc<dyn TypeResolver>,
        declared: StaticDeclaredProvider,
        host: HostDeclaredProvider,
    ) -> Self {
        Self {
            document,
            types,
            declared,
            host,
        }
    }

    fn singleton_members(
        &self,
        owner: &TypeDecl,
        singleton: &Annotation,
        query: &ProviderQuery<'_>,
        out: &mut Members,
    ) {
        let property = singleton
            .value("property")
            .filter(|p| !p.is_empty())
            .unwrap_or(SINGLETON_DEFAULT_PROPERTY);

        let field = Candidate::new(
            SignatureKey::field(property),
            owner.name.clone(),
            owner.name.clone(),
            Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::SYNTHETIC,
            Origin::StructuralTransform,
            query.distance,
        );
        let accessor = Candidate::new(
            SignatureKey::method(format!("get{}", capitalize(property)), Vec::<&str>::new()),
            owner.name.clone(),
            owner.name.clone(),
            Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::SYNTHETIC,
            Origin::StructuralTransform,
            query.distance,
        );

        for candidate in [field, accessor] {
            if query.accepts(candidate.name(), candidate.modifiers()) {
                insert_first(out, candidate);
            }
        }
    }

    /// The delegate target followed by its direct supertypes.
    fn delegate_levels(&self, target: &str) -> Vec<Arc<str>> {
        let mut levels: Vec<Arc<str>> = vec![Arc::from(target)];
        if let Some(info) = self.types.type_info(target) {
            levels.extend(info.superclass.iter().map(|s| Arc::from(erasure(s))));
            levels.extend(info.interfaces.iter().map(|i| Arc::from(erasure(i))));
        }
        levels.retain(|level| level.as_ref() != OBJECT_TYPE);
        levels.dedup();
        levels
    }

    fn delegate_members(
        &self,
        owner: &Arc<str>,
        field: &MemberDecl,
        query: &ProviderQuery<'_>,
        out: &mut Members,
    ) {
        let target = normalize_type_name(&field.type_name);
        let sources: [&dyn MemberProvider; 2] = [&self.declared, &self.host];

        for level in self.delegate_levels(target) {
            let level_query = ProviderQuery {
                type_name: &level,
                prefix: query.prefix,
                static_only: false,
                case_sensitive: query.case_sensitive,
                distance: query.distance,
                host_deadline: query.host_deadline,
                cancel: query.cancel,
            };
            for source in sources {
                match source.query(&level_query) {
                    Ok(found) => {
                        for candidate in found.into_values() {
                            if !candidate.modifiers().is_public() || candidate.is_static() {
                                continue;
                            }
                            insert_first(
                                out,
                                candidate.delegated(owner.clone(), Origin::StructuralTransform),
                            );
                        }
                    }
                    Err(err) => {
                        tracing::debug!(
                            "[STRUCTURAL] delegate '{}' of '{}' skipped {}: {}",
                            field.name,
                            owner,
                            level,
                            err
                        );
                    }
                }
            }
        }
    }
}

impl MemberProvider for StructuralTransformProvider {
    fn origin(&self) -> Origin {
        Origin::StructuralTransform
    }

    fn query(&self, query: &ProviderQuery<'_>) -> Result<Members, ResolveError> {
        let owner = {
            let unit = self.document.snapshot();
            match unit.type_decl(query.type_name) {
                Some(decl) => decl.clone(),
                None => return Ok(Members::new()),
            }
        };

        let mut members = Members::new();
        if let Some(singleton) = owner.annotation(SINGLETON_ANNOTATION) {
            self.singleton_members(&owner, singleton, query, &mut members);
        }

        // Delegated members are instance members.
        if !query.static_only {
            let delegates = owner.members.iter().filter(|m| {
                m.kind != DeclKind::Method && m.has_annotation(DELEGATE_ANNOTATION)
            });
            for field in delegates {
                if query.cancel.is_cancelled() {
                    return Err(ResolveError::Cancelled);
                }
                self.delegate_members(&owner.name, field, query, &mut members);
            }
        }

        Ok(members)
    }
}

impl std::fmt::Debug for StructuralTransformProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuralTransformProvider")
            .field("declared", &self.declared)
            .field("host", &self.host)
            .finish()
    }
}
