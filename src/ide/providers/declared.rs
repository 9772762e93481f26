//! Members declared in the edited compilation unit.

use crate::hir::{Document, ResolveError};
use crate::ide::candidate::Origin;

use super::{MemberProvider, Members, ProviderQuery, collect_declared};

/// Reads declarations straight from the parsed source of the file being edited.
#[derive(Clone, Debug)]
pub struct StaticDeclaredProvider {
    document: Document,
}

impl StaticDeclaredProvider {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl MemberProvider for StaticDeclaredProvider {
    fn origin(&self) -> Origin {
        Origin::StaticDeclared
    }

    fn query(&self, query: &ProviderQuery<'_>) -> Result<Members, ResolveError> {
        let unit = self.document.snapshot();
        let Some(decl) = unit.type_decl(query.type_name) else {
            return Ok(Members::new());
        };
        Ok(collect_declared(
            &decl.members,
            &decl.name,
            Origin::StaticDeclared,
            query,
        ))
    }
}
