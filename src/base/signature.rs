//! Member identity used for deduplication across knowledge sources.

use std::fmt;

use smol_str::SmolStr;

use super::Modifiers;

/// Whether a member is invoked or read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Method,
    Field,
}

impl MemberKind {
    pub fn display(&self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Field => "field",
        }
    }
}

/// Identity of a member: name, kind and ordered parameter types.
///
/// Two candidates with equal keys are the same logical member regardless of
/// which source reported them. The optional variant tag carries the masked
/// modifiers of a member that shares its shape with a differently-modified one
/// (a static and an instance `foo()` on the same receiver).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureKey {
    name: SmolStr,
    kind: MemberKind,
    parameter_types: Vec<SmolStr>,
    variant: Option<Modifiers>,
}

impl SignatureKey {
    /// Key for a method with the given parameter types.
    pub fn method<I, S>(name: impl Into<SmolStr>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
            variant: None,
        }
    }

    /// Key for a field.
    pub fn field(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            parameter_types: Vec::new(),
            variant: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn parameter_types(&self) -> &[SmolStr] {
        &self.parameter_types
    }

    pub fn variant(&self) -> Option<Modifiers> {
        self.variant
    }

    /// The same key tagged with a modifier variant.
    pub fn with_variant(&self, mask: Modifiers) -> Self {
        Self {
            variant: Some(mask),
            ..self.clone()
        }
    }

    /// The key with any variant tag removed.
    pub fn base(&self) -> Self {
        Self {
            variant: None,
            ..self.clone()
        }
    }

    /// Same name, kind and parameters; ignores the variant tag.
    pub fn same_member(&self, other: &SignatureKey) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.parameter_types == other.parameter_types
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Field => write!(f, "{}", self.name)?,
            MemberKind::Method => write!(f, "{}({})", self.name, self.parameter_types.join(", "))?,
        }
        if let Some(variant) = self.variant {
            write!(f, " #{:?}", variant)?;
        }
        Ok(())
    }
}
