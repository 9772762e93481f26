//! Declaration model shared by every knowledge source.
//!
//! Parsed Groovy classes, compiled host classes and runtime metaclass entries
//! are all described with these types, so providers differ only in where the
//! declarations come from.

use std::sync::Arc;

use crate::base::Modifiers;
use crate::base::constants::simple_name;

use super::types::TypeInfo;

/// Kind of a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Trait,
}

impl TypeKind {
    pub fn is_interface_like(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Trait)
    }
}

/// Kind of a member declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Method,
    Field,
    /// Groovy property: a field without an explicit access modifier, which the
    /// compiler expands into a backing field plus accessors.
    Property,
}

/// An annotation attached to a type or member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation type name as written (simple or qualified).
    pub name: Arc<str>,
    /// Attribute name/value pairs as source text.
    pub values: Vec<(Arc<str>, Arc<str>)>,
}

impl Annotation {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Whether this annotation names `qualified`, written either qualified or
    /// by its simple name.
    pub fn is(&self, qualified: &str) -> bool {
        self.name.as_ref() == qualified || self.name.as_ref() == simple_name(qualified)
    }

    /// Attribute value with surrounding quotes removed.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.trim_matches(|c| c == '"' || c == '\''))
    }
}

/// A declared method, field or property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: Arc<str>,
    pub kind: DeclKind,
    /// Return type for methods, value type for fields and properties.
    pub type_name: Arc<str>,
    /// Parameter types in declaration order (methods only).
    pub parameters: Vec<Arc<str>>,
    /// Parameter names, when known. Same length as `parameters` or empty.
    pub parameter_names: Vec<Arc<str>>,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
}

impl MemberDecl {
    /// A public method.
    pub fn method<I, S>(name: impl Into<Arc<str>>, return_type: impl Into<Arc<str>>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            kind: DeclKind::Method,
            type_name: return_type.into(),
            parameters: params.into_iter().map(Into::into).collect(),
            parameter_names: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            annotations: Vec::new(),
        }
    }

    /// A public field.
    pub fn field(name: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: DeclKind::Field,
            type_name: type_name.into(),
            parameters: Vec::new(),
            parameter_names: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            annotations: Vec::new(),
        }
    }

    /// A Groovy property (no access modifier written).
    pub fn property(name: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: DeclKind::Property,
            type_name: type_name.into(),
            parameters: Vec::new(),
            parameter_names: Vec::new(),
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
        }
    }

    /// Replace the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set parameter names for display.
    pub fn with_parameter_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.parameter_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Attach an annotation.
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn has_annotation(&self, qualified: &str) -> bool {
        self.annotations.iter().any(|a| a.is(qualified))
    }
}

/// A type declaration with its direct supertypes and members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    /// Fully-qualified name.
    pub name: Arc<str>,
    pub kind: TypeKind,
    pub superclass: Option<Arc<str>>,
    /// Implemented interfaces (classes) or extended interfaces (interfaces).
    pub interfaces: Vec<Arc<str>>,
    pub modifiers: Modifiers,
    pub members: Vec<MemberDecl>,
    pub annotations: Vec<Annotation>,
}

impl TypeDecl {
    pub fn new(name: impl Into<Arc<str>>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            members: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn class(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Set the superclass.
    pub fn extends(mut self, superclass: impl Into<Arc<str>>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface.
    pub fn implements(mut self, interface: impl Into<Arc<str>>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a member.
    pub fn member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Attach an annotation.
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotation(&self, qualified: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.is(qualified))
    }

    /// Hierarchy view of this declaration.
    pub fn info(&self) -> TypeInfo {
        TypeInfo {
            name: self.name.clone(),
            kind: self.kind,
            superclass: self.superclass.clone(),
            interfaces: self.interfaces.clone(),
        }
    }
}
