//! Well-known type and annotation names.

/// The universal root of every class hierarchy.
pub const OBJECT_TYPE: &str = "java.lang.Object";

/// Primitive type names and the boxed reference types that stand in for them
/// during hierarchy traversal.
pub const BOXED_PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("char", "java.lang.Character"),
    ("short", "java.lang.Short"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
];

/// Default narrower-interface ranking (higher = narrower contract).
pub const DEFAULT_INTERFACE_RANKS: &[(&str, u8)] = &[
    ("java.lang.Iterable", 0),
    ("java.util.Collection", 1),
    ("java.util.Set", 2),
    ("java.util.List", 2),
    ("java.util.Queue", 2),
    ("java.util.SortedSet", 3),
    ("java.util.Deque", 3),
    ("java.util.NavigableSet", 4),
];

/// AST transform marker for singleton classes.
pub const SINGLETON_ANNOTATION: &str = "groovy.lang.Singleton";

/// AST transform marker for delegating fields.
pub const DELEGATE_ANNOTATION: &str = "groovy.lang.Delegate";

/// Default name of the singleton accessor property.
pub const SINGLETON_DEFAULT_PROPERTY: &str = "instance";

/// Returns the boxed reference type for a primitive name, if it is one.
pub fn boxed_type(name: &str) -> Option<&'static str> {
    BOXED_PRIMITIVES
        .iter()
        .find(|(primitive, _)| *primitive == name)
        .map(|(_, boxed)| *boxed)
}

/// Strip generic arguments and array suffixes: `List<String>[]` → `List`.
pub fn erasure(name: &str) -> &str {
    let end = name.find(['<', '[']).unwrap_or(name.len());
    name[..end].trim()
}

/// Drop the package: `java.util.List<java.lang.String>` → `List<java.lang.String>`.
pub fn simple_name(name: &str) -> &str {
    let end = name.find(['<', '[']).unwrap_or(name.len());
    match name[..end].rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => name,
    }
}
