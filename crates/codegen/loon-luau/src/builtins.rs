//! Built-in substitution tables for the `loon` runtime support library
//!
//! Generated modules call into one runtime table, loaded by
//! [`RUNTIME_IMPORT`]. Three kinds of source-level builtins are rewritten to
//! it: attribute calls on container values (`t.append(x)`), plain named
//! builtins (`len`, `range`), and the discriminating constructors whose
//! runtime name depends on the shape of their first argument. `help` is also
//! recognized by name but rewritten structurally rather than by table.

/// Fixed import line loading the runtime support library.
pub const RUNTIME_IMPORT: &str = "local loon = require(game:FindFirstChild(\"loon\", true))\n";

/// Runtime membership test used for `in` / `not in` comparisons.
pub const MEMBERSHIP: &str = "loon.operator_in";

/// Name recognized for doc-string introspection rewriting.
pub const HELP: &str = "help";

/// Hidden parameter appended to functions that carry a doc string.
pub const HELP_PARAMETER: &str = "_loon_help";

/// Marker value the hidden parameter is compared against.
pub const HELP_MARKER: &str = "help";

/// Container family a discriminating builtin resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFamily {
    /// Sequential table
    List,
    /// Keyed table
    Dict,
    /// Set-like table
    Set,
    /// Anything without a literal container shape
    Tuple,
}

impl ContainerFamily {
    /// Suffix appended to a discriminating builtin's runtime name.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            ContainerFamily::List => "list",
            ContainerFamily::Dict => "dict",
            ContainerFamily::Set => "set",
            ContainerFamily::Tuple => "tuple",
        }
    }
}

/// Method-call substitutions, looked up by method name alone.
///
/// The receiver's container family is not statically known, so each method
/// name is bound to one family's runtime entry point and the runtime
/// dispatches from there. The receiver is passed as the first argument.
pub const ATTRIBUTE_BUILTINS: &[(&str, &str)] = &[
    ("append", "loon.append.list"),
    ("setdefault", "loon.setdefault.dict"),
    ("add", "loon.add.set"),
];

/// Plain-name substitutions: the callee is renamed, arguments pass through.
pub const PLAIN_BUILTINS: &[(&str, &str)] = &[("len", "loon.len"), ("range", "loon.range")];

/// Builtins whose runtime name is suffixed by their first argument's shape.
pub const DISCRIMINATING_BUILTINS: &[(&str, &str)] = &[("set", "loon.set"), ("all", "loon.all")];

/// Look up the runtime substitution for a container method name.
#[must_use]
pub fn attribute_builtin(method: &str) -> Option<&'static str> {
    lookup(ATTRIBUTE_BUILTINS, method)
}

/// Look up the runtime substitution for a plain builtin name.
#[must_use]
pub fn plain_builtin(name: &str) -> Option<&'static str> {
    lookup(PLAIN_BUILTINS, name)
}

/// Look up the runtime base name for a discriminating builtin.
#[must_use]
pub fn discriminating_builtin(name: &str) -> Option<&'static str> {
    lookup(DISCRIMINATING_BUILTINS, name)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, substitution)| *substitution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup_spans_all_families() {
        assert_eq!(attribute_builtin("append"), Some("loon.append.list"));
        assert_eq!(attribute_builtin("setdefault"), Some("loon.setdefault.dict"));
        assert_eq!(attribute_builtin("add"), Some("loon.add.set"));
        assert_eq!(attribute_builtin("extend"), None);
    }

    #[test]
    fn test_plain_and_discriminating_lookups_are_disjoint() {
        assert_eq!(plain_builtin("len"), Some("loon.len"));
        assert_eq!(plain_builtin("set"), None);
        assert_eq!(discriminating_builtin("set"), Some("loon.set"));
        assert_eq!(discriminating_builtin("all"), Some("loon.all"));
        assert_eq!(discriminating_builtin("len"), None);
    }

    #[test]
    fn test_family_suffixes() {
        assert_eq!(ContainerFamily::List.suffix(), "list");
        assert_eq!(ContainerFamily::Dict.suffix(), "dict");
        assert_eq!(ContainerFamily::Set.suffix(), "set");
        assert_eq!(ContainerFamily::Tuple.suffix(), "tuple");
    }
}
