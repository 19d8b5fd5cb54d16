//! Failure reporting for translation
//!
//! There is exactly one class of failure: a construct with no Luau
//! rendering. Translation is fail-fast: the first unsupported node aborts
//! the whole module and the caller receives no partial output.

use miette::Diagnostic;
use thiserror::Error;

/// Translation error, fatal to the module being emitted
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum EmitError {
    /// Statement kind with no renderer
    #[error("unsupported statement `{kind}` on line {line}")]
    #[diagnostic(
        code(emit::unsupported_statement),
        help("this statement kind has no Luau rendering")
    )]
    UnsupportedStatement {
        /// Name of the offending node kind
        kind: &'static str,
        /// Source line of the statement
        line: u32,
    },

    /// Expression kind with no renderer
    #[error("unsupported expression `{kind}` on line {line}")]
    #[diagnostic(
        code(emit::unsupported_expression),
        help("this expression kind has no Luau rendering")
    )]
    UnsupportedExpression {
        /// Name of the offending node kind
        kind: &'static str,
        /// Source line of the expression
        line: u32,
    },

    /// Operator kind with no target-language equivalent
    #[error("unsupported operator `{kind}` on line {line}")]
    #[diagnostic(
        code(emit::unsupported_operator),
        help("this operator has no Luau equivalent")
    )]
    UnsupportedOperator {
        /// Name of the offending operator kind
        kind: &'static str,
        /// Source line of the containing expression
        line: u32,
    },

    /// `help(...)` rewriting could not resolve its target function
    #[error("cannot resolve the target of `help` on line {line}")]
    #[diagnostic(code(emit::unresolved_help_target))]
    UnresolvedHelpTarget {
        /// What went wrong, e.g. the name that failed to resolve
        #[help]
        detail: Option<String>,
        /// Source line of the call
        line: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_kind_and_line() {
        let err = EmitError::UnsupportedStatement {
            kind: "Import",
            line: 4,
        };
        assert_eq!(err.to_string(), "unsupported statement `Import` on line 4");

        let err = EmitError::UnsupportedOperator {
            kind: "BitXor",
            line: 12,
        };
        assert_eq!(err.to_string(), "unsupported operator `BitXor` on line 12");
    }

    #[test]
    fn test_help_failure_carries_a_detail() {
        let err = EmitError::UnresolvedHelpTarget {
            detail: Some("no function named `f` is defined in the enclosing block".to_string()),
            line: 2,
        };
        assert_eq!(err.to_string(), "cannot resolve the target of `help` on line 2");
        match err {
            EmitError::UnresolvedHelpTarget { detail, .. } => {
                assert!(detail.is_some_and(|text| text.contains("`f`")));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
