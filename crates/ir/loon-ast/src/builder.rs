//! Incremental module construction
//!
//! Stand-in for the front half of a parser: callers intern identifiers,
//! allocate nodes bottom-up, then seal the module with its top-level
//! statement order.

use crate::{Expr, ExprId, Module, Stmt, StmtId};
use loon_arena::Arena;
use loon_intern::{Interner, Symbol};

/// Builds one [`Module`] node by node.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    exprs: Arena<Expr>,
    stmts: Arena<Stmt>,
    interner: Interner,
}

impl ModuleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns an identifier for use in nodes.
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// Allocates an expression node.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.exprs.alloc(expr)
    }

    /// Allocates a statement node.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.stmts.alloc(stmt)
    }

    /// Seals the module with its top-level statements.
    #[must_use]
    pub fn finish(self, body: Vec<StmtId>) -> Module {
        Module {
            exprs: self.exprs,
            stmts: self.stmts,
            body,
            interner: self.interner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loon_span::Span;

    #[test]
    fn test_builder_allocates_sequential_ids() {
        let mut builder = ModuleBuilder::new();
        let first = builder.alloc_expr(Expr::Int {
            value: 1,
            span: Span::on_line(1),
        });
        let second = builder.alloc_expr(Expr::Int {
            value: 2,
            span: Span::on_line(1),
        });
        assert_ne!(first, second);
    }

    #[test]
    fn test_finish_preserves_body_order() {
        let mut builder = ModuleBuilder::new();
        let one = builder.alloc_expr(Expr::Int {
            value: 1,
            span: Span::on_line(1),
        });
        let two = builder.alloc_expr(Expr::Int {
            value: 2,
            span: Span::on_line(2),
        });
        let first = builder.alloc_stmt(Stmt::Expr {
            value: one,
            span: Span::on_line(1),
        });
        let second = builder.alloc_stmt(Stmt::Expr {
            value: two,
            span: Span::on_line(2),
        });
        let module = builder.finish(vec![first, second]);
        assert_eq!(module.body(), &[first, second]);
    }
}
