//! Luau source generation for Loon modules
//!
//! The entry point is [`Session`]: it owns the emission options along with
//! the scope tree grown during translation, so callers can inspect the block
//! structure and hoisting decisions after the fact. [`transpile_module`]
//! wraps the common case of translating one module with fresh state.
//!
//! # Usage
//!
//! ```
//! use loon_ast::{Expr, ModuleBuilder, Stmt};
//! use loon_luau::{EmitOptions, Session};
//! use loon_span::Span;
//!
//! let mut builder = ModuleBuilder::new();
//! let x = builder.intern("x");
//! let five = builder.alloc_expr(Expr::Int { value: 5, span: Span::on_line(1) });
//! let target = builder.alloc_expr(Expr::Name { id: x, span: Span::on_line(1) });
//! let assign = builder.alloc_stmt(Stmt::Assign {
//!     targets: vec![target],
//!     value: five,
//!     span: Span::on_line(1),
//! });
//! let module = builder.finish(vec![assign]);
//!
//! let mut session = Session::new(EmitOptions::default());
//! let source = session.translate(&module).unwrap();
//! assert!(source.ends_with("local x = 5\n"));
//! ```

pub mod builtins;
mod codegen;
pub mod error;

pub use error::EmitError;

use codegen::Emitter;
use loon_ast::Module;
use loon_scope::ScopeTree;

/// Output toggles for the debug annotations a translation can carry.
///
/// All toggles default to off, which produces plain runnable Luau.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Prefix every rendered fragment with a `--[[Kind]]` comment naming
    /// the node it came from.
    pub annotate_kinds: bool,
    /// Prefix every rendered fragment with the dotted label of the block
    /// it was rendered in.
    pub annotate_blocks: bool,
    /// Suffix every statement line with a `-- Line N` comment pointing
    /// back at the source line.
    pub line_comments: bool,
}

/// A reusable translation session.
///
/// The session keeps the scope tree of the most recent translation around
/// for inspection; [`Session::translate`] starts from a fresh tree on every
/// call, so no bindings leak from one module into the next.
#[derive(Debug, Default)]
pub struct Session {
    options: EmitOptions,
    scopes: ScopeTree,
}

impl Session {
    /// Create a session with the given options.
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            scopes: ScopeTree::new(),
        }
    }

    /// Translate one module to Luau source text.
    ///
    /// # Errors
    ///
    /// Fails on the first node, operator, or `help` target the emitter has
    /// no rendering for; nothing is returned for partially translated input.
    pub fn translate(&mut self, module: &Module) -> Result<String, EmitError> {
        self.reset();
        Emitter::new(module, &mut self.scopes, &self.options).emit_module()
    }

    /// Drop all state left over from the previous translation.
    pub fn reset(&mut self) {
        self.scopes = ScopeTree::new();
    }

    /// The scope tree built by the most recent [`Session::translate`] call.
    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }
}

/// Translate a module with a one-off [`Session`].
///
/// # Errors
///
/// See [`Session::translate`].
pub fn transpile_module(module: &Module, options: EmitOptions) -> Result<String, EmitError> {
    Session::new(options).translate(module)
}
