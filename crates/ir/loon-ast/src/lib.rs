//! Abstract syntax tree for the Python-like source language
//!
//! # Architecture
//!
//! Nodes live in per-module arenas and reference each other through plain
//! [`ExprId`]/[`StmtId`] handles, so the tree is acyclic by construction and
//! cheap to walk. Each node carries the [`Span`] reported by the parser.
//!
//! The enums deliberately cover more of the source grammar than the Luau
//! emitter translates: kinds such as [`Stmt::Import`] or the bit-shift
//! operators are representable so that any parser output can be modeled, and
//! the emitter answers them with a typed unsupported-construct error instead
//! of failing to represent them at all.
//!
//! # Usage
//!
//! ```
//! use loon_ast::{Expr, ModuleBuilder, Stmt};
//! use loon_span::Span;
//!
//! let mut builder = ModuleBuilder::new();
//! let name = builder.intern("x");
//! let value = builder.alloc_expr(Expr::Int { value: 5, span: Span::on_line(1) });
//! let target = builder.alloc_expr(Expr::Name { id: name, span: Span::on_line(1) });
//! let assign = builder.alloc_stmt(Stmt::Assign {
//!     targets: vec![target],
//!     value,
//!     span: Span::on_line(1),
//! });
//! let module = builder.finish(vec![assign]);
//! assert_eq!(module.body().len(), 1);
//! ```

mod builder;

pub use builder::ModuleBuilder;

use loon_arena::{Arena, Idx};
use loon_intern::{Interner, Symbol};
use loon_span::Span;

/// Handle to an expression in a module's arena.
pub type ExprId = Idx<Expr>;

/// Handle to a statement in a module's arena.
pub type StmtId = Idx<Stmt>;

/// One parsed top-level unit: the node arenas, the ordered top-level
/// statement list, and the interner that owns every identifier in the tree.
#[derive(Debug)]
pub struct Module {
    pub(crate) exprs: Arena<Expr>,
    pub(crate) stmts: Arena<Stmt>,
    pub(crate) body: Vec<StmtId>,
    pub(crate) interner: Interner,
}

impl Module {
    /// The ordered top-level statements.
    #[must_use]
    pub fn body(&self) -> &[StmtId] {
        &self.body
    }

    /// Looks up an expression node.
    #[must_use]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    /// Looks up a statement node.
    #[must_use]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    /// Resolves an interned identifier to its text.
    #[must_use]
    pub fn name(&self, symbol: Symbol) -> &str {
        self.interner.resolve(symbol)
    }

    /// The interner owning every identifier in the tree.
    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A named function definition.
    FunctionDef {
        /// Function name.
        name: Symbol,
        /// Declared parameter names, in order.
        params: Vec<Symbol>,
        /// Body statements, in order.
        body: Vec<StmtId>,
        /// Source span.
        span: Span,
    },
    /// A conditional with an optional alternative.
    If {
        /// Condition expression.
        test: ExprId,
        /// Statements of the `then` arm.
        body: Vec<StmtId>,
        /// Statements of the `else` arm; empty when absent.
        orelse: Vec<StmtId>,
        /// Source span.
        span: Span,
    },
    /// A pre-checked loop.
    While {
        /// Condition expression.
        test: ExprId,
        /// Loop body.
        body: Vec<StmtId>,
        /// Source span.
        span: Span,
    },
    /// Iteration over a collection.
    For {
        /// Loop target (a name in well-formed input).
        target: ExprId,
        /// Iterated expression.
        iter: ExprId,
        /// Loop body.
        body: Vec<StmtId>,
        /// Source span.
        span: Span,
    },
    /// Assignment of one value to one or more targets.
    Assign {
        /// Assignment targets, left of `=`.
        targets: Vec<ExprId>,
        /// Assigned value.
        value: ExprId,
        /// Source span.
        span: Span,
    },
    /// Augmented assignment, `target op= value`.
    AugAssign {
        /// Assignment target.
        target: ExprId,
        /// Combining operator.
        op: Operator,
        /// Right-hand value.
        value: ExprId,
        /// Source span.
        span: Span,
    },
    /// Return, with or without a value.
    Return {
        /// Returned value, if any.
        value: Option<ExprId>,
        /// Source span.
        span: Span,
    },
    /// Deletion of one or more targets.
    Delete {
        /// Deleted targets.
        targets: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// An expression evaluated for effect.
    Expr {
        /// The inner expression.
        value: ExprId,
        /// Source span.
        span: Span,
    },
    /// `pass`, representable but not translatable.
    Pass {
        /// Source span.
        span: Span,
    },
    /// `break`, representable but not translatable.
    Break {
        /// Source span.
        span: Span,
    },
    /// `continue`, representable but not translatable.
    Continue {
        /// Source span.
        span: Span,
    },
    /// An import, representable but not translatable.
    Import {
        /// Imported module names.
        names: Vec<Symbol>,
        /// Source span.
        span: Span,
    },
}

impl Stmt {
    /// The node's source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::FunctionDef { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::For { span, .. }
            | Self::Assign { span, .. }
            | Self::AugAssign { span, .. }
            | Self::Return { span, .. }
            | Self::Delete { span, .. }
            | Self::Expr { span, .. }
            | Self::Pass { span }
            | Self::Break { span }
            | Self::Continue { span }
            | Self::Import { span, .. } => *span,
        }
    }

    /// The node kind's display name, used in annotations and diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::FunctionDef { .. } => "FunctionDef",
            Self::If { .. } => "If",
            Self::While { .. } => "While",
            Self::For { .. } => "For",
            Self::Assign { .. } => "Assign",
            Self::AugAssign { .. } => "AugAssign",
            Self::Return { .. } => "Return",
            Self::Delete { .. } => "Delete",
            Self::Expr { .. } => "Expr",
            Self::Pass { .. } => "Pass",
            Self::Break { .. } => "Break",
            Self::Continue { .. } => "Continue",
            Self::Import { .. } => "Import",
        }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An identifier reference.
    Name {
        /// The referenced name.
        id: Symbol,
        /// Source span.
        span: Span,
    },
    /// An integer literal.
    Int {
        /// Literal value.
        value: i64,
        /// Source span.
        span: Span,
    },
    /// A floating-point literal.
    Float {
        /// Literal value.
        value: f64,
        /// Source span.
        span: Span,
    },
    /// A string literal.
    Str {
        /// Literal contents, unquoted.
        value: String,
        /// Source span.
        span: Span,
    },
    /// A chain of `and`/`or` operands.
    BoolOp {
        /// The joining operator.
        op: BoolOperator,
        /// Two or more operands.
        values: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// A named (walrus) expression, `name := value`.
    NamedExpr {
        /// Bound name.
        target: Symbol,
        /// Bound value.
        value: ExprId,
        /// Source span.
        span: Span,
    },
    /// A binary arithmetic expression.
    BinOp {
        /// Left operand.
        left: ExprId,
        /// Operator.
        op: Operator,
        /// Right operand.
        right: ExprId,
        /// Source span.
        span: Span,
    },
    /// A unary expression.
    UnaryOp {
        /// Operator.
        op: UnaryOperator,
        /// Operand.
        operand: ExprId,
        /// Source span.
        span: Span,
    },
    /// An anonymous single-expression function.
    Lambda {
        /// Declared parameter names, in order.
        params: Vec<Symbol>,
        /// The body expression.
        body: ExprId,
        /// Source span.
        span: Span,
    },
    /// A conditional expression, `body if test else orelse`.
    IfExp {
        /// Condition.
        test: ExprId,
        /// Value when the condition holds.
        body: ExprId,
        /// Value otherwise.
        orelse: ExprId,
        /// Source span.
        span: Span,
    },
    /// A dictionary literal.
    Dict {
        /// Keys, paired with `values` by index.
        keys: Vec<ExprId>,
        /// Values, paired with `keys` by index.
        values: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// A set literal.
    Set {
        /// Elements, in order.
        elts: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// An awaited expression; translated as a passthrough.
    Await {
        /// The awaited inner expression.
        value: ExprId,
        /// Source span.
        span: Span,
    },
    /// A yield. `None` models a value-less `yield`.
    Yield {
        /// Yielded value, if any.
        value: Option<ExprId>,
        /// Source span.
        span: Span,
    },
    /// A comparison chain, `left op0 comparators[0] op1 comparators[1] ...`.
    Compare {
        /// Leftmost operand.
        left: ExprId,
        /// Operators, paired with `comparators` by index.
        ops: Vec<CmpOperator>,
        /// Right-hand operands.
        comparators: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// A call.
    Call {
        /// Callee expression.
        func: ExprId,
        /// Positional arguments, in order.
        args: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// Attribute access, `value.attr`.
    Attribute {
        /// Receiver expression.
        value: ExprId,
        /// Attribute name.
        attr: Symbol,
        /// Source span.
        span: Span,
    },
    /// Subscript access, `value[index]`.
    Subscript {
        /// Receiver expression.
        value: ExprId,
        /// Index expression.
        index: ExprId,
        /// Source span.
        span: Span,
    },
    /// A list literal.
    List {
        /// Elements, in order.
        elts: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// A tuple expression. Participates in call-shape discrimination but has
    /// no renderer of its own.
    Tuple {
        /// Elements, in order.
        elts: Vec<ExprId>,
        /// Source span.
        span: Span,
    },
    /// A starred (spread) expression.
    Starred {
        /// The spread inner expression.
        value: ExprId,
        /// Source span.
        span: Span,
    },
    /// A list comprehension.
    ListComp {
        /// Element expression.
        elt: ExprId,
        /// Generator clauses, in source order.
        generators: Vec<Comprehension>,
        /// Source span.
        span: Span,
    },
    /// A generator expression.
    GeneratorExp {
        /// Element expression.
        elt: ExprId,
        /// Generator clauses, in source order.
        generators: Vec<Comprehension>,
        /// Source span.
        span: Span,
    },
    /// A slice, `lower:upper:step`, representable but not translatable.
    Slice {
        /// Lower bound, if any.
        lower: Option<ExprId>,
        /// Upper bound, if any.
        upper: Option<ExprId>,
        /// Step, if any.
        step: Option<ExprId>,
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// The node's source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Name { span, .. }
            | Self::Int { span, .. }
            | Self::Float { span, .. }
            | Self::Str { span, .. }
            | Self::BoolOp { span, .. }
            | Self::NamedExpr { span, .. }
            | Self::BinOp { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::Lambda { span, .. }
            | Self::IfExp { span, .. }
            | Self::Dict { span, .. }
            | Self::Set { span, .. }
            | Self::Await { span, .. }
            | Self::Yield { span, .. }
            | Self::Compare { span, .. }
            | Self::Call { span, .. }
            | Self::Attribute { span, .. }
            | Self::Subscript { span, .. }
            | Self::List { span, .. }
            | Self::Tuple { span, .. }
            | Self::Starred { span, .. }
            | Self::ListComp { span, .. }
            | Self::GeneratorExp { span, .. }
            | Self::Slice { span, .. } => *span,
        }
    }

    /// The node kind's display name, used in annotations and diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Name { .. } => "Name",
            Self::Int { .. } => "Int",
            Self::Float { .. } => "Float",
            Self::Str { .. } => "Str",
            Self::BoolOp { .. } => "BoolOp",
            Self::NamedExpr { .. } => "NamedExpr",
            Self::BinOp { .. } => "BinOp",
            Self::UnaryOp { .. } => "UnaryOp",
            Self::Lambda { .. } => "Lambda",
            Self::IfExp { .. } => "IfExp",
            Self::Dict { .. } => "Dict",
            Self::Set { .. } => "Set",
            Self::Await { .. } => "Await",
            Self::Yield { .. } => "Yield",
            Self::Compare { .. } => "Compare",
            Self::Call { .. } => "Call",
            Self::Attribute { .. } => "Attribute",
            Self::Subscript { .. } => "Subscript",
            Self::List { .. } => "List",
            Self::Tuple { .. } => "Tuple",
            Self::Starred { .. } => "Starred",
            Self::ListComp { .. } => "ListComp",
            Self::GeneratorExp { .. } => "GeneratorExp",
            Self::Slice { .. } => "Slice",
        }
    }
}

/// One `for target in iter if ...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    /// Iteration target.
    pub target: ExprId,
    /// Iterated expression.
    pub iter: ExprId,
    /// Filter conditions; all must hold for the clause to produce a value.
    pub ifs: Vec<ExprId>,
}

/// Binary arithmetic operators of the source grammar.
///
/// The emitter maps `Add`..`Pow`; the remaining kinds have no Luau rendering
/// and produce an unsupported-operator error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mult,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `<<`
    LShift,
    /// `>>`
    RShift,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `@`
    MatMult,
}

impl Operator {
    /// The operator kind's display name.
    #[must_use]
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mult => "Mult",
            Self::Div => "Div",
            Self::FloorDiv => "FloorDiv",
            Self::Mod => "Mod",
            Self::Pow => "Pow",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
            Self::BitOr => "BitOr",
            Self::BitXor => "BitXor",
            Self::BitAnd => "BitAnd",
            Self::MatMult => "MatMult",
        }
    }
}

/// Unary operators of the source grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+x`
    UAdd,
    /// `-x`
    USub,
    /// `not x`
    Not,
    /// `~x`; rendered like `not` (no bitwise complement in the target mapping).
    Invert,
}

impl UnaryOperator {
    /// The operator kind's display name.
    #[must_use]
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::UAdd => "UAdd",
            Self::USub => "USub",
            Self::Not => "Not",
            Self::Invert => "Invert",
        }
    }
}

/// Boolean joining operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl BoolOperator {
    /// The operator kind's display name.
    #[must_use]
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

/// Comparison operators.
///
/// `Is`/`IsNot` are rendered as value equality, a deliberate approximation
/// of identity semantics; Luau has no identity operator for plain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOperator {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtE,
    /// `>`
    Gt,
    /// `>=`
    GtE,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `in`
    In,
    /// `not in`
    NotIn,
}

impl CmpOperator {
    /// The operator kind's display name.
    #[must_use]
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::Eq => "Eq",
            Self::NotEq => "NotEq",
            Self::Lt => "Lt",
            Self::LtE => "LtE",
            Self::Gt => "Gt",
            Self::GtE => "GtE",
            Self::Is => "Is",
            Self::IsNot => "IsNot",
            Self::In => "In",
            Self::NotIn => "NotIn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_round_trips_nodes() {
        let mut builder = ModuleBuilder::new();
        let x = builder.intern("x");
        let value = builder.alloc_expr(Expr::Int {
            value: 3,
            span: Span::on_line(1),
        });
        let target = builder.alloc_expr(Expr::Name {
            id: x,
            span: Span::on_line(1),
        });
        let assign = builder.alloc_stmt(Stmt::Assign {
            targets: vec![target],
            value,
            span: Span::on_line(1),
        });
        let module = builder.finish(vec![assign]);

        assert_eq!(module.body(), &[assign]);
        assert_eq!(module.stmt(assign).kind_name(), "Assign");
        match module.expr(target) {
            Expr::Name { id, .. } => assert_eq!(module.name(*id), "x"),
            other => panic!("expected a name, got {other:?}"),
        }
    }

    #[test]
    fn test_spans_survive_allocation() {
        let mut builder = ModuleBuilder::new();
        let lit = builder.alloc_expr(Expr::Int {
            value: 1,
            span: Span::on_line(9),
        });
        let stmt = builder.alloc_stmt(Stmt::Expr {
            value: lit,
            span: Span::on_line(9),
        });
        let module = builder.finish(vec![stmt]);
        assert_eq!(module.stmt(stmt).span().line(), 9);
        assert_eq!(module.expr(lit).span().line(), 9);
    }
}
