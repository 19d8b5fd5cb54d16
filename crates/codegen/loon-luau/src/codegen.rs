//! Luau source generation from the input tree
//!
//! One emitter instance translates one module in a single recursive descent.
//! Statements are rendered through [`Emitter::emit_line`], which applies the
//! block's indentation and the optional line-number comment; every renderer
//! prefixes its fragment with the optional kind/block annotations. The scope
//! tree is grown as the descent enters nested bodies and consulted again when
//! function renderers emit their hoisted declarations.

use crate::EmitOptions;
use crate::builtins::{self, ContainerFamily, HELP, HELP_MARKER, HELP_PARAMETER, MEMBERSHIP, RUNTIME_IMPORT};
use crate::error::EmitError;
use loon_ast::{BoolOperator, CmpOperator, Comprehension, Expr, ExprId, Module, Operator, Stmt, StmtId, UnaryOperator};
use loon_intern::Symbol;
use loon_scope::{BlockId, BlockKind, Placement, ScopeTree};

/// Internal emitter that borrows the session's scope tree for one module
pub(crate) struct Emitter<'a> {
    module: &'a Module,
    scopes: &'a mut ScopeTree,
    options: &'a EmitOptions,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(module: &'a Module, scopes: &'a mut ScopeTree, options: &'a EmitOptions) -> Self {
        Self {
            module,
            scopes,
            options,
        }
    }

    /// Emit the whole module: the runtime import line, a blank line, then
    /// the translated top-level statements.
    pub(crate) fn emit_module(&mut self) -> Result<String, EmitError> {
        let mut out = String::from(RUNTIME_IMPORT);
        out.push('\n');
        let root = self.scopes.root();
        let body = self.module.body();
        out.push_str(&self.emit_lines(body, root)?);
        Ok(out)
    }

    fn emit_lines(&mut self, stmts: &[StmtId], block: BlockId) -> Result<String, EmitError> {
        let mut out = String::new();
        for &stmt in stmts {
            out.push_str(&self.emit_line(stmt, block)?);
        }
        Ok(out)
    }

    /// Render one statement as a full line: indentation, the statement's
    /// fragment, and either a newline or the line-number comment.
    fn emit_line(&mut self, stmt: StmtId, block: BlockId) -> Result<String, EmitError> {
        let rendered = self.emit_stmt(stmt, block)?;
        let mut out = self.scopes.indent(block, 0);
        out.push_str(&rendered);
        if self.options.line_comments {
            let line = self.module.stmt(stmt).span().line();
            out.push_str(&format!(" -- Line {line}\n"));
        } else {
            out.push('\n');
        }
        Ok(out)
    }

    /// Optional `--[[Kind]]` / `--[[ BlockId: 0.1]]` prefix of a fragment.
    fn annotation(&self, kind: &str, block: BlockId) -> String {
        let mut prefix = String::new();
        if self.options.annotate_kinds {
            prefix.push_str(&format!("--[[{kind}]]"));
        }
        if self.options.annotate_blocks {
            prefix.push_str(&format!("--[[ BlockId: {}]]", self.scopes.block_label(block)));
        }
        prefix
    }

    fn emit_stmt(&mut self, stmt: StmtId, block: BlockId) -> Result<String, EmitError> {
        let node = self.module.stmt(stmt);
        match node {
            Stmt::FunctionDef {
                name, params, body, ..
            } => self.emit_function(stmt, *name, params, body, block),
            Stmt::If {
                test, body, orelse, ..
            } => self.emit_if(*test, body, orelse, block),
            Stmt::While { test, body, .. } => self.emit_while(*test, body, block),
            Stmt::For {
                target, iter, body, ..
            } => self.emit_for(*target, *iter, body, block),
            Stmt::Assign { targets, value, .. } => self.emit_assign(targets, *value, block),
            Stmt::AugAssign {
                target,
                op,
                value,
                span,
            } => self.emit_aug_assign(*target, *op, *value, span.line(), block),
            Stmt::Return { value, .. } => self.emit_return(*value, block),
            Stmt::Delete { targets, .. } => self.emit_delete(targets, block),
            Stmt::Expr { value, .. } => {
                let mut out = self.annotation("Expr", block);
                out.push_str(&self.emit_expr(*value, block)?);
                Ok(out)
            }
            Stmt::Pass { .. } | Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Import { .. } => {
                Err(EmitError::UnsupportedStatement {
                    kind: node.kind_name(),
                    line: node.span().line(),
                })
            }
        }
    }

    fn emit_function(
        &mut self,
        stmt: StmtId,
        name: Symbol,
        params: &[Symbol],
        body: &[StmtId],
        block: BlockId,
    ) -> Result<String, EmitError> {
        let mut header = format!("function {}(", self.module.name(name));
        for (index, &param) in params.iter().enumerate() {
            if index > 0 {
                header.push_str(", ");
            }
            header.push_str(self.module.name(param));
        }
        header.push(')');

        let function_block = self.scopes.create_child(block, BlockKind::Function, Some(stmt));

        // A leading string-literal statement is the doc string; it moves
        // into the introspection guard instead of the body.
        let mut body_stmts = body;
        let mut doc = None;
        if let Some((&first, rest)) = body.split_first() {
            if let Stmt::Expr { value, .. } = self.module.stmt(first) {
                if let Expr::Str { value: text, .. } = self.module.expr(*value) {
                    doc = Some(text.as_str());
                    body_stmts = rest;
                }
            }
        }

        if doc.is_some() {
            header.pop();
            if !params.is_empty() {
                header.push_str(", ");
            }
            header.push_str(HELP_PARAMETER);
            header.push(')');
        }

        let rendered_body = self.emit_lines(body_stmts, function_block)?;

        let mut out = self.annotation("FunctionDef", block);
        out.push_str(&header);
        out.push('\n');

        let body_indent = self.scopes.indent(function_block, 0);

        if let Some(text) = doc {
            out.push_str(&body_indent);
            out.push_str(&format!(
                "if {HELP_PARAMETER} == \"{HELP_MARKER}\" then return {} end\n",
                quote_string(text)
            ));
        }

        // Hoisted declarations in first-assignment order. The reserved
        // accumulator starts as an empty table and is returned at exit.
        let accumulator = self.module.interner().accumulator();
        let mut has_yield = false;
        for &hoisted in self.scopes.block(function_block).hoisted() {
            let initializer = if hoisted == accumulator {
                has_yield = true;
                "{}"
            } else {
                "nil"
            };
            out.push_str(&body_indent);
            out.push_str(&format!("local {} = {initializer};\n", self.module.name(hoisted)));
        }

        out.push_str(&rendered_body);

        if has_yield {
            out.push_str(&body_indent);
            out.push_str("return yield\n");
        }

        out.push_str(&self.scopes.indent(block, -1));
        out.push_str("end\n");
        Ok(out)
    }

    fn emit_if(
        &mut self,
        test: ExprId,
        body: &[StmtId],
        orelse: &[StmtId],
        block: BlockId,
    ) -> Result<String, EmitError> {
        let mut out = self.annotation("If", block);
        out.push_str("if ");
        out.push_str(&self.emit_expr(test, block)?);
        out.push_str(" then\n");

        let then_block = self.scopes.create_child(block, BlockKind::If, None);
        out.push_str(&self.emit_lines(body, then_block)?);

        if !orelse.is_empty() {
            out.push_str(&self.scopes.indent(block, 0));
            out.push_str("else\n");
            let else_block = self.scopes.create_child(block, BlockKind::Else, None);
            out.push_str(&self.emit_lines(orelse, else_block)?);
        }

        out.push_str(&self.scopes.indent(block, 0));
        out.push_str("end\n");
        Ok(out)
    }

    fn emit_while(&mut self, test: ExprId, body: &[StmtId], block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("While", block);
        out.push_str("while ");
        out.push_str(&self.emit_expr(test, block)?);
        out.push_str(" do\n");

        let loop_block = self.scopes.create_child(block, BlockKind::While, None);
        out.push_str(&self.emit_lines(body, loop_block)?);

        out.push_str(&self.scopes.indent(block, 0));
        out.push_str("end");
        Ok(out)
    }

    fn emit_for(
        &mut self,
        target: ExprId,
        iter: ExprId,
        body: &[StmtId],
        block: BlockId,
    ) -> Result<String, EmitError> {
        let mut out = self.annotation("For", block);
        out.push_str("for _,");
        out.push_str(&self.emit_expr(target, block)?);
        out.push_str(" in ");
        out.push_str(&self.emit_expr(iter, block)?);
        out.push_str(" do\n");

        // The loop target stays undeclared; it is scoped to the loop header.
        let loop_block = self.scopes.create_child(block, BlockKind::For, None);
        out.push_str(&self.emit_lines(body, loop_block)?);

        out.push_str(&self.scopes.indent(loop_block, -1));
        out.push_str("end\n");
        Ok(out)
    }

    fn emit_assign(&mut self, targets: &[ExprId], value: ExprId, block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("Assign", block);

        // Only simple names participate in declaration tracking; the last
        // name target's classification decides the `local` keyword.
        let mut rendered = Vec::with_capacity(targets.len());
        let mut placement = None;
        for &target in targets {
            rendered.push(self.emit_expr(target, block)?);
            if let Expr::Name { id, .. } = self.module.expr(target) {
                placement = self.scopes.declare(block, *id);
            }
        }

        if placement == Some(Placement::Surface) {
            out.push_str("local ");
        }
        out.push_str(&rendered.join(", "));
        out.push_str(" = ");
        out.push_str(&self.emit_expr(value, block)?);
        Ok(out)
    }

    fn emit_aug_assign(
        &mut self,
        target: ExprId,
        op: Operator,
        value: ExprId,
        line: u32,
        block: BlockId,
    ) -> Result<String, EmitError> {
        let mut out = self.annotation("AugAssign", block);
        let target = self.emit_expr(target, block)?;
        let operator = self.operator_token(op, line, block)?;
        let value = self.emit_expr(value, block)?;
        out.push_str(&format!("{target} = {target} {operator} {value}"));
        Ok(out)
    }

    fn emit_return(&mut self, value: Option<ExprId>, block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("Return", block);
        match value {
            Some(value) => {
                out.push_str("return ");
                out.push_str(&self.emit_expr(value, block)?);
            }
            None => out.push_str("return"),
        }
        Ok(out)
    }

    /// Deletion maps to a multiple assignment of `nil`.
    fn emit_delete(&mut self, targets: &[ExprId], block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("Delete", block);
        let mut rendered = Vec::with_capacity(targets.len());
        for &target in targets {
            rendered.push(self.emit_expr(target, block)?);
        }
        out.push_str(&rendered.join(", "));
        out.push_str(" = ");
        out.push_str(&vec!["nil"; rendered.len()].join(", "));
        Ok(out)
    }

    fn emit_expr(&mut self, expr: ExprId, block: BlockId) -> Result<String, EmitError> {
        let node = self.module.expr(expr);
        let line = node.span().line();
        match node {
            Expr::Name { id, .. } => {
                let mut out = self.annotation("Name", block);
                out.push_str(self.module.name(*id));
                Ok(out)
            }
            Expr::Int { value, .. } => Ok(format!("{}{value}", self.annotation("Int", block))),
            // Debug formatting keeps a fractional or exponent part on every
            // float, which Luau reads back as a number either way.
            Expr::Float { value, .. } => Ok(format!("{}{value:?}", self.annotation("Float", block))),
            Expr::Str { value, .. } => {
                Ok(format!("{}{}", self.annotation("Str", block), quote_string(value)))
            }
            Expr::BoolOp { op, values, .. } => self.emit_bool_op(*op, values, block),
            Expr::NamedExpr { target, value, .. } => {
                let mut out = self.annotation("NamedExpr", block);
                out.push_str(self.module.name(*target));
                out.push_str(" = ");
                out.push_str(&self.emit_expr(*value, block)?);
                Ok(out)
            }
            Expr::BinOp {
                left, op, right, ..
            } => {
                let mut out = self.annotation("BinOp", block);
                out.push_str(&self.emit_expr(*left, block)?);
                out.push_str(&self.operator_token(*op, line, block)?);
                out.push_str(&self.emit_expr(*right, block)?);
                Ok(out)
            }
            Expr::UnaryOp { op, operand, .. } => {
                let mut out = self.annotation("UnaryOp", block);
                out.push_str(unary_token(*op));
                out.push_str(&self.emit_expr(*operand, block)?);
                Ok(out)
            }
            Expr::Lambda { params, body, .. } => self.emit_lambda(params, *body, block),
            Expr::IfExp {
                test, body, orelse, ..
            } => {
                let mut out = self.annotation("IfExp", block);
                out.push_str("if ");
                out.push_str(&self.emit_expr(*test, block)?);
                out.push_str(" then ");
                out.push_str(&self.emit_expr(*body, block)?);
                out.push_str(" else ");
                out.push_str(&self.emit_expr(*orelse, block)?);
                Ok(out)
            }
            Expr::Dict { keys, values, .. } => self.emit_dict(keys, values, block),
            Expr::Set { elts, .. } => self.emit_table("Set", elts, block),
            Expr::List { elts, .. } => self.emit_table("List", elts, block),
            Expr::Await { value, .. } => {
                let mut out = self.annotation("Await", block);
                out.push_str(&self.emit_expr(*value, block)?);
                Ok(out)
            }
            Expr::Yield { value, .. } => self.emit_yield(*value, line, block),
            Expr::Compare {
                left,
                ops,
                comparators,
                ..
            } => self.emit_compare(*left, ops, comparators, block),
            Expr::Call { func, args, .. } => self.emit_call(*func, args, line, block),
            Expr::Attribute { value, attr, .. } => {
                let mut out = self.annotation("Attribute", block);
                out.push_str(&self.emit_expr(*value, block)?);
                out.push('.');
                out.push_str(self.module.name(*attr));
                Ok(out)
            }
            Expr::Subscript { value, index, .. } => {
                let mut out = self.annotation("Subscript", block);
                out.push_str(&self.emit_expr(*value, block)?);
                out.push('[');
                out.push_str(&self.emit_expr(*index, block)?);
                out.push(']');
                Ok(out)
            }
            Expr::Starred { value, .. } => {
                let mut out = self.annotation("Starred", block);
                out.push_str("--[[*]]");
                out.push_str(&self.emit_expr(*value, block)?);
                Ok(out)
            }
            Expr::ListComp { elt, generators, .. } => {
                self.emit_comprehension("ListComp", *elt, generators, block)
            }
            Expr::GeneratorExp { elt, generators, .. } => {
                self.emit_comprehension("GeneratorExp", *elt, generators, block)
            }
            Expr::Tuple { .. } | Expr::Slice { .. } => Err(EmitError::UnsupportedExpression {
                kind: node.kind_name(),
                line,
            }),
        }
    }

    fn emit_bool_op(&mut self, op: BoolOperator, values: &[ExprId], block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("BoolOp", block);
        let joiner = match op {
            BoolOperator::And => " and ",
            BoolOperator::Or => " or ",
        };
        for (index, &value) in values.iter().enumerate() {
            if index > 0 {
                out.push_str(joiner);
            }
            out.push_str(&self.emit_expr(value, block)?);
        }
        Ok(out)
    }

    fn emit_lambda(&mut self, params: &[Symbol], body: ExprId, block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("Lambda", block);
        out.push_str("function (");
        for (index, &param) in params.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(self.module.name(param));
        }
        out.push(')');

        let lambda_block = self.scopes.create_child(block, BlockKind::Lambda, None);
        out.push_str(" return ");
        out.push_str(&self.emit_expr(body, lambda_block)?);
        out.push_str(" end");
        Ok(out)
    }

    fn emit_dict(&mut self, keys: &[ExprId], values: &[ExprId], block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("Dict", block);
        out.push('{');
        for (index, (&key, &value)) in keys.iter().zip(values).enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.emit_expr(key, block)?);
            out.push_str(" = ");
            out.push_str(&self.emit_expr(value, block)?);
        }
        out.push('}');
        Ok(out)
    }

    fn emit_table(&mut self, kind: &str, elts: &[ExprId], block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation(kind, block);
        out.push('{');
        for (index, &elt) in elts.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.emit_expr(elt, block)?);
        }
        out.push('}');
        Ok(out)
    }

    fn emit_yield(&mut self, value: Option<ExprId>, line: u32, block: BlockId) -> Result<String, EmitError> {
        // A value-less yield has no faithful accumulator rendering.
        let Some(value) = value else {
            return Err(EmitError::UnsupportedExpression { kind: "Yield", line });
        };
        let accumulator = self.module.interner().accumulator();
        self.scopes.declare_hoisted(block, accumulator);

        let mut out = self.annotation("Yield", block);
        out.push_str("yield[#yield+1] = ");
        out.push_str(&self.emit_expr(value, block)?);
        Ok(out)
    }

    fn emit_compare(
        &mut self,
        left: ExprId,
        ops: &[CmpOperator],
        comparators: &[ExprId],
        block: BlockId,
    ) -> Result<String, EmitError> {
        let mut out = self.annotation("Compare", block);
        // The left operand is re-rendered for every pair; chained
        // comparisons concatenate their segments without separators.
        for (&op, &comparator) in ops.iter().zip(comparators) {
            let left = self.emit_expr(left, block)?;
            let comparator = self.emit_expr(comparator, block)?;
            match op {
                CmpOperator::Eq | CmpOperator::Is => {
                    out.push_str(&format!("{left} == {comparator}"));
                }
                CmpOperator::NotEq | CmpOperator::IsNot => {
                    out.push_str(&format!("{left} ~= {comparator}"));
                }
                CmpOperator::Lt => out.push_str(&format!("{left} < {comparator}")),
                CmpOperator::LtE => out.push_str(&format!("{left} <= {comparator}")),
                CmpOperator::Gt => out.push_str(&format!("{left} > {comparator}")),
                CmpOperator::GtE => out.push_str(&format!("{left} >= {comparator}")),
                CmpOperator::In => {
                    out.push_str(&format!("{MEMBERSHIP}({left}, {comparator})"));
                }
                CmpOperator::NotIn => {
                    out.push_str(&format!("not {MEMBERSHIP}({left}, {comparator})"));
                }
            }
        }
        Ok(out)
    }

    /// Translate a call, substituting recognized builtins: container-method
    /// rewrites first, then named builtins, then the ordinary
    /// callee-plus-arguments form.
    fn emit_call(&mut self, func: ExprId, args: &[ExprId], line: u32, block: BlockId) -> Result<String, EmitError> {
        let mut out = self.annotation("Call", block);

        if let Expr::Attribute { value, attr, .. } = self.module.expr(func) {
            if let Some(substitution) = builtins::attribute_builtin(self.module.name(*attr)) {
                // The receiver becomes the first runtime argument.
                out.push_str(substitution);
                out.push('(');
                out.push_str(&self.emit_expr(*value, block)?);
                for &arg in args {
                    out.push_str(", ");
                    out.push_str(&self.emit_expr(arg, block)?);
                }
                out.push(')');
                return Ok(out);
            }
        }

        if let Expr::Name { id, .. } = self.module.expr(func) {
            let callee = self.module.name(*id);
            if callee == HELP {
                out.push_str(&self.emit_help(args, line, block)?);
                return Ok(out);
            }
            if let Some(base) = builtins::discriminating_builtin(callee) {
                out.push_str(&self.emit_discriminated(base, args, block)?);
                return Ok(out);
            }
            if let Some(substitution) = builtins::plain_builtin(callee) {
                out.push_str(substitution);
                out.push_str(&self.emit_arguments(args, block)?);
                return Ok(out);
            }
        }

        out.push_str(&self.emit_expr(func, block)?);
        out.push_str(&self.emit_arguments(args, block)?);
        Ok(out)
    }

    fn emit_arguments(&mut self, args: &[ExprId], block: BlockId) -> Result<String, EmitError> {
        let mut out = String::from("(");
        for (index, &arg) in args.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.emit_expr(arg, block)?);
        }
        out.push(')');
        Ok(out)
    }

    /// A discriminating builtin is suffixed by its first argument's literal
    /// shape, and only that argument is emitted.
    fn emit_discriminated(&mut self, base: &str, args: &[ExprId], block: BlockId) -> Result<String, EmitError> {
        let Some((&first, _)) = args.split_first() else {
            return Ok(format!("{base}.{}()", ContainerFamily::List.suffix()));
        };
        let family = match self.module.expr(first) {
            Expr::Dict { .. } => ContainerFamily::Dict,
            Expr::Set { .. } => ContainerFamily::Set,
            Expr::List { .. } => ContainerFamily::List,
            _ => ContainerFamily::Tuple,
        };
        let argument = self.emit_expr(first, block)?;
        Ok(format!("{base}.{}({argument})", family.suffix()))
    }

    /// Rewrite `help(f)` to a call of `f` with one `nil` per declared
    /// parameter and the marker string appended.
    fn emit_help(&mut self, args: &[ExprId], line: u32, block: BlockId) -> Result<String, EmitError> {
        let target = args.first().map(|&arg| self.module.expr(arg));
        let Some(Expr::Name { id: name, .. }) = target else {
            return Err(EmitError::UnresolvedHelpTarget {
                detail: Some("`help` expects the name of a function as its only argument".to_string()),
                line,
            });
        };
        let Some(params) = self.function_params(block, *name) else {
            return Err(EmitError::UnresolvedHelpTarget {
                detail: Some(format!(
                    "no function named `{}` is defined in the enclosing block",
                    self.module.name(*name)
                )),
                line,
            });
        };

        let marker = format!("\"{HELP_MARKER}\"");
        let mut arguments: Vec<&str> = vec!["nil"; params.len()];
        arguments.push(&marker);
        Ok(format!("{}({})", self.module.name(*name), arguments.join(", ")))
    }

    /// Find a function defined as a child of `block` by name and return its
    /// declared parameters.
    fn function_params(&self, block: BlockId, name: Symbol) -> Option<&'a [Symbol]> {
        let module = self.module;
        self.scopes.block(block).children().iter().find_map(|&child| {
            let function = self.scopes.block(child).function?;
            match module.stmt(function) {
                Stmt::FunctionDef {
                    name: function_name,
                    params,
                    ..
                } if *function_name == name => Some(params.as_slice()),
                _ => None,
            }
        })
    }

    /// Comprehensions desugar to an immediately-invoked function building a
    /// `result` table. Chained clauses run sequentially and write into the
    /// same table keyed by their own iteration key; no scope block is
    /// created for the desugared body.
    fn emit_comprehension(
        &mut self,
        kind: &str,
        elt: ExprId,
        generators: &[Comprehension],
        block: BlockId,
    ) -> Result<String, EmitError> {
        let mut out = self.annotation(kind, block);
        out.push_str("(function()\n");
        out.push_str(&self.scopes.indent(block, 1));
        out.push_str("local result = {};\n");

        for clause in generators {
            let target = self.emit_expr(clause.target, block)?;
            let iter = self.emit_expr(clause.iter, block)?;
            out.push_str(&self.scopes.indent(block, 1));
            out.push_str(&format!("for k, {target} in pairs({iter}) do\n"));

            if clause.ifs.is_empty() {
                out.push_str(&self.scopes.indent(block, 2));
                out.push_str(&format!("result[k] = {};\n", self.emit_expr(elt, block)?));
            } else {
                let mut conditions = Vec::with_capacity(clause.ifs.len());
                for &condition in &clause.ifs {
                    conditions.push(self.emit_expr(condition, block)?);
                }
                out.push_str(&self.scopes.indent(block, 2));
                out.push_str(&format!("if {} then\n", conditions.join(" and ")));
                // Filtered clauses store the iteration target, not the
                // element expression.
                out.push_str(&self.scopes.indent(block, 3));
                out.push_str(&format!("result[k] = {target};\n"));
                out.push_str(&self.scopes.indent(block, 2));
                out.push_str("end\n");
            }

            out.push_str(&self.scopes.indent(block, 2));
            out.push_str("end\n");
        }

        out.push_str(&self.scopes.indent(block, 1));
        out.push_str("return result;\n");
        out.push_str(&self.scopes.indent(block, 0));
        out.push_str("end)()");
        Ok(out)
    }

    /// Map an arithmetic operator to its (annotated) Luau token.
    fn operator_token(&self, op: Operator, line: u32, block: BlockId) -> Result<String, EmitError> {
        let token = match op {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mult => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Pow => "^",
            Operator::FloorDiv
            | Operator::MatMult
            | Operator::LShift
            | Operator::RShift
            | Operator::BitOr
            | Operator::BitXor
            | Operator::BitAnd => {
                return Err(EmitError::UnsupportedOperator {
                    kind: op.kind_name(),
                    line,
                });
            }
        };
        Ok(format!("{}{token}", self.annotation(op.kind_name(), block)))
    }
}

fn unary_token(op: UnaryOperator) -> &'static str {
    match op {
        UnaryOperator::UAdd => "+",
        UnaryOperator::USub => "-",
        UnaryOperator::Not | UnaryOperator::Invert => "not ",
    }
}

/// Re-quote a string literal with double quotes and minimal escaping.
fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
