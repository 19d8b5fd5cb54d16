//! Scope tree for tracking lexical blocks during emission
//!
//! Luau scopes variables to the block that declares them, while the source
//! language scopes them to the enclosing function. The tree reconciles the two:
//! every emitted construct (function body, `if` arm, loop body) gets a
//! [`Block`], but declarations are recorded against the block's *owner*, the
//! nearest enclosing function block (or the module root). A name first
//! assigned in the owner itself is declared inline with `local`; a name first
//! assigned in a nested block is hoisted to a `local NAME = nil;` line at the
//! top of the owner so later reads outside that block still see it.
//!
//! Blocks also carry the bookkeeping the emitter needs for layout: a
//! numbering path used for indentation depth and debug labels, and a link
//! back to the function-definition statement for function blocks.

use indexmap::IndexSet;
use loon_arena::{Arena, Idx};
use loon_ast::StmtId;
use loon_intern::Symbol;

/// Unique identifier for a block
pub type BlockId = Idx<Block>;

/// Kind of syntactic construct a block models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Module-level block (top-level)
    Module,
    /// Function body
    Function,
    /// `if` branch body
    If,
    /// `else` branch body
    Else,
    /// `while` loop body
    While,
    /// `for` loop body
    For,
    /// Lambda body
    Lambda,
}

impl BlockKind {
    /// Whether blocks of this kind own their declarations.
    ///
    /// Lambdas are single-expression and never declare anything, so they do
    /// not count as owners; names assigned under one belong to the enclosing
    /// function.
    #[must_use]
    pub fn is_owner(self) -> bool {
        matches!(self, BlockKind::Function)
    }
}

/// Where a first assignment's declaration ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Declared inline at the assignment site with `local`
    Surface,
    /// Pre-declared as `local NAME = nil;` at the top of the owning function
    Hoisted,
}

/// A single block in the tree
#[derive(Debug, Clone)]
pub struct Block {
    /// Numbering path from the root, e.g. `[0, 1, 0]` for the first child of
    /// the root's second child. Depth is derived from its length.
    path: Vec<u32>,
    /// Kind of construct this block models
    pub kind: BlockKind,
    /// Enclosing block (None for the root)
    pub parent: Option<BlockId>,
    /// Function-definition statement, for `Function` blocks only
    pub function: Option<StmtId>,
    /// Child blocks in creation order
    children: Vec<BlockId>,
    /// Names declared inline in this block, in first-assignment order
    surface: IndexSet<Symbol>,
    /// Names hoisted to the top of this block, in first-assignment order
    hoisted: IndexSet<Symbol>,
}

impl Block {
    fn new(path: Vec<u32>, kind: BlockKind, parent: Option<BlockId>, function: Option<StmtId>) -> Self {
        Self {
            path,
            kind,
            parent,
            function,
            children: Vec::new(),
            surface: IndexSet::new(),
            hoisted: IndexSet::new(),
        }
    }

    /// Child blocks in creation order
    #[must_use]
    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    /// Names declared inline in this block, in first-assignment order
    #[must_use]
    pub fn surface(&self) -> &IndexSet<Symbol> {
        &self.surface
    }

    /// Names hoisted to the top of this block, in first-assignment order
    #[must_use]
    pub fn hoisted(&self) -> &IndexSet<Symbol> {
        &self.hoisted
    }

    fn declares(&self, name: Symbol) -> bool {
        self.surface.contains(&name) || self.hoisted.contains(&name)
    }
}

/// Tree of all blocks in a module
#[derive(Debug, Clone)]
pub struct ScopeTree {
    blocks: Arena<Block>,
    /// Module-level (root) block
    root: BlockId,
}

impl ScopeTree {
    /// Create a new tree containing only the module root
    #[must_use]
    pub fn new() -> Self {
        let mut blocks = Arena::new();
        let root = blocks.alloc(Block::new(vec![0], BlockKind::Module, None, None));
        Self { blocks, root }
    }

    /// Get the root block
    #[must_use]
    pub fn root(&self) -> BlockId {
        self.root
    }

    /// Get a block by ID
    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }

    /// Create a child block
    ///
    /// The child's path extends the parent's by its ordinal among the
    /// parent's children. `function` links `Function` blocks back to their
    /// definition statement so callers can look functions up by block.
    pub fn create_child(
        &mut self,
        parent: BlockId,
        kind: BlockKind,
        function: Option<StmtId>,
    ) -> BlockId {
        let parent_data = &self.blocks[parent];
        let mut path = parent_data.path.clone();
        path.push(parent_data.children.len() as u32);

        let child = self.blocks.alloc(Block::new(path, kind, Some(parent), function));
        self.blocks[parent].children.push(child);
        child
    }

    /// Find the block that owns declarations made in `block`
    ///
    /// Walks up the tree to the nearest function block, or the root if the
    /// chain reaches it first.
    #[must_use]
    pub fn owner(&self, block: BlockId) -> BlockId {
        let mut current = block;
        loop {
            let block_data = &self.blocks[current];
            if block_data.kind.is_owner() {
                return current;
            }
            match block_data.parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Record an assignment to `name` made inside `block`
    ///
    /// Returns how the declaration should be emitted if this is the first
    /// assignment visible to the owner, or `None` for a plain re-assignment.
    pub fn declare(&mut self, block: BlockId, name: Symbol) -> Option<Placement> {
        let owner = self.owner(block);
        if self.blocks[owner].declares(name) {
            return None;
        }

        if owner == block {
            self.blocks[owner].surface.insert(name);
            Some(Placement::Surface)
        } else {
            self.blocks[owner].hoisted.insert(name);
            Some(Placement::Hoisted)
        }
    }

    /// Force `name` into the owner's hoisted set regardless of where in the
    /// owner `block` sits
    ///
    /// Used for names the emitter itself introduces, like the generator
    /// accumulator, which must exist before the first statement runs.
    pub fn declare_hoisted(&mut self, block: BlockId, name: Symbol) {
        let owner = self.owner(block);
        let owner_data = &mut self.blocks[owner];
        if !owner_data.declares(name) {
            owner_data.hoisted.insert(name);
        }
    }

    /// Indentation for statements of `block`, `relative` levels away
    ///
    /// The root sits at depth zero; each level adds one tab. Negative
    /// `relative` values clamp at zero rather than underflowing, so closing
    /// keywords of top-level constructs stay flush left.
    #[must_use]
    pub fn indent(&self, block: BlockId, relative: i32) -> String {
        let depth = self.blocks[block].path.len() as i32 - 1 + relative;
        if depth <= 0 {
            String::new()
        } else {
            "\t".repeat(depth as usize)
        }
    }

    /// Dotted numbering label for `block`, e.g. `0.1.0`
    #[must_use]
    pub fn block_label(&self, block: BlockId) -> String {
        let segments: Vec<String> = self.blocks[block]
            .path
            .iter()
            .map(ToString::to_string)
            .collect();
        segments.join(".")
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loon_intern::Interner;

    #[test]
    fn test_child_labels_extend_the_parent() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let first = tree.create_child(root, BlockKind::Function, None);
        let second = tree.create_child(root, BlockKind::If, None);
        let nested = tree.create_child(second, BlockKind::While, None);

        assert_eq!(tree.block_label(root), "0");
        assert_eq!(tree.block_label(first), "0.0");
        assert_eq!(tree.block_label(second), "0.1");
        assert_eq!(tree.block_label(nested), "0.1.0");
    }

    #[test]
    fn test_owner_walks_to_the_nearest_function() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);
        let branch = tree.create_child(function, BlockKind::If, None);
        let loop_body = tree.create_child(branch, BlockKind::For, None);

        assert_eq!(tree.owner(loop_body), function);
        assert_eq!(tree.owner(branch), function);
        assert_eq!(tree.owner(function), function);
    }

    #[test]
    fn test_owner_of_a_bare_branch_is_the_root() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let branch = tree.create_child(root, BlockKind::If, None);

        assert_eq!(tree.owner(branch), root);
    }

    #[test]
    fn test_lambdas_do_not_own_declarations() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);
        let lambda = tree.create_child(function, BlockKind::Lambda, None);

        assert_eq!(tree.owner(lambda), function);
    }

    #[test]
    fn test_first_assignment_in_the_owner_is_surface() {
        let mut interner = Interner::new();
        let name = interner.intern("x");

        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);

        assert_eq!(tree.declare(function, name), Some(Placement::Surface));
        assert!(tree.block(function).surface().contains(&name));
    }

    #[test]
    fn test_first_assignment_in_a_nested_block_is_hoisted() {
        let mut interner = Interner::new();
        let name = interner.intern("x");

        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);
        let branch = tree.create_child(function, BlockKind::If, None);

        assert_eq!(tree.declare(branch, name), Some(Placement::Hoisted));
        assert!(tree.block(function).hoisted().contains(&name));
        assert!(tree.block(branch).surface().is_empty());
    }

    #[test]
    fn test_reassignment_declares_nothing() {
        let mut interner = Interner::new();
        let name = interner.intern("x");

        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);
        let branch = tree.create_child(function, BlockKind::If, None);

        assert_eq!(tree.declare(branch, name), Some(Placement::Hoisted));
        assert_eq!(tree.declare(function, name), None);
        assert_eq!(tree.declare(branch, name), None);
    }

    #[test]
    fn test_hoisted_names_keep_first_assignment_order() {
        let mut interner = Interner::new();
        let second = interner.intern("b");
        let first = interner.intern("a");

        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);
        let branch = tree.create_child(function, BlockKind::If, None);

        tree.declare(branch, first);
        tree.declare(branch, second);

        let order: Vec<Symbol> = tree.block(function).hoisted().iter().copied().collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn test_declare_hoisted_registers_from_the_owner_itself() {
        let mut interner = Interner::new();
        let name = interner.intern("yield");

        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);

        tree.declare_hoisted(function, name);
        assert!(tree.block(function).hoisted().contains(&name));
        assert_eq!(tree.declare(function, name), None);
    }

    #[test]
    fn test_indent_grows_with_depth_and_clamps_below_zero() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let function = tree.create_child(root, BlockKind::Function, None);
        let branch = tree.create_child(function, BlockKind::If, None);

        assert_eq!(tree.indent(root, 0), "");
        assert_eq!(tree.indent(root, -1), "");
        assert_eq!(tree.indent(function, 0), "\t");
        assert_eq!(tree.indent(function, 1), "\t\t");
        assert_eq!(tree.indent(function, -1), "");
        assert_eq!(tree.indent(branch, 0), "\t\t");
        assert_eq!(tree.indent(branch, -2), "");
    }
}
