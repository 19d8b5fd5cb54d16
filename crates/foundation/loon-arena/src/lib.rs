//! Indexed arena allocator shared by the AST and scope-tree crates
//!
//! This is a re-export of `la-arena` (the arena used by rust-analyzer), so
//! every node and scope block in the pipeline is addressed by a plain `Idx`
//! handle instead of an owning reference.

pub use la_arena::{Arena, ArenaMap, Idx};
