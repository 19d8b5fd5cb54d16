//! String interning for identifiers
//!
//! Every name in the input tree (function names, variables, attributes,
//! parameters) is interned once and carried as a copyable [`Symbol`].
//! Translation is a single-threaded descent, so this wraps the
//! single-threaded `Rodeo` and resolves symbols as borrowed strings.
//!
//! One name is reserved: [`ACCUMULATOR`], the variable generator emulation
//! collects yielded values into. It is interned at construction so later
//! stages can refer to it by symbol without mutable access to the interner.

pub use lasso::Spur as Symbol;
use lasso::Rodeo;

/// Reserved name of the generator-accumulator variable.
pub const ACCUMULATOR: &str = "yield";

/// Identifier interner owned by one module.
#[derive(Debug)]
pub struct Interner {
    rodeo: Rodeo,
    accumulator: Symbol,
}

impl Interner {
    /// Creates an interner holding only the reserved names.
    #[must_use]
    pub fn new() -> Self {
        let mut rodeo = Rodeo::new();
        let accumulator = rodeo.get_or_intern_static(ACCUMULATOR);
        Self { rodeo, accumulator }
    }

    /// Interns `text`, returning the existing symbol if already present.
    pub fn intern(&mut self, text: &str) -> Symbol {
        self.rodeo.get_or_intern(text)
    }

    /// Resolves a symbol back to its text.
    ///
    /// # Panics
    /// Panics if `symbol` was produced by a different interner.
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.rodeo.resolve(&symbol)
    }

    /// Resolves a symbol if it belongs to this interner.
    #[must_use]
    pub fn try_resolve(&self, symbol: Symbol) -> Option<&str> {
        self.rodeo.try_resolve(&symbol)
    }

    /// Symbol of the reserved [`ACCUMULATOR`] name.
    #[must_use]
    pub fn accumulator(&self) -> Symbol {
        self.accumulator
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut interner = Interner::new();
        let first = interner.intern("x");
        let second = interner.intern("x");
        assert_eq!(first, second);
        assert_eq!(interner.resolve(first), "x");
    }

    #[test]
    fn test_distinct_names_get_distinct_symbols() {
        let mut interner = Interner::new();
        assert_ne!(interner.intern("a"), interner.intern("b"));
    }

    #[test]
    fn test_accumulator_is_reserved_up_front() {
        let mut interner = Interner::new();
        assert_eq!(interner.resolve(interner.accumulator()), ACCUMULATOR);
        assert_eq!(interner.intern(ACCUMULATOR), interner.accumulator());
    }
}
