//! Type-safe building blocks shared across the crate.
//!
//! This module provides the literal type and the clause polarity enum,
//! keeping the rest of the crate free of stringly-typed bookkeeping.

use std::fmt;

/// A literal: a propositional variable together with a polarity.
///
/// Two occurrences are the same literal iff both the name and the polarity
/// match. The clause algorithm keys its literal set on this compound
/// `(name, negated)` identity, so `p` and `~p` are distinct set members and
/// form an *opposite pair*.
///
/// # Invariants
///
/// - Identity is purely structural: no interning, no custom hashing.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Lit {
    name: String,
    negated: bool,
}

impl Lit {
    /// Creates a literal with the given name and polarity.
    pub fn new(name: impl Into<String>, negated: bool) -> Self {
        Lit {
            name: name.into(),
            negated,
        }
    }

    /// Creates a positive (non-negated) literal.
    pub fn positive(name: impl Into<String>) -> Self {
        Lit::new(name, false)
    }

    /// Creates a negated literal.
    pub fn negative(name: impl Into<String>) -> Self {
        Lit::new(name, true)
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the literal is negated.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns the literal over the same variable with the opposite polarity.
    pub fn complement(&self) -> Lit {
        Lit {
            name: self.name.clone(),
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negated { "~" } else { "" }, self.name)
    }
}

/// Polarity of a clause under construction.
///
/// A conjunctive clause works toward `a & b & ...`, a disjunctive one toward
/// `a | b | ...`. The polarity decides which connective flattens in place and
/// which one splits the clause in two, and what an exhausted or clashing
/// clause proves (see [`crate::clause`]).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Polarity {
    Conjunctive,
    Disjunctive,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Conjunctive => write!(f, "conjunctive"),
            Polarity::Disjunctive => write!(f, "disjunctive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_complement_involution() {
        let p = Lit::positive("p");
        assert_eq!(p.complement().complement(), p);
        assert_ne!(p.complement(), p);
    }

    #[test]
    fn test_set_identity() {
        let mut set = HashSet::new();
        set.insert(Lit::positive("p"));
        set.insert(Lit::positive("p"));
        set.insert(Lit::negative("p"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Lit::positive("p").complement()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Lit::positive("p").to_string(), "p");
        assert_eq!(Lit::negative("q").to_string(), "~q");
    }
}
