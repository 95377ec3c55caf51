//! Propositional formulas.
//!
//! A [`Formula`] is an immutable, structurally compared tree over the closed
//! variant set {truth, falsity, variable, not, and, or, implies, equiv}.
//! The two rewrites the decision procedure relies on live here:
//!
//! - [`Formula::negate`] computes the logical complement using De Morgan's
//!   laws, constant flipping and double-negation cancellation.
//! - [`Formula::make_simple`] rewrites exactly *one* level toward the
//!   primitive operator set {and, or, literal}. Peeling a double negation
//!   exposes the inner formula verbatim (`~~~p` becomes `~p` with its `Not`
//!   intact), so callers repeat the call until [`Formula::is_primitive`]
//!   holds on the result; every pass removes at least one operator level,
//!   so the repetition terminates.
//!
//! # Example
//!
//! ```
//! use taut_rs::formula::Formula;
//!
//! let f = Formula::implies(Formula::var("p"), Formula::var("q"));
//! // One simplification level: (p => q) becomes (~p | q).
//! let simple = f.make_simple();
//! assert_eq!(
//!     simple,
//!     Formula::or(Formula::var("p").negate(), Formula::var("q")),
//! );
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::types::Lit;

/// A propositional formula.
///
/// Variables carry their polarity in the [`Lit`] payload, so a negated
/// variable is a leaf, not a `Not` node. `Not` nodes only appear around
/// composite operands.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Formula {
    /// The constant true.
    Truth,
    /// The constant false.
    False,
    /// A literal.
    Var(Lit),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Equiv(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Creates a positive variable.
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Var(Lit::positive(name))
    }

    /// Creates a negated variable (a negative literal, not a `Not` node).
    pub fn neg_var(name: impl Into<String>) -> Self {
        Formula::Var(Lit::negative(name))
    }

    /// Wraps a literal as a formula.
    pub fn lit(lit: Lit) -> Self {
        Formula::Var(lit)
    }

    pub fn not(operand: Self) -> Self {
        Formula::Not(Box::new(operand))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Formula::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Formula::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn equiv(lhs: Self, rhs: Self) -> Self {
        Formula::Equiv(Box::new(lhs), Box::new(rhs))
    }

    /// Returns `true` for leaves: constants and literals.
    pub fn is_literal(&self) -> bool {
        matches!(self, Formula::Truth | Formula::False | Formula::Var(_))
    }

    /// Returns `true` if the outer operator is in the primitive set
    /// {constant, literal, and, or} that clause expansion dispatches on.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Formula::Truth
                | Formula::False
                | Formula::Var(_)
                | Formula::And(_, _)
                | Formula::Or(_, _)
        )
    }

    /// Returns the logical complement of the formula.
    ///
    /// De Morgan's laws push the negation through `and`/`or`, constants flip,
    /// a double negation cancels, and a variable flips its polarity in place.
    /// `implies` and `equiv` negate via their simplified form.
    pub fn negate(&self) -> Formula {
        match self {
            Formula::Truth => Formula::False,
            Formula::False => Formula::Truth,
            Formula::Var(lit) => Formula::Var(lit.complement()),
            Formula::Not(x) => (**x).clone(),
            Formula::And(a, b) => Formula::or(a.negate(), b.negate()),
            Formula::Or(a, b) => Formula::and(a.negate(), b.negate()),
            Formula::Implies(_, _) | Formula::Equiv(_, _) => self.make_simple().negate(),
        }
    }

    /// Rewrites one level toward the primitive operator set {and, or, literal}.
    ///
    /// - `a => b` becomes `~a | b`;
    /// - `a <=> b` becomes `(a & b) | (~a & ~b)`;
    /// - `~x` becomes `x.negate()`;
    /// - everything else is returned unchanged.
    ///
    /// The result's outer operator is usually primitive; the exception is a
    /// double negation, whose removal exposes the inner formula unchanged
    /// (`~~~p` becomes `~p`, `~~(a => b)` becomes `a => b`).
    /// [`Formula::is_primitive`] tells callers when another pass is needed.
    pub fn make_simple(&self) -> Formula {
        match self {
            Formula::Implies(a, b) => Formula::or(a.negate(), (**b).clone()),
            Formula::Equiv(a, b) => Formula::or(
                Formula::and((**a).clone(), (**b).clone()),
                Formula::and(a.negate(), b.negate()),
            ),
            Formula::Not(x) => x.negate(),
            _ => self.clone(),
        }
    }

    /// Evaluates the formula under the given assignment.
    ///
    /// Variables missing from the assignment are taken to be false.
    pub fn evaluate(&self, assignment: &HashMap<String, bool>) -> bool {
        match self {
            Formula::Truth => true,
            Formula::False => false,
            Formula::Var(lit) => {
                let value = assignment.get(lit.name()).copied().unwrap_or(false);
                value != lit.is_negated()
            }
            Formula::Not(x) => !x.evaluate(assignment),
            Formula::And(a, b) => a.evaluate(assignment) && b.evaluate(assignment),
            Formula::Or(a, b) => a.evaluate(assignment) || b.evaluate(assignment),
            Formula::Implies(a, b) => !a.evaluate(assignment) || b.evaluate(assignment),
            Formula::Equiv(a, b) => a.evaluate(assignment) == b.evaluate(assignment),
        }
    }

    /// Returns the set of distinct variable names, sorted.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::Truth | Formula::False => {}
            Formula::Var(lit) => {
                names.insert(lit.name().to_string());
            }
            Formula::Not(x) => x.collect_variables(names),
            Formula::And(a, b)
            | Formula::Or(a, b)
            | Formula::Implies(a, b)
            | Formula::Equiv(a, b) => {
                a.collect_variables(names);
                b.collect_variables(names);
            }
        }
    }
}

impl fmt::Display for Formula {
    /// Compact symbolic rendering, used in logs and `Debug` output.
    /// User-facing text goes through [`crate::format::FormulaFormatter`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Truth => write!(f, "T"),
            Formula::False => write!(f, "F"),
            Formula::Var(lit) => write!(f, "{}", lit),
            Formula::Not(x) => write!(f, "~{}", x),
            Formula::And(a, b) => write!(f, "({} & {})", a, b),
            Formula::Or(a, b) => write!(f, "({} | {})", a, b),
            Formula::Implies(a, b) => write!(f, "({} => {})", a, b),
            Formula::Equiv(a, b) => write!(f, "({} <=> {})", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Formula {
        Formula::var("p")
    }

    fn q() -> Formula {
        Formula::var("q")
    }

    #[test]
    fn test_negate_constants() {
        assert_eq!(Formula::Truth.negate(), Formula::False);
        assert_eq!(Formula::False.negate(), Formula::Truth);
    }

    #[test]
    fn test_negate_variable_flips_polarity() {
        assert_eq!(p().negate(), Formula::neg_var("p"));
        assert_eq!(Formula::neg_var("p").negate(), p());
    }

    #[test]
    fn test_double_negation() {
        let composites = [
            p(),
            Formula::neg_var("q"),
            Formula::and(p(), q()),
            Formula::or(p(), Formula::neg_var("q")),
            Formula::and(Formula::or(p(), q()), Formula::neg_var("r")),
        ];
        for f in composites {
            println!("f = {}", f);
            assert_eq!(f.negate().negate(), f);
        }
    }

    #[test]
    fn test_de_morgan() {
        let a = Formula::and(p(), q());
        assert_eq!(a.negate(), Formula::or(p().negate(), q().negate()));

        let o = Formula::or(p(), q());
        assert_eq!(o.negate(), Formula::and(p().negate(), q().negate()));
    }

    #[test]
    fn test_not_node_cancels() {
        let f = Formula::not(Formula::and(p(), q()));
        assert_eq!(f.negate(), Formula::and(p(), q()));
    }

    #[test]
    fn test_make_simple_implication() {
        let f = Formula::implies(p(), q());
        assert_eq!(f.make_simple(), Formula::or(Formula::neg_var("p"), q()));
    }

    #[test]
    fn test_make_simple_equivalence() {
        let f = Formula::equiv(p(), q());
        assert_eq!(
            f.make_simple(),
            Formula::or(
                Formula::and(p(), q()),
                Formula::and(Formula::neg_var("p"), Formula::neg_var("q")),
            )
        );
    }

    #[test]
    fn test_make_simple_peels_double_negation_verbatim() {
        // Removing `~~` exposes the operand unchanged, Not and all.
        let f = Formula::not(Formula::not(Formula::not(p())));
        assert_eq!(f.make_simple(), Formula::not(p()));

        let f = Formula::not(Formula::not(Formula::implies(p(), q())));
        assert_eq!(f.make_simple(), Formula::implies(p(), q()));
    }

    #[test]
    fn test_repeated_make_simple_reaches_primitive_head() {
        let shapes = [
            Formula::not(p()),
            Formula::not(Formula::not(p())),
            Formula::not(Formula::not(Formula::not(p()))),
            Formula::not(Formula::not(Formula::not(Formula::not(p())))),
            Formula::not(Formula::and(p(), q())),
            Formula::not(Formula::not(Formula::implies(p(), q()))),
            Formula::not(Formula::not(Formula::equiv(p(), q()))),
            Formula::not(Formula::Truth),
        ];
        for f in shapes {
            let mut simple = f.make_simple();
            let mut passes = 1;
            while !simple.is_primitive() {
                simple = simple.make_simple();
                passes += 1;
                assert!(passes <= 4, "simplification of {} does not settle", f);
            }
            println!("{} -> {} in {} passes", f, simple, passes);
        }
    }

    #[test]
    fn test_make_simple_keeps_primitives() {
        for f in [Formula::Truth, Formula::False, p(), Formula::and(p(), q())] {
            assert_eq!(f.make_simple(), f);
        }
    }

    #[test]
    fn test_evaluate() {
        let f = Formula::implies(p(), q());
        let mut assignment = HashMap::new();
        assignment.insert("p".to_string(), true);
        assignment.insert("q".to_string(), false);
        assert!(!f.evaluate(&assignment));
        assignment.insert("q".to_string(), true);
        assert!(f.evaluate(&assignment));

        // Negation and equivalence agree with the truth table.
        let g = Formula::equiv(p(), Formula::neg_var("q"));
        assert!(!g.evaluate(&assignment));
    }

    #[test]
    fn test_variables_sorted_distinct() {
        let f = Formula::and(
            Formula::or(q(), Formula::neg_var("p")),
            Formula::implies(p(), Formula::var("r")),
        );
        let names: Vec<_> = f.variables().into_iter().collect();
        assert_eq!(names, vec!["p", "q", "r"]);
    }
}
