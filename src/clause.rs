//! Clause half-products and the expansion step.
//!
//! A [`ClauseBuilder`] is a clause under construction: an ordered queue of
//! still-unresolved subformulas, the literals and constants already extracted
//! from them, and a resolution status. Repeatedly calling
//! [`ClauseBuilder::expand`] reduces the pending queue one subformula at a
//! time, flattening connectives of the builder's own polarity and splitting
//! into two independent builders on connectives of the opposite polarity.
//!
//! The same shape serves both polarities; the [`Polarity`] value is the only
//! policy knob:
//!
//! | event                    | Conjunctive        | Disjunctive        |
//! |--------------------------|--------------------|--------------------|
//! | `p` and `~p` both seen   | proven failure     | proven success     |
//! | constant true extracted  | flag only          | proven success     |
//! | constant false extracted | proven failure     | flag only          |
//! | queue empties cleanly    | proven success     | proven failure     |
//!
//! Branching clones the full builder state per branch. No branch ever
//! observes another branch's mutations; this copy-on-branch discipline is
//! what lets the conversion tree represent case splits without backtracking.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::formula::Formula;
use crate::types::{Lit, Polarity};

/// Why a clause resolved the way it did.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ResolutionCause {
    /// The clause contains a variable together with its negation.
    OppositeLiterals {
        /// The literal whose extraction triggered the clash.
        lit: Lit,
        /// Its previously extracted complement.
        complement: Lit,
    },
    /// The clause contains the constant true.
    ContainsTruth,
    /// The clause contains the constant false.
    ContainsFalse,
    /// Every subformula reduced to a literal or constant, with no clash.
    Exhausted,
}

/// Resolution status of a clause builder.
///
/// `ProvenSuccess` and `ProvenFailure` are absorbing: once reached, the
/// builder is terminal and [`ClauseBuilder::expand`] returns it unchanged.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Resolution {
    Unresolved,
    ProvenSuccess(ResolutionCause),
    ProvenFailure(ResolutionCause),
}

impl Resolution {
    /// Returns `true` once the builder is terminal.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resolution::ProvenSuccess(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resolution::ProvenFailure(_))
    }

    /// Returns the structured cause, if resolved.
    pub fn cause(&self) -> Option<&ResolutionCause> {
        match self {
            Resolution::Unresolved => None,
            Resolution::ProvenSuccess(cause) | Resolution::ProvenFailure(cause) => Some(cause),
        }
    }
}

/// A clause under construction from a formula.
#[derive(Debug, Clone)]
pub struct ClauseBuilder {
    polarity: Polarity,
    pending: VecDeque<Formula>,
    extracted: Vec<Formula>,
    literals: HashSet<Lit>,
    has_truth: bool,
    has_false: bool,
    status: Resolution,
}

impl ClauseBuilder {
    /// Seeds a builder of the given polarity with a single pending formula.
    pub fn new(polarity: Polarity, formula: Formula) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(formula);
        ClauseBuilder {
            polarity,
            pending,
            extracted: Vec::new(),
            literals: HashSet::new(),
            has_truth: false,
            has_false: false,
            status: Resolution::Unresolved,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn status(&self) -> &Resolution {
        &self.status
    }

    /// Still-unresolved subformulas, front first.
    pub fn pending(&self) -> impl Iterator<Item = &Formula> {
        self.pending.iter()
    }

    /// Already-extracted literals and constants, in extraction order.
    pub fn extracted(&self) -> &[Formula] {
        &self.extracted
    }

    /// Distinct literals seen so far, keyed by `(name, polarity)`.
    pub fn literals(&self) -> &HashSet<Lit> {
        &self.literals
    }

    pub fn has_truth(&self) -> bool {
        self.has_truth
    }

    pub fn has_false(&self) -> bool {
        self.has_false
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// Performs one expansion step, returning one or two successor builders.
    ///
    /// The receiver is left untouched: each successor owns an independent
    /// copy of the state. A terminal builder expands to a single unchanged
    /// copy of itself. An empty queue resolves the clause by exhaustion.
    pub fn expand(&self) -> Vec<ClauseBuilder> {
        if self.is_resolved() {
            return vec![self.clone()];
        }

        let mut next = self.clone();
        let Some(head) = next.pending.pop_front() else {
            next.resolve_exhausted();
            return vec![next];
        };

        // One simplification pass is not always enough: peeling a double
        // negation exposes the operand verbatim, so `~~~p` first comes out
        // as `~p` with its Not intact and `~~(a => b)` as a bare
        // implication. Every pass removes at least one operator level.
        let mut head = head.make_simple();
        while !head.is_primitive() {
            head = head.make_simple();
        }
        debug!("expanding {} head {}", next.polarity, head);
        match head {
            Formula::Truth => {
                next.extracted.push(Formula::Truth);
                next.absorb_truth();
                vec![next]
            }
            Formula::False => {
                next.extracted.push(Formula::False);
                next.absorb_false();
                vec![next]
            }
            Formula::Var(lit) => {
                next.extracted.push(Formula::Var(lit.clone()));
                next.absorb_literal(lit);
                vec![next]
            }
            Formula::And(a, b) => match next.polarity {
                Polarity::Conjunctive => {
                    next.flatten(*a, *b);
                    vec![next]
                }
                Polarity::Disjunctive => next.branch(*a, *b),
            },
            Formula::Or(a, b) => match next.polarity {
                Polarity::Conjunctive => next.branch(*a, *b),
                Polarity::Disjunctive => {
                    next.flatten(*a, *b);
                    vec![next]
                }
            },
            // The simplification loop above only stops on a primitive head.
            Formula::Not(_) | Formula::Implies(_, _) | Formula::Equiv(_, _) => {
                unreachable!("non-primitive head after simplification")
            }
        }
    }

    /// Requeues both operands of a same-polarity connective, left in front.
    fn flatten(&mut self, left: Formula, right: Formula) {
        self.pending.push_front(right);
        self.pending.push_front(left);
    }

    /// Splits on an opposite-polarity connective: one full copy per operand.
    fn branch(self, left: Formula, right: Formula) -> Vec<ClauseBuilder> {
        let mut right_side = self.clone();
        let mut left_side = self;
        left_side.pending.push_front(left);
        right_side.pending.push_front(right);
        vec![left_side, right_side]
    }

    fn absorb_literal(&mut self, lit: Lit) {
        let complement = lit.complement();
        let clash = self.literals.contains(&complement);
        self.literals.insert(lit.clone());
        if clash {
            debug!("opposite pair found: {} / {}", lit, complement);
            let cause = ResolutionCause::OppositeLiterals { lit, complement };
            self.status = match self.polarity {
                // p & ~p forces a contradiction.
                Polarity::Conjunctive => Resolution::ProvenFailure(cause),
                // p | ~p is always true.
                Polarity::Disjunctive => Resolution::ProvenSuccess(cause),
            };
        }
    }

    fn absorb_truth(&mut self) {
        self.has_truth = true;
        if self.polarity == Polarity::Disjunctive {
            // An OR containing an unconditional true is always true.
            self.status = Resolution::ProvenSuccess(ResolutionCause::ContainsTruth);
        }
    }

    fn absorb_false(&mut self) {
        self.has_false = true;
        if self.polarity == Polarity::Conjunctive {
            // An AND containing an unconditional false is always false.
            self.status = Resolution::ProvenFailure(ResolutionCause::ContainsFalse);
        }
    }

    fn resolve_exhausted(&mut self) {
        self.status = match self.polarity {
            // A literal-only conjunction with no clash is satisfiable.
            Polarity::Conjunctive => Resolution::ProvenSuccess(ResolutionCause::Exhausted),
            // A literal-only disjunction with no clash can be falsified.
            Polarity::Disjunctive => Resolution::ProvenFailure(ResolutionCause::Exhausted),
        };
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn drain(mut clause: ClauseBuilder) -> ClauseBuilder {
        // Runs a branch-free builder to its terminal state.
        loop {
            let mut out = clause.expand();
            assert_eq!(out.len(), 1, "expected no branching");
            clause = out.pop().unwrap();
            if clause.is_resolved() {
                return clause;
            }
        }
    }

    #[test]
    fn test_terminal_expand_is_identity() {
        let done = drain(ClauseBuilder::new(Polarity::Conjunctive, Formula::var("p")));
        assert!(done.is_resolved());

        let again = done.expand();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].status(), done.status());
        assert_eq!(again[0].extracted(), done.extracted());
    }

    #[test]
    fn test_exhaustion_outcome_by_polarity() {
        let conj = drain(ClauseBuilder::new(Polarity::Conjunctive, Formula::var("p")));
        assert!(conj.status().is_success());
        assert_eq!(conj.status().cause(), Some(&ResolutionCause::Exhausted));

        let disj = drain(ClauseBuilder::new(Polarity::Disjunctive, Formula::var("p")));
        assert!(disj.status().is_failure());
        assert_eq!(disj.status().cause(), Some(&ResolutionCause::Exhausted));
    }

    #[test]
    fn test_opposite_pair_outcome_by_polarity() {
        let clash = Formula::and(Formula::var("p"), Formula::neg_var("p"));
        let conj = drain(ClauseBuilder::new(Polarity::Conjunctive, clash));
        assert!(conj.status().is_failure());
        assert!(matches!(
            conj.status().cause(),
            Some(ResolutionCause::OppositeLiterals { .. })
        ));

        let clash = Formula::or(Formula::var("p"), Formula::neg_var("p"));
        let disj = drain(ClauseBuilder::new(Polarity::Disjunctive, clash));
        assert!(disj.status().is_success());
        assert!(matches!(
            disj.status().cause(),
            Some(ResolutionCause::OppositeLiterals { .. })
        ));
    }

    #[test]
    fn test_constants_by_polarity() {
        // Conjunctive: T is inert, F is fatal.
        let conj = drain(ClauseBuilder::new(
            Polarity::Conjunctive,
            Formula::and(Formula::Truth, Formula::var("p")),
        ));
        assert!(conj.has_truth());
        assert!(conj.status().is_success());

        let clause = ClauseBuilder::new(Polarity::Conjunctive, Formula::False);
        let out = clause.expand();
        assert!(out[0].has_false());
        assert_eq!(
            out[0].status(),
            &Resolution::ProvenFailure(ResolutionCause::ContainsFalse)
        );

        // Disjunctive: the mirror image.
        let clause = ClauseBuilder::new(Polarity::Disjunctive, Formula::Truth);
        let out = clause.expand();
        assert_eq!(
            out[0].status(),
            &Resolution::ProvenSuccess(ResolutionCause::ContainsTruth)
        );

        let disj = drain(ClauseBuilder::new(
            Polarity::Disjunctive,
            Formula::or(Formula::False, Formula::var("p")),
        ));
        assert!(disj.has_false());
        assert!(disj.status().is_failure());
    }

    #[test]
    fn test_flatten_preserves_order() {
        let f = Formula::and(Formula::var("p"), Formula::var("q"));
        let clause = ClauseBuilder::new(Polarity::Conjunctive, f);
        let out = clause.expand();
        assert_eq!(out.len(), 1);
        let heads: Vec<_> = out[0].pending().cloned().collect();
        assert_eq!(heads, vec![Formula::var("p"), Formula::var("q")]);
    }

    #[test]
    fn test_branch_fanout() {
        // A conjunctive builder facing an OR splits in two, left operand at
        // the first sibling's queue head, right operand at the second's.
        let f = Formula::or(Formula::var("p"), Formula::var("q"));
        let clause = ClauseBuilder::new(Polarity::Conjunctive, f);
        let out = clause.expand();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pending().next(), Some(&Formula::var("p")));
        assert_eq!(out[1].pending().next(), Some(&Formula::var("q")));

        let f = Formula::and(Formula::var("p"), Formula::var("q"));
        let clause = ClauseBuilder::new(Polarity::Disjunctive, f);
        let out = clause.expand();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pending().next(), Some(&Formula::var("p")));
        assert_eq!(out[1].pending().next(), Some(&Formula::var("q")));
    }

    #[test]
    fn test_branches_are_independent() {
        let f = Formula::or(
            Formula::and(Formula::var("p"), Formula::var("q")),
            Formula::var("r"),
        );
        let clause = ClauseBuilder::new(Polarity::Conjunctive, f);
        let out = clause.expand();
        assert_eq!(out.len(), 2);

        // Driving the left branch to its end leaves the right one untouched.
        let left = drain(out[0].clone());
        assert_eq!(left.literals().len(), 2);
        assert_eq!(out[1].literals().len(), 0);
        assert_eq!(out[1].pending().next(), Some(&Formula::var("r")));
    }

    #[test]
    fn test_literal_set_deduplicates() {
        let f = Formula::and(Formula::var("p"), Formula::var("p"));
        let done = drain(ClauseBuilder::new(Polarity::Conjunctive, f));
        assert_eq!(done.literals().len(), 1);
        assert_eq!(done.extracted().len(), 2);
    }

    #[test]
    fn test_deeply_negated_heads_reduce() {
        // ~~~p keeps a Not on its head after one simplification pass; the
        // extraction must still land on the literal ~p.
        let f = Formula::not(Formula::not(Formula::not(Formula::var("p"))));
        let done = drain(ClauseBuilder::new(Polarity::Conjunctive, f));
        assert!(done.status().is_success());
        assert!(done.literals().contains(&Lit::negative("p")));

        // ~~(p => q) exposes a bare implication the same way.
        let f = Formula::not(Formula::not(Formula::implies(
            Formula::var("p"),
            Formula::var("q"),
        )));
        let clause = ClauseBuilder::new(Polarity::Disjunctive, f);
        let out = clause.expand();
        assert_eq!(out.len(), 1);
        let heads: Vec<_> = out[0].pending().cloned().collect();
        assert_eq!(heads, vec![Formula::neg_var("p"), Formula::var("q")]);
    }

    #[test]
    fn test_implication_head_simplifies_in_place() {
        // (p => q) reduces to (~p | q): disjunctive builders flatten it.
        let f = Formula::implies(Formula::var("p"), Formula::var("q"));
        let clause = ClauseBuilder::new(Polarity::Disjunctive, f);
        let out = clause.expand();
        assert_eq!(out.len(), 1);
        let heads: Vec<_> = out[0].pending().cloned().collect();
        assert_eq!(heads, vec![Formula::neg_var("p"), Formula::var("q")]);
    }
}
