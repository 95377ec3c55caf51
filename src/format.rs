//! Rendering formulas and clause snapshots as text.
//!
//! The decision core never formats anything; whenever a report (or a log
//! line at the CLI level) needs human-readable text, it goes through a
//! [`FormulaFormatter`] bound to an [`Alphabet`].

use crate::alphabet::Alphabet;
use crate::clause::{ClauseBuilder, Resolution, ResolutionCause};
use crate::formula::Formula;
use crate::types::{Lit, Polarity};

/// Renders formulas, literals and clause snapshots in one alphabet.
#[derive(Debug, Clone, Copy)]
pub struct FormulaFormatter<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> FormulaFormatter<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        FormulaFormatter { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.alphabet
    }

    /// Renders a formula; binary operators are infix and parenthesized.
    pub fn formula(&self, formula: &Formula) -> String {
        match formula {
            Formula::Truth => self.alphabet.truth.to_string(),
            Formula::False => self.alphabet.falsity.to_string(),
            Formula::Var(lit) => self.lit(lit),
            Formula::Not(x) => self.alphabet.format_not(&self.formula(x)),
            Formula::And(a, b) => self.binary(a, self.alphabet.and, b),
            Formula::Or(a, b) => self.binary(a, self.alphabet.or, b),
            Formula::Implies(a, b) => self.binary(a, self.alphabet.implies, b),
            Formula::Equiv(a, b) => self.binary(a, self.alphabet.equiv, b),
        }
    }

    fn binary(&self, a: &Formula, op: &str, b: &Formula) -> String {
        format!("({} {} {})", self.formula(a), op, self.formula(b))
    }

    pub fn lit(&self, lit: &Lit) -> String {
        if lit.is_negated() {
            self.alphabet.format_not(lit.name())
        } else {
            lit.name().to_string()
        }
    }

    /// The clause's distinct literals, sorted for deterministic output.
    pub fn clause_literals(&self, clause: &ClauseBuilder) -> String {
        let mut lits: Vec<&Lit> = clause.literals().iter().collect();
        lits.sort();
        lits.iter()
            .map(|lit| self.lit(lit))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The logical constants the clause has extracted.
    pub fn clause_constants(&self, clause: &ClauseBuilder) -> String {
        let mut constants = Vec::new();
        if clause.has_truth() {
            constants.push(self.alphabet.truth);
        }
        if clause.has_false() {
            constants.push(self.alphabet.falsity);
        }
        constants.join(", ")
    }

    /// Extracted subformulas in extraction order.
    pub fn clause_extracted(&self, clause: &ClauseBuilder) -> String {
        clause
            .extracted()
            .iter()
            .map(|f| self.formula(f))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Still-pending subformulas, front of the queue first.
    pub fn clause_pending(&self, clause: &ClauseBuilder) -> String {
        clause
            .pending()
            .map(|f| self.formula(f))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One-line description of the clause's resolution status.
    pub fn clause_status(&self, clause: &ClauseBuilder) -> String {
        let effect = match (clause.polarity(), clause.status()) {
            (_, Resolution::Unresolved) => return "outcome still unknown".to_string(),
            (Polarity::Conjunctive, Resolution::ProvenSuccess(_)) => "clause is satisfiable",
            (Polarity::Conjunctive, Resolution::ProvenFailure(_)) => "clause is always false",
            (Polarity::Disjunctive, Resolution::ProvenSuccess(_)) => "clause is always true",
            (Polarity::Disjunctive, Resolution::ProvenFailure(_)) => "clause is not always true",
        };
        match clause.status().cause() {
            Some(ResolutionCause::OppositeLiterals { lit, complement }) => format!(
                "{} because it contains the variable {} and its negation {}",
                effect,
                self.lit(lit),
                self.lit(complement)
            ),
            Some(ResolutionCause::ContainsTruth) => format!(
                "{} because it contains the constant {}",
                effect, self.alphabet.truth
            ),
            Some(ResolutionCause::ContainsFalse) => format!(
                "{} because it contains the constant {}",
                effect, self.alphabet.falsity
            ),
            Some(ResolutionCause::Exhausted) => format!(
                "{} because no variable occurs together with its negation",
                effect
            ),
            None => unreachable!("resolved status always carries a cause"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::alphabet::{SYMBOLIC, WORD};
    use crate::formula::Formula;

    #[test]
    fn test_formula_rendering() {
        let f = Formula::implies(
            Formula::not(Formula::var("p")),
            Formula::equiv(Formula::Truth, Formula::neg_var("q")),
        );
        let formatter = FormulaFormatter::new(&SYMBOLIC);
        assert_eq!(formatter.formula(&f), "(~p => (T <=> ~q))");

        let formatter = FormulaFormatter::new(&WORD);
        assert_eq!(formatter.formula(&f), "(not p imp (true equ not q))");
    }

    #[test]
    fn test_clause_rendering() {
        use crate::clause::ClauseBuilder;
        use crate::types::Polarity;

        // Drive p & ~p & T to its contradiction.
        let f = Formula::and(
            Formula::and(Formula::var("p"), Formula::neg_var("p")),
            Formula::Truth,
        );
        let mut clause = ClauseBuilder::new(Polarity::Conjunctive, f);
        while !clause.is_resolved() {
            let mut out = clause.expand();
            assert_eq!(out.len(), 1);
            clause = out.pop().unwrap();
        }

        let formatter = FormulaFormatter::new(&SYMBOLIC);
        assert_eq!(formatter.clause_literals(&clause), "p, ~p");
        let status = formatter.clause_status(&clause);
        println!("status = {}", status);
        assert!(status.contains("always false"));
        assert!(status.contains("its negation"));
    }

    #[test]
    fn test_unresolved_status() {
        use crate::clause::ClauseBuilder;
        use crate::types::Polarity;

        let clause = ClauseBuilder::new(Polarity::Disjunctive, Formula::var("p"));
        let formatter = FormulaFormatter::new(&SYMBOLIC);
        assert_eq!(formatter.clause_status(&clause), "outcome still unknown");
        assert_eq!(formatter.clause_pending(&clause), "p");
        assert_eq!(formatter.clause_extracted(&clause), "");
    }
}
