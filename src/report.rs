//! Verification reports.
//!
//! Turns a finished [`Verifier`] into a plain-text narrative: the verdict,
//! the deciding clause as proof, the witnessing or refuting valuation, and
//! optionally the whole breadth-first conversion trace. Pure string
//! assembly; where the text ends up is the caller's business.

use std::fmt::Write;

use crate::format::FormulaFormatter;
use crate::tree::NodeRef;
use crate::verify::{Query, Verifier, VerifyError};

/// Renders the report for a finished verifier.
///
/// Fails with [`VerifyError::NotYetVerified`] if `verify` has not run.
pub fn render(
    verifier: &Verifier,
    formatter: &FormulaFormatter<'_>,
    include_tree: bool,
) -> Result<String, VerifyError> {
    let verdict = verifier.verdict()?;

    let mut out = String::new();
    let _ = writeln!(out, "Result := {}", result_line(verifier.query(), verdict));
    let _ = writeln!(out, "Proof := {}", proof_line(verifier, formatter, verdict));
    let _ = writeln!(
        out,
        "Valuation := {}",
        valuation_line(verifier, formatter, verdict)
    );
    if include_tree {
        out.push_str("\nConversion trace (breadth-first):\n");
        out.push_str(&trace(verifier, formatter));
    }
    Ok(out)
}

fn result_line(query: Query, verdict: bool) -> &'static str {
    match (query, verdict) {
        (Query::Satisfiability, true) => "the formula is satisfiable",
        (Query::Satisfiability, false) => "the formula is NOT satisfiable",
        (Query::Validity, true) => "the formula is a tautology",
        (Query::Validity, false) => "the formula is NOT a tautology",
    }
}

/// Cites the clause that decided the verdict, or the all-branches argument
/// when the search had to exhaust the tree.
fn proof_line(verifier: &Verifier, formatter: &FormulaFormatter<'_>, verdict: bool) -> String {
    match (verifier.query(), verdict) {
        (Query::Satisfiability, true) => cite(verifier, formatter, verifier.success_nodes()[0]),
        (Query::Satisfiability, false) => {
            "every conjunctive clause is contradictory".to_string()
        }
        (Query::Validity, true) => {
            "every disjunctive clause holds under all valuations".to_string()
        }
        (Query::Validity, false) => cite(verifier, formatter, verifier.failure_nodes()[0]),
    }
}

fn cite(verifier: &Verifier, formatter: &FormulaFormatter<'_>, node: NodeRef) -> String {
    let node = verifier.tree().node(node);
    let mut line = format!("{}: {}", node.id(), formatter.clause_status(node.clause()));
    let literals = formatter.clause_literals(node.clause());
    let constants = formatter.clause_constants(node.clause());
    match (literals.is_empty(), constants.is_empty()) {
        (false, false) => {
            let _ = write!(line, " -> {}, {}", literals, constants);
        }
        (false, true) => {
            let _ = write!(line, " -> {}", literals);
        }
        (true, false) => {
            let _ = write!(line, " -> {}", constants);
        }
        (true, true) => {}
    }
    line
}

fn valuation_line(verifier: &Verifier, formatter: &FormulaFormatter<'_>, verdict: bool) -> String {
    match (verifier.query(), verdict) {
        (Query::Satisfiability, true) => {
            let node = verifier.tree().node(verifier.success_nodes()[0]);
            format!(
                "the formula holds whenever all of [{}] are true",
                formatter.clause_extracted(node.clause())
            )
        }
        (Query::Satisfiability, false) => {
            let node = verifier.tree().node(verifier.failure_nodes()[0]);
            format!(
                "no valuation makes all of [{}] true, so none satisfies the formula",
                formatter.clause_extracted(node.clause())
            )
        }
        (Query::Validity, true) => {
            "the formula is true under every valuation".to_string()
        }
        (Query::Validity, false) => {
            let node = verifier.tree().node(verifier.failure_nodes()[0]);
            format!(
                "the formula fails whenever all of [{}] are false",
                formatter.clause_extracted(node.clause())
            )
        }
    }
}

/// The breadth-first conversion trace, one block per tree node.
fn trace(verifier: &Verifier, formatter: &FormulaFormatter<'_>) -> String {
    let tree = verifier.tree();
    let mut out = String::new();
    for node in tree.bfs() {
        let node = tree.node(node);
        let clause = node.clause();
        let _ = writeln!(out, "ID [{}]", node.id());
        let _ = writeln!(
            out,
            "    [constants / variables]: [{} / {}]",
            formatter.clause_constants(clause),
            formatter.clause_literals(clause)
        );
        let _ = writeln!(out, "    [pending]: [{}]", formatter.clause_pending(clause));
        let _ = writeln!(out, "    [status]: [{}]", formatter.clause_status(clause));
    }
    out
}
