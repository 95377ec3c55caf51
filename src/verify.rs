//! Verifiers: driving clause expansion to a verdict.
//!
//! A [`Verifier`] answers one [`Query`] about one formula:
//!
//! - **Satisfiability** seeds a *conjunctive* root clause. The question is
//!   existential, so the first successfully resolved clause settles it; a
//!   failed clause only closes one branch.
//! - **Validity** seeds a *disjunctive* root clause. The question is
//!   universal, so the first failed clause settles it negatively, while
//!   success must wait for every branch to be exhausted.
//!
//! Both run the same worklist: pop a tree node, [`expand`] its clause, attach
//! the one or two results as children, then route each new node by its
//! resolution status. The verifier keeps ordered lists of the success and
//! failure nodes so a report generator can cite the deciding clause.
//!
//! [`expand`]: ClauseBuilder::expand
//!
//! # Example
//!
//! ```
//! use taut_rs::formula::Formula;
//! use taut_rs::verify::Verifier;
//!
//! // p | ~p is a tautology.
//! let f = Formula::or(Formula::var("p"), Formula::neg_var("p"));
//! let mut verifier = Verifier::validity(f);
//! assert_eq!(verifier.verify(), Ok(true));
//! assert_eq!(verifier.verdict(), Ok(true));
//! ```

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use log::debug;

use crate::clause::{ClauseBuilder, Resolution};
use crate::formula::Formula;
use crate::tree::{ConversionTree, NodeRef};
use crate::types::Polarity;

/// The question a verifier answers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Query {
    /// Does some assignment satisfy the formula?
    Satisfiability,
    /// Is the formula true under every assignment?
    Validity,
}

impl Query {
    /// Polarity of the root clause for this query.
    pub fn polarity(self) -> Polarity {
        match self {
            Query::Satisfiability => Polarity::Conjunctive,
            Query::Validity => Polarity::Disjunctive,
        }
    }

    /// Does the first successfully resolved clause end the search?
    fn ends_on_success(self) -> bool {
        self == Query::Satisfiability
    }

    /// Does the first failed clause end the search?
    fn ends_on_failure(self) -> bool {
        self == Query::Validity
    }

    /// Verdict once the worklist is exhausted without early termination.
    fn exhausted_verdict(self, successes: usize, failures: usize) -> bool {
        match self {
            Query::Satisfiability => successes > 0,
            Query::Validity => failures == 0,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Satisfiability => write!(f, "satisfiability"),
            Query::Validity => write!(f, "validity"),
        }
    }
}

/// Protocol misuse of a [`Verifier`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VerifyError {
    /// `verify` was called a second time.
    AlreadyVerified,
    /// The verdict was read before `verify` ran.
    NotYetVerified,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::AlreadyVerified => write!(f, "formula is already verified"),
            VerifyError::NotYetVerified => write!(f, "formula is not yet verified"),
        }
    }
}

impl Error for VerifyError {}

/// Runs one decision query over one formula.
pub struct Verifier {
    formula: Formula,
    query: Query,
    tree: ConversionTree,
    success_nodes: Vec<NodeRef>,
    failure_nodes: Vec<NodeRef>,
    verdict: Option<bool>,
}

impl Verifier {
    /// Creates a verifier for the given query.
    pub fn new(query: Query, formula: Formula) -> Self {
        let root = ClauseBuilder::new(query.polarity(), formula.clone());
        Verifier {
            formula,
            query,
            tree: ConversionTree::with_root(root),
            success_nodes: Vec::new(),
            failure_nodes: Vec::new(),
            verdict: None,
        }
    }

    /// Shorthand for [`Query::Satisfiability`].
    pub fn satisfiability(formula: Formula) -> Self {
        Verifier::new(Query::Satisfiability, formula)
    }

    /// Shorthand for [`Query::Validity`].
    pub fn validity(formula: Formula) -> Self {
        Verifier::new(Query::Validity, formula)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn query(&self) -> Query {
        self.query
    }

    /// The recorded conversion tree (breadth-first renderable).
    pub fn tree(&self) -> &ConversionTree {
        &self.tree
    }

    /// Nodes whose clause resolved to success, in discovery order.
    pub fn success_nodes(&self) -> &[NodeRef] {
        &self.success_nodes
    }

    /// Nodes whose clause resolved to failure, in discovery order.
    pub fn failure_nodes(&self) -> &[NodeRef] {
        &self.failure_nodes
    }

    pub fn is_verified(&self) -> bool {
        self.verdict.is_some()
    }

    /// The verdict, once [`Verifier::verify`] has run.
    pub fn verdict(&self) -> Result<bool, VerifyError> {
        self.verdict.ok_or(VerifyError::NotYetVerified)
    }

    /// Runs the query to completion. Callable exactly once.
    pub fn verify(&mut self) -> Result<bool, VerifyError> {
        self.verify_with(|_, _| {})
    }

    /// Like [`Verifier::verify`], invoking `on_expand` for every node the
    /// expansion attaches to the tree.
    pub fn verify_with<F>(&mut self, mut on_expand: F) -> Result<bool, VerifyError>
    where
        F: FnMut(NodeRef, &ClauseBuilder),
    {
        if self.is_verified() {
            return Err(VerifyError::AlreadyVerified);
        }
        debug!("verifying {} of {}", self.query, self.formula);

        let mut worklist: VecDeque<NodeRef> = VecDeque::new();
        worklist.extend(self.tree.root());

        while let Some(parent) = worklist.pop_front() {
            let expanded = self.tree.node(parent).clause().expand();
            for clause in expanded {
                let node = self
                    .tree
                    .add_leaf(clause, Some(parent))
                    .expect("expansion attaches at most two children to a fresh leaf");
                on_expand(node, self.tree.node(node).clause());

                match self.tree.node(node).clause().status() {
                    Resolution::Unresolved => worklist.push_back(node),
                    Resolution::ProvenSuccess(cause) => {
                        debug!("verifying clause at {}: {:?}", self.tree.node(node).id(), cause);
                        self.success_nodes.push(node);
                        if self.query.ends_on_success() {
                            return Ok(self.conclude(true));
                        }
                    }
                    Resolution::ProvenFailure(cause) => {
                        debug!(
                            "discrediting clause at {}: {:?}",
                            self.tree.node(node).id(),
                            cause
                        );
                        self.failure_nodes.push(node);
                        if self.query.ends_on_failure() {
                            return Ok(self.conclude(false));
                        }
                    }
                }
            }
        }

        debug!(
            "all clauses analysed: {} verifying, {} discrediting",
            self.success_nodes.len(),
            self.failure_nodes.len()
        );
        let verdict = self
            .query
            .exhausted_verdict(self.success_nodes.len(), self.failure_nodes.len());
        Ok(self.conclude(verdict))
    }

    fn conclude(&mut self, verdict: bool) -> bool {
        self.verdict = Some(verdict);
        verdict
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("query", &self.query)
            .field("formula", &self.formula)
            .field("tree_size", &self.tree.len())
            .field("verdict", &self.verdict)
            .finish()
    }
}
