//! # taut-rs: satisfiability and tautology checking for propositional logic
//!
//! **`taut-rs`** decides, for a propositional formula, whether *some*
//! assignment of truth values satisfies it, and whether it is true under
//! *every* assignment (a tautology). The decision procedure is a textbook
//! tableau-style tree expansion: the formula is incrementally reduced into
//! partially simplified clauses using De Morgan rewriting, with
//! literal-polarity bookkeeping and early termination policies that differ
//! between the two questions while sharing one algorithmic skeleton.
//!
//! ## How it works
//!
//! A [`Verifier`][crate::verify::Verifier] seeds a clause of the polarity
//! matching its question --- conjunctive for satisfiability, disjunctive for
//! validity --- and expands it step by step. Connectives of the clause's own
//! polarity flatten in place; connectives of the opposite polarity split the
//! clause into two independent copies, recorded as siblings in a binary
//! [`ConversionTree`][crate::tree::ConversionTree]. A clause resolves when it
//! contains a variable together with its negation, swallows a decisive
//! constant, or runs out of structure. Satisfiability stops at the first
//! satisfiable clause (existential); validity stops at the first
//! counterexample clause (universal).
//!
//! ## Quick start
//!
//! ```rust
//! use taut_rs::alphabet;
//! use taut_rs::parse::parse;
//! use taut_rs::verify::Verifier;
//!
//! let f = parse("(p => q) => ((q => r) => (p => r))", &alphabet::SYMBOLIC).unwrap();
//!
//! let mut sat = Verifier::satisfiability(f.clone());
//! assert_eq!(sat.verify(), Ok(true));
//!
//! let mut valid = Verifier::validity(f);
//! assert_eq!(valid.verify(), Ok(true));
//! ```
//!
//! ## Core components
//!
//! - **[`formula`]**: the immutable formula tree and its two rewrites,
//!   `negate` and `make_simple`.
//! - **[`clause`]**: the clause half-product and the expansion step.
//! - **[`tree`]**: the recorded conversion tree with path identifiers and
//!   breadth-first traversal.
//! - **[`verify`]**: the worklist driver and the two query policies.
//! - **[`parse`]**, **[`alphabet`]**, **[`format`](mod@crate::format)**, **[`report`]**: the
//!   textual surface around the core --- reading formulas, rendering them,
//!   and narrating a finished verification.
//!
//! The `taut` binary wires these together into a command-line checker.

pub mod alphabet;
pub mod clause;
pub mod format;
pub mod formula;
pub mod parse;
pub mod report;
pub mod tree;
pub mod types;
pub mod verify;
