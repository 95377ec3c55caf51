//! Alphabets: the symbol tables formulas are read and written in.
//!
//! An [`Alphabet`] names the operator and constant symbols of a concrete
//! syntax. Two are built in:
//!
//! - [`SYMBOLIC`] --- `~ & | => <=>` with constants `T`/`F`; negation binds
//!   tight (`~p`).
//! - [`WORD`] --- `not and or imp equ` with constants `true`/`false`;
//!   operators are keywords and need whitespace around them (`not p`).
//!
//! The parser and the formatter both take an alphabet, so the decision core
//! never sees concrete syntax.

/// A concrete syntax for propositional formulas.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Alphabet {
    pub name: &'static str,
    pub not: &'static str,
    pub and: &'static str,
    pub or: &'static str,
    pub implies: &'static str,
    pub equiv: &'static str,
    pub truth: &'static str,
    pub falsity: &'static str,
    /// Word alphabets write operators as identifiers; this switches the
    /// tokenizer to keyword matching and puts a space after the negation.
    pub word_operators: bool,
}

/// The symbolic syntax: `~ & | => <=>`, constants `T` and `F`.
pub const SYMBOLIC: Alphabet = Alphabet {
    name: "symbolic",
    not: "~",
    and: "&",
    or: "|",
    implies: "=>",
    equiv: "<=>",
    truth: "T",
    falsity: "F",
    word_operators: false,
};

/// The word syntax: `not and or imp equ`, constants `true` and `false`.
pub const WORD: Alphabet = Alphabet {
    name: "word",
    not: "not",
    and: "and",
    or: "or",
    implies: "imp",
    equiv: "equ",
    truth: "true",
    falsity: "false",
    word_operators: true,
};

/// Bracket pairs accepted by every alphabet.
pub const BRACKETS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

impl Alphabet {
    /// Renders a negation in this alphabet: `~p` or `not p`.
    pub fn format_not(&self, operand: &str) -> String {
        if self.word_operators {
            format!("{} {}", self.not, operand)
        } else {
            format!("{}{}", self.not, operand)
        }
    }

    /// Returns `true` if `word` is one of this alphabet's keywords and hence
    /// not available as a variable name.
    pub fn is_keyword(&self, word: &str) -> bool {
        [
            self.truth,
            self.falsity,
            self.not,
            self.and,
            self.or,
            self.implies,
            self.equiv,
        ]
        .contains(&word)
    }

    /// Renders a human-readable legend of the alphabet.
    pub fn legend(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("***** {} alphabet *****\n", self.name));
        out.push_str("--------------------\n");
        out.push_str("Operators:\n");
        for (name, symbol) in [
            ("not", self.not),
            ("and", self.and),
            ("or", self.or),
            ("imp", self.implies),
            ("equ", self.equiv),
        ] {
            out.push_str(&format!("   {:<6} ------ {}\n", name, symbol));
        }
        out.push_str("--------------------\n");
        out.push_str("Constants:\n");
        for (name, symbol) in [("true", self.truth), ("false", self.falsity)] {
            out.push_str(&format!("   {:<6} ------ {}\n", name, symbol));
        }
        out.push_str("--------------------\n");
        out.push_str("Brackets:\n");
        for (open, close) in BRACKETS {
            out.push_str(&format!("   {} {}\n", open, close));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_not() {
        assert_eq!(SYMBOLIC.format_not("p"), "~p");
        assert_eq!(WORD.format_not("p"), "not p");
    }

    #[test]
    fn test_keywords() {
        assert!(SYMBOLIC.is_keyword("T"));
        assert!(!SYMBOLIC.is_keyword("p"));
        assert!(WORD.is_keyword("and"));
        assert!(WORD.is_keyword("true"));
        assert!(!WORD.is_keyword("andes"));
    }

    #[test]
    fn test_legend_mentions_all_symbols() {
        for alphabet in [&SYMBOLIC, &WORD] {
            let legend = alphabet.legend();
            println!("{}", legend);
            for symbol in [
                alphabet.not,
                alphabet.and,
                alphabet.or,
                alphabet.implies,
                alphabet.equiv,
                alphabet.truth,
                alphabet.falsity,
            ] {
                assert!(legend.contains(symbol));
            }
        }
    }
}
