//! Parsing formula text into [`Formula`] values.
//!
//! The grammar follows the usual precedence, from tightest to loosest:
//! negation, conjunction, disjunction, implication, equivalence. Conjunction,
//! disjunction and equivalence chains associate to the left; implication
//! chains associate to the right (`p => q => r` is `p => (q => r)`).
//! Subformulas may be grouped with `()`, `[]` or `{}` in matching pairs.
//!
//! Which symbols spell the operators comes from the [`Alphabet`]; the parser
//! itself is a plain hand-rolled tokenizer plus recursive descent.
//!
//! # Example
//!
//! ```
//! use taut_rs::alphabet;
//! use taut_rs::formula::Formula;
//! use taut_rs::parse::parse;
//!
//! let f = parse("p => [q | ~p]", &alphabet::SYMBOLIC).unwrap();
//! assert_eq!(
//!     f,
//!     Formula::implies(
//!         Formula::var("p"),
//!         Formula::or(Formula::var("q"), Formula::not(Formula::var("p"))),
//!     )
//! );
//! ```

use std::error::Error;
use std::fmt;

use log::debug;

use crate::alphabet::{Alphabet, BRACKETS};
use crate::formula::Formula;

/// A syntax error, with the byte offset it was detected at.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    pub pos: usize,
    pub message: String,
}

impl ParseError {
    fn new(pos: usize, message: impl Into<String>) -> Self {
        ParseError {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at offset {}: {}", self.pos, self.message)
    }
}

impl Error for ParseError {}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token {
    Open(usize),
    Close(usize),
    Not,
    And,
    Or,
    Implies,
    Equiv,
    Truth,
    Falsity,
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open(kind) => write!(f, "`{}`", BRACKETS[*kind].0),
            Token::Close(kind) => write!(f, "`{}`", BRACKETS[*kind].1),
            Token::Not => write!(f, "negation"),
            Token::And => write!(f, "conjunction"),
            Token::Or => write!(f, "disjunction"),
            Token::Implies => write!(f, "implication"),
            Token::Equiv => write!(f, "equivalence"),
            Token::Truth => write!(f, "constant true"),
            Token::Falsity => write!(f, "constant false"),
            Token::Ident(name) => write!(f, "variable `{}`", name),
        }
    }
}

fn tokenize(input: &str, alphabet: &Alphabet) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut pos = 0;

    // Symbolic operators, longest first so `<=>` wins over `=>`.
    let mut symbol_ops = [
        (Token::Equiv, alphabet.equiv),
        (Token::Implies, alphabet.implies),
        (Token::Not, alphabet.not),
        (Token::And, alphabet.and),
        (Token::Or, alphabet.or),
    ];
    symbol_ops.sort_by_key(|(_, s)| std::cmp::Reverse(s.len()));

    'outer: while pos < bytes.len() {
        let c = bytes[pos] as char;
        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        for (kind, (open, close)) in BRACKETS.iter().enumerate() {
            if c == *open {
                tokens.push((pos, Token::Open(kind)));
                pos += 1;
                continue 'outer;
            }
            if c == *close {
                tokens.push((pos, Token::Close(kind)));
                pos += 1;
                continue 'outer;
            }
        }
        if c.is_ascii_alphabetic() {
            let start = pos;
            while pos < bytes.len()
                && ((bytes[pos] as char).is_ascii_alphanumeric() || bytes[pos] == b'_')
            {
                pos += 1;
            }
            let word = &input[start..pos];
            let token = match word {
                w if w == alphabet.truth => Token::Truth,
                w if w == alphabet.falsity => Token::Falsity,
                w if w == alphabet.not => Token::Not,
                w if w == alphabet.and => Token::And,
                w if w == alphabet.or => Token::Or,
                w if w == alphabet.implies => Token::Implies,
                w if w == alphabet.equiv => Token::Equiv,
                w => Token::Ident(w.to_string()),
            };
            tokens.push((start, token));
            continue;
        }
        for (token, symbol) in &symbol_ops {
            if !symbol.starts_with(|ch: char| ch.is_ascii_alphabetic())
                && input[pos..].starts_with(symbol)
            {
                tokens.push((pos, token.clone()));
                pos += symbol.len();
                continue 'outer;
            }
        }
        let c = input[pos..].chars().next().unwrap_or('?');
        return Err(ParseError::new(pos, format!("unexpected character `{}`", c)));
    }
    Ok(tokens)
}

/// Parses `input` in the given alphabet into a [`Formula`].
pub fn parse(input: &str, alphabet: &Alphabet) -> Result<Formula, ParseError> {
    let tokens = tokenize(input, alphabet)?;
    debug!("tokenized {} tokens from {:?}", tokens.len(), input);
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
    };
    let formula = parser.equivalence()?;
    if let Some((at, token)) = parser.peek_at() {
        return Err(ParseError::new(at, format!("unexpected {}", token)));
    }
    Ok(formula)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn peek_at(&self) -> Option<(usize, &Token)> {
        self.tokens.get(self.pos).map(|(at, t)| (*at, t))
    }

    fn bump(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn here(&self) -> usize {
        self.tokens.get(self.pos).map(|(at, _)| *at).unwrap_or(self.end)
    }

    // equivalence := implication (EQU implication)*      (left)
    fn equivalence(&mut self) -> Result<Formula, ParseError> {
        let mut formula = self.implication()?;
        while self.eat(&Token::Equiv) {
            formula = Formula::equiv(formula, self.implication()?);
        }
        Ok(formula)
    }

    // implication := disjunction (IMP implication)?      (right)
    fn implication(&mut self) -> Result<Formula, ParseError> {
        let left = self.disjunction()?;
        if self.eat(&Token::Implies) {
            Ok(Formula::implies(left, self.implication()?))
        } else {
            Ok(left)
        }
    }

    // disjunction := conjunction (OR conjunction)*       (left)
    fn disjunction(&mut self) -> Result<Formula, ParseError> {
        let mut formula = self.conjunction()?;
        while self.eat(&Token::Or) {
            formula = Formula::or(formula, self.conjunction()?);
        }
        Ok(formula)
    }

    // conjunction := unary (AND unary)*                  (left)
    fn conjunction(&mut self) -> Result<Formula, ParseError> {
        let mut formula = self.unary()?;
        while self.eat(&Token::And) {
            formula = Formula::and(formula, self.unary()?);
        }
        Ok(formula)
    }

    // unary := NOT unary | atom
    fn unary(&mut self) -> Result<Formula, ParseError> {
        if self.eat(&Token::Not) {
            Ok(Formula::not(self.unary()?))
        } else {
            self.atom()
        }
    }

    // atom := TRUE | FALSE | variable | open equivalence close
    fn atom(&mut self) -> Result<Formula, ParseError> {
        let Some((at, token)) = self.bump() else {
            return Err(ParseError::new(self.end, "unexpected end of input"));
        };
        match token {
            Token::Truth => Ok(Formula::Truth),
            Token::Falsity => Ok(Formula::False),
            Token::Ident(name) => Ok(Formula::var(name)),
            Token::Open(kind) => {
                let inner = self.equivalence()?;
                if self.eat(&Token::Close(kind)) {
                    Ok(inner)
                } else {
                    Err(ParseError::new(
                        self.here(),
                        format!("expected closing `{}`", BRACKETS[kind].1),
                    ))
                }
            }
            other => Err(ParseError::new(at, format!("unexpected {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    use crate::alphabet::{SYMBOLIC, WORD};

    fn sym(input: &str) -> Formula {
        parse(input, &SYMBOLIC).unwrap()
    }

    #[test]
    fn test_atoms() {
        assert_eq!(sym("T"), Formula::Truth);
        assert_eq!(sym("F"), Formula::False);
        assert_eq!(sym("p"), Formula::var("p"));
        assert_eq!(sym("some_var1"), Formula::var("some_var1"));
        assert_eq!(sym("~p"), Formula::not(Formula::var("p")));
    }

    #[test]
    fn test_precedence() {
        // not > and > or > imp > equ
        assert_eq!(
            sym("~p & q"),
            Formula::and(Formula::not(Formula::var("p")), Formula::var("q"))
        );
        assert_eq!(
            sym("p & q | r"),
            Formula::or(
                Formula::and(Formula::var("p"), Formula::var("q")),
                Formula::var("r")
            )
        );
        assert_eq!(
            sym("p | q => r"),
            Formula::implies(
                Formula::or(Formula::var("p"), Formula::var("q")),
                Formula::var("r")
            )
        );
        assert_eq!(
            sym("p => q <=> r"),
            Formula::equiv(
                Formula::implies(Formula::var("p"), Formula::var("q")),
                Formula::var("r")
            )
        );
    }

    #[test]
    fn test_associativity() {
        // Left for and/or/equ.
        assert_eq!(
            sym("p & q & r"),
            Formula::and(
                Formula::and(Formula::var("p"), Formula::var("q")),
                Formula::var("r")
            )
        );
        assert_eq!(
            sym("p <=> q <=> r"),
            Formula::equiv(
                Formula::equiv(Formula::var("p"), Formula::var("q")),
                Formula::var("r")
            )
        );
        // Right for implication.
        assert_eq!(
            sym("p => q => r"),
            Formula::implies(
                Formula::var("p"),
                Formula::implies(Formula::var("q"), Formula::var("r"))
            )
        );
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            sym("(p | q) & r"),
            Formula::and(
                Formula::or(Formula::var("p"), Formula::var("q")),
                Formula::var("r")
            )
        );
        assert_eq!(sym("{[(p)]}"), Formula::var("p"));
    }

    #[test]
    fn test_double_negation_parses_structurally() {
        assert_eq!(sym("~~p"), Formula::not(Formula::not(Formula::var("p"))));
    }

    #[test]
    fn test_word_alphabet() {
        let f = parse("not p and q imp true", &WORD).unwrap();
        assert_eq!(
            f,
            Formula::implies(
                Formula::and(Formula::not(Formula::var("p")), Formula::var("q")),
                Formula::Truth
            )
        );
        // `p` spelled with a keyword prefix stays a variable.
        assert_eq!(parse("andes", &WORD).unwrap(), Formula::var("andes"));
    }

    #[test]
    fn test_errors() {
        assert!(parse("", &SYMBOLIC).is_err());
        assert!(parse("p &", &SYMBOLIC).is_err());
        assert!(parse("p q", &SYMBOLIC).is_err());
        assert!(parse("(p | q", &SYMBOLIC).is_err());
        assert!(parse("(p | q]", &SYMBOLIC).is_err());
        assert!(parse("p ? q", &SYMBOLIC).is_err());
        // Word alphabet does not accept symbolic operators.
        assert!(parse("p & q", &WORD).is_err());

        let err = parse("p | | q", &SYMBOLIC).unwrap_err();
        println!("err = {}", err);
        assert_eq!(err.pos, 4);
    }
}
