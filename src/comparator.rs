use std::io::{self, BufRead};

use thiserror::Error;
use tracing::debug;

/// Relative tolerance used when none is given.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// How a token is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Only digits, '.', '+' and '-'
    Numeric,
    Text,
}

/// Classifies a token by its characters alone, "--1.2.3" still counts as numeric.
pub fn classify(token: &str) -> TokenKind {
    let numeric = !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'));

    if numeric { TokenKind::Numeric } else { TokenKind::Text }
}

/// |a - b| <= tolerance * max(|a|, |b|)
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

/// First difference found between two streams.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Mismatch {
    #[error("mismatch on line {line}: file 1 has `{left}`, file 2 has `{right}`")]
    Token {
        line: usize,
        left: String,
        right: String,
    },

    #[error("word count mismatch on line {line}")]
    WordCount { line: usize },

    #[error("line count mismatch: line {line} exists in only one file")]
    LineCount { line: usize },
}

impl Mismatch {
    /// Line number (1-based) the mismatch was found on.
    pub fn line(&self) -> usize {
        match self {
            Mismatch::Token { line, .. } | Mismatch::WordCount { line } | Mismatch::LineCount { line } => *line,
        }
    }

    /// Same mismatch as seen with the two streams swapped.
    pub fn swapped(self) -> Self {
        match self {
            Mismatch::Token { line, left, right } => Mismatch::Token { line, left: right, right: left },
            other => other,
        }
    }
}

/// Outcome of comparing two streams.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Match { lines: usize },
    Mismatch(Mismatch),
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match { .. })
    }
}

/// Compares two streams with a fixed relative tolerance.
/// Both streams are walked in lockstep. Tokens that look numeric on both sides are compared
/// with the tolerance, everything else has to match exactly, so one comparison covers status
/// lines such as `batchsize=2, ic=4 ...` as well as lines of output values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparator {
    tolerance: f64,
}

impl Default for Comparator {
    fn default() -> Self {
        Self { tolerance: DEFAULT_TOLERANCE }
    }
}

impl Comparator {
    pub fn new(tolerance: f64) -> Self {
        assert!(tolerance >= 0., "Tolerance can't be negative.");
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 { self.tolerance }

    /// Tokens agree when both parse as numbers within tolerance, or are the same text.
    /// Tokens that look numeric but don't parse ("-", "1.2.3") fall back to text comparison.
    pub fn tokens_agree(&self, left: &str, right: &str) -> bool {
        if classify(left) == TokenKind::Numeric && classify(right) == TokenKind::Numeric {
            if let (Ok(a), Ok(b)) = (left.parse::<f64>(), right.parse::<f64>()) {
                return within_tolerance(a, b, self.tolerance);
            }
        }

        left == right
    }

    /// Compares the tokens of a single line pair.
    pub fn compare_line(&self, line: usize, left: &str, right: &str) -> Option<Mismatch> {
        let mut left_tokens = left.split_whitespace();
        let mut right_tokens = right.split_whitespace();

        loop {
            match (left_tokens.next(), right_tokens.next()) {
                (Some(a), Some(b)) => {
                    if !self.tokens_agree(a, b) {
                        return Some(Mismatch::Token {
                            line,
                            left: a.to_string(),
                            right: b.to_string(),
                        });
                    }
                }
                (None, None) => return None,
                _ => return Some(Mismatch::WordCount { line }),
            }
        }
    }

    /// Walks both streams line by line and stops at the first mismatch.
    pub fn compare<A: BufRead, B: BufRead>(&self, left: A, right: B) -> io::Result<Comparison> {
        let mut left_lines = left.lines();
        let mut right_lines = right.lines();
        let mut line = 0;

        loop {
            match (left_lines.next(), right_lines.next()) {
                (Some(a), Some(b)) => {
                    line += 1;
                    let (a, b) = (a?, b?);

                    if let Some(mismatch) = self.compare_line(line, &a, &b) {
                        debug!(%mismatch, "streams differ");
                        return Ok(Comparison::Mismatch(mismatch));
                    }
                }
                (None, None) => return Ok(Comparison::Match { lines: line }),
                (Some(rest), None) | (None, Some(rest)) => {
                    rest?;
                    return Ok(Comparison::Mismatch(Mismatch::LineCount { line: line + 1 }));
                }
            }
        }
    }
}

/// Compares two streams with the default tolerance.
pub fn compare<A: BufRead, B: BufRead>(left: A, right: B) -> io::Result<Comparison> {
    Comparator::default().compare(left, right)
}
