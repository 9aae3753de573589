//! # Range Expression Parser
//!
//! Tagged parse of the stage-range shorthand, independent of any stage list.
//!
//! ## Grammar
//!
//! ```text
//! expression := "all" | "-" | token ("," token)*
//! token      := stage | bound "-" bound
//! bound      := stage | ""
//! ```
//!
//! An empty start bound is only valid in the first token and an empty end
//! bound only in the last one. Stage names are not checked here; that
//! happens when the expression is bound to a `StageList`.

use crate::ResolveError;
use crate::primitives::{ALL_KEYWORD, RANGE_SEPARATOR, TOKEN_SEPARATOR, WHOLE_RANGE};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// BOUND
// =============================================================================

/// One end of a range token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bound {
    /// Empty bound: the first or last stage of the pipeline.
    Open,
    /// An explicitly named stage.
    Named(String),
}

impl Bound {
    fn parse(text: &str) -> Self {
        if text.is_empty() {
            Bound::Open
        } else {
            Bound::Named(text.to_string())
        }
    }

    /// Returns `true` for [`Bound::Open`].
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Bound::Open)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Open => Ok(()),
            Bound::Named(stage) => write!(f, "{}", stage),
        }
    }
}

// =============================================================================
// TOKEN
// =============================================================================

/// One comma-separated element of an expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    /// A single stage, e.g. `loader`.
    Stage(String),
    /// An inclusive range, e.g. `normalizer-importer`, `hdfsput-`, `-annotator`.
    Range { from: Bound, to: Bound },
}

impl Token {
    /// Parse the token at `position` of an expression with `count` tokens.
    fn parse(text: &str, position: usize, count: usize) -> Result<Self, ResolveError> {
        if text.is_empty() {
            return Err(ResolveError::EmptyToken { position });
        }

        let Some((from, to)) = text.split_once(RANGE_SEPARATOR) else {
            return Ok(Token::Stage(text.to_string()));
        };

        if to.contains(RANGE_SEPARATOR) {
            return Err(ResolveError::MalformedRange {
                token: text.to_string(),
            });
        }

        let from = Bound::parse(from);
        let to = Bound::parse(to);

        if from.is_open() && position != 0 {
            return Err(ResolveError::OpenStartNotFirst {
                token: text.to_string(),
                position,
            });
        }
        if to.is_open() && position + 1 != count {
            return Err(ResolveError::OpenEndNotLast {
                token: text.to_string(),
                position,
            });
        }

        Ok(Token::Range { from, to })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Stage(stage) => write!(f, "{}", stage),
            Token::Range { from, to } => write!(f, "{}{}{}", from, RANGE_SEPARATOR, to),
        }
    }
}

// =============================================================================
// RANGE EXPRESSION
// =============================================================================

/// A parsed stage-range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeExpression {
    /// `all` or `-`: every stage.
    All,
    /// One or more tokens, in the order they were written.
    Tokens(Vec<Token>),
}

impl RangeExpression {
    /// Parse an expression.
    ///
    /// Fails on the first malformed token; positions in errors are 0-based.
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        if text == ALL_KEYWORD || text == WHOLE_RANGE {
            return Ok(RangeExpression::All);
        }
        if text.is_empty() {
            return Err(ResolveError::EmptyExpression);
        }

        let raw: Vec<&str> = text.split(TOKEN_SEPARATOR).collect();
        let count = raw.len();
        let tokens = raw
            .into_iter()
            .enumerate()
            .map(|(position, token)| Token::parse(token, position, count))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RangeExpression::Tokens(tokens))
    }

    /// Returns `true` if the expression selects every stage.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, RangeExpression::All)
    }

    /// Parsed tokens; empty for [`RangeExpression::All`].
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        match self {
            RangeExpression::All => &[],
            RangeExpression::Tokens(tokens) => tokens,
        }
    }
}

impl FromStr for RangeExpression {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeExpression::All => write!(f, "{}", ALL_KEYWORD),
            RangeExpression::Tokens(tokens) => {
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", TOKEN_SEPARATOR)?;
                    }
                    write!(f, "{}", token)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
