//! Boolean profile-expression parsing and evaluation.
//!
//! A document's `spring.profiles` entries are ordinary profile names most of
//! the time (`dev`, `prod`), but the grammar also accepts negation (`!test`)
//! and grouping with `&`/`|`/parentheses, matching Spring's
//! `spring.config.activate.on-profile` expression syntax. This module is the
//! "environment accepts the declared profile expression" delegate the spec
//! calls out in [`DocumentFilter`](super::filter::DocumentFilter).

use std::collections::HashSet;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Result, VortexError};

/// A parsed boolean expression over profile names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileExpression {
    /// A bare profile name.
    Name(String),
    /// `!expr`
    Not(Box<ProfileExpression>),
    /// `lhs & rhs`
    And(Box<ProfileExpression>, Box<ProfileExpression>),
    /// `lhs | rhs`
    Or(Box<ProfileExpression>, Box<ProfileExpression>),
}

impl ProfileExpression {
    /// Parses a single expression string.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use vortex_core::env::ProfileExpression;
    ///
    /// let expr = ProfileExpression::parse("prod & !test").unwrap();
    /// let mut active = HashSet::new();
    /// active.insert("prod".to_string());
    /// assert!(expr.eval(&active));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser {
            chars: input.chars().peekable(),
            source: input,
        };
        let expr = parser.parse_or()?;
        parser.skip_whitespace();
        if parser.chars.peek().is_some() {
            return Err(VortexError::invalid_profile_expression(
                input,
                "unexpected trailing input",
            ));
        }
        Ok(expr)
    }

    /// Parses each entry of `declared` and OR-joins them, matching the
    /// "a document is active if any of its declared profiles matches"
    /// semantics of a plain `spring.profiles: a, b, c` list.
    pub fn parse_any(declared: &[String]) -> Result<Self> {
        let joined = declared.join(" | ");
        Self::parse(&joined)
    }

    /// Evaluates the expression against a set of currently active profile names.
    pub fn eval(&self, active: &HashSet<String>) -> bool {
        match self {
            ProfileExpression::Name(name) => active.contains(name),
            ProfileExpression::Not(inner) => !inner.eval(active),
            ProfileExpression::And(lhs, rhs) => lhs.eval(active) && rhs.eval(active),
            ProfileExpression::Or(lhs, rhs) => lhs.eval(active) || rhs.eval(active),
        }
    }
}

impl fmt::Display for ProfileExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileExpression::Name(name) => write!(f, "{}", name),
            ProfileExpression::Not(inner) => write!(f, "!{}", inner),
            ProfileExpression::And(lhs, rhs) => write!(f, "({} & {})", lhs, rhs),
            ProfileExpression::Or(lhs, rhs) => write!(f, "({} | {})", lhs, rhs),
        }
    }
}

/// Returns true iff `profile_name` appears verbatim (no operators) among
/// `declared` - the membership half of the positive filter, distinct from
/// full expression evaluation.
pub fn declares_profile(declared: &[String], profile_name: &str) -> bool {
    declared.iter().any(|d| d.trim() == profile_name)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn parse_or(&mut self) -> Result<ProfileExpression> {
        let mut lhs = self.parse_and()?;
        loop {
            self.skip_whitespace();
            if self.chars.peek() == Some(&'|') {
                self.chars.next();
                let rhs = self.parse_and()?;
                lhs = ProfileExpression::Or(Box::new(lhs), Box::new(rhs));
            } else {
                break;
            }
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<ProfileExpression> {
        let mut lhs = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            if self.chars.peek() == Some(&'&') {
                self.chars.next();
                let rhs = self.parse_unary()?;
                lhs = ProfileExpression::And(Box::new(lhs), Box::new(rhs));
            } else {
                break;
            }
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<ProfileExpression> {
        self.skip_whitespace();
        if self.chars.peek() == Some(&'!') {
            self.chars.next();
            let inner = self.parse_unary()?;
            return Ok(ProfileExpression::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<ProfileExpression> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some('(') => {
                self.chars.next();
                let inner = self.parse_or()?;
                self.skip_whitespace();
                if self.chars.next() != Some(')') {
                    return Err(VortexError::invalid_profile_expression(
                        self.source,
                        "missing closing ')'",
                    ));
                }
                Ok(inner)
            },
            Some(_) => self.parse_name(),
            None => Err(VortexError::invalid_profile_expression(
                self.source,
                "unexpected end of expression",
            )),
        }
    }

    fn parse_name(&mut self) -> Result<ProfileExpression> {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '&' || c == '|' || c == '(' || c == ')' || c == '!' {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(VortexError::invalid_profile_expression(
                self.source,
                "empty profile name",
            ));
        }
        Ok(ProfileExpression::Name(trimmed.to_string()))
    }
}
