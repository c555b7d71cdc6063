//! Splits a single normalized formula part into tokens.

use nom::{
    branch::alt,
    character::complete::{anychar, char, digit1, satisfy},
    combinator::{map, opt, recognize, value},
    sequence::pair,
    IResult,
};
use tracing::trace;

type Res<'a, T> = IResult<&'a str, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// An uppercase letter, optionally followed by one lowercase letter.
    Element(&'a str),
    Integer(u64),
    Open,
    Close,
}

fn parse_element(input: &str) -> Res<'_, Token<'_>> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_uppercase()),
            opt(satisfy(|c| c.is_ascii_lowercase())),
        )),
        Token::Element,
    )(input)
}

/// A digit run too large for `u64` saturates rather than being dropped.
fn parse_integer(input: &str) -> Res<'_, Token<'_>> {
    map(digit1, |digits: &str| {
        Token::Integer(digits.parse().unwrap_or(u64::MAX))
    })(input)
}

fn parse_token(input: &str) -> Res<'_, Token<'_>> {
    alt((
        parse_element,
        parse_integer,
        value(Token::Open, char('(')),
        value(Token::Close, char(')')),
    ))(input)
}

/// A token, or `None` for a single character that cannot start one.
fn parse_lenient(input: &str) -> Res<'_, Option<Token<'_>>> {
    alt((map(parse_token, Some), value(None, anychar)))(input)
}

/// Tokenize a formula part with no dots and only round brackets.
///
/// Never fails: characters that are not part of an element symbol, a number
/// or a round bracket are dropped.
pub fn tokenize(formula: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = formula;
    while let Ok((next, token)) = parse_lenient(rest) {
        match token {
            Some(token) => tokens.push(token),
            None => trace!("Skipping {:?} in {:?}", &rest[..rest.len() - next.len()], formula),
        }
        rest = next;
    }
    tokens
}
