//! Token-level parsers shared by the criteria grammar

use chrono::{DateTime, Utc};
use octofhir_logic_types::{parse_numeric, parse_temporal};
use rust_decimal::Decimal;
use winnow::ascii::{digit1, multispace0, Caseless};
use winnow::combinator::{cut_err, not, opt, peek, preceded, terminated};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::{any, literal, one_of, take_while};

pub(crate) type Input<'a> = &'a str;
pub(crate) type PResult<T> = Result<T, ErrMode<ContextError>>;

// Context labels, mapped to error codes in `lib.rs`
pub(crate) const UNTERMINATED: &str = "closing quote";
pub(crate) const NUMBER: &str = "number";
pub(crate) const TEMPORAL: &str = "date/time";
pub(crate) const OPERATOR: &str = "operator";
pub(crate) const LITERAL: &str = "literal";
pub(crate) const CLOSING: &str = "closing delimiter";
pub(crate) const NESTING: &str = "nesting depth";

const KEYWORDS: [&str; 3] = ["and", "or", "within"];

/// Skip whitespace
pub(crate) fn ws(input: &mut Input<'_>) -> PResult<()> {
    multispace0.void().parse_next(input)
}

pub(crate) fn any_char(input: &mut Input<'_>) -> PResult<char> {
    any.parse_next(input)
}

/// Punctuation preceded by optional whitespace
pub(crate) fn lit<'a>(token: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    preceded(ws, literal(token))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive keyword that is not the prefix of a longer identifier
pub(crate) fn keyword<'a>(kw: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    preceded(ws, terminated(literal(Caseless(kw)), not(one_of(is_ident_char))))
}

fn quoted(quote: char, input: &mut Input<'_>) -> PResult<String> {
    ws(input)?;
    any_char.verify(|c: &char| *c == quote).parse_next(input)?;

    let mut out = String::new();
    loop {
        let c = cut_err(any_char)
            .context(StrContext::Label(UNTERMINATED))
            .parse_next(input)?;
        match c {
            c if c == quote => return Ok(out),
            '\\' => out.push(
                cut_err(any_char)
                    .context(StrContext::Label(UNTERMINATED))
                    .parse_next(input)?,
            ),
            c => out.push(c),
        }
    }
}

/// `'text'`, with `\'` and `\\` escapes
pub(crate) fn string_literal(input: &mut Input<'_>) -> PResult<String> {
    quoted('\'', input)
}

/// `"CD4 COUNT"` or a bare identifier such as `WEIGHT`
pub(crate) fn reference(input: &mut Input<'_>) -> PResult<String> {
    if let Some(name) = opt(|i: &mut Input<'_>| quoted('"', i)).parse_next(input)? {
        return Ok(name);
    }
    preceded(
        ws,
        (one_of(|c: char| c.is_alphabetic()), take_while(0.., is_ident_char)).take(),
    )
    .verify(|name: &str| !KEYWORDS.iter().any(|kw| name.eq_ignore_ascii_case(kw)))
    .map(str::to_string)
    .parse_next(input)
}

/// Decimal number with optional sign, fraction and exponent
pub(crate) fn number(input: &mut Input<'_>) -> PResult<Decimal> {
    preceded(ws, peek((opt(one_of(['+', '-'])), digit1)))
        .void()
        .parse_next(input)?;
    cut_err(
        (
            opt(one_of(['+', '-'])),
            digit1,
            opt(('.', digit1)),
            opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
        )
            .take()
            .try_map(parse_numeric),
    )
    .context(StrContext::Label(NUMBER))
    .parse_next(input)
}

/// `@2024-01-01` or `@2024-01-01T08:30:00Z`
pub(crate) fn temporal(input: &mut Input<'_>) -> PResult<DateTime<Utc>> {
    lit("@").parse_next(input)?;
    cut_err(
        take_while(1.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '.' | '+')
        })
        .try_map(parse_temporal),
    )
    .context(StrContext::Label(TEMPORAL))
    .parse_next(input)
}
