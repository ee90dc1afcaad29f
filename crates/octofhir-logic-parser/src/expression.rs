//! Criteria grammar
//!
//! ```text
//! criteria := and_expr ("or" and_expr)*
//! and_expr := primary ("and" primary)*
//! primary  := "(" criteria ")" | leaf
//! leaf     := reference operator literal ["within" "[" [temporal] "," [temporal] "]"]
//! literal  := "Code" string ["from" string] | temporal | number | string
//! ```
//!
//! `and` binds tighter than `or`. Chains of the same operator become one
//! n-ary node; parenthesized groups stay separate nodes. Groups nest at most
//! [`MAX_NESTING`] levels deep.

use crate::combinators::{
    keyword, lit, number, reference, string_literal, temporal, ws, Input, PResult, CLOSING,
    LITERAL, NESTING, OPERATOR,
};
use octofhir_logic_ast::{
    CodeLiteral, ComparisonOperator, CriteriaExpr, LeafExpr, Literal, LogicalOperator, WindowExpr,
};
use winnow::combinator::{alt, cut_err, fail, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;

/// Deepest parenthesized nesting accepted
pub const MAX_NESTING: usize = 128;

/// Whole input: criteria followed only by whitespace
pub(crate) fn document(input: &mut Input<'_>) -> PResult<CriteriaExpr> {
    let expr = criteria(input, 0)?;
    ws(input)?;
    Ok(expr)
}

fn criteria(input: &mut Input<'_>, depth: usize) -> PResult<CriteriaExpr> {
    let first = and_expr(input, depth)?;
    let rest: Vec<CriteriaExpr> = repeat(
        0..,
        preceded(keyword("or"), cut_err(|i: &mut Input<'_>| and_expr(i, depth))),
    )
    .parse_next(input)?;
    Ok(chain(LogicalOperator::Or, first, rest))
}

fn and_expr(input: &mut Input<'_>, depth: usize) -> PResult<CriteriaExpr> {
    let first = primary(input, depth)?;
    let rest: Vec<CriteriaExpr> = repeat(
        0..,
        preceded(keyword("and"), cut_err(|i: &mut Input<'_>| primary(i, depth))),
    )
    .parse_next(input)?;
    Ok(chain(LogicalOperator::And, first, rest))
}

fn chain(operator: LogicalOperator, first: CriteriaExpr, rest: Vec<CriteriaExpr>) -> CriteriaExpr {
    if rest.is_empty() {
        return first;
    }
    let mut operands = Vec::with_capacity(rest.len() + 1);
    operands.push(first);
    operands.extend(rest);
    CriteriaExpr::logical(operator, operands)
}

fn primary(input: &mut Input<'_>, depth: usize) -> PResult<CriteriaExpr> {
    alt((
        |i: &mut Input<'_>| group(i, depth),
        leaf.map(CriteriaExpr::Leaf),
    ))
    .parse_next(input)
}

/// `( criteria )`, one level below `depth`
fn group(input: &mut Input<'_>, depth: usize) -> PResult<CriteriaExpr> {
    lit("(").parse_next(input)?;
    if depth >= MAX_NESTING {
        return cut_err(fail::<_, CriteriaExpr, ErrMode<ContextError>>)
            .context(StrContext::Label(NESTING))
            .parse_next(input);
    }
    let inner = cut_err(|i: &mut Input<'_>| criteria(i, depth + 1)).parse_next(input)?;
    cut_err(lit(")"))
        .context(StrContext::Label(CLOSING))
        .parse_next(input)?;
    Ok(inner)
}

fn leaf(input: &mut Input<'_>) -> PResult<LeafExpr> {
    let reference = reference(input)?;
    let operator = cut_err(comparison_operator)
        .context(StrContext::Label(OPERATOR))
        .parse_next(input)?;
    let literal = cut_err(literal_value)
        .context(StrContext::Label(LITERAL))
        .parse_next(input)?;
    let window = opt(window).parse_next(input)?;

    Ok(LeafExpr {
        reference,
        operator,
        literal,
        window,
    })
}

fn comparison_operator(input: &mut Input<'_>) -> PResult<ComparisonOperator> {
    preceded(ws, alt((">=", "<=", "!=", "<>", "==", "=", "<", ">")))
        .verify_map(ComparisonOperator::from_symbol)
        .parse_next(input)
}

fn literal_value(input: &mut Input<'_>) -> PResult<Literal> {
    alt((
        code_literal,
        temporal.map(Literal::Temporal),
        number.map(Literal::Number),
        string_literal.map(Literal::Text),
    ))
    .parse_next(input)
}

fn code_literal(input: &mut Input<'_>) -> PResult<Literal> {
    keyword("code").parse_next(input)?;
    let code = cut_err(string_literal).parse_next(input)?;
    let system = opt(preceded(keyword("from"), cut_err(string_literal))).parse_next(input)?;
    Ok(Literal::Code(CodeLiteral { code, system }))
}

fn window(input: &mut Input<'_>) -> PResult<WindowExpr> {
    keyword("within").parse_next(input)?;
    cut_err(lit("[")).parse_next(input)?;
    let start = opt(temporal).parse_next(input)?;
    cut_err(lit(",")).parse_next(input)?;
    let end = opt(temporal).parse_next(input)?;
    cut_err(lit("]"))
        .context(StrContext::Label(CLOSING))
        .parse_next(input)?;
    Ok(WindowExpr { start, end })
}
