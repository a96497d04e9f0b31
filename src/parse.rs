//! Shared nom plumbing for the coordinate extractors.

use nom::{
    branch::alt,
    character::complete::{anychar, char, digit0, digit1},
    combinator::{map, opt, recognize},
    error::context,
    multi::many0,
    sequence::{pair, tuple},
};

pub type Input<'a> = &'a str;
pub type Result<'a, O> = nom::IResult<Input<'a>, O, nom::error::VerboseError<Input<'a>>>;

/// Match an unsigned decimal literal such as `49`, `49.`, `8.8` or `.5`.
pub fn unsigned_decimal(i: Input) -> Result<&str> {
    let parser = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    context("unsigned decimal", parser)(i)
}

/// Match an optionally negative decimal literal. At least one digit must precede the decimal
/// point, so `-.5` only yields `5`.
pub fn signed_decimal(i: Input) -> Result<&str> {
    let parser = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit0)),
    )));
    context("signed decimal", parser)(i)
}

/// Run `parser` at every position of the input, left to right, and collect everything it
/// matches. Characters where the parser fails are skipped one at a time.
pub fn scan_all<'a, O, F>(i: Input<'a>, parser: F) -> Vec<O>
where
    F: FnMut(Input<'a>) -> Result<'a, O>,
{
    let mut scanner = many0(alt((map(parser, Some), map(anychar, |_| None))));
    match scanner(i) {
        Ok((_, found)) => found.into_iter().flatten().collect(),
        Err(_) => Vec::new(),
    }
}
