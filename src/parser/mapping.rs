// Parser for the aes(...) mapping argument

use super::lexer::{identifier, string_literal, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{eof, opt},
    sequence::preceded,
    IResult,
};

/// Column mapping for one scatter plot
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    /// Column name for the x-axis
    pub x: String,
    /// Column name for the y-axis
    pub y: String,
    /// Column name for hue grouping, if any
    pub hue: Option<String>,
}

/// Column names are bare identifiers or quoted strings
fn column_name(input: &str) -> IResult<&str, String> {
    alt((string_literal, identifier))(input)
}

/// Parse a mapping specification
/// Format: aes(x: col, y: col) or aes(x: col, y: col, hue: col)
pub fn parse_mapping(input: &str) -> IResult<&str, Mapping> {
    let (input, _) = ws(tag("aes"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    // Parse x: column
    let (input, _) = ws(tag("x:"))(input)?;
    let (input, x) = ws(column_name)(input)?;
    let (input, _) = ws(char(','))(input)?;

    // Parse y: column
    let (input, _) = ws(tag("y:"))(input)?;
    let (input, y) = ws(column_name)(input)?;

    // Parse optional hue: column
    let (input, hue) = opt(preceded(
        ws(char(',')),
        preceded(ws(tag("hue:")), ws(column_name)),
    ))(input)?;

    let (input, _) = ws(char(')'))(input)?;
    let (input, _) = ws(eof)(input)?;

    Ok((input, Mapping { x, y, hue }))
}
