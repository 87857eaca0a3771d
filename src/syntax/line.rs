use winnow::{
    combinator::{alt, eof, preceded},
    token::{any, literal, rest, take},
    Located, PResult, Parser,
};

pub const HEADER_PREFIX: &str = "ID:";
pub const TERMINATOR: &str = "---";
pub const DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'s> {
    Header(&'s str),
    Terminator,
    Variant {
        code: &'s str,
        delimiter: char,
        text: &'s str,
    },
}

pub fn parse_line<'s>(s: &mut Located<&'s str>) -> PResult<Line<'s>> {
    alt((
        parse_header.map(Line::Header),
        parse_terminator.value(Line::Terminator),
        parse_variant,
    ))
    .parse_next(s)
}

fn parse_header<'s>(s: &mut Located<&'s str>) -> PResult<&'s str> {
    preceded(literal(HEADER_PREFIX), rest).parse_next(s)
}

fn parse_terminator<'s>(s: &mut Located<&'s str>) -> PResult<&'s str> {
    (literal(TERMINATOR), eof)
        .map(|(terminator, _)| terminator)
        .parse_next(s)
}

fn parse_variant<'s>(s: &mut Located<&'s str>) -> PResult<Line<'s>> {
    (take(2usize), any, rest)
        .map(|(code, delimiter, text)| Line::Variant {
            code,
            delimiter,
            text,
        })
        .parse_next(s)
}
