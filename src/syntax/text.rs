use serde::{Serialize, Serializer};
use winnow::{
    combinator::{alt, preceded, repeat},
    token::take_till,
    Located, PResult, Parser,
};

use crate::error::Malformed;

// `source` is the text as written in the file, with C escapes; `value` is what
// the C compiler makes of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub source: String,
    pub value: String,
}

impl Text {
    pub fn parse(source: &str) -> Result<Self, Malformed> {
        let value = parse_text
            .parse(Located::new(source))
            .map_err(|err| Malformed::BadEscape {
                found: source[err.offset()..].chars().nth(1),
            })?;
        Ok(Self {
            source: source.to_string(),
            value,
        })
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

fn parse_text(s: &mut Located<&str>) -> PResult<String> {
    #[derive(Debug, Clone)]
    enum Fragment<'s> {
        Literal(&'s str),
        Escape(char),
    }
    repeat(
        0..,
        alt((
            take_till(1.., '\\').map(Fragment::Literal),
            parse_escape.map(Fragment::Escape),
        )),
    )
    .fold(String::new, |mut string, fragment| {
        match fragment {
            Fragment::Literal(literal) => string.push_str(literal),
            Fragment::Escape(escape) => string.push(escape),
        }
        string
    })
    .parse_next(s)
}

fn parse_escape(s: &mut Located<&str>) -> PResult<char> {
    preceded(
        '\\',
        alt((
            'n'.value('\n'),
            'r'.value('\r'),
            't'.value('\t'),
            'a'.value('\u{07}'),
            'b'.value('\u{08}'),
            'f'.value('\u{0C}'),
            'v'.value('\u{0B}'),
            '\\'.value('\\'),
            '"'.value('"'),
            '\''.value('\''),
            '?'.value('?'),
        )),
    )
    .parse_next(s)
}
