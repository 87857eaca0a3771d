use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {kind}")]
    MalformedRecord { line: usize, kind: Malformed },
    #[error("`{0}` is not a valid C identifier")]
    InvalidIdentifier(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("record header has an empty id")]
    EmptyId,
    #[error("new record started while `{id}` is still open")]
    UnclosedRecord { id: String },
    #[error("record `{id}` is never closed with `---`")]
    MissingTerminator { id: String },
    #[error("`---` without an open record")]
    StrayTerminator,
    #[error("translation line outside of a record")]
    OrphanVariant,
    #[error("translation line is too short for a language code and delimiter")]
    ShortVariant,
    #[error("expected `:` after the language code, found `{found}`")]
    MissingDelimiter { found: char },
    #[error("language code `{code}` must be two ASCII letters or digits")]
    BadLanguage { code: String },
    #[error("{}", escape_message(.found))]
    BadEscape { found: Option<char> },
}

fn escape_message(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("unsupported escape sequence `\\{c}`"),
        None => "text ends with a dangling `\\`".to_string(),
    }
}
