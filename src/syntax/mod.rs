use std::{collections::HashSet, path::Path};

use serde::Serialize;
use tracing::{debug, warn};
use winnow::{Located, Parser};

use crate::error::{Error, Malformed};

pub mod line;
pub mod text;

pub use line::{parse_line, Line, DELIMITER};
pub use text::Text;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: Text,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub lang: String,
    pub text: Text,
}

#[cfg(test)]
impl Record {
    pub fn new(id: &str) -> Self {
        Self {
            id: Text::parse(id).unwrap(),
            variants: vec![],
        }
    }

    pub fn with_variant(mut self, lang: &str, text: &str) -> Self {
        self.variants.push(Variant {
            lang: lang.to_string(),
            text: Text::parse(text).unwrap(),
        });
        self
    }
}

impl Catalog {
    pub fn variant_count(&self) -> usize {
        self.records.iter().map(|record| record.variants.len()).sum()
    }
}

pub fn load(path: &Path) -> Result<Catalog, Error> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read translation source");
    parse_catalog(&source)
}

pub fn parse_catalog(source: &str) -> Result<Catalog, Error> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut records = vec![];
    // header line number and the record being filled
    let mut open: Option<(usize, Record)> = None;
    let mut seen_ids = HashSet::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let malformed = |kind| Error::MalformedRecord { line, kind };

        if raw.is_empty() && open.is_none() {
            continue;
        }
        // headers and terminators always parse, so a failure is a short variant
        let parsed = parse_line.parse(Located::new(raw)).map_err(|_| {
            malformed(match open {
                Some(_) => Malformed::ShortVariant,
                None => Malformed::OrphanVariant,
            })
        })?;

        match parsed {
            Line::Header(id) => {
                if let Some((_, record)) = &open {
                    return Err(malformed(Malformed::UnclosedRecord {
                        id: record.id.source.clone(),
                    }));
                }
                if id.is_empty() {
                    return Err(malformed(Malformed::EmptyId));
                }
                let id = Text::parse(id).map_err(malformed)?;
                if !seen_ids.insert(id.value.clone()) {
                    warn!(line, id = %id.source, "duplicate record is unreachable");
                }
                open = Some((
                    line,
                    Record {
                        id,
                        variants: vec![],
                    },
                ));
            }
            Line::Terminator => match open.take() {
                Some((_, record)) => records.push(record),
                None => return Err(malformed(Malformed::StrayTerminator)),
            },
            Line::Variant {
                code,
                delimiter,
                text,
            } => {
                let Some((_, record)) = open.as_mut() else {
                    return Err(malformed(Malformed::OrphanVariant));
                };
                if delimiter != DELIMITER {
                    return Err(malformed(Malformed::MissingDelimiter { found: delimiter }));
                }
                if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(malformed(Malformed::BadLanguage {
                        code: code.to_string(),
                    }));
                }
                let text = Text::parse(text).map_err(malformed)?;
                if record.variants.iter().any(|variant| variant.lang == code) {
                    warn!(line, id = %record.id.source, lang = code, "duplicate translation is unreachable");
                }
                record.variants.push(Variant {
                    lang: code.to_string(),
                    text,
                });
            }
        }
    }

    if let Some((line, record)) = open {
        return Err(Error::MalformedRecord {
            line,
            kind: Malformed::MissingTerminator {
                id: record.id.source,
            },
        });
    }

    debug!(records = records.len(), "parsed catalog");
    Ok(Catalog { records })
}
