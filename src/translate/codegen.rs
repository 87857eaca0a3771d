use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

use crate::{error::Error, syntax::Catalog};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LangSource {
    #[default]
    Global,
    Parameter,
}

#[derive(Debug, Clone)]
pub struct CodegenOptions {
    function: String,
    lang_var: String,
    lang_source: LangSource,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            function: "translate".into(),
            lang_var: "lang_code".into(),
            lang_source: LangSource::Global,
        }
    }
}

impl CodegenOptions {
    pub fn new(function: &str, lang_var: &str, lang_source: LangSource) -> Result<Self, Error> {
        for name in [function, lang_var] {
            if !is_identifier(name) {
                return Err(Error::InvalidIdentifier(name.to_string()));
            }
        }
        Ok(Self {
            function: function.to_string(),
            lang_var: lang_var.to_string(),
            lang_source,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// `source` has already been checked for valid escapes, so only bare quotes
// need a backslash.
pub fn escape(source: &str) -> Cow<'_, str> {
    if !source.contains('"') {
        return Cow::Borrowed(source);
    }
    let mut out = String::with_capacity(source.len() + 2);
    let mut escaped = false;
    for c in source.chars() {
        if c == '"' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    Cow::Owned(out)
}

pub struct Codegen<'a> {
    catalog: &'a Catalog,
    options: &'a CodegenOptions,
}

impl<'a> Codegen<'a> {
    pub fn new(catalog: &'a Catalog, options: &'a CodegenOptions) -> Self {
        Self { catalog, options }
    }

    pub fn translate(catalog: &Catalog, options: &CodegenOptions) -> String {
        Codegen::new(catalog, options).to_string()
    }

    fn preamble(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "// transtab {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(f, "#include <string.h>")?;
        writeln!(f)?;
        if self.options.lang_source == LangSource::Global {
            writeln!(f, "const char *{};", self.options.lang_var)?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn signature(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let CodegenOptions {
            function, lang_var, ..
        } = self.options;
        match self.options.lang_source {
            LangSource::Global => writeln!(f, "const char *{function}(const char *msg)"),
            LangSource::Parameter => writeln!(
                f,
                "const char *{function}(const char *msg, const char *{lang_var})"
            ),
        }
    }
}

impl Display for Codegen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.preamble(f)?;
        self.signature(f)?;
        writeln!(f, "{{")?;
        let lang_var = &self.options.lang_var;
        for record in &self.catalog.records {
            let id = escape(&record.id.source);
            writeln!(f, "    if (strcmp(msg, \"{id}\") == 0) {{")?;
            for variant in &record.variants {
                writeln!(
                    f,
                    "        if (strcmp({lang_var}, \"{}\") == 0) return \"{}\";",
                    variant.lang,
                    escape(&variant.text.source)
                )?;
            }
            writeln!(f, "        return \"{id}\";")?;
            writeln!(f, "    }}")?;
        }
        writeln!(f, "    return msg;")?;
        writeln!(f, "}}")
    }
}
