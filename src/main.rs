use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::{Context, Result};
use args::{Args, Command, Emit};
use syntax::Catalog;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use translate::{Codegen, CodegenOptions, LangSource, Table};

mod args;
mod error;
mod syntax;
mod translate;

fn main() -> Result<()> {
    let args = {
        use clap::Parser;
        Args::parse()
    };
    init_tracing(args.verbose);
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args, stdout: &mut dyn Write) -> Result<()> {
    let catalog = syntax::load(&args.input)
        .with_context(|| format!("cannot load translations from `{}`", args.input.display()))?;

    match &args.command {
        Some(Command::Lookup { message, lang }) => {
            let table = Table::from_catalog(&catalog);
            if table.is_empty() {
                warn!("translation table is empty");
            }
            debug!(entries = table.len(), "built lookup table");
            writeln!(stdout, "{}", table.translate(message, lang))?;
        }
        Some(Command::Check) => {
            let langs: BTreeSet<&str> = catalog
                .records
                .iter()
                .flat_map(|record| record.variants.iter().map(|variant| variant.lang.as_str()))
                .collect();
            writeln!(
                stdout,
                "{} records, {} translations, languages: {}",
                catalog.records.len(),
                catalog.variant_count(),
                langs.into_iter().collect::<Vec<_>>().join(", ")
            )?;
        }
        None => emit(args, &catalog, stdout)?,
    }
    Ok(())
}

fn emit(args: &Args, catalog: &Catalog, stdout: &mut dyn Write) -> Result<()> {
    let lang_source = if args.lang_param {
        LangSource::Parameter
    } else {
        LangSource::Global
    };
    let options = CodegenOptions::new(&args.function, &args.lang_var, lang_source)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create `{}`", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_artifact(args.emit, catalog, &options, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), records = catalog.records.len(), "wrote output");
        }
        None => write_artifact(args.emit, catalog, &options, stdout)?,
    }
    Ok(())
}

fn write_artifact(
    emit: Emit,
    catalog: &Catalog,
    options: &CodegenOptions,
    out: &mut dyn Write,
) -> Result<()> {
    match emit {
        Emit::C => out.write_all(Codegen::translate(catalog, options).as_bytes())?,
        Emit::Json => {
            serde_json::to_writer_pretty(&mut *out, catalog)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const SAMPLE: &str = "ID:Hello\nfr:Bonjour\nde:Hallo\n---\nID:Bye\n---\n";

    fn workspace(source: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("message.txt"), source).unwrap();
        dir
    }

    fn run_with(dir: &Path, extra: &[&str]) -> Result<String> {
        let input = dir.join("message.txt");
        let mut argv = vec!["transtab", "--input", input.to_str().unwrap()];
        argv.extend_from_slice(extra);
        let args = Args::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn emits_c_by_default() {
        let dir = workspace(SAMPLE);
        let c = run_with(dir.path(), &[]).unwrap();
        assert!(c.contains("const char *lang_code;"));
        assert!(c.contains("        if (strcmp(lang_code, \"de\") == 0) return \"Hallo\";"));
        assert!(c.ends_with("    return msg;\n}\n"));
    }

    #[test]
    fn emits_with_custom_names() {
        let dir = workspace(SAMPLE);
        let c = run_with(
            dir.path(),
            &["--function", "linguine_gettext", "--lang-var", "lang", "--lang-param"],
        )
        .unwrap();
        assert!(!c.contains("const char *lang;"));
        assert!(c.contains("const char *linguine_gettext(const char *msg, const char *lang)"));
    }

    #[test]
    fn rejects_bad_function_name() {
        let dir = workspace(SAMPLE);
        assert!(run_with(dir.path(), &["--function", "not valid"]).is_err());
    }

    #[test]
    fn emits_json() {
        let dir = workspace("ID:Say \"hi\"\nfr:Dis \"salut\"\n---\n");
        let json = run_with(dir.path(), &["--emit", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "records": [{
                    "id": "Say \"hi\"",
                    "variants": [{ "lang": "fr", "text": "Dis \"salut\"" }],
                }]
            })
        );
    }

    #[test]
    fn json_holds_decoded_text() {
        let dir = workspace("ID:Hi\\n\nfr:Salut \\\"toi\\\"\\n\n---\n");
        let json = run_with(dir.path(), &["--emit", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["records"][0]["id"], "Hi\n");
        assert_eq!(value["records"][0]["variants"][0]["text"], "Salut \"toi\"\n");
    }

    #[test]
    fn rejects_bad_escape() {
        let dir = workspace("ID:Path\nfr:C:\\dir\\\n---\n");
        let err = run_with(dir.path(), &[]).unwrap_err();
        assert!(format!("{err:#}").contains("line 2: unsupported escape sequence `\\d`"));
    }

    #[test]
    fn writes_output_file() {
        let dir = workspace(SAMPLE);
        let target = dir.path().join("translation.c");
        let stdout = run_with(dir.path(), &["--output", target.to_str().unwrap()]).unwrap();
        assert_eq!(stdout, "");
        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(written, run_with(dir.path(), &[]).unwrap());
    }

    #[test]
    fn lookup_follows_fallbacks() {
        let dir = workspace(SAMPLE);
        let lookup = |message: &str, lang: &str| {
            run_with(dir.path(), &["lookup", message, "--lang", lang]).unwrap()
        };
        assert_eq!(lookup("Hello", "de"), "Hallo\n");
        assert_eq!(lookup("Hello", "it"), "Hello\n");
        assert_eq!(lookup("Bye", "fr"), "Bye\n");
        assert_eq!(lookup("Nope", "fr"), "Nope\n");
    }

    #[test]
    fn check_summarizes() {
        let dir = workspace(SAMPLE);
        assert_eq!(
            run_with(dir.path(), &["check"]).unwrap(),
            "2 records, 2 translations, languages: de, fr\n"
        );
    }

    #[test]
    fn reports_malformed_input() {
        let dir = workspace("ID:Hello\nfr:Bonjour\n");
        let err = run_with(dir.path(), &["check"]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("line 1: record `Hello` is never closed with `---`"));
    }

    #[test]
    fn reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_with(dir.path(), &[]).unwrap_err();
        assert!(err.downcast_ref::<error::Error>().is_some());
    }
}
