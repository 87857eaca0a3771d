use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about = "Compiles a translation table into a C lookup function")]
pub struct Args {
    /// Translation source file
    #[arg(short, long, default_value = "message.txt", env = "TRANSTAB_INPUT")]
    pub input: PathBuf,

    /// Write the output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Emit::C)]
    pub emit: Emit,

    /// Name of the generated C function
    #[arg(long, default_value = "translate")]
    pub function: String,

    /// Name of the active language variable
    #[arg(long, default_value = "lang_code")]
    pub lang_var: String,

    /// Pass the language as a function parameter instead of a global
    #[arg(long)]
    pub lang_param: bool,

    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the translation of a message for a language
    Lookup {
        message: String,
        #[arg(short, long)]
        lang: String,
    },
    /// Parse the source and print a summary
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    C,
    Json,
}
