pub mod codegen;
pub mod table;

pub use codegen::{Codegen, CodegenOptions, LangSource};
pub use table::Table;
