use std::path::PathBuf;

pub static DEFAULT_MAX_CALL_DEPTH: usize = 256;
pub static DEFAULT_MAX_EVAL_DEPTH: usize = 4096;
pub static DEFAULT_EXTENSION: &str = "cnv";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Nested user-function calls allowed before evaluation fails.
    pub max_call_depth: usize,
    /// Statements and expressions evaluating inside one another, counted
    /// across calls and imports.
    pub max_eval_depth: usize,
    /// Where `import("LIB", name)` looks for `<name>.<extension>`.
    pub lib_dir: PathBuf,
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            lib_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}
