use crate::config::Config;
use crate::value::RuntimeError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

/// The first argument of `import`.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `<lib_dir>/<name>.<extension>`, with the extension appended even when
    /// `name` already contains a dot.
    #[strum(to_string = "LIB")]
    Lib,
    /// `name` taken as a path relative to the working directory.
    #[strum(to_string = "FILE")]
    File,
}

impl ImportKind {
    pub fn from_argument(kind: &str) -> Result<Self, RuntimeError> {
        kind.parse().map_err(|_: strum::ParseError| RuntimeError::UnknownImportKind {
            kind: kind.to_owned(),
        })
    }
}

/// Turns the raw text of a file into a source unit: lines starting with `#`
/// are blanked and the whole text is wrapped in a single top-level block.
/// Blanking instead of removing keeps row numbers in diagnostics aligned
/// with the file.
pub fn load_source_unit(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| if line.starts_with('#') { "" } else { line })
        .collect();

    format!("{{{}\n}}", lines.join("\n"))
}

pub trait SourceLoader: Send {
    /// Returns the source unit for `name`, already wrapped by
    /// [`load_source_unit`].
    fn load(&self, kind: ImportKind, name: &str) -> Result<String, RuntimeError>;
}

#[derive(Debug, Clone)]
pub struct FileLoader {
    lib_dir: PathBuf,
    extension: String,
}

impl FileLoader {
    pub fn new(lib_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            lib_dir: lib_dir.into(),
            extension: extension.to_owned(),
        }
    }

    pub fn resolve(&self, kind: ImportKind, name: &str) -> PathBuf {
        match kind {
            ImportKind::Lib => self.lib_dir.join(format!("{}.{}", name, self.extension)),
            ImportKind::File => PathBuf::from(name),
        }
    }
}

impl From<&Config> for FileLoader {
    fn from(config: &Config) -> Self {
        Self::new(config.lib_dir.clone(), &config.extension)
    }
}

impl SourceLoader for FileLoader {
    fn load(&self, kind: ImportKind, name: &str) -> Result<String, RuntimeError> {
        let path = self.resolve(kind, name);
        fs::read_to_string(&path)
            .map(|text| load_source_unit(&text))
            .map_err(|err| RuntimeError::ImportFailed {
                name: name.to_owned(),
                reason: format!("{}: {}", path.display(), err),
            })
    }
}

/// Serves units from memory, keyed by name regardless of import kind.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    units: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_unit(mut self, name: &str, text: &str) -> Self {
        self.units.insert(name.to_owned(), text.to_owned());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, _kind: ImportKind, name: &str) -> Result<String, RuntimeError> {
        self.units
            .get(name)
            .map(|text| load_source_unit(text))
            .ok_or_else(|| RuntimeError::ImportFailed {
                name: name.to_owned(),
                reason: "no such unit".to_owned(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_load_source_unit() {
        let text = "# header comment\nx = 1;\n\n# another\nprint(x);";
        assert_eq!(load_source_unit(text), "{\nx = 1;\n\n\nprint(x);\n}");
        assert_eq!(load_source_unit(""), "{\n}");
    }

    #[test]
    fn test_import_kind() {
        assert_eq!(ImportKind::from_argument("LIB"), Ok(ImportKind::Lib));
        assert_eq!(ImportKind::from_argument("FILE"), Ok(ImportKind::File));
        assert_eq!(
            ImportKind::from_argument("lib"),
            Err(RuntimeError::UnknownImportKind {
                kind: "lib".to_owned()
            })
        );
        assert_eq!(ImportKind::Lib.to_string(), "LIB");
    }

    #[test]
    fn test_file_loader_paths() {
        let loader = FileLoader::new("/opt/canvas/lib", "cnv");
        assert_eq!(
            loader.resolve(ImportKind::Lib, "math"),
            Path::new("/opt/canvas/lib/math.cnv")
        );
        assert_eq!(
            loader.resolve(ImportKind::Lib, "v1.2"),
            Path::new("/opt/canvas/lib/v1.2.cnv")
        );
        assert_eq!(
            loader.resolve(ImportKind::Lib, "shapes/circle"),
            Path::new("/opt/canvas/lib/shapes/circle.cnv")
        );
        assert_eq!(
            loader.resolve(ImportKind::File, "scripts/util.cnv"),
            Path::new("scripts/util.cnv")
        );
    }

    #[test]
    fn test_file_loader_reads_units() {
        let dir = std::env::temp_dir().join(format!("canvas-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("greet.cnv"), "# greet\nprint(\"hi\");\n").unwrap();

        let loader = FileLoader::new(&dir, "cnv");
        assert_eq!(
            loader.load(ImportKind::Lib, "greet"),
            Ok("{\nprint(\"hi\");\n}".to_owned())
        );
        assert!(matches!(
            loader.load(ImportKind::Lib, "missing"),
            Err(RuntimeError::ImportFailed { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with_unit("a", "x = 1;");
        assert_eq!(loader.load(ImportKind::Lib, "a"), Ok("{x = 1;\n}".to_owned()));
        assert!(loader.load(ImportKind::File, "b").is_err());
    }
}
