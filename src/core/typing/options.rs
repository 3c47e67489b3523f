use std::fmt;
use std::path::PathBuf;

/// Language version the sources are written against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScriptTarget {
    Es3,
    Es5,
    #[default]
    Es6,
    Latest,
    /// Kept verbatim; the front end reports it.
    Unrecognized(String),
}

impl ScriptTarget {
    /// Case-insensitive: `latest` or one of `ES3`, `ES5`, `ES6` (`ES2015`).
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("latest") {
            return ScriptTarget::Latest;
        }
        match value.to_ascii_uppercase().as_str() {
            "ES3" => ScriptTarget::Es3,
            "ES5" => ScriptTarget::Es5,
            "ES6" | "ES2015" => ScriptTarget::Es6,
            _ => ScriptTarget::Unrecognized(value.to_string()),
        }
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptTarget::Es3 => write!(f, "ES3"),
            ScriptTarget::Es5 => write!(f, "ES5"),
            ScriptTarget::Es6 => write!(f, "ES6"),
            ScriptTarget::Latest => write!(f, "Latest"),
            ScriptTarget::Unrecognized(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleKind {
    #[default]
    None,
    CommonJs,
    Amd,
}

impl ModuleKind {
    /// `commonjs` and `amd` are recognized case-insensitively; anything else is `None`.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "commonjs" => ModuleKind::CommonJs,
            "amd" => ModuleKind::Amd,
            _ => ModuleKind::None,
        }
    }
}

/// Options of one program run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    pub target: ScriptTarget,
    pub module: ModuleKind,
    /// Output files are placed in this directory instead of next to their sources.
    pub out_dir: Option<PathBuf>,
    /// Every file's output is written into this single file.
    pub out_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(ScriptTarget::parse("es5"), ScriptTarget::Es5);
        assert_eq!(ScriptTarget::parse("ES3"), ScriptTarget::Es3);
        assert_eq!(ScriptTarget::parse("es2015"), ScriptTarget::Es6);
        assert_eq!(ScriptTarget::parse("LATEST"), ScriptTarget::Latest);
        assert_eq!(
            ScriptTarget::parse("es2099"),
            ScriptTarget::Unrecognized("es2099".to_string())
        );
    }

    #[test]
    fn test_parse_module_kind() {
        assert_eq!(ModuleKind::parse("CommonJS"), ModuleKind::CommonJs);
        assert_eq!(ModuleKind::parse("amd"), ModuleKind::Amd);
        assert_eq!(ModuleKind::parse("umd"), ModuleKind::None);
        assert_eq!(ModuleKind::parse(""), ModuleKind::None);
    }

    #[test]
    fn test_unrecognized_target_displays_verbatim() {
        assert_eq!(ScriptTarget::parse("esNext").to_string(), "esNext");
        assert_eq!(ScriptTarget::Latest.to_string(), "Latest");
    }
}
