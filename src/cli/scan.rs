//! Source file discovery for `compile` without explicit inputs.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Matched source files, sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collects the TypeScript sources under `base_dir` selected by `includes`
/// (globs or literal files/directories) minus `ignore_patterns`.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let roots: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten()),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid glob pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else if verbose {
                    eprintln!(
                        "{} Include path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    };

    for root in roots {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_documentable_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

/// `.ts`, `.tsx` and `.d.ts` sources.
fn is_documentable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts" | "tsx")
    )
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn names(result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .filter_map(|f| f.file_name())
            .map(|f| f.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_scan_typescript_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.tsx")).unwrap();
        File::create(dir_path.join("utils.ts")).unwrap();
        File::create(dir_path.join("types.d.ts")).unwrap();
        File::create(dir_path.join("legacy.js")).unwrap();

        let result = scan_files(dir_path, &[], &[], false, false);

        assert_eq!(names(&result), vec!["app.tsx", "types.d.ts", "utils.ts"]);
    }

    #[test]
    fn test_scan_with_default_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let models = dir_path.join("src").join("models");
        fs::create_dir_all(&models).unwrap();
        File::create(models.join("user.ts")).unwrap();
        File::create(dir_path.join("src").join("index.ts")).unwrap();

        let scripts = dir_path.join("scripts");
        fs::create_dir(&scripts).unwrap();
        File::create(scripts.join("build.ts")).unwrap();

        let result = scan_files(dir_path, &["src/**/*.ts".to_owned()], &[], false, false);

        assert_eq!(names(&result), vec!["index.ts", "user.ts"]);
    }

    #[test]
    fn test_scan_ignores_patterns_and_literal_paths() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let generated = dir_path.join("src").join("generated");
        fs::create_dir_all(&generated).unwrap();
        File::create(generated.join("api.ts")).unwrap();

        let vendor = dir_path.join("src").join("vendor");
        fs::create_dir_all(&vendor).unwrap();
        File::create(vendor.join("lib.ts")).unwrap();

        File::create(dir_path.join("src").join("main.ts")).unwrap();

        let result = scan_files(
            dir_path,
            &["src".to_owned()],
            &["**/generated/**".to_owned(), "src/vendor".to_owned()],
            false,
            false,
        );

        assert_eq!(names(&result), vec!["main.ts"]);
    }

    #[test]
    fn test_scan_ignores_test_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("queue.ts")).unwrap();
        File::create(dir_path.join("queue.test.ts")).unwrap();
        File::create(dir_path.join("queue.spec.ts")).unwrap();

        let tests_dir = dir_path.join("__tests__");
        fs::create_dir(&tests_dir).unwrap();
        File::create(tests_dir.join("helper.ts")).unwrap();

        let result = scan_files(dir_path, &[], &[], true, false);
        assert_eq!(names(&result), vec!["queue.ts"]);

        let result = scan_files(dir_path, &[], &[], false, false);
        assert_eq!(result.files.len(), 4);
    }

    #[test]
    fn test_scan_deduplicates_overlapping_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let nested = dir_path.join("src").join("nested");
        fs::create_dir_all(&nested).unwrap();
        File::create(nested.join("deep.ts")).unwrap();

        let result = scan_files(
            dir_path,
            &["src".to_owned(), "src/nested".to_owned(), "src/**/*.ts".to_owned()],
            &[],
            false,
            false,
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_scan_with_nonexistent_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();
        File::create(dir_path.join("a.ts")).unwrap();

        let result = scan_files(dir_path, &["missing".to_owned()], &[], false, false);
        assert!(result.files.is_empty());
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/**/*.ts"));
        assert!(is_glob_pattern("file?.ts"));
        assert!(!is_glob_pattern("src"));
        assert!(!is_glob_pattern("src/[id]"));
    }
}
