//! Report formatting and printing utilities.
//!
//! Kept apart from the engine so `tsjsdoc` can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::walker::CompileSummary;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the outcome of `compile`: failures to stderr, the summary to stdout.
pub fn print_compile_summary(summary: &CompileSummary, input_count: usize, verbose: bool) {
    print_failures_to(summary, &mut io::stderr().lock());
    print_summary_to(summary, input_count, verbose, &mut io::stdout().lock());
}

/// Print one line per file that produced no output.
pub fn print_failures_to<W: Write>(summary: &CompileSummary, writer: &mut W) {
    for failure in &summary.failed {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), failure);
    }
}

/// Print the written outputs (verbose) and a one-line summary.
pub fn print_summary_to<W: Write>(
    summary: &CompileSummary,
    input_count: usize,
    verbose: bool,
    writer: &mut W,
) {
    if verbose {
        for path in &summary.written {
            let _ = writeln!(writer, "  {} {}", "wrote".dimmed(), path.display());
        }
    }

    let documented = input_count.saturating_sub(summary.failed.len());
    let files = |count: usize| if count == 1 { "file" } else { "files" };

    if summary.has_failures() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Documented {} of {} source {}, {} failed",
                documented,
                input_count,
                files(input_count),
                summary.failed.len()
            )
            .red()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Documented {} source {}", documented, files(documented)).green()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn render(summary: &CompileSummary, input_count: usize, verbose: bool) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_failures_to(summary, &mut out);
        print_summary_to(summary, input_count, verbose, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_success_summary() {
        let summary = CompileSummary {
            written: vec![PathBuf::from("src/a.jsdoc")],
            failed: Vec::new(),
        };
        assert_eq!(render(&summary, 1, false), "✓ Documented 1 source file\n");
    }

    #[test]
    fn test_verbose_lists_outputs() {
        let summary = CompileSummary {
            written: vec![PathBuf::from("src/a.jsdoc"), PathBuf::from("src/b.jsdoc")],
            failed: Vec::new(),
        };
        let output = render(&summary, 2, true);
        assert!(output.contains("wrote src/a.jsdoc"));
        assert!(output.contains("wrote src/b.jsdoc"));
        assert!(output.ends_with("✓ Documented 2 source files\n"));
    }

    #[test]
    fn test_failure_summary() {
        let summary = CompileSummary {
            written: vec![PathBuf::from("src/a.jsdoc")],
            failed: vec!["failed to parse src/b.ts: unexpected token".to_string()],
        };
        insta::assert_snapshot!(render(&summary, 2, false), @r"
✘ failed to parse src/b.ts: unexpected token
✘ Documented 1 of 2 source files, 1 failed
");
    }
}
