//! Tree walker and the two entry points of the engine.
//!
//! - [`extract_source`] documents one file and returns the serialized entries.
//! - [`compile`] documents every file of a [`Program`] and writes one
//!   `.jsdoc` output per file (or one combined output file).
//!
//! Files are processed strictly one after another; each pass owns its own
//! [`CommentCollection`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::core::comment::CommentCollection;
use crate::core::synth::Synthesizer;
use crate::core::syntax::SyntaxTree;
use crate::core::typing::{CompilerOptions, Program, TypeService};
use crate::error::{DocError, DocResult};

/// Extension of generated documentation sources.
pub const DOC_EXTENSION: &str = ".jsdoc";

static SOURCE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.d)?\.tsx?$").expect("valid source extension regex"));

/// Walks `tree` in pre-order, root included, and synthesizes every node.
///
/// The first resolution failure aborts the pass.
pub fn collect_comments(tree: &SyntaxTree, types: &dyn TypeService) -> DocResult<CommentCollection> {
    let mut comments = CommentCollection::new();
    let mut synthesizer = Synthesizer::new(tree, types, &mut comments);
    for node in tree.preorder() {
        synthesizer.synthesize(node)?;
    }
    debug!("{}: {} entries", tree.file_name(), comments.len());
    Ok(comments)
}

/// Documents a single in-memory source file.
pub fn extract_source(path: &Path, code: String, options: CompilerOptions) -> DocResult<String> {
    let program = Program::single(options, path, code)?;
    let types = program.type_service();
    let mut output = String::new();
    for unit in program.units() {
        output.push_str(&collect_comments(&unit.tree, &types)?.serialize_all());
    }
    Ok(output)
}

/// Reads and documents a single file.
pub fn extract_file(path: &Path, options: CompilerOptions) -> DocResult<String> {
    let code = fs::read_to_string(path).map_err(|source| DocError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_source(path, code, options)
}

/// Outcome of a batch compile.
#[derive(Debug, Default)]
pub struct CompileSummary {
    /// Output files written, in order.
    pub written: Vec<PathBuf>,
    /// One message per input file that produced no output.
    pub failed: Vec<String>,
}

impl CompileSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Documents every file of `program` and writes the outputs.
///
/// Files that failed to load or whose pass aborted are reported in the
/// summary; the remaining files are still written. Only failures to write an
/// output are returned as errors.
pub fn compile(program: &Program) -> DocResult<CompileSummary> {
    let options = program.options();
    let types = program.type_service();
    let mut summary = CompileSummary::default();

    for failure in program.failures() {
        warn!("{}", failure);
        summary.failed.push(failure.to_string());
    }

    let mut combined: Vec<String> = Vec::new();
    for unit in program.units() {
        let output = match collect_comments(&unit.tree, &types) {
            Ok(comments) => comments.serialize_all(),
            Err(err) => {
                warn!("skipping {}: {}", unit.path.display(), err);
                summary.failed.push(err.to_string());
                continue;
            }
        };

        if options.out_file.is_some() {
            if !output.is_empty() {
                combined.push(output);
            }
            continue;
        }

        let target = doc_output_path(&unit.path, options);
        write_output(&target, &output)?;
        info!("{} -> {}", unit.path.display(), target.display());
        summary.written.push(target);
    }

    if let Some(out_file) = &options.out_file {
        write_output(out_file, &combined.join("\n\n"))?;
        info!("{} file(s) -> {}", combined.len(), out_file.display());
        summary.written.push(out_file.clone());
    }

    Ok(summary)
}

/// Output path for `source`: the source extension (`.ts`, `.tsx`, `.d.ts`) is
/// replaced by [`DOC_EXTENSION`], and the file lands under `out_dir` when set.
/// With `out_file` every source maps to that file.
pub fn doc_output_path(source: &Path, options: &CompilerOptions) -> PathBuf {
    if let Some(out_file) = &options.out_file {
        return out_file.clone();
    }

    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let doc_name = format!("{}{}", SOURCE_EXTENSION.replace(&file_name, ""), DOC_EXTENSION);

    match &options.out_dir {
        Some(dir) => dir.join(doc_name),
        None => source.with_file_name(doc_name),
    }
}

fn write_output(path: &Path, text: &str) -> DocResult<()> {
    let io_error = |source| DocError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, text).map_err(io_error)
}
