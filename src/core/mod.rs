//! Documentation engine.
//!
//! Source text is parsed and lowered into a declaration tree, the tree is
//! walked once per file, and every eligible declaration gets one or more
//! synthesized comment entries.
//!
//! ## Module Structure
//!
//! - `parsers`: swc front end
//! - `syntax`: declaration tree and type expressions
//! - `typing`: type-resolution service and compiler options
//! - `resolve`: canonical owner, anonymous and type names
//! - `comment`: comment model and the per-file collection
//! - `synth`: tag builders, per-kind synthesizers and the dispatcher
//! - `walker`: single-file extraction and batch compile

pub mod comment;
pub mod parsers;
pub mod resolve;
pub mod syntax;
pub mod synth;
pub mod typing;
pub mod walker;
