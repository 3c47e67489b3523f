//! Type resolution as seen by the documentation engine.
//!
//! The engine never inspects types on its own; everything goes through the
//! [`TypeService`] capability. [`Program`] provides the implementation used by
//! the command line, built from the declaration trees of every input file.
//!
//! ## Module Structure
//!
//! - `options`: compiler options of one run
//! - `program`: parsed files, the symbol index and [`ProgramTypes`]

mod options;
mod program;

pub use options::{CompilerOptions, ModuleKind, ScriptTarget};
pub use program::{Program, ProgramTypes, SourceUnit};

use crate::core::syntax::{NodeId, SyntaxTree, TypeExpr};

/// Broad classification of a resolved type, mirroring compiler type flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Keywords and literal types.
    Intrinsic,
    TypeParameter,
    /// Inline object and function shapes.
    Anonymous,
    Union,
    /// Named types, arrays and everything the service cannot classify further.
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub kind: TypeKind,
    /// Canonical string form as the compiler would print it.
    pub display: String,
    pub symbol: Option<Symbol>,
}

impl ResolvedType {
    pub fn intrinsic(display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Intrinsic,
            display: display.into(),
            symbol: None,
        }
    }
}

/// A named entity. `container` lists the enclosing named scopes, outermost first.
///
/// Ambient external modules appear with their quotes (`"fs"`), as compilers
/// print them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub container: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub declaration: NodeId,
    pub parameters: Vec<NodeId>,
    pub return_type: Option<TypeExpr>,
    pub returns_value: bool,
    pub documentation: Option<String>,
}

/// Type information for the declarations of a [`SyntaxTree`].
pub trait TypeService {
    /// Type of a declaration: its annotation, or what its initializer implies.
    fn type_of_node(&self, tree: &SyntaxTree, node: NodeId) -> Option<ResolvedType>;

    /// Type denoted by `ty`, written on the declaration `owner`.
    fn type_of_type_expr(&self, tree: &SyntaxTree, owner: NodeId, ty: &TypeExpr) -> ResolvedType;

    fn signature_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<Signature>;

    fn symbol_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<Symbol>;

    fn fully_qualified_name(&self, symbol: &Symbol) -> String;

    fn call_signatures(&self, tree: &SyntaxTree, node: NodeId) -> Vec<Signature>;

    fn construct_signatures(&self, tree: &SyntaxTree, node: NodeId) -> Vec<Signature>;

    /// Prose documentation written for the declaration, if any.
    fn documentation(&self, tree: &SyntaxTree, node: NodeId) -> Option<String>;
}
