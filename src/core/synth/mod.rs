//! Comment synthesis: tag builders, per-kind synthesizers and the dispatcher.
//!
//! A [`Synthesizer`] is the context handle of one file pass. It borrows the
//! tree and the type service and owns write access to the pass's
//! [`CommentCollection`], which is how sibling and linked entries get created.
//!
//! ## Module Structure
//!
//! - `builders`: tag builders shared across declaration kinds
//! - `kinds`: one synthesizer per declaration kind

mod builders;
mod kinds;

use crate::core::comment::CommentCollection;
use crate::core::syntax::{Decl, DeclKind, NodeId, SyntaxTree};
use crate::core::typing::TypeService;
use crate::error::DocResult;

/// Declaration kinds that are routed to a synthesizer. Everything else
/// (parameters, signatures, inline types, the file root) passes through.
pub const ELIGIBLE_KINDS: &[DeclKind] = &[
    DeclKind::Variable,
    DeclKind::Property,
    DeclKind::Function,
    DeclKind::Method,
    DeclKind::Constructor,
    DeclKind::Accessor,
    DeclKind::Interface,
    DeclKind::Class,
    DeclKind::TypeAlias,
    DeclKind::Enum,
    DeclKind::Module,
    DeclKind::ExportAssignment,
];

pub fn is_eligible(kind: DeclKind) -> bool {
    ELIGIBLE_KINDS.contains(&kind)
}

pub struct Synthesizer<'a> {
    tree: &'a SyntaxTree,
    types: &'a dyn TypeService,
    comments: &'a mut CommentCollection,
}

impl<'a> Synthesizer<'a> {
    pub fn new(
        tree: &'a SyntaxTree,
        types: &'a dyn TypeService,
        comments: &'a mut CommentCollection,
    ) -> Self {
        Self {
            tree,
            types,
            comments,
        }
    }

    /// Writes the entries for one node into the collection.
    pub fn synthesize(&mut self, node: NodeId) -> DocResult<()> {
        let decl = self.tree.decl(node);
        if !is_eligible(decl.kind()) {
            return Ok(());
        }

        match decl {
            Decl::Variable(_) | Decl::Property(_) => self.for_var(node),
            Decl::Function(_) | Decl::Method(_) => self.for_function(node),
            Decl::Interface(_) => self.for_interface(node),
            Decl::Class(_) => self.for_class(node),
            Decl::Constructor(_) => self.for_constructor(node),
            Decl::TypeAlias(_) => self.for_type_alias(node),
            Decl::Enum(_) => self.for_enum(node),
            Decl::Module(_) => self.for_module(node),
            Decl::Accessor(_) | Decl::ExportAssignment => Ok(()),
            Decl::SourceFile(_)
            | Decl::Parameter(_)
            | Decl::CallSignature(_)
            | Decl::ConstructSignature(_)
            | Decl::ObjectType
            | Decl::FunctionType(_) => Ok(()),
        }
    }
}
