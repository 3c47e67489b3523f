//! One synthesizer per declaration category.

use tracing::debug;

use super::Synthesizer;
use crate::core::comment::{Comment, CommentId};
use crate::core::resolve::{anonymous_name, owner_name};
use crate::core::syntax::{Decl, DeclKind, NodeId};
use crate::error::DocResult;

impl Synthesizer<'_> {
    /// Registers the entry for `node`, seeded with its hand-written comment.
    fn add_from_node(&mut self, node: NodeId) -> CommentId {
        let comment = self
            .tree
            .node(node)
            .leading_comment
            .as_deref()
            .map(Comment::parse_from_text)
            .unwrap_or_default();
        self.comments.add(comment)
    }

    pub(super) fn for_var(&mut self, node: NodeId) -> DocResult<()> {
        let tree = self.tree;
        let literal = tree
            .parent(node)
            .filter(|&parent| tree.decl(parent).kind() == DeclKind::ObjectType);

        if let Some(literal) = literal {
            let typedef = anonymous_name(tree, literal)?;
            let owner = match tree.parent(literal) {
                Some(declaration) => owner_name(tree, self.types, declaration)?,
                None => None,
            };
            match self.comments.find("typedef", &typedef, owner.as_deref()) {
                Some(id) => self.add_typedef_property(id, node)?,
                None => debug!(
                    "no typedef `{}` for property `{}`, skipping",
                    typedef,
                    tree.node(node).excerpt
                ),
            }
            return Ok(());
        }

        let id = self.add_from_node(node);
        self.add_name(id, "member", node, true)?;
        self.add_default(id, node);
        self.add_parent(id, node)?;
        self.add_modifier(id, node);
        Ok(())
    }

    pub(super) fn for_function(&mut self, node: NodeId) -> DocResult<()> {
        let id = self.add_from_node(node);
        self.add_name(id, "function", node, false)?;
        self.add_variation(id, node, false)?;
        self.add_generic(id, node);
        if let Some(signature) = self.types.signature_of(self.tree, node) {
            self.add_from_signature(id, &signature)?;
        }
        self.add_parent(id, node)?;
        self.add_modifier(id, node);
        Ok(())
    }

    /// Interfaces made of call signatures only document as callbacks; every
    /// other interface gets its own entry plus one entry per signature.
    pub(super) fn for_interface(&mut self, node: NodeId) -> DocResult<()> {
        let tree = self.tree;
        let Decl::Interface(decl) = tree.decl(node) else {
            return Ok(());
        };
        let id = self.add_from_node(node);
        let calls = self.types.call_signatures(tree, node);
        let ctors = self.types.construct_signatures(tree, node);

        if decl.member_count > 0 && decl.member_count == calls.len() {
            self.add_callbacks(id, node, &calls)?;
            self.comments[id].mark_empty();
            return Ok(());
        }

        self.add_name(id, "interface", node, false)?;
        self.add_generic(id, node);
        self.add_implementations(id, node)?;
        self.add_parent(id, node)?;
        self.add_call_signatures("ctor", &ctors)?;
        self.add_call_signatures("call", &calls)?;
        self.add_variation(id, node, true)
    }

    pub(super) fn for_class(&mut self, node: NodeId) -> DocResult<()> {
        let id = self.add_from_node(node);
        self.add_name(id, "class", node, false)?;
        self.add_variation(id, node, false)?;
        self.add_generic(id, node);
        self.add_implementations(id, node)?;
        self.add_parent(id, node)
    }

    pub(super) fn for_constructor(&mut self, node: NodeId) -> DocResult<()> {
        let id = self.add_from_node(node);
        self.comments[id].get_or_add_tag("ctor", None);
        self.add_variation(id, node, false)?;
        self.add_parent(id, node)?;
        if let Some(signature) = self.types.signature_of(self.tree, node) {
            self.add_from_signature(id, &signature)?;
        }
        Ok(())
    }

    pub(super) fn for_type_alias(&mut self, node: NodeId) -> DocResult<()> {
        let id = self.add_from_node(node);
        self.add_name(id, "typedef", node, true)?;
        self.add_variation(id, node, false)?;
        self.add_parent(id, node)
    }

    pub(super) fn for_enum(&mut self, node: NodeId) -> DocResult<()> {
        let id = self.add_from_node(node);
        self.add_name(id, "enum", node, false)?;
        self.add_modifier(id, node);
        self.add_parent(id, node)?;
        self.add_enum_members(id, node);
        Ok(())
    }

    /// Namespaces merge with earlier declarations of the same name; ambient
    /// external modules become `module` entries.
    pub(super) fn for_module(&mut self, node: NodeId) -> DocResult<()> {
        let tree = self.tree;
        let Decl::Module(module) = tree.decl(node) else {
            return Ok(());
        };
        let id = self.add_from_node(node);

        if module.external {
            self.comments[id].get_or_add_tag("module", None).name = Some(module.name.clone());
        } else {
            self.add_name(id, "namespace", node, false)?;
            self.add_parent(id, node)?;
        }
        self.add_variation(id, node, true)
    }
}
