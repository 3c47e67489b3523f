//! Reusable tag builders shared by the per-kind synthesizers.
//!
//! Every builder goes through `get_or_add_tag`, so running one twice on the
//! same entry never duplicates a tag.

use tracing::debug;

use super::Synthesizer;
use crate::core::comment::{CommentId, VariationKey};
use crate::core::resolve::{anonymous_name, format_type, owner_name, resolve_type_name};
use crate::core::syntax::{Decl, DeclKind, HeritageKind, NodeId};
use crate::core::typing::Signature;
use crate::error::DocResult;

impl Synthesizer<'_> {
    /// Resolved type name of `node`'s annotation, or of the type its
    /// initializer implies. Anonymous sub-types get their own entries.
    pub(super) fn type_for(&mut self, node: NodeId) -> DocResult<String> {
        let tree = self.tree;
        let decl = tree.decl(node);
        let annotation = decl.type_annotation();
        let fallback = match annotation {
            Some(_) => None,
            None => self.types.type_of_node(tree, node),
        };

        let result = resolve_type_name(tree, self.types, node, annotation, fallback.as_ref())?;
        for anonymous in result.anonymous {
            self.add_anonymous_entry(node, anonymous)?;
        }

        Ok(match decl {
            Decl::Parameter(param) if param.rest => format_type(&format!("...{}", result.name)),
            _ => result.name,
        })
    }

    /// Linked `typedef {Object}` or `callback` entry for an anonymous type
    /// written on `node`.
    fn add_anonymous_entry(&mut self, node: NodeId, anonymous: NodeId) -> DocResult<()> {
        let tree = self.tree;
        let name = anonymous_name(tree, node)?;
        let linked = self.comments.add_empty();
        self.add_parent(linked, node)?;

        if tree.decl(anonymous).kind() == DeclKind::FunctionType {
            self.comments[linked].get_or_add_tag("callback", Some(&name));
            if let Some(signature) = self.types.signature_of(tree, anonymous) {
                self.add_from_signature(linked, &signature)?;
            }
        } else {
            self.comments[linked].get_or_add_tag("typedef", Some(&name)).ty =
                Some("Object".to_string());
        }
        Ok(())
    }

    /// Sets the `kind` tag's name to the declaration's name. With `typed`, the
    /// tag also gets the declared or inferred type, and a literal initializer
    /// becomes a `default` tag (members) or a `name=value` suffix (others).
    pub(super) fn add_name(
        &mut self,
        id: CommentId,
        kind: &str,
        node: NodeId,
        typed: bool,
    ) -> DocResult<()> {
        let tree = self.tree;
        let decl = tree.decl(node);
        let mut name = decl.name().unwrap_or_default().to_string();
        let mut ty = None;
        let mut default = None;

        if typed {
            let initializer = decl.initializer();
            if decl.type_annotation().is_some() || initializer.is_some() {
                ty = Some(self.type_for(node)?);
            }
            if let Some(init) = initializer.filter(|init| init.literal.is_some()) {
                if kind == "member" {
                    default = Some(init.text.clone());
                } else {
                    name = format!("{}={}", name, init.text);
                }
            }
        }

        let comment = &mut self.comments[id];
        let tag = comment.get_or_add_tag(kind, None);
        tag.name = Some(name);
        if ty.is_some() {
            tag.ty = ty;
        }
        if let Some(default) = default {
            comment.get_or_add_tag("default", None).name = Some(default);
        }
        Ok(())
    }

    /// `generic` tag listing the declared type parameters. Functions and
    /// methods without their own take those of the enclosing class or interface.
    pub(super) fn add_generic(&mut self, id: CommentId, node: NodeId) {
        let tree = self.tree;
        let decl = tree.decl(node);
        let mut params = decl.type_params();
        if params.is_empty() && matches!(decl.kind(), DeclKind::Function | DeclKind::Method) {
            params = tree
                .ancestors(node)
                .find(|&a| matches!(tree.decl(a).kind(), DeclKind::Class | DeclKind::Interface))
                .map(|owner| tree.decl(owner).type_params())
                .unwrap_or_default();
        }
        if !params.is_empty() {
            self.comments[id].get_or_add_tag("generic", None).name = Some(params.join(", "));
        }
    }

    pub(super) fn add_parent(&mut self, id: CommentId, node: NodeId) -> DocResult<()> {
        if self.tree.parent(node).is_none() {
            return Ok(());
        }
        if let Some(owner) = owner_name(self.tree, self.types, node)? {
            self.comments[id].get_or_add_tag("memberof", None).name = Some(owner);
        }
        Ok(())
    }

    /// Visibility and `static` (never on interface members), plus `instance`
    /// for every member of a class or interface.
    pub(super) fn add_modifier(&mut self, id: CommentId, node: NodeId) {
        let tree = self.tree;
        let modifiers = tree.decl(node).modifiers();
        let parent_kind = tree.parent(node).map(|p| tree.decl(p).kind());
        let comment = &mut self.comments[id];

        if parent_kind != Some(DeclKind::Interface) {
            if let Some(accessibility) = modifiers.accessibility {
                comment.get_or_add_tag(accessibility.as_tag(), None);
            }
            if modifiers.is_static {
                comment.get_or_add_tag("static", None);
            }
        }

        if matches!(parent_kind, Some(DeclKind::Class | DeclKind::Interface)) {
            comment.get_or_add_tag("instance", None);
        }
    }

    /// `default` tag from any initializer `add_name` did not already record.
    pub(super) fn add_default(&mut self, id: CommentId, node: NodeId) {
        let tree = self.tree;
        let Some(initializer) = tree.decl(node).initializer() else {
            return;
        };
        let comment = &mut self.comments[id];
        if !comment.has_tag("default", None) {
            comment.get_or_add_tag("default", None).name = Some(initializer.text.clone());
        }
    }

    /// Tells repeated declarations apart. The first declaration of an
    /// `(owner, name)` pair is canonical; later ones are merged into it
    /// (`merge`) or numbered with a `variation` tag.
    pub(super) fn add_variation(&mut self, id: CommentId, node: NodeId, merge: bool) -> DocResult<()> {
        let owner = owner_name(self.tree, self.types, node)?;
        let name = self
            .tree
            .decl(node)
            .name()
            .map(str::to_string)
            .or_else(|| owner.clone())
            .unwrap_or_default();
        let key = VariationKey { owner, name };

        if merge {
            if let Some(canonical) = self.comments.merge_target(key.clone(), id) {
                debug!(
                    "merging repeated declaration `{}` into its first entry",
                    key.name
                );
                self.comments.merge_entries(id, canonical);
            }
        } else if let Some(variation) = self.comments.next_variation(key) {
            self.comments[id].get_or_add_tag("variation", None).name = Some(variation.to_string());
        }
        Ok(())
    }

    /// Description, `param` tags and `returns` tag from a signature.
    pub(super) fn add_from_signature(&mut self, id: CommentId, signature: &Signature) -> DocResult<()> {
        if let Some(documentation) = &signature.documentation {
            let comment = &mut self.comments[id];
            if comment.description.as_ref() != Some(documentation) {
                comment.description = Some(documentation.clone());
            }
        }

        for &param in &signature.parameters {
            self.add_param(id, param)?;
        }

        if signature.returns_value {
            let ty = self.type_for(signature.declaration)?;
            self.comments[id].get_or_add_tag("returns", None).ty = Some(ty);
        }
        Ok(())
    }

    fn add_param(&mut self, id: CommentId, node: NodeId) -> DocResult<()> {
        let tree = self.tree;
        let Decl::Parameter(param) = tree.decl(node) else {
            return Ok(());
        };

        let optional = param.optional || param.initializer.is_some();
        let mut rendered = param.name.clone();
        if param.rest {
            rendered = format!("...{}", rendered);
        }
        if optional {
            rendered = match &param.initializer {
                Some(init) => format!("[{}={}]", rendered, init.text),
                None => format!("[{}]", rendered),
            };
        }

        let ty = self.type_for(node)?;
        let documentation = self.types.documentation(tree, node);

        let tag = self.comments[id].get_param_tag(&param.name, param.rest, optional);
        tag.name = Some(rendered);
        tag.ty = Some(ty);
        if let Some(documentation) = documentation
            && tag.description.as_ref() != Some(&documentation)
        {
            tag.description = Some(documentation);
        }
        Ok(())
    }

    /// `augments` for extended types, `implements` for implemented interfaces.
    pub(super) fn add_implementations(&mut self, id: CommentId, node: NodeId) -> DocResult<()> {
        let tree = self.tree;
        for clause in tree.decl(node).heritage() {
            let kind = match clause.kind {
                HeritageKind::Extends => "augments",
                HeritageKind::Implements => "implements",
            };
            for ty in &clause.types {
                let resolved = resolve_type_name(tree, self.types, node, Some(ty), None)?;
                self.comments[id].get_or_add_tag(kind, Some(&resolved.name));
            }
        }
        Ok(())
    }

    /// One sibling `callback` entry per call signature of an interface that
    /// consists of call signatures only.
    pub(super) fn add_callbacks(
        &mut self,
        id: CommentId,
        node: NodeId,
        signatures: &[Signature],
    ) -> DocResult<()> {
        for signature in signatures {
            let sibling = self.comments.clone_entry(id);
            self.add_name(sibling, "callback", node, false)?;
            self.add_generic(sibling, node);
            self.add_from_signature(sibling, signature)?;
            self.add_parent(sibling, node)?;
            self.add_variation(sibling, node, false)?;
        }
        Ok(())
    }

    /// Linked `ctorsignature` / `callsignature` entries for the signatures of
    /// an interface that also has ordinary members.
    pub(super) fn add_call_signatures(
        &mut self,
        prefix: &str,
        signatures: &[Signature],
    ) -> DocResult<()> {
        let kind = format!("{}signature", prefix);
        for signature in signatures {
            let linked = self.comments.add_empty();
            let declaration = signature.declaration;
            self.comments[linked].get_or_add_tag(&kind, None);
            self.add_generic(linked, declaration);
            self.add_from_signature(linked, signature)?;
            self.add_parent(linked, declaration)?;
            self.add_variation(linked, declaration, false)?;
        }
        Ok(())
    }

    pub(super) fn add_enum_members(&mut self, id: CommentId, node: NodeId) {
        let tree = self.tree;
        let Decl::Enum(decl) = tree.decl(node) else {
            return;
        };
        let comment = &mut self.comments[id];
        for member in &decl.members {
            let tag = comment.get_or_add_tag("property", Some(&member.name));
            if let Some(init) = member.initializer.as_ref().filter(|i| i.literal.is_some()) {
                tag.name = Some(format!("{}={}", member.name, init.text));
            }
        }
    }

    /// `property` tag on the typedef entry of the anonymous object type `node` belongs to.
    pub(super) fn add_typedef_property(&mut self, id: CommentId, node: NodeId) -> DocResult<()> {
        let tree = self.tree;
        let decl = tree.decl(node);
        let name = decl.name().unwrap_or_default();
        let ty = match decl.type_annotation() {
            Some(_) => Some(self.type_for(node)?),
            None => None,
        };

        let tag = self.comments[id].get_or_add_tag("property", Some(name));
        if ty.is_some() {
            tag.ty = ty;
        }
        Ok(())
    }
}
