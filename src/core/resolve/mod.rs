//! Canonical names for declarations, owners and type expressions.
//!
//! Everything here is a pure function of the tree and the [`TypeService`];
//! nothing is written to the comment collection. Anonymous types met while
//! resolving are handed back to the caller, which synthesizes their entries.
//!
//! ## Module Structure
//!
//! - `names`: owner and anonymous-type names
//! - `format`: final normalization of type names

mod format;
mod names;

pub use format::format_type;
pub use names::{anonymous_full_name, anonymous_name, owner_name, qualified_name};

use crate::core::syntax::{NodeId, SyntaxTree, TypeExpr};
use crate::core::typing::{ResolvedType, TypeKind, TypeService};
use crate::error::DocResult;

/// Rendered type name, plus the anonymous object/function type nodes that
/// still need their own `typedef` / `callback` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNameResult {
    pub name: String,
    pub anonymous: Vec<NodeId>,
}

impl TypeNameResult {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anonymous: Vec::new(),
        }
    }
}

/// Resolves the type written on `owner` (or, without annotation, the
/// `fallback` type the service inferred) into its documentation name.
///
/// Without either, the result is the `*` wildcard.
pub fn resolve_type_name(
    tree: &SyntaxTree,
    types: &dyn TypeService,
    owner: NodeId,
    ty: Option<&TypeExpr>,
    fallback: Option<&ResolvedType>,
) -> DocResult<TypeNameResult> {
    match (ty, fallback) {
        (Some(ty), _) => resolve_expr(tree, types, owner, ty),
        (None, Some(resolved)) => Ok(TypeNameResult::named(match resolved.kind {
            TypeKind::Intrinsic | TypeKind::TypeParameter => resolved.display.clone(),
            _ => format_type(&resolved.display),
        })),
        (None, None) => Ok(TypeNameResult::named("*")),
    }
}

fn resolve_expr(
    tree: &SyntaxTree,
    types: &dyn TypeService,
    owner: NodeId,
    ty: &TypeExpr,
) -> DocResult<TypeNameResult> {
    if let TypeExpr::Query(text) = ty {
        return Ok(TypeNameResult::named(format_type(text)));
    }

    let resolved = types.type_of_type_expr(tree, owner, ty);
    match resolved.kind {
        TypeKind::Intrinsic | TypeKind::TypeParameter => {
            return Ok(TypeNameResult::named(resolved.display));
        }
        TypeKind::Anonymous => {
            let name = format_type(&anonymous_full_name(tree, types, owner)?);
            let anonymous = match ty {
                TypeExpr::Object(id) | TypeExpr::Function(id) => vec![*id],
                _ => Vec::new(),
            };
            return Ok(TypeNameResult { name, anonymous });
        }
        TypeKind::Union | TypeKind::Reference => {}
    }

    match ty {
        TypeExpr::Union(members) => {
            let mut result = TypeNameResult::default();
            let mut names = Vec::with_capacity(members.len());
            for member in members {
                let member = resolve_expr(tree, types, owner, member)?;
                names.push(member.name);
                result.anonymous.extend(member.anonymous);
            }
            result.name = names.join(" | ");
            Ok(result)
        }
        TypeExpr::Array(element) => {
            let mut result = resolve_expr(tree, types, owner, element)?;
            result.name = match element.as_ref() {
                TypeExpr::Union(_) => format_type(&format!("({})[]", result.name)),
                _ => format_type(&format!("{}[]", result.name)),
            };
            Ok(result)
        }
        TypeExpr::Reference { name, args } => {
            let base = match &resolved.symbol {
                Some(symbol) => types.fully_qualified_name(symbol).replace('"', ""),
                None => name.clone(),
            };
            let mut result = TypeNameResult::default();
            let generic = if !args.is_empty() {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    let arg = resolve_expr(tree, types, owner, arg)?;
                    rendered.push(arg.name);
                    result.anonymous.extend(arg.anonymous);
                }
                format!("<{}>", rendered.join(", "))
            } else {
                // A bare reference on a generic declaration takes that declaration's parameters.
                let declared = tree.decl(owner).type_params();
                if declared.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", declared.join(", "))
                }
            };
            result.name = format_type(&format!("{}{}", base, generic));
            Ok(result)
        }
        _ => Ok(TypeNameResult::named(format_type(&resolved.display))),
    }
}
