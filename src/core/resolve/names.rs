use crate::core::syntax::{Decl, DeclKind, NodeId, SyntaxTree};
use crate::core::typing::TypeService;
use crate::error::{DocError, DocResult};

/// Canonical name of the scope `node` is documented under.
///
/// Walks the strict ancestors up to the first class, interface, namespace,
/// enum, anonymous object type or the file itself. External modules get a
/// `module:` prefix; a file only names its members when it carries an
/// `amd-module` directive.
pub fn owner_name(
    tree: &SyntaxTree,
    types: &dyn TypeService,
    node: NodeId,
) -> DocResult<Option<String>> {
    let Some(container) = tree.ancestors(node).find(|&id| {
        matches!(
            tree.decl(id).kind(),
            DeclKind::Class
                | DeclKind::Interface
                | DeclKind::Module
                | DeclKind::Enum
                | DeclKind::SourceFile
                | DeclKind::ObjectType
        )
    }) else {
        return Ok(None);
    };

    let name = match tree.decl(container) {
        Decl::Class(_) | Decl::Interface(_) | Decl::Enum(_) => {
            qualified_name(tree, types, container)
        }
        Decl::Module(module) => qualified_name(tree, types, container).map(|name| {
            if module.external {
                format!("module:{}", name)
            } else {
                name
            }
        }),
        Decl::ObjectType => Some(anonymous_full_name(tree, types, container)?),
        Decl::SourceFile(file) => file.amd_module_name.clone(),
        _ => None,
    };
    Ok(name)
}

/// Fully qualified name of a declaration, without module quotes.
pub fn qualified_name(tree: &SyntaxTree, types: &dyn TypeService, node: NodeId) -> Option<String> {
    types
        .symbol_of(tree, node)
        .map(|symbol| types.fully_qualified_name(&symbol).replace('"', ""))
}

/// Synthesized name for an anonymous type written at (or below) `node`:
/// `<Declaration><Role>Type`, or `...Callback` when the annotation of `node`
/// itself is a function type.
pub fn anonymous_name(tree: &SyntaxTree, node: NodeId) -> DocResult<String> {
    let suffix = if tree
        .decl(node)
        .type_annotation()
        .is_some_and(|ty| ty.takes_parameters())
    {
        "Callback"
    } else {
        "Type"
    };

    let declaration = tree
        .self_and_ancestors(node)
        .find(|&id| {
            matches!(
                tree.decl(id).kind(),
                DeclKind::Variable
                    | DeclKind::Property
                    | DeclKind::Function
                    | DeclKind::Method
                    | DeclKind::Parameter
            )
        })
        .ok_or_else(|| DocError::Resolution {
            file: tree.file_name().to_string(),
            kind: tree.decl(node).kind().as_str(),
            text: tree.node(node).excerpt.clone(),
        })?;

    let decl = tree.decl(declaration);
    let (name, role) = match decl {
        Decl::Function(_) | Decl::Method(_) => (decl.name().unwrap_or_default(), "Returns".to_string()),
        Decl::Parameter(param) => (
            nearest_name(tree, declaration).unwrap_or_default(),
            capitalize(&param.name),
        ),
        _ => (decl.name().unwrap_or_default(), String::new()),
    };

    Ok(format!("{}{}{}", capitalize(name), role, suffix))
}

/// `owner.AnonymousName`, or just the anonymous name when there is no owner.
pub fn anonymous_full_name(
    tree: &SyntaxTree,
    types: &dyn TypeService,
    node: NodeId,
) -> DocResult<String> {
    let owner = owner_name(tree, types, node)?;
    let name = anonymous_name(tree, node)?;
    Ok(match owner.filter(|o| !o.is_empty()) {
        Some(owner) => format!("{}.{}", owner, name),
        None => name,
    })
}

/// Name of the declaration a parameter belongs to. Constructors and call
/// signatures have none, so the closest named ancestor stands in.
fn nearest_name(tree: &SyntaxTree, param: NodeId) -> Option<&str> {
    tree.ancestors(param).find_map(|id| tree.decl(id).name())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
