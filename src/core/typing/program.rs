use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swc_common::SourceMap;
use tracing::{debug, warn};

use super::{
    CompilerOptions, ResolvedType, ScriptTarget, Signature, Symbol, TypeKind, TypeService,
};
use crate::core::comment::Comment;
use crate::core::parsers::typescript::parse_typescript_source;
use crate::core::syntax::{Decl, DeclKind, LiteralKind, NodeId, SyntaxTree, TypeExpr, lower_module};
use crate::error::{DocError, DocResult};

/// One parsed input file.
#[derive(Debug)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub tree: SyntaxTree,
}

/// Every input file of a run plus an index of the symbols they declare.
///
/// Files that cannot be read or parsed are kept as failures; the remaining
/// files form the program.
#[derive(Debug)]
pub struct Program {
    options: CompilerOptions,
    units: Vec<SourceUnit>,
    failures: Vec<DocError>,
    index: HashMap<String, Symbol>,
}

impl Program {
    /// Builds a program over in-memory sources.
    pub fn from_sources<I, P, S>(options: CompilerOptions, sources: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let source_map = Arc::new(SourceMap::default());
        let mut units = Vec::new();
        let mut failures = Vec::new();

        for (path, code) in sources {
            match parse_unit(path.into(), code.into(), &source_map) {
                Ok(unit) => units.push(unit),
                Err(err) => failures.push(err),
            }
        }

        Self::new(options, units, failures)
    }

    /// Builds a program by reading `paths` from disk.
    pub fn from_paths(options: CompilerOptions, paths: &[PathBuf]) -> Self {
        let source_map = Arc::new(SourceMap::default());
        let mut units = Vec::new();
        let mut failures = Vec::new();

        for path in paths {
            let unit = fs::read_to_string(path)
                .map_err(|source| DocError::Io {
                    path: path.clone(),
                    source,
                })
                .and_then(|code| parse_unit(path.clone(), code, &source_map));
            match unit {
                Ok(unit) => units.push(unit),
                Err(err) => failures.push(err),
            }
        }

        Self::new(options, units, failures)
    }

    /// A program consisting of exactly one file; a parse failure is returned as the error.
    pub fn single(options: CompilerOptions, path: &Path, code: String) -> DocResult<Self> {
        let source_map = Arc::new(SourceMap::default());
        let unit = parse_unit(path.to_path_buf(), code, &source_map)?;
        Ok(Self::new(options, vec![unit], Vec::new()))
    }

    fn new(options: CompilerOptions, units: Vec<SourceUnit>, failures: Vec<DocError>) -> Self {
        if let ScriptTarget::Unrecognized(target) = &options.target {
            warn!("unrecognized target `{}`, sources are read with the latest syntax", target);
        }

        let mut index = HashMap::new();
        for unit in &units {
            index_symbols(&unit.tree, &mut index);
        }
        debug!(
            "program has {} file(s), {} failure(s), {} indexed symbol(s)",
            units.len(),
            failures.len(),
            index.len()
        );

        Self {
            options,
            units,
            failures,
            index,
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn failures(&self) -> &[DocError] {
        &self.failures
    }

    pub fn type_service(&self) -> ProgramTypes<'_> {
        ProgramTypes { index: &self.index }
    }
}

fn parse_unit(path: PathBuf, code: String, source_map: &Arc<SourceMap>) -> DocResult<SourceUnit> {
    let file_name = path.to_string_lossy().into_owned();
    let parsed = parse_typescript_source(code, &file_name, Arc::clone(source_map))?;
    let tree = lower_module(&parsed.module, &file_name, &parsed.source_map, &parsed.comments);
    Ok(SourceUnit { path, tree })
}

/// Names declared at file or namespace level are visible to type references.
fn index_symbols(tree: &SyntaxTree, index: &mut HashMap<String, Symbol>) {
    for id in tree.preorder() {
        let indexed = matches!(
            tree.decl(id).kind(),
            DeclKind::Class
                | DeclKind::Interface
                | DeclKind::Enum
                | DeclKind::TypeAlias
                | DeclKind::Module
                | DeclKind::Function
                | DeclKind::Variable
        );
        let top_level = tree
            .ancestors(id)
            .all(|a| matches!(tree.decl(a), Decl::Module(_) | Decl::SourceFile(_)));
        if indexed
            && top_level
            && let Some(symbol) = symbol_for(tree, id)
        {
            index.insert(join_name(&symbol), symbol);
        }
    }
}

fn symbol_name(decl: &Decl) -> Option<String> {
    match decl {
        Decl::Module(module) if module.external => Some(format!("\"{}\"", module.name)),
        _ => decl.name().map(str::to_string),
    }
}

fn symbol_for(tree: &SyntaxTree, id: NodeId) -> Option<Symbol> {
    let name = symbol_name(tree.decl(id))?;
    let mut container: Vec<String> = tree
        .ancestors(id)
        .filter(|&a| {
            matches!(
                tree.decl(a),
                Decl::Module(_) | Decl::Class(_) | Decl::Interface(_) | Decl::Enum(_)
            )
        })
        .filter_map(|a| symbol_name(tree.decl(a)))
        .collect();
    container.reverse();
    Some(Symbol { name, container })
}

fn join_name(symbol: &Symbol) -> String {
    symbol
        .container
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(symbol.name.as_str()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Strips `...`, `[` `]` and a `=default` suffix from a hand-written param name.
fn bare_param_name(name: &str) -> &str {
    let name = name.trim_start_matches('[').trim_end_matches(']');
    let name = name.split('=').next().unwrap_or(name);
    name.trim_start_matches("...")
}

fn description_of(raw: Option<&str>) -> Option<Comment> {
    raw.map(Comment::parse_from_text)
}

/// The syntactic [`TypeService`] of a [`Program`].
#[derive(Debug, Clone, Copy)]
pub struct ProgramTypes<'p> {
    index: &'p HashMap<String, Symbol>,
}

impl ProgramTypes<'_> {
    fn is_type_parameter(&self, tree: &SyntaxTree, owner: NodeId, name: &str) -> bool {
        let head = name.split('.').next().unwrap_or(name);
        tree.self_and_ancestors(owner)
            .any(|id| tree.decl(id).type_params().iter().any(|p| p == head))
    }

    /// Looks `name` up from the innermost namespace around `owner` outward.
    fn resolve_reference(&self, tree: &SyntaxTree, owner: NodeId, name: &str) -> Option<Symbol> {
        let mut scopes: Vec<String> = tree
            .self_and_ancestors(owner)
            .filter(|&id| matches!(tree.decl(id), Decl::Module(_)))
            .filter_map(|id| symbol_name(tree.decl(id)))
            .collect();
        scopes.reverse();

        (0..=scopes.len()).rev().find_map(|depth| {
            let mut parts = scopes[..depth].to_vec();
            parts.push(name.to_string());
            self.index.get(&parts.join(".")).cloned()
        })
    }

    fn signature(&self, tree: &SyntaxTree, node: NodeId) -> Option<Signature> {
        let decl = tree.decl(node);
        let shape = decl.signature()?;
        let parameters = tree
            .children(node)
            .iter()
            .copied()
            .filter(|&child| tree.decl(child).kind() == DeclKind::Parameter)
            .collect();
        let returns_value = match decl {
            Decl::Constructor(_) => false,
            _ => shape
                .return_type
                .as_ref()
                .map_or(shape.body_returns_value, |ty| !ty.is_void()),
        };

        Some(Signature {
            declaration: node,
            parameters,
            return_type: shape.return_type.clone(),
            returns_value,
            documentation: self.documentation(tree, node),
        })
    }

    fn member_signatures(&self, tree: &SyntaxTree, node: NodeId, kind: DeclKind) -> Vec<Signature> {
        tree.children(node)
            .iter()
            .filter(|&&child| tree.decl(child).kind() == kind)
            .filter_map(|&child| self.signature(tree, child))
            .collect()
    }
}

impl TypeService for ProgramTypes<'_> {
    fn type_of_node(&self, tree: &SyntaxTree, node: NodeId) -> Option<ResolvedType> {
        let decl = tree.decl(node);
        if let Some(ty) = decl.type_annotation() {
            return Some(self.type_of_type_expr(tree, node, ty));
        }

        let literal = decl.initializer()?.literal?;
        Some(ResolvedType::intrinsic(match literal {
            LiteralKind::Number => "number",
            LiteralKind::String => "string",
            LiteralKind::Boolean => "boolean",
        }))
    }

    fn type_of_type_expr(&self, tree: &SyntaxTree, owner: NodeId, ty: &TypeExpr) -> ResolvedType {
        let display = ty.to_string();
        match ty {
            TypeExpr::Intrinsic(_) => ResolvedType::intrinsic(display),
            TypeExpr::Reference { name, .. } if self.is_type_parameter(tree, owner, name) => {
                ResolvedType {
                    kind: TypeKind::TypeParameter,
                    display,
                    symbol: None,
                }
            }
            TypeExpr::Reference { name, .. } => ResolvedType {
                kind: TypeKind::Reference,
                display,
                symbol: self.resolve_reference(tree, owner, name),
            },
            TypeExpr::Object(_) | TypeExpr::Function(_) => ResolvedType {
                kind: TypeKind::Anonymous,
                display,
                symbol: None,
            },
            TypeExpr::Union(_) => ResolvedType {
                kind: TypeKind::Union,
                display,
                symbol: None,
            },
            TypeExpr::Array(_) | TypeExpr::Query(_) | TypeExpr::Other(_) => ResolvedType {
                kind: TypeKind::Reference,
                display,
                symbol: None,
            },
        }
    }

    fn signature_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<Signature> {
        self.signature(tree, node)
    }

    fn symbol_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<Symbol> {
        symbol_for(tree, node)
    }

    fn fully_qualified_name(&self, symbol: &Symbol) -> String {
        join_name(symbol)
    }

    fn call_signatures(&self, tree: &SyntaxTree, node: NodeId) -> Vec<Signature> {
        if tree.decl(node).kind() == DeclKind::FunctionType {
            return self.signature(tree, node).into_iter().collect();
        }
        self.member_signatures(tree, node, DeclKind::CallSignature)
    }

    fn construct_signatures(&self, tree: &SyntaxTree, node: NodeId) -> Vec<Signature> {
        self.member_signatures(tree, node, DeclKind::ConstructSignature)
    }

    fn documentation(&self, tree: &SyntaxTree, node: NodeId) -> Option<String> {
        let comment = match tree.decl(node) {
            Decl::Parameter(param) => {
                let parent = tree.parent(node)?;
                let comment = description_of(tree.node(parent).leading_comment.as_deref())?;
                let tag = comment.tags.into_iter().find(|tag| {
                    tag.kind == "param"
                        && tag
                            .name
                            .as_deref()
                            .is_some_and(|name| bare_param_name(name) == param.name)
                })?;
                return tag.description.filter(|d| !d.trim().is_empty());
            }
            _ => description_of(tree.node(node).leading_comment.as_deref())?,
        };
        comment.description.filter(|d| !d.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::TypeExpr;

    fn program(sources: &[(&str, &str)]) -> Program {
        Program::from_sources(
            CompilerOptions::default(),
            sources.iter().map(|(p, c)| (p.to_string(), c.to_string())),
        )
    }

    #[test]
    fn test_parse_failures_are_collected() {
        let program = program(&[("ok.ts", "let a = 1;"), ("bad.ts", "function (")]);
        assert_eq!(program.units().len(), 1);
        assert_eq!(program.failures().len(), 1);
        assert!(matches!(&program.failures()[0], DocError::Parse { file, .. } if file == "bad.ts"));
    }

    #[test]
    fn test_from_paths_reports_missing_file() {
        let program = Program::from_paths(
            CompilerOptions::default(),
            &[PathBuf::from("/definitely/not/here.ts")],
        );
        assert!(program.units().is_empty());
        assert!(matches!(program.failures()[0], DocError::Io { .. }));
    }

    #[test]
    fn test_type_parameters_and_references() {
        let program = program(&[
            ("a.ts", "namespace NS { export class Foo {} export class Box<T> { v: T; f: Foo; } }"),
            ("b.ts", "class Bar {}"),
        ]);
        let tree = &program.units()[0].tree;
        let types = program.type_service();

        let v = tree.find_by_name("v").unwrap();
        let v_type = types.type_of_node(tree, v).unwrap();
        assert_eq!(v_type.kind, TypeKind::TypeParameter);
        assert_eq!(v_type.display, "T");

        let f = tree.find_by_name("f").unwrap();
        let f_type = types.type_of_node(tree, f).unwrap();
        assert_eq!(f_type.kind, TypeKind::Reference);
        let symbol = f_type.symbol.unwrap();
        assert_eq!(types.fully_qualified_name(&symbol), "NS.Foo");

        let bar = types.type_of_type_expr(tree, f, &TypeExpr::reference("Bar"));
        assert_eq!(
            bar.symbol.map(|s| types.fully_qualified_name(&s)),
            Some("Bar".to_string())
        );

        let unknown = types.type_of_type_expr(tree, f, &TypeExpr::reference("Missing"));
        assert!(unknown.symbol.is_none());
        assert_eq!(unknown.display, "Missing");
    }

    #[test]
    fn test_external_module_symbol_is_quoted() {
        let program = program(&[("a.d.ts", "declare module \"lib\" { class Api {} }")]);
        let tree = &program.units()[0].tree;
        let types = program.type_service();

        let api = tree.find_by_name("Api").unwrap();
        let symbol = types.symbol_of(tree, api).unwrap();
        assert_eq!(types.fully_qualified_name(&symbol), "\"lib\".Api");
    }

    #[test]
    fn test_type_of_node_from_initializer() {
        let program = program(&[("a.ts", "let n = 3; let s = 'x'; let o = make();")]);
        let tree = &program.units()[0].tree;
        let types = program.type_service();

        let n = tree.find_by_name("n").unwrap();
        assert_eq!(types.type_of_node(tree, n).unwrap().display, "number");
        let s = tree.find_by_name("s").unwrap();
        assert_eq!(types.type_of_node(tree, s).unwrap().display, "string");
        let o = tree.find_by_name("o").unwrap();
        assert!(types.type_of_node(tree, o).is_none());
    }

    #[test]
    fn test_signatures() {
        let program = program(&[(
            "a.ts",
            r#"
/**
 * Sums things.
 * @param [a] First.
 */
function sum(a?: number, b = 2) { return a + b; }
function log(msg: string): void {}
class K { constructor(x: number) {} }
interface Callable { (x: number): string; new (): Callable; }
"#,
        )]);
        let tree = &program.units()[0].tree;
        let types = program.type_service();

        let sum = tree.find_by_name("sum").unwrap();
        let signature = types.signature_of(tree, sum).unwrap();
        assert_eq!(signature.parameters.len(), 2);
        assert!(signature.returns_value);
        assert_eq!(signature.documentation.as_deref(), Some("Sums things."));
        assert_eq!(
            types.documentation(tree, signature.parameters[0]).as_deref(),
            Some("First.")
        );
        assert!(types.documentation(tree, signature.parameters[1]).is_none());

        let log = tree.find_by_name("log").unwrap();
        assert!(!types.signature_of(tree, log).unwrap().returns_value);

        let class = tree.find_by_name("K").unwrap();
        let ctor = tree.children(class)[0];
        assert!(!types.signature_of(tree, ctor).unwrap().returns_value);

        let callable = tree.find_by_name("Callable").unwrap();
        assert_eq!(types.call_signatures(tree, callable).len(), 1);
        assert_eq!(types.construct_signatures(tree, callable).len(), 1);
    }

    #[test]
    fn test_bare_param_name() {
        assert_eq!(bare_param_name("a"), "a");
        assert_eq!(bare_param_name("[a]"), "a");
        assert_eq!(bare_param_name("[a=1]"), "a");
        assert_eq!(bare_param_name("...rest"), "rest");
        assert_eq!(bare_param_name("[...rest]"), "rest");
    }
}
