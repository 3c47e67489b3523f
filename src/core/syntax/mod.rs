//! The typed declaration tree consumed by the documentation engine.
//!
//! Nodes live in an arena owned by [`SyntaxTree`] and are addressed by
//! [`NodeId`]. The parent relation is a plain id lookup; nothing in the engine
//! mutates the tree after lowering.
//!
//! ## Module Structure
//!
//! - `types`: type annotations ([`TypeExpr`])
//! - `lower`: building a tree from a parsed swc module

mod lower;
mod types;

pub use lower::lower_module;
pub use types::TypeExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub decl: Decl,
    /// Raw text of the `/** */` block written directly before the declaration.
    pub leading_comment: Option<String>,
    /// First line of the declaration's source text, for diagnostics.
    pub excerpt: String,
}

/// Declarations of one source file. The file root is always [`SyntaxTree::root`].
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    file_name: String,
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn new(file_name: impl Into<String>, root: SourceFileDecl) -> Self {
        Self {
            file_name: file_name.into(),
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                decl: Decl::SourceFile(root),
                leading_comment: None,
                excerpt: String::new(),
            }],
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a declaration as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, decl: Decl) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            decl,
            leading_comment: None,
            excerpt: String::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn decl(&self, id: NodeId) -> &Decl {
        &self.node(id).decl
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// `id` itself followed by its ancestors.
    pub fn self_and_ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.parent(current))
    }

    /// Depth-first pre-order listing of the whole tree.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// First declaration named `name` in pre-order. Mostly useful in tests.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.preorder()
            .into_iter()
            .find(|&id| self.decl(id).name() == Some(name))
    }
}

/// Fieldless mirror of [`Decl`], used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    SourceFile,
    Variable,
    Property,
    Function,
    Method,
    Constructor,
    Accessor,
    Parameter,
    Interface,
    Class,
    TypeAlias,
    Enum,
    Module,
    ExportAssignment,
    CallSignature,
    ConstructSignature,
    ObjectType,
    FunctionType,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::SourceFile => "source file",
            DeclKind::Variable => "variable",
            DeclKind::Property => "property",
            DeclKind::Function => "function",
            DeclKind::Method => "method",
            DeclKind::Constructor => "constructor",
            DeclKind::Accessor => "accessor",
            DeclKind::Parameter => "parameter",
            DeclKind::Interface => "interface",
            DeclKind::Class => "class",
            DeclKind::TypeAlias => "type alias",
            DeclKind::Enum => "enum",
            DeclKind::Module => "namespace",
            DeclKind::ExportAssignment => "export assignment",
            DeclKind::CallSignature => "call signature",
            DeclKind::ConstructSignature => "construct signature",
            DeclKind::ObjectType => "object type",
            DeclKind::FunctionType => "function type",
        }
    }
}

/// One declaration category per variant, each carrying only what it needs.
#[derive(Debug, Clone)]
pub enum Decl {
    SourceFile(SourceFileDecl),
    Variable(VariableDecl),
    /// Class property, or property signature of an interface / object type.
    Property(VariableDecl),
    Function(SignatureDecl),
    /// Class method, or method signature of an interface / object type.
    Method(SignatureDecl),
    Constructor(SignatureDecl),
    Accessor(AccessorDecl),
    Parameter(ParameterDecl),
    Interface(InterfaceDecl),
    Class(ClassDecl),
    TypeAlias(TypeAliasDecl),
    Enum(EnumDecl),
    Module(ModuleDecl),
    ExportAssignment,
    CallSignature(SignatureDecl),
    ConstructSignature(SignatureDecl),
    ObjectType,
    FunctionType(SignatureDecl),
}

impl Decl {
    pub fn kind(&self) -> DeclKind {
        match self {
            Decl::SourceFile(_) => DeclKind::SourceFile,
            Decl::Variable(_) => DeclKind::Variable,
            Decl::Property(_) => DeclKind::Property,
            Decl::Function(_) => DeclKind::Function,
            Decl::Method(_) => DeclKind::Method,
            Decl::Constructor(_) => DeclKind::Constructor,
            Decl::Accessor(_) => DeclKind::Accessor,
            Decl::Parameter(_) => DeclKind::Parameter,
            Decl::Interface(_) => DeclKind::Interface,
            Decl::Class(_) => DeclKind::Class,
            Decl::TypeAlias(_) => DeclKind::TypeAlias,
            Decl::Enum(_) => DeclKind::Enum,
            Decl::Module(_) => DeclKind::Module,
            Decl::ExportAssignment => DeclKind::ExportAssignment,
            Decl::CallSignature(_) => DeclKind::CallSignature,
            Decl::ConstructSignature(_) => DeclKind::ConstructSignature,
            Decl::ObjectType => DeclKind::ObjectType,
            Decl::FunctionType(_) => DeclKind::FunctionType,
        }
    }

    /// The declared identifier, if the declaration has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Variable(v) | Decl::Property(v) => Some(&v.name),
            Decl::Function(s)
            | Decl::Method(s)
            | Decl::Constructor(s)
            | Decl::CallSignature(s)
            | Decl::ConstructSignature(s)
            | Decl::FunctionType(s) => s.name.as_deref(),
            Decl::Accessor(a) => Some(&a.name),
            Decl::Parameter(p) => Some(&p.name),
            Decl::Interface(i) => Some(&i.name),
            Decl::Class(c) => Some(&c.name),
            Decl::TypeAlias(t) => Some(&t.name),
            Decl::Enum(e) => Some(&e.name),
            Decl::Module(m) => Some(&m.name),
            Decl::SourceFile(_) | Decl::ExportAssignment | Decl::ObjectType => None,
        }
    }

    /// The declaration's own type annotation; for signatures, the return type.
    pub fn type_annotation(&self) -> Option<&TypeExpr> {
        match self {
            Decl::Variable(v) | Decl::Property(v) => v.ty.as_ref(),
            Decl::Parameter(p) => p.ty.as_ref(),
            Decl::TypeAlias(t) => t.ty.as_ref(),
            Decl::Function(s)
            | Decl::Method(s)
            | Decl::Constructor(s)
            | Decl::CallSignature(s)
            | Decl::ConstructSignature(s)
            | Decl::FunctionType(s) => s.return_type.as_ref(),
            _ => None,
        }
    }

    pub fn type_params(&self) -> &[String] {
        match self {
            Decl::Function(s)
            | Decl::Method(s)
            | Decl::Constructor(s)
            | Decl::CallSignature(s)
            | Decl::ConstructSignature(s)
            | Decl::FunctionType(s) => &s.type_params,
            Decl::Interface(i) => &i.type_params,
            Decl::Class(c) => &c.type_params,
            Decl::TypeAlias(t) => &t.type_params,
            _ => &[],
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Decl::Variable(v) | Decl::Property(v) => v.modifiers,
            Decl::Function(s) | Decl::Method(s) | Decl::Constructor(s) => s.modifiers,
            Decl::Enum(e) => e.modifiers,
            _ => Modifiers::default(),
        }
    }

    pub fn initializer(&self) -> Option<&Initializer> {
        match self {
            Decl::Variable(v) | Decl::Property(v) => v.initializer.as_ref(),
            Decl::Parameter(p) => p.initializer.as_ref(),
            _ => None,
        }
    }

    pub fn heritage(&self) -> &[HeritageClause] {
        match self {
            Decl::Interface(i) => &i.heritage,
            Decl::Class(c) => &c.heritage,
            _ => &[],
        }
    }

    pub fn signature(&self) -> Option<&SignatureDecl> {
        match self {
            Decl::Function(s)
            | Decl::Method(s)
            | Decl::Constructor(s)
            | Decl::CallSignature(s)
            | Decl::ConstructSignature(s)
            | Decl::FunctionType(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn set_type_annotation(&mut self, ty: TypeExpr) {
        match self {
            Decl::Variable(v) | Decl::Property(v) => v.ty = Some(ty),
            Decl::Parameter(p) => p.ty = Some(ty),
            Decl::TypeAlias(t) => t.ty = Some(ty),
            Decl::Function(s)
            | Decl::Method(s)
            | Decl::Constructor(s)
            | Decl::CallSignature(s)
            | Decl::ConstructSignature(s)
            | Decl::FunctionType(s) => s.return_type = Some(ty),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceFileDecl {
    /// Name given by a `/// <amd-module name="..."/>` directive.
    pub amd_module_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VariableDecl {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub initializer: Option<Initializer>,
    pub modifiers: Modifiers,
    pub optional: bool,
}

/// Functions, methods, constructors and every other signature-shaped declaration.
#[derive(Debug, Clone, Default)]
pub struct SignatureDecl {
    pub name: Option<String>,
    pub type_params: Vec<String>,
    pub return_type: Option<TypeExpr>,
    /// The body contains a `return <expr>` statement.
    pub body_returns_value: bool,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Default)]
pub struct AccessorDecl {
    pub name: String,
    pub setter: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterDecl {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub initializer: Option<Initializer>,
    pub rest: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub heritage: Vec<HeritageClause>,
    /// Number of members of every kind, signatures included.
    pub member_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ClassDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub heritage: Vec<HeritageClause>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeAliasDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub ty: Option<TypeExpr>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub initializer: Option<Initializer>,
}

#[derive(Debug, Clone, Default)]
pub struct ModuleDecl {
    /// Namespace name, or the unquoted module name for ambient external modules.
    pub name: String,
    /// Declared with a quoted name: `declare module "fs" {}`.
    pub external: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeritageKind {
    Extends,
    Implements,
}

#[derive(Debug, Clone)]
pub struct HeritageClause {
    pub kind: HeritageKind,
    pub types: Vec<TypeExpr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    /// Source text of the initializer expression.
    pub text: String,
    pub literal: Option<LiteralKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Private,
    Protected,
}

impl Accessibility {
    pub fn as_tag(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Private => "private",
            Accessibility::Protected => "protected",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub accessibility: Option<Accessibility>,
    pub is_static: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxTree {
        let mut tree = SyntaxTree::new("sample.ts", SourceFileDecl::default());
        let class = tree.push(
            tree.root(),
            Decl::Class(ClassDecl {
                name: "C".to_string(),
                ..Default::default()
            }),
        );
        let method = tree.push(
            class,
            Decl::Method(SignatureDecl {
                name: Some("run".to_string()),
                ..Default::default()
            }),
        );
        tree.push(
            method,
            Decl::Parameter(ParameterDecl {
                name: "x".to_string(),
                ..Default::default()
            }),
        );
        tree.push(
            tree.root(),
            Decl::Enum(EnumDecl {
                name: "E".to_string(),
                ..Default::default()
            }),
        );
        tree
    }

    #[test]
    fn test_preorder_visits_parents_before_children() {
        let tree = sample_tree();
        let names: Vec<Option<&str>> = tree
            .preorder()
            .into_iter()
            .map(|id| tree.decl(id).name())
            .collect();
        assert_eq!(names, vec![None, Some("C"), Some("run"), Some("x"), Some("E")]);
    }

    #[test]
    fn test_ancestors() {
        let tree = sample_tree();
        let x = tree.find_by_name("x").unwrap();
        let kinds: Vec<DeclKind> = tree
            .ancestors(x)
            .map(|id| tree.decl(id).kind())
            .collect();
        assert_eq!(
            kinds,
            vec![DeclKind::Method, DeclKind::Class, DeclKind::SourceFile]
        );
        assert_eq!(tree.ancestors(tree.root()).count(), 0);
    }
}
