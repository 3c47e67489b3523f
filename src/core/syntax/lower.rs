//! Lowering of a parsed swc module into a [`SyntaxTree`].
//!
//! Only declarations are kept. Function bodies are scanned for `return <expr>`
//! and otherwise dropped, so locals never become tree nodes.

use std::sync::LazyLock;

use regex::Regex;
use swc_common::{BytePos, SourceMap, SourceMapper, Span, Spanned, comments::CommentKind};
use swc_ecma_ast as ast;
use swc_ecma_visit::{Visit, VisitWith};

use super::{
    AccessorDecl, ClassDecl, Decl, EnumDecl, EnumMember, HeritageClause, HeritageKind,
    Initializer, InterfaceDecl, LiteralKind, ModuleDecl, Modifiers, NodeId, ParameterDecl,
    SignatureDecl, SourceFileDecl, SyntaxTree, TypeAliasDecl, TypeExpr, VariableDecl,
};
use crate::core::parsers::typescript::ExtractedComments;

static AMD_MODULE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^/\s*<amd-module\s+name\s*=\s*["']([^"']+)["']"#).expect("valid amd-module regex")
});

const MAX_EXCERPT_CHARS: usize = 80;

/// Builds the declaration tree of one parsed file.
pub fn lower_module(
    module: &ast::Module,
    file_name: &str,
    source_map: &SourceMap,
    comments: &ExtractedComments,
) -> SyntaxTree {
    let root = SourceFileDecl {
        amd_module_name: amd_module_name(comments),
    };
    let mut builder = TreeBuilder {
        source_map,
        comments,
        tree: SyntaxTree::new(file_name, root),
    };
    let root = builder.tree.root();
    builder.lower_items(root, &module.body);
    builder.tree
}

fn amd_module_name(comments: &ExtractedComments) -> Option<String> {
    comments
        .all_sorted()
        .into_iter()
        .filter(|c| c.kind == CommentKind::Line)
        .find_map(|c| {
            AMD_MODULE_REGEX
                .captures(c.text.trim_start())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}

/// Shape of a parameter binding, shared by function parameters and
/// signature parameters.
struct ParamShape<'p> {
    name: String,
    optional: bool,
    rest: bool,
    annotation: Option<&'p ast::TsTypeAnn>,
    initializer: Option<&'p ast::Expr>,
}

impl<'p> ParamShape<'p> {
    fn new(name: String, optional: bool, annotation: Option<&'p ast::TsTypeAnn>) -> Self {
        Self {
            name,
            optional,
            rest: false,
            annotation,
            initializer: None,
        }
    }

    fn from_pat(pat: &'p ast::Pat, index: usize) -> Self {
        match pat {
            ast::Pat::Ident(binding) => Self::new(
                binding.id.sym.to_string(),
                binding.id.optional,
                binding.type_ann.as_deref(),
            ),
            ast::Pat::Assign(assign) => Self {
                initializer: Some(&*assign.right),
                ..Self::from_pat(&assign.left, index)
            },
            ast::Pat::Rest(rest) => Self::from_rest(rest, index),
            ast::Pat::Array(array) => {
                Self::new(placeholder(index), array.optional, array.type_ann.as_deref())
            }
            ast::Pat::Object(object) => {
                Self::new(placeholder(index), object.optional, object.type_ann.as_deref())
            }
            _ => Self::new(placeholder(index), false, None),
        }
    }

    fn from_rest(rest: &'p ast::RestPat, index: usize) -> Self {
        let inner = Self::from_pat(&rest.arg, index);
        Self {
            rest: true,
            annotation: rest.type_ann.as_deref().or(inner.annotation),
            ..inner
        }
    }

    fn from_fn_param(param: &'p ast::TsFnParam, index: usize) -> Self {
        match param {
            ast::TsFnParam::Ident(binding) => Self::new(
                binding.id.sym.to_string(),
                binding.id.optional,
                binding.type_ann.as_deref(),
            ),
            ast::TsFnParam::Rest(rest) => Self::from_rest(rest, index),
            ast::TsFnParam::Array(array) => {
                Self::new(placeholder(index), array.optional, array.type_ann.as_deref())
            }
            ast::TsFnParam::Object(object) => {
                Self::new(placeholder(index), object.optional, object.type_ann.as_deref())
            }
        }
    }
}

/// Destructured parameters are named by position, like the TypeScript checker does.
fn placeholder(index: usize) -> String {
    format!("__{}", index)
}

#[derive(Default)]
struct ReturnFinder {
    found: bool,
}

impl Visit for ReturnFinder {
    fn visit_return_stmt(&mut self, node: &ast::ReturnStmt) {
        if node.arg.is_some() {
            self.found = true;
        }
    }

    // Returns of nested functions belong to those functions.
    fn visit_function(&mut self, _: &ast::Function) {}
    fn visit_arrow_expr(&mut self, _: &ast::ArrowExpr) {}
    fn visit_class(&mut self, _: &ast::Class) {}
}

fn body_returns_value(body: &ast::BlockStmt) -> bool {
    let mut finder = ReturnFinder::default();
    body.visit_with(&mut finder);
    finder.found
}

fn type_param_names(params: Option<&ast::TsTypeParamDecl>) -> Vec<String> {
    params
        .map(|decl| decl.params.iter().map(|p| p.name.sym.to_string()).collect())
        .unwrap_or_default()
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

struct TreeBuilder<'a> {
    source_map: &'a SourceMap,
    comments: &'a ExtractedComments,
    tree: SyntaxTree,
}

impl TreeBuilder<'_> {
    fn snippet(&self, span: Span) -> String {
        self.source_map.span_to_snippet(span).unwrap_or_default()
    }

    /// The last `/** */` block directly in front of `lo`.
    fn doc_comment(&self, lo: BytePos) -> Option<String> {
        self.comments
            .leading
            .get(&lo)?
            .iter()
            .rev()
            .find(|c| c.kind == CommentKind::Block && c.text.starts_with('*'))
            .map(|c| format!("/*{}*/", c.text))
    }

    /// Adds a node; `doc_lo` is where its doc comment would be attached.
    fn push(&mut self, parent: NodeId, decl: Decl, span: Span, doc_lo: BytePos) -> NodeId {
        let excerpt: String = self
            .snippet(span)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .chars()
            .take(MAX_EXCERPT_CHARS)
            .collect();
        let leading_comment = self.doc_comment(doc_lo);

        let id = self.tree.push(parent, decl);
        let node = self.tree.node_mut(id);
        node.excerpt = excerpt;
        node.leading_comment = leading_comment;
        id
    }

    fn set_type(&mut self, id: NodeId, ty: TypeExpr) {
        self.tree.node_mut(id).decl.set_type_annotation(ty);
    }

    fn set_heritage(&mut self, id: NodeId, heritage: Vec<HeritageClause>) {
        match &mut self.tree.node_mut(id).decl {
            Decl::Class(class) => class.heritage = heritage,
            Decl::Interface(iface) => iface.heritage = heritage,
            _ => {}
        }
    }

    fn lower_items(&mut self, parent: NodeId, items: &[ast::ModuleItem]) {
        for item in items {
            match item {
                ast::ModuleItem::Stmt(ast::Stmt::Decl(decl)) => {
                    self.lower_decl(parent, decl, decl.span().lo)
                }
                ast::ModuleItem::Stmt(_) => {}
                ast::ModuleItem::ModuleDecl(module_decl) => match module_decl {
                    ast::ModuleDecl::ExportDecl(export) => {
                        self.lower_decl(parent, &export.decl, export.span.lo)
                    }
                    ast::ModuleDecl::ExportDefaultDecl(export) => {
                        self.lower_default_decl(parent, &export.decl, export.span.lo)
                    }
                    ast::ModuleDecl::TsExportAssignment(assign) => {
                        self.push(parent, Decl::ExportAssignment, assign.span, assign.span.lo);
                    }
                    _ => {}
                },
            }
        }
    }

    fn lower_decl(&mut self, parent: NodeId, decl: &ast::Decl, doc_lo: BytePos) {
        match decl {
            ast::Decl::Class(class) => {
                self.lower_class(parent, class.ident.sym.to_string(), &class.class, doc_lo)
            }
            ast::Decl::Fn(func) => {
                let shape = SignatureDecl {
                    name: Some(func.ident.sym.to_string()),
                    ..Default::default()
                };
                self.lower_function(parent, Decl::Function, shape, &func.function, doc_lo);
            }
            ast::Decl::Var(var) => {
                for (index, declarator) in var.decls.iter().enumerate() {
                    let lo = if index == 0 { doc_lo } else { declarator.span.lo };
                    self.lower_var(parent, declarator, lo);
                }
            }
            ast::Decl::TsInterface(iface) => self.lower_interface(parent, iface, doc_lo),
            ast::Decl::TsTypeAlias(alias) => {
                let decl = Decl::TypeAlias(TypeAliasDecl {
                    name: alias.id.sym.to_string(),
                    type_params: type_param_names(alias.type_params.as_deref()),
                    ty: None,
                });
                let id = self.push(parent, decl, alias.span, doc_lo);
                let ty = self.lower_type(id, &alias.type_ann);
                self.set_type(id, ty);
            }
            ast::Decl::TsEnum(en) => self.lower_enum(parent, en, doc_lo),
            ast::Decl::TsModule(module) => self.lower_module_decl(parent, module, doc_lo),
            _ => {}
        }
    }

    fn lower_default_decl(&mut self, parent: NodeId, decl: &ast::DefaultDecl, doc_lo: BytePos) {
        match decl {
            ast::DefaultDecl::Class(class) => {
                let name = class
                    .ident
                    .as_ref()
                    .map_or_else(|| "default".to_string(), |i| i.sym.to_string());
                self.lower_class(parent, name, &class.class, doc_lo);
            }
            ast::DefaultDecl::Fn(func) => {
                let name = func
                    .ident
                    .as_ref()
                    .map_or_else(|| "default".to_string(), |i| i.sym.to_string());
                let shape = SignatureDecl {
                    name: Some(name),
                    ..Default::default()
                };
                self.lower_function(parent, Decl::Function, shape, &func.function, doc_lo);
            }
            ast::DefaultDecl::TsInterfaceDecl(iface) => {
                self.lower_interface(parent, iface, doc_lo)
            }
        }
    }

    fn lower_var(&mut self, parent: NodeId, declarator: &ast::VarDeclarator, doc_lo: BytePos) {
        let ast::Pat::Ident(binding) = &declarator.name else {
            return;
        };
        let initializer = declarator.init.as_deref().map(|e| self.initializer(e));
        let decl = Decl::Variable(VariableDecl {
            name: binding.id.sym.to_string(),
            initializer,
            ..Default::default()
        });
        let id = self.push(parent, decl, declarator.span, doc_lo);
        if let Some(ann) = binding.type_ann.as_deref() {
            let ty = self.lower_type(id, &ann.type_ann);
            self.set_type(id, ty);
        }
    }

    fn initializer(&self, expr: &ast::Expr) -> Initializer {
        let literal = match expr {
            ast::Expr::Lit(ast::Lit::Num(_)) => Some(LiteralKind::Number),
            ast::Expr::Lit(ast::Lit::Str(_)) => Some(LiteralKind::String),
            ast::Expr::Lit(ast::Lit::Bool(_)) => Some(LiteralKind::Boolean),
            _ => None,
        };
        Initializer {
            text: self.snippet(expr.span()),
            literal,
        }
    }

    fn lower_function(
        &mut self,
        parent: NodeId,
        wrap: fn(SignatureDecl) -> Decl,
        shape: SignatureDecl,
        function: &ast::Function,
        doc_lo: BytePos,
    ) -> NodeId {
        let shape = SignatureDecl {
            type_params: type_param_names(function.type_params.as_deref()),
            body_returns_value: function.body.as_ref().is_some_and(body_returns_value),
            ..shape
        };
        let id = self.push(parent, wrap(shape), function.span, doc_lo);
        for (index, param) in function.params.iter().enumerate() {
            self.push_param(id, ParamShape::from_pat(&param.pat, index), param.span);
        }
        if let Some(ret) = function.return_type.as_deref() {
            let ty = self.lower_type(id, &ret.type_ann);
            self.set_type(id, ty);
        }
        id
    }

    fn push_param(&mut self, parent: NodeId, shape: ParamShape<'_>, span: Span) -> NodeId {
        let initializer = shape.initializer.map(|e| self.initializer(e));
        let decl = Decl::Parameter(ParameterDecl {
            name: shape.name,
            ty: None,
            initializer,
            rest: shape.rest,
            optional: shape.optional,
        });
        let id = self.push(parent, decl, span, span.lo);
        if let Some(ann) = shape.annotation {
            let ty = self.lower_type(id, &ann.type_ann);
            self.set_type(id, ty);
        }
        id
    }

    fn lower_fn_params(&mut self, parent: NodeId, params: &[ast::TsFnParam]) {
        for (index, param) in params.iter().enumerate() {
            self.push_param(parent, ParamShape::from_fn_param(param, index), param.span());
        }
    }

    fn lower_class(&mut self, parent: NodeId, name: String, class: &ast::Class, doc_lo: BytePos) {
        let decl = Decl::Class(ClassDecl {
            name,
            type_params: type_param_names(class.type_params.as_deref()),
            heritage: Vec::new(),
        });
        let id = self.push(parent, decl, class.span, doc_lo);

        let mut heritage = Vec::new();
        if let Some(super_class) = &class.super_class {
            let args = class
                .super_type_params
                .as_deref()
                .map(|args| self.lower_type_args(id, args))
                .unwrap_or_default();
            heritage.push(HeritageClause {
                kind: HeritageKind::Extends,
                types: vec![TypeExpr::Reference {
                    name: self.snippet(super_class.span()),
                    args,
                }],
            });
        }
        if !class.implements.is_empty() {
            let types = class
                .implements
                .iter()
                .map(|implemented| self.lower_heritage_type(id, implemented))
                .collect();
            heritage.push(HeritageClause {
                kind: HeritageKind::Implements,
                types,
            });
        }
        self.set_heritage(id, heritage);

        for member in &class.body {
            self.lower_class_member(id, member);
        }
    }

    fn lower_class_member(&mut self, class: NodeId, member: &ast::ClassMember) {
        match member {
            ast::ClassMember::Constructor(ctor) => {
                let decl = Decl::Constructor(SignatureDecl {
                    modifiers: Modifiers {
                        accessibility: ctor.accessibility.map(accessibility),
                        is_static: false,
                    },
                    ..Default::default()
                });
                let id = self.push(class, decl, ctor.span, ctor.span.lo);
                for (index, param) in ctor.params.iter().enumerate() {
                    match param {
                        ast::ParamOrTsParamProp::Param(param) => {
                            self.push_param(id, ParamShape::from_pat(&param.pat, index), param.span);
                        }
                        ast::ParamOrTsParamProp::TsParamProp(prop) => {
                            let shape = match &prop.param {
                                ast::TsParamPropParam::Ident(binding) => ParamShape::new(
                                    binding.id.sym.to_string(),
                                    binding.id.optional,
                                    binding.type_ann.as_deref(),
                                ),
                                ast::TsParamPropParam::Assign(assign) => ParamShape {
                                    initializer: Some(&*assign.right),
                                    ..ParamShape::from_pat(&assign.left, index)
                                },
                            };
                            self.push_param(id, shape, prop.span);
                        }
                    }
                }
            }
            ast::ClassMember::Method(method) => {
                let name = self.prop_name(&method.key);
                match method.kind {
                    ast::MethodKind::Method => {
                        let shape = SignatureDecl {
                            name: Some(name),
                            modifiers: Modifiers {
                                accessibility: method.accessibility.map(accessibility),
                                is_static: method.is_static,
                            },
                            ..Default::default()
                        };
                        self.lower_function(
                            class,
                            Decl::Method,
                            shape,
                            &method.function,
                            method.span.lo,
                        );
                    }
                    ast::MethodKind::Getter | ast::MethodKind::Setter => {
                        let decl = Decl::Accessor(AccessorDecl {
                            name,
                            setter: method.kind == ast::MethodKind::Setter,
                        });
                        self.push(class, decl, method.span, method.span.lo);
                    }
                }
            }
            ast::ClassMember::ClassProp(prop) => {
                let initializer = prop.value.as_deref().map(|e| self.initializer(e));
                let decl = Decl::Property(VariableDecl {
                    name: self.prop_name(&prop.key),
                    ty: None,
                    initializer,
                    modifiers: Modifiers {
                        accessibility: prop.accessibility.map(accessibility),
                        is_static: prop.is_static,
                    },
                    optional: prop.is_optional,
                });
                let id = self.push(class, decl, prop.span, prop.span.lo);
                if let Some(ann) = prop.type_ann.as_deref() {
                    let ty = self.lower_type(id, &ann.type_ann);
                    self.set_type(id, ty);
                }
            }
            _ => {}
        }
    }

    fn prop_name(&self, key: &ast::PropName) -> String {
        match key {
            ast::PropName::Ident(ident) => ident.sym.to_string(),
            _ => unquote(&self.snippet(key.span())),
        }
    }

    fn key_name(&self, key: &ast::Expr) -> String {
        match key {
            ast::Expr::Ident(ident) => ident.sym.to_string(),
            _ => unquote(&self.snippet(key.span())),
        }
    }

    fn lower_interface(&mut self, parent: NodeId, iface: &ast::TsInterfaceDecl, doc_lo: BytePos) {
        let decl = Decl::Interface(InterfaceDecl {
            name: iface.id.sym.to_string(),
            type_params: type_param_names(iface.type_params.as_deref()),
            heritage: Vec::new(),
            member_count: iface.body.body.len(),
        });
        let id = self.push(parent, decl, iface.span, doc_lo);

        if !iface.extends.is_empty() {
            let types = iface
                .extends
                .iter()
                .map(|extended| self.lower_heritage_type(id, extended))
                .collect();
            self.set_heritage(
                id,
                vec![HeritageClause {
                    kind: HeritageKind::Extends,
                    types,
                }],
            );
        }

        self.lower_type_elements(id, &iface.body.body);
    }

    fn lower_heritage_type(&mut self, owner: NodeId, ty: &ast::TsExprWithTypeArgs) -> TypeExpr {
        let args = ty
            .type_args
            .as_deref()
            .map(|args| self.lower_type_args(owner, args))
            .unwrap_or_default();
        TypeExpr::Reference {
            name: self.snippet(ty.expr.span()),
            args,
        }
    }

    fn lower_type_args(
        &mut self,
        owner: NodeId,
        args: &ast::TsTypeParamInstantiation,
    ) -> Vec<TypeExpr> {
        args.params
            .iter()
            .map(|arg| self.lower_type(owner, arg))
            .collect()
    }

    fn lower_type_elements(&mut self, parent: NodeId, elements: &[ast::TsTypeElement]) {
        for element in elements {
            match element {
                ast::TsTypeElement::TsPropertySignature(prop) => {
                    let decl = Decl::Property(VariableDecl {
                        name: self.key_name(&prop.key),
                        optional: prop.optional,
                        ..Default::default()
                    });
                    let id = self.push(parent, decl, prop.span, prop.span.lo);
                    if let Some(ann) = prop.type_ann.as_deref() {
                        let ty = self.lower_type(id, &ann.type_ann);
                        self.set_type(id, ty);
                    }
                }
                ast::TsTypeElement::TsMethodSignature(method) => {
                    let decl = Decl::Method(SignatureDecl {
                        name: Some(self.key_name(&method.key)),
                        type_params: type_param_names(method.type_params.as_deref()),
                        ..Default::default()
                    });
                    let id = self.push(parent, decl, method.span, method.span.lo);
                    self.lower_fn_params(id, &method.params);
                    if let Some(ann) = method.type_ann.as_deref() {
                        let ty = self.lower_type(id, &ann.type_ann);
                        self.set_type(id, ty);
                    }
                }
                ast::TsTypeElement::TsCallSignatureDecl(call) => {
                    let decl = Decl::CallSignature(SignatureDecl {
                        type_params: type_param_names(call.type_params.as_deref()),
                        ..Default::default()
                    });
                    let id = self.push(parent, decl, call.span, call.span.lo);
                    self.lower_fn_params(id, &call.params);
                    if let Some(ann) = call.type_ann.as_deref() {
                        let ty = self.lower_type(id, &ann.type_ann);
                        self.set_type(id, ty);
                    }
                }
                ast::TsTypeElement::TsConstructSignatureDecl(ctor) => {
                    let decl = Decl::ConstructSignature(SignatureDecl {
                        type_params: type_param_names(ctor.type_params.as_deref()),
                        ..Default::default()
                    });
                    let id = self.push(parent, decl, ctor.span, ctor.span.lo);
                    self.lower_fn_params(id, &ctor.params);
                    if let Some(ann) = ctor.type_ann.as_deref() {
                        let ty = self.lower_type(id, &ann.type_ann);
                        self.set_type(id, ty);
                    }
                }
                ast::TsTypeElement::TsGetterSignature(getter) => {
                    let decl = Decl::Accessor(AccessorDecl {
                        name: self.key_name(&getter.key),
                        setter: false,
                    });
                    self.push(parent, decl, getter.span, getter.span.lo);
                }
                ast::TsTypeElement::TsSetterSignature(setter) => {
                    let decl = Decl::Accessor(AccessorDecl {
                        name: self.key_name(&setter.key),
                        setter: true,
                    });
                    self.push(parent, decl, setter.span, setter.span.lo);
                }
                _ => {}
            }
        }
    }

    fn lower_enum(&mut self, parent: NodeId, en: &ast::TsEnumDecl, doc_lo: BytePos) {
        let members = en
            .members
            .iter()
            .map(|member| EnumMember {
                name: unquote(&self.snippet(member.id.span())),
                initializer: member.init.as_deref().map(|e| self.initializer(e)),
            })
            .collect();
        let decl = Decl::Enum(EnumDecl {
            name: en.id.sym.to_string(),
            members,
            modifiers: Modifiers::default(),
        });
        self.push(parent, decl, en.span, doc_lo);
    }

    fn lower_module_decl(&mut self, parent: NodeId, module: &ast::TsModuleDecl, doc_lo: BytePos) {
        // `declare global { }` augments the global scope rather than declaring a module.
        if module.global {
            return;
        }

        let external = matches!(module.id, ast::TsModuleName::Str(_));
        let decl = Decl::Module(ModuleDecl {
            name: unquote(&self.snippet(module.id.span())),
            external,
        });
        let id = self.push(parent, decl, module.span, doc_lo);
        if let Some(body) = &module.body {
            self.lower_namespace_body(id, body);
        }
    }

    fn lower_namespace_body(&mut self, parent: NodeId, body: &ast::TsNamespaceBody) {
        match body {
            ast::TsNamespaceBody::TsModuleBlock(block) => self.lower_items(parent, &block.body),
            ast::TsNamespaceBody::TsNamespaceDecl(nested) => {
                let decl = Decl::Module(ModuleDecl {
                    name: nested.id.sym.to_string(),
                    external: false,
                });
                let id = self.push(parent, decl, nested.span, nested.span.lo);
                self.lower_namespace_body(id, &nested.body);
            }
        }
    }

    fn lower_type(&mut self, owner: NodeId, ty: &ast::TsType) -> TypeExpr {
        match ty {
            ast::TsType::TsKeywordType(_) | ast::TsType::TsThisType(_) | ast::TsType::TsLitType(_) => {
                TypeExpr::Intrinsic(self.snippet(ty.span()))
            }
            ast::TsType::TsTypeRef(reference) => {
                let args = reference
                    .type_params
                    .as_deref()
                    .map(|args| self.lower_type_args(owner, args))
                    .unwrap_or_default();
                TypeExpr::Reference {
                    name: self.snippet(reference.type_name.span()),
                    args,
                }
            }
            ast::TsType::TsArrayType(array) => {
                TypeExpr::Array(Box::new(self.lower_type(owner, &array.elem_type)))
            }
            ast::TsType::TsUnionOrIntersectionType(ast::TsUnionOrIntersectionType::TsUnionType(
                union,
            )) => TypeExpr::Union(
                union
                    .types
                    .iter()
                    .map(|member| self.lower_type(owner, member))
                    .collect(),
            ),
            ast::TsType::TsParenthesizedType(paren) => self.lower_type(owner, &paren.type_ann),
            ast::TsType::TsTypeQuery(_) => TypeExpr::Query(self.snippet(ty.span())),
            ast::TsType::TsTypeLit(literal) => {
                let id = self.push(owner, Decl::ObjectType, literal.span, literal.span.lo);
                self.lower_type_elements(id, &literal.members);
                TypeExpr::Object(id)
            }
            ast::TsType::TsFnOrConstructorType(func) => match func {
                ast::TsFnOrConstructorType::TsFnType(func) => self.lower_fn_type(
                    owner,
                    func.span,
                    &func.params,
                    func.type_params.as_deref(),
                    &func.type_ann,
                ),
                ast::TsFnOrConstructorType::TsConstructorType(ctor) => self.lower_fn_type(
                    owner,
                    ctor.span,
                    &ctor.params,
                    ctor.type_params.as_deref(),
                    &ctor.type_ann,
                ),
            },
            _ => TypeExpr::Other(self.snippet(ty.span())),
        }
    }

    fn lower_fn_type(
        &mut self,
        owner: NodeId,
        span: Span,
        params: &[ast::TsFnParam],
        type_params: Option<&ast::TsTypeParamDecl>,
        returns: &ast::TsTypeAnn,
    ) -> TypeExpr {
        let decl = Decl::FunctionType(SignatureDecl {
            type_params: type_param_names(type_params),
            ..Default::default()
        });
        let id = self.push(owner, decl, span, span.lo);
        self.lower_fn_params(id, params);
        let ty = self.lower_type(id, &returns.type_ann);
        self.set_type(id, ty);
        TypeExpr::Function(id)
    }
}

fn accessibility(value: ast::Accessibility) -> super::Accessibility {
    match value {
        ast::Accessibility::Public => super::Accessibility::Public,
        ast::Accessibility::Private => super::Accessibility::Private,
        ast::Accessibility::Protected => super::Accessibility::Protected,
    }
}
