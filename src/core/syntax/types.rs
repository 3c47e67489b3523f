use std::fmt;

use super::NodeId;

/// A type annotation as written in source.
///
/// Anonymous object and function types are tree nodes of their own (their
/// members and parameters are declarations), so they are referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Keyword, `this` and literal types (`number`, `"a"`, `42`).
    Intrinsic(String),
    /// Named type, possibly qualified (`NS.Foo`), with generic arguments.
    Reference { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    /// `typeof x`, kept verbatim.
    Query(String),
    /// Inline object type `{ a: number }`.
    Object(NodeId),
    /// Inline function or constructor type `(a: number) => void`.
    Function(NodeId),
    /// Anything else (intersections, tuples, mapped types...), kept verbatim.
    Other(String),
}

impl TypeExpr {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeExpr::Reference {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Whether this is an inline function type, i.e. the annotated shape takes parameters.
    pub fn takes_parameters(&self) -> bool {
        matches!(self, TypeExpr::Function(_))
    }

    /// Whether the annotation says no value is produced.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeExpr::Intrinsic(name) if name == "void" || name == "never")
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Intrinsic(text) | TypeExpr::Query(text) | TypeExpr::Other(text) => {
                write!(f, "{}", text)
            }
            TypeExpr::Reference { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            TypeExpr::Array(element) => match element.as_ref() {
                TypeExpr::Union(_) => write!(f, "({})[]", element),
                _ => write!(f, "{}[]", element),
            },
            TypeExpr::Union(members) => {
                let members: Vec<String> = members.iter().map(ToString::to_string).collect();
                write!(f, "{}", members.join(" | "))
            }
            TypeExpr::Object(_) => write!(f, "{{...}}"),
            TypeExpr::Function(_) => write!(f, "(...) => ..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ty = TypeExpr::Union(vec![
            TypeExpr::Array(Box::new(TypeExpr::Reference {
                name: "Map".to_string(),
                args: vec![
                    TypeExpr::Intrinsic("string".to_string()),
                    TypeExpr::reference("Foo"),
                ],
            })),
            TypeExpr::Intrinsic("null".to_string()),
        ]);
        assert_eq!(ty.to_string(), "Map<string, Foo>[] | null");

        let ty = TypeExpr::Array(Box::new(TypeExpr::Union(vec![
            TypeExpr::reference("A"),
            TypeExpr::reference("B"),
        ])));
        assert_eq!(ty.to_string(), "(A | B)[]");
    }

    #[test]
    fn test_is_void() {
        assert!(TypeExpr::Intrinsic("void".to_string()).is_void());
        assert!(TypeExpr::Intrinsic("never".to_string()).is_void());
        assert!(!TypeExpr::Intrinsic("number".to_string()).is_void());
        assert!(!TypeExpr::reference("Void").is_void());
    }
}
