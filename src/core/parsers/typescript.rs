use std::collections::HashMap;
use std::sync::Arc;

use swc_common::{
    BytePos, FileName, Globals, SourceMap,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::error::{DocError, DocResult};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Comments collected while parsing, detached from swc's `SingleThreadedComments`.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    /// Copy comments out of SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// Every comment, ordered by position.
    pub fn all_sorted(&self) -> Vec<&Comment> {
        let mut all: Vec<&Comment> = self
            .leading
            .values()
            .chain(self.trailing.values())
            .flatten()
            .collect();
        all.sort_by_key(|c| c.span.lo);
        all
    }
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

/// Picks the swc syntax for a file from its extension.
fn syntax_for(file_path: &str) -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: file_path.ends_with(".tsx"),
        dts: file_path.ends_with(".d.ts"),
        decorators: true,
        ..Default::default()
    })
}

/// Parse TypeScript source code (`.ts`, `.tsx`, `.d.ts`) into an AST.
pub fn parse_typescript_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> DocResult<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let parse_error = |e: swc_ecma_parser::error::Error| DocError::Parse {
            file: file_path.to_string(),
            message: format!("{:?}", e.kind()),
        };
        let module = parser.parse_module().map_err(parse_error)?;
        if let Some(recovered) = parser.take_errors().into_iter().next() {
            return Err(parse_error(recovered));
        }

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source_map,
            comments: extracted_comments,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str, path: &str) -> DocResult<ParsedSource> {
        parse_typescript_source(code.to_string(), path, Arc::new(SourceMap::default()))
    }

    #[test]
    fn test_parse_keeps_doc_comments() {
        let parsed = parse("/** Docs. */\nexport class A {}\n", "a.ts").unwrap();
        assert_eq!(parsed.module.body.len(), 1);

        let texts: Vec<String> = parsed
            .comments
            .all_sorted()
            .iter()
            .map(|c| c.text.to_string())
            .collect();
        assert_eq!(texts, vec!["* Docs. ".to_string()]);
    }

    #[test]
    fn test_parse_declaration_file() {
        let parsed = parse("declare function f(x: number): void;", "lib.d.ts");
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = parse("function (", "broken.ts").err().unwrap();
        assert!(matches!(err, DocError::Parse { file, .. } if file == "broken.ts"));
    }
}
