//! Final normalization of resolved type names into the documentation syntax.
//!
//! `Foo<Bar>` becomes `Foo.<Bar>`, `T[]` becomes `Array.<T>`, a repeat marker
//! is kept outside the array wrapper (`...string[]` renders `...string`) and
//! `typeof` turns into an inline link. Text the small grammar below does not
//! understand (tuples, object literals, mapped types) is left as written.
//!
//! ```text
//! union   := postfix ("|" postfix)*
//! postfix := primary ("[" "]")*
//! primary := "(" union ")" | name ("<" union ("," union)* ">")?
//! ```

const REPEAT_MARKER: &str = "...";
const ARRAY_OPEN: &str = "Array.<";

/// Normalizes one resolved type name.
pub fn format_type(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "any".to_string();
    }

    if let Some(rest) = text.strip_prefix(REPEAT_MARKER) {
        let inner = format_type(rest);
        let element = inner
            .strip_prefix(ARRAY_OPEN)
            .and_then(|s| s.strip_suffix('>'))
            .filter(|s| balanced(s))
            .unwrap_or(&inner);
        return format!("{}{}", REPEAT_MARKER, element);
    }

    let normalized = match parse(text) {
        Some(ty) => ty.render(),
        None => text.to_string(),
    };
    normalized.replace("typeof ", "@link ")
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[derive(Debug, PartialEq)]
enum Shape {
    Named { name: String, args: Vec<Shape> },
    Array(Box<Shape>),
    Union(Vec<Shape>),
    Paren(Box<Shape>),
}

impl Shape {
    fn render(&self) -> String {
        match self {
            Shape::Named { name, args } if args.is_empty() => name.clone(),
            Shape::Named { name, args } => format!("{}.<{}>", name, render_all(args, ", ")),
            Shape::Array(element) => match element.as_ref() {
                Shape::Paren(inner) => format!("{}{}>", ARRAY_OPEN, inner.render()),
                other => format!("{}{}>", ARRAY_OPEN, other.render()),
            },
            Shape::Union(members) => render_all(members, " | "),
            Shape::Paren(inner) => format!("({})", inner.render()),
        }
    }
}

fn render_all(shapes: &[Shape], separator: &str) -> String {
    shapes
        .iter()
        .map(Shape::render)
        .collect::<Vec<_>>()
        .join(separator)
}

fn parse(text: &str) -> Option<Shape> {
    let mut parser = Parser { text, pos: 0 };
    let shape = parser.union()?;
    parser.skip_whitespace();
    (parser.pos == text.len()).then_some(shape)
}

struct Parser<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Parser<'t> {
    fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len_utf8();
            true
        } else {
            false
        }
    }

    fn union(&mut self) -> Option<Shape> {
        let mut members = vec![self.postfix()?];
        while self.eat('|') {
            members.push(self.postfix()?);
        }
        Some(if members.len() == 1 {
            members.remove(0)
        } else {
            Shape::Union(members)
        })
    }

    fn postfix(&mut self) -> Option<Shape> {
        let mut shape = self.primary()?;
        loop {
            self.skip_whitespace();
            if !self.rest().starts_with('[') {
                break;
            }
            self.pos += 1;
            if !self.eat(']') {
                return None;
            }
            shape = Shape::Array(Box::new(shape));
        }
        Some(shape)
    }

    fn primary(&mut self) -> Option<Shape> {
        if self.eat('(') {
            let inner = self.union()?;
            return self.eat(')').then(|| Shape::Paren(Box::new(inner)));
        }

        self.skip_whitespace();
        let len = self
            .rest()
            .find(|c| matches!(c, '<' | '>' | ',' | '|' | '(' | ')' | '[' | ']' | '{' | '}'))
            .unwrap_or(self.rest().len());
        let raw = self.rest()[..len].trim_end();
        if raw.is_empty() {
            return None;
        }
        self.pos += len;

        let mut args = Vec::new();
        if self.eat('<') {
            args.push(self.union()?);
            while self.eat(',') {
                args.push(self.union()?);
            }
            if !self.eat('>') {
                return None;
            }
        }

        // `Foo.<Bar>` is the already normalized spelling of `Foo<Bar>`.
        let name = raw.strip_suffix('.').unwrap_or(raw).to_string();
        Some(Shape::Named { name, args })
    }
}
