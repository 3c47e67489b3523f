use std::fmt;

/// One structured line of a documentation comment: `@kind {type} name description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag keyword without the leading `@` (e.g. `param`, `memberof`). Never empty.
    pub kind: String,
    pub name: Option<String>,
    pub ty: Option<String>,
    pub description: Option<String>,
}

impl Tag {
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        debug_assert!(!kind.is_empty(), "tag kind must not be empty");
        Self {
            kind,
            name: None,
            ty: None,
            description: None,
        }
    }

    pub fn named(kind: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            ..Self::new(kind)
        }
    }

    /// Whether this tag answers a lookup by `(kind, name)`.
    ///
    /// A lookup without a name matches any tag of that kind.
    pub fn matches(&self, kind: &str, name: Option<&str>) -> bool {
        self.kind == kind && name.is_none_or(|name| self.name.as_deref() == Some(name))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " * @{}", self.kind)?;

        if let Some(ty) = self.ty.as_deref() {
            write!(f, " {{{}}}", ty)?;
        }
        if let Some(name) = present(&self.name) {
            write!(f, " {}", name)?;
        }
        if let Some(desc) = present(&self.description) {
            let mut lines = desc.lines();
            if let Some(first) = lines.next().map(str::trim)
                && !first.is_empty()
            {
                write!(f, " {}", first)?;
            }
            for line in lines {
                write_continuation(f, line)?;
            }
        }

        Ok(())
    }
}

/// Writes one continuation line of a multi-line block, keeping blank lines as a bare ` *`.
pub(super) fn write_continuation(f: &mut fmt::Formatter<'_>, line: &str) -> fmt::Result {
    let line = line.trim_end();
    if line.is_empty() {
        write!(f, "\n *")
    } else {
        write!(f, "\n * {}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_full_tag() {
        let tag = Tag {
            kind: "param".to_string(),
            name: Some("x".to_string()),
            ty: Some("number".to_string()),
            description: Some("the value".to_string()),
        };
        assert_eq!(tag.to_string(), " * @param {number} x the value");
    }

    #[test]
    fn test_display_omits_absent_fields() {
        assert_eq!(Tag::new("instance").to_string(), " * @instance");
        assert_eq!(
            Tag::named("memberof", Some("Foo")).to_string(),
            " * @memberof Foo"
        );
    }

    #[test]
    fn test_display_multiline_description() {
        let mut tag = Tag::named("returns", None);
        tag.ty = Some("string".to_string());
        tag.description = Some("first\n\nsecond".to_string());
        assert_eq!(tag.to_string(), " * @returns {string} first\n *\n * second");
    }

    #[test]
    fn test_display_trims_leading_description_space() {
        let mut tag = Tag::named("param", Some("x"));
        tag.description = Some("   indented\n  continued".to_string());
        let text = tag.to_string();
        assert_eq!(text, " * @param x indented\n *   continued");

        let reparsed = crate::core::comment::Comment::parse_from_text(&format!("/**\n{}\n */", text));
        assert_eq!(reparsed.tags[0].to_string(), text);
    }

    #[test]
    fn test_matches_without_name() {
        let tag = Tag::named("member", Some("count"));
        assert!(tag.matches("member", None));
        assert!(tag.matches("member", Some("count")));
        assert!(!tag.matches("member", Some("other")));
        assert!(!tag.matches("property", None));
    }
}
