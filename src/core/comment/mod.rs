//! In-memory documentation comments.
//!
//! A [`Comment`] is the description plus the ordered tags of one `/** ... */`
//! block. Comments of one file live in a [`CommentCollection`], which also keeps
//! the cache used to tell repeated declarations apart.
//!
//! ## Module Structure
//!
//! - `tag`: single tag lines
//! - `parse`: reading hand-written blocks back into the model
//! - `collection`: per-file ordered entries and the variation cache

mod collection;
mod parse;
mod tag;

use std::fmt;

pub use collection::{CommentCollection, CommentId, VariationKey};
pub use tag::Tag;

use tag::write_continuation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub description: Option<String>,
    pub tags: Vec<Tag>,
}

impl Comment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A comment with neither description nor tags. Empty comments are not serialized.
    pub fn is_empty(&self) -> bool {
        self.description.as_deref().is_none_or(|d| d.trim().is_empty()) && self.tags.is_empty()
    }

    fn position(&self, kind: &str, name: Option<&str>) -> Option<usize> {
        self.tags.iter().position(|tag| tag.matches(kind, name))
    }

    pub fn get_tag(&self, kind: &str, name: Option<&str>) -> Option<&Tag> {
        self.position(kind, name).map(|idx| &self.tags[idx])
    }

    pub fn has_tag(&self, kind: &str, name: Option<&str>) -> bool {
        self.position(kind, name).is_some()
    }

    /// Appends a new tag unconditionally.
    pub fn add_tag(&mut self, kind: &str, name: Option<&str>) -> &mut Tag {
        self.tags.push(Tag::named(kind, name));
        let last = self.tags.len() - 1;
        &mut self.tags[last]
    }

    /// Returns the first tag matching `(kind, name)`, creating it on a miss.
    ///
    /// Calling this repeatedly with the same arguments always yields the same tag.
    pub fn get_or_add_tag(&mut self, kind: &str, name: Option<&str>) -> &mut Tag {
        match self.position(kind, name) {
            Some(idx) => &mut self.tags[idx],
            None => self.add_tag(kind, name),
        }
    }

    /// Finds the `param` tag for `name`, accepting the decorated spellings a
    /// hand-written comment may use (`...name`, `[name]`, `[name=value]`,
    /// `[...name]`) before creating a new tag.
    pub fn get_param_tag(&mut self, name: &str, repeatable: bool, optional: bool) -> &mut Tag {
        let mut candidates = vec![name.to_string()];
        if repeatable && optional {
            candidates.push(format!("[...{}]", name));
        }
        if repeatable {
            candidates.push(format!("...{}", name));
        }
        if optional {
            candidates.push(format!("[{}]", name));
        }

        let defaulted = format!("[{}=", name);
        let found = candidates
            .iter()
            .find_map(|candidate| self.position("param", Some(candidate)))
            .or_else(|| {
                if !optional {
                    return None;
                }
                self.tags.iter().position(|tag| {
                    tag.kind == "param"
                        && tag.name.as_deref().is_some_and(|n| n.starts_with(&defaulted))
                })
            });

        match found {
            Some(idx) => &mut self.tags[idx],
            None => self.add_tag("param", Some(name)),
        }
    }

    /// Folds this comment into `other`: the description is appended after a blank
    /// line and tags are unioned by `(kind, name)`, overwriting type and
    /// description only where they differ.
    pub fn merge_into(&self, other: &mut Comment) {
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            other.description = Some(match other.description.take() {
                Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, desc),
                _ => desc.to_string(),
            });
        }

        for tag in &self.tags {
            let target = other.get_or_add_tag(&tag.kind, tag.name.as_deref());
            if tag.description.is_some() && tag.description != target.description {
                target.description = tag.description.clone();
            }
            if tag.ty.is_some() && tag.ty != target.ty {
                target.ty = tag.ty.clone();
            }
        }
    }

    /// Clears the description and all tags.
    pub fn mark_empty(&mut self) {
        self.description = None;
        self.tags.clear();
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        write!(f, "/**")?;
        if let Some(desc) = self.description.as_deref().map(str::trim) {
            for line in desc.lines() {
                write_continuation(f, line)?;
            }
        }
        for tag in &self.tags {
            write!(f, "\n{}", tag)?;
        }
        write!(f, "\n */")
    }
}
