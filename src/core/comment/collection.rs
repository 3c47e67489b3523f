use std::collections::HashMap;
use std::ops::{Index, IndexMut};
use std::sync::LazyLock;

use regex::Regex;

use super::Comment;

static REPEATED_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Handle of one entry inside a [`CommentCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(usize);

/// Composite key identifying repeated declarations: the owner's canonical name
/// and the declaration's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariationKey {
    pub owner: Option<String>,
    pub name: String,
}

/// Ordered documentation entries of one file.
///
/// Lives for exactly one pass over a file. Besides the entries it holds the
/// overload/merge cache: the first sighting of a [`VariationKey`] is canonical,
/// later sightings are either numbered or merged into the canonical entry.
#[derive(Debug, Default)]
pub struct CommentCollection {
    entries: Vec<Comment>,
    variations: HashMap<VariationKey, u32>,
    merge_targets: HashMap<VariationKey, CommentId>,
}

impl CommentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a comment as a new entry.
    pub fn add(&mut self, comment: Comment) -> CommentId {
        self.entries.push(comment);
        CommentId(self.entries.len() - 1)
    }

    /// Registers a fresh, empty entry ("linked" comment).
    pub fn add_empty(&mut self) -> CommentId {
        self.add(Comment::default())
    }

    /// Copies an entry and registers the copy as a sibling entry.
    pub fn clone_entry(&mut self, id: CommentId) -> CommentId {
        let copy = self.entries[id.0].clone();
        self.add(copy)
    }

    pub fn get(&self, id: CommentId) -> &Comment {
        &self.entries[id.0]
    }

    pub fn get_mut(&mut self, id: CommentId) -> &mut Comment {
        &mut self.entries[id.0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.entries.iter()
    }

    /// First entry (in insertion order) carrying a `(kind, name)` tag, optionally
    /// constrained to entries whose `memberof` tag names `parent`.
    pub fn find(&self, kind: &str, name: &str, parent: Option<&str>) -> Option<CommentId> {
        self.entries
            .iter()
            .position(|comment| {
                comment.has_tag(kind, Some(name))
                    && parent.is_none_or(|p| comment.has_tag("memberof", Some(p)))
            })
            .map(CommentId)
    }

    /// Counts a sighting of `key`. Returns `None` the first time, then 2, 3, ...
    pub fn next_variation(&mut self, key: VariationKey) -> Option<u32> {
        match self.variations.get_mut(&key) {
            Some(count) => {
                *count += 1;
                Some(*count)
            }
            None => {
                self.variations.insert(key, 1);
                None
            }
        }
    }

    /// Registers `id` as canonical for `key`, or returns the entry registered earlier.
    pub fn merge_target(&mut self, key: VariationKey, id: CommentId) -> Option<CommentId> {
        match self.merge_targets.get(&key) {
            Some(&canonical) if canonical != id => Some(canonical),
            Some(_) => None,
            None => {
                self.merge_targets.insert(key, id);
                None
            }
        }
    }

    /// Merges entry `from` into entry `into` and empties `from`.
    pub fn merge_entries(&mut self, from: CommentId, into: CommentId) {
        if from == into {
            return;
        }
        let source = std::mem::take(&mut self.entries[from.0]);
        source.merge_into(&mut self.entries[into.0]);
    }

    /// Serializes every non-empty entry, separated by one blank line.
    pub fn serialize_all(&self) -> String {
        let joined = self
            .entries
            .iter()
            .filter(|comment| !comment.is_empty())
            .map(Comment::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");

        REPEATED_BLANK_LINES.replace_all(&joined, "\n\n").into_owned()
    }
}

impl Index<CommentId> for CommentCollection {
    type Output = Comment;

    fn index(&self, id: CommentId) -> &Comment {
        self.get(id)
    }
}

impl IndexMut<CommentId> for CommentCollection {
    fn index_mut(&mut self, id: CommentId) -> &mut Comment {
        self.get_mut(id)
    }
}
