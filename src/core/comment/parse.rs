//! Reading hand-written documentation blocks.
//!
//! The grammar is line based: text before the first line starting with `@` is
//! the description; every `@kind {type} name rest` line opens a tag whose
//! description continues on the following lines until the next tag. Blank lines
//! inside a tag description are kept and do not end the tag. Tag types may
//! contain balanced nested braces (`{{a: number}}`, `{@link Foo}`).

use super::{Comment, Tag};

const BLOCK_OPEN: &str = "/**";
const BLOCK_CLOSE: &str = "*/";

impl Comment {
    /// Parses the first `/** ... */` block found in `raw`.
    ///
    /// Input without such a block yields an empty comment; this never fails.
    pub fn parse_from_text(raw: &str) -> Comment {
        let Some(content) = block_content(raw) else {
            return Comment::default();
        };

        let lines: Vec<&str> = content
            .lines()
            .map(strip_margin)
            .flat_map(split_inline_tags)
            .collect();
        let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);

        let mut comment = Comment::default();
        let mut description: Vec<&str> = Vec::new();
        let mut current: Option<(Tag, Vec<&str>)> = None;

        for line in &lines[start..end] {
            if let Some(header) = tag_header(line) {
                if let Some((tag, desc)) = current.take() {
                    comment.tags.push(finish_tag(tag, desc));
                }
                current = Some(parse_tag_line(header));
                continue;
            }

            match current.as_mut() {
                Some((_, desc)) => desc.push(line),
                None => description.push(line),
            }
        }

        if let Some((tag, desc)) = current.take() {
            comment.tags.push(finish_tag(tag, desc));
        }

        let description = description.join("\n");
        let description = description.trim();
        if !description.is_empty() {
            comment.description = Some(description.to_string());
        }

        comment
    }
}

fn block_content(raw: &str) -> Option<&str> {
    let open = raw.find(BLOCK_OPEN)?;
    let body = &raw[open + BLOCK_OPEN.len()..];
    let close = body.find(BLOCK_CLOSE)?;
    let content = &body[..close];
    (!content.trim().is_empty()).then_some(content)
}

/// Removes the ` * ` gutter of a comment line and trailing whitespace.
fn strip_margin(line: &str) -> &str {
    let trimmed = line.trim_start();
    let without_star = match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    };
    without_star.trim_end()
}

/// Splits a line before every `@tag` that follows whitespace outside braces,
/// so `Adds a job. @param job the job` yields the description and one tag line.
fn split_inline_tags(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = ' ';

    for (idx, c) in line.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '@' if depth == 0 && idx > start && prev.is_whitespace() => {
                let opens_tag = line[idx + 1..].chars().next().is_some_and(char::is_alphabetic);
                if opens_tag {
                    parts.push(line[start..idx].trim_end());
                    start = idx;
                }
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&line[start..]);
    parts
}

/// Returns the text after `@` when the line opens a tag.
fn tag_header(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('@')?;
    rest.chars()
        .next()
        .is_some_and(|c| !c.is_whitespace())
        .then_some(rest)
}

fn parse_tag_line(header: &str) -> (Tag, Vec<&str>) {
    let kind_end = header.find(char::is_whitespace).unwrap_or(header.len());
    let mut tag = Tag::new(&header[..kind_end]);
    let mut rest = header[kind_end..].trim_start();

    if rest.starts_with('{')
        && let Some(close) = matching_brace(rest)
    {
        tag.ty = Some(rest[1..close].to_string());
        rest = rest[close + 1..].trim_start();
    }

    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    if name_end > 0 {
        tag.name = Some(rest[..name_end].to_string());
    }

    let first_desc_line = rest[name_end..].trim();
    (tag, vec![first_desc_line])
}

/// Byte index of the `}` closing the `{` at the start of `text`.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn finish_tag(mut tag: Tag, lines: Vec<&str>) -> Tag {
    let joined = lines.join("\n");
    let desc = joined.trim_end();
    if !desc.trim().is_empty() {
        tag.description = Some(desc.to_string());
    }
    tag
}
