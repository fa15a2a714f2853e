//! TSDoc comment parsing.
//!
//! Only a narrow tag vocabulary is understood, see [`Tag`]. Everything else in a
//! comment is either summary text or discarded.
//!
//! ```text
//! /**
//!  * Font size of the label.        <- summary
//!  *
//!  * @remarks Scales with the theme. <- remarks
//!  * @reactive                       <- modifier tag
//!  * @defaultValue `16px`            <- custom block
//!  */
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;

/// Inline syntax inside a line: code spans, link tags and other inline tags.
static INLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`([^`]+)`|\{@link(?:code|plain)?\s+([^}]*)\}|\{@[A-Za-z]+[^}]*\}").unwrap()
});

/// Standard TSDoc modifiers that are accepted and ignored.
const IGNORED_MODIFIERS: &[&str] = &[
    "public",
    "internal",
    "alpha",
    "beta",
    "experimental",
    "sealed",
    "virtual",
    "override",
    "readonly",
    "eventProperty",
    "packageDocumentation",
];

/// Recognized documentation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Modifier marking a member as reactive (`@reactive` by default).
    Reactive,
    /// Custom block with an alternate default-value description (`@default` by default).
    Default,
    Remarks,
    DefaultValue,
    Param,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSyntax {
    Modifier,
    Block,
}

impl Tag {
    pub fn syntax(self) -> TagSyntax {
        match self {
            Tag::Reactive => TagSyntax::Modifier,
            Tag::Default | Tag::Remarks | Tag::DefaultValue | Tag::Param => TagSyntax::Block,
        }
    }

    /// Whether the block carries a default value.
    pub fn is_default_value(self) -> bool {
        matches!(self, Tag::Default | Tag::DefaultValue)
    }
}

/// Immutable tag vocabulary, built once per index and shared by every parse.
#[derive(Debug, Clone)]
pub struct TsdocConfig {
    tags: HashMap<String, Tag>,
}

impl TsdocConfig {
    pub fn new(reactive_tag: &str, default_tag: &str) -> Self {
        let tags = [
            (reactive_tag, Tag::Reactive),
            (default_tag, Tag::Default),
            ("remarks", Tag::Remarks),
            ("defaultValue", Tag::DefaultValue),
            ("param", Tag::Param),
        ]
        .into_iter()
        .map(|(name, tag)| (name.to_string(), tag))
        .collect();

        Self { tags }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.reactive_tag, &config.default_tag)
    }

    pub fn lookup(&self, name: &str) -> Option<Tag> {
        self.tags.get(name).copied()
    }
}

impl Default for TsdocConfig {
    fn default() -> Self {
        Self::new("reactive", "default")
    }
}

/// Node of a parsed documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    /// Top-level content of one block (container).
    Section(Vec<DocNode>),
    /// Lines separated from other paragraphs by blank lines (container).
    Paragraph(Vec<DocNode>),
    PlainText(String),
    CodeSpan(String),
    FencedCode { language: String, code: String },
    Link(DocLink),
    /// Identifier of a declared member in a declaration reference.
    MemberIdentifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    pub destination: LinkDestination,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDestination {
    /// Externally resolvable URL.
    Url(String),
    /// Reference to another declaration, as [`DocNode::MemberIdentifier`] nodes.
    Declaration(Vec<DocNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomBlock {
    pub tag: Tag,
    pub content: DocNode,
}

/// Parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTree {
    pub summary: Option<DocNode>,
    pub remarks: Option<DocNode>,
    /// Custom and default-value blocks, in the order they appear.
    pub custom_blocks: Vec<CustomBlock>,
    pub modifier_tags: HashSet<Tag>,
    pub param_blocks: HashMap<String, DocNode>,
}

impl DocTree {
    /// The default-value block, the last of `@defaultValue`/custom default wins.
    pub fn default_value(&self) -> Option<&DocNode> {
        self.custom_blocks
            .iter()
            .rev()
            .find(|block| block.tag.is_default_value())
            .map(|block| &block.content)
    }

    pub fn has_modifier(&self, tag: Tag) -> bool {
        self.modifier_tags.contains(&tag)
    }

    pub fn param(&self, name: &str) -> Option<&DocNode> {
        self.param_blocks.get(name)
    }
}

/// Where the lines of the current block go.
enum Target {
    Summary,
    Block(Tag),
    Param(String),
    Discarded,
}

/// Parser for raw documentation comments.
pub struct CommentParser<'c> {
    config: &'c TsdocConfig,
}

impl<'c> CommentParser<'c> {
    pub fn new(config: &'c TsdocConfig) -> Self {
        Self { config }
    }

    /// Parse a raw comment body (the text between `/*` and `*/`).
    ///
    /// Absent or empty input gives an empty tree; this never fails.
    pub fn parse(&self, raw: Option<&str>) -> DocTree {
        let mut tree = DocTree::default();
        let Some(raw) = raw else {
            return tree;
        };

        let mut target = Target::Summary;
        let mut lines: Vec<String> = Vec::new();
        let mut in_fence = false;

        for line in comment_lines(raw) {
            if line.starts_with("```") {
                in_fence = !in_fence;
                lines.push(line);
                continue;
            }
            let tags = if in_fence { Vec::new() } else { tag_tokens(&line) };
            if tags.is_empty() {
                lines.push(line);
                continue;
            }

            let mut text = String::new();
            let mut pos = 0;
            for token in tags {
                if token.start < pos {
                    continue;
                }
                let before = &line[pos..token.start];
                let after = line[token.end..].trim_start();
                match self.config.lookup(token.name) {
                    Some(tag) if tag.syntax() == TagSyntax::Modifier => {
                        tree.modifier_tags.insert(tag);
                        text.push_str(before);
                    }
                    None if IGNORED_MODIFIERS.contains(&token.name) => {
                        text.push_str(before);
                    }
                    Some(tag) => {
                        text.push_str(before);
                        push_line(&mut lines, &text);
                        text.clear();
                        flush(&mut tree, target, std::mem::take(&mut lines));
                        if tag == Tag::Param {
                            let (param, rest) = split_param(after);
                            target = Target::Param(param);
                            pos = line.len() - rest.len();
                            continue;
                        }
                        target = Target::Block(tag);
                    }
                    // Unknown tags only open a block at the start of a line.
                    None if token.start == 0 => {
                        flush(&mut tree, target, std::mem::take(&mut lines));
                        target = Target::Discarded;
                    }
                    None => {
                        text.push_str(&line[pos..token.end]);
                        pos = token.end;
                        continue;
                    }
                }
                pos = line.len() - after.len();
            }
            text.push_str(&line[pos..]);
            push_line(&mut lines, &text);
        }

        flush(&mut tree, target, lines);
        tree
    }
}

/// Comment lines with the leading `*` decoration removed.
fn comment_lines(raw: &str) -> impl Iterator<Item = String> + '_ {
    let body = raw.strip_prefix('*').unwrap_or(raw);
    body.lines().map(|line| {
        let line = line.trim_start();
        let line = line.strip_prefix('*').unwrap_or(line);
        let line = line.strip_prefix(' ').unwrap_or(line);
        line.trim_end().to_string()
    })
}

/// A `@name` tag found in a comment line, with its byte range.
struct TagToken<'l> {
    name: &'l str,
    start: usize,
    end: usize,
}

/// Tags in one line: `@name` at the line start or after whitespace.
///
/// Code spans and inline tags (`{@link ...}`) are skipped.
fn tag_tokens(line: &str) -> Vec<TagToken<'_>> {
    let mut tokens = Vec::new();
    let mut in_code = false;
    let mut braces = 0usize;
    let mut prev: Option<char> = None;

    for (idx, c) in line.char_indices() {
        match c {
            '`' => in_code = !in_code,
            '{' if !in_code => braces += 1,
            '}' if !in_code => braces = braces.saturating_sub(1),
            '@' if !in_code && braces == 0 && prev.is_none_or(char::is_whitespace) => {
                let body = &line[idx + 1..];
                let len = body
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
                    .unwrap_or(body.len());
                if len > 0 {
                    tokens.push(TagToken {
                        name: &body[..len],
                        start: idx,
                        end: idx + 1 + len,
                    });
                }
            }
            _ => {}
        }
        prev = Some(c);
    }

    tokens
}

fn push_line(lines: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(text.to_string());
    }
}

/// Split `@param` content into the parameter name and its description.
///
/// Accepts `name - text`, `name text`, `{Type} name text` and `[name=default] text`.
fn split_param(text: &str) -> (String, &str) {
    let mut text = text.trim_start();
    if text.starts_with('{')
        && let Some(end) = text.find('}')
    {
        text = text[end + 1..].trim_start();
    }

    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    let (raw_name, rest) = text.split_at(end);
    let name = raw_name
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split('=')
        .next()
        .unwrap_or_default()
        .to_string();

    let rest = rest.trim_start();
    let rest = rest.strip_prefix('-').map(str::trim_start).unwrap_or(rest);
    (name, rest)
}

fn flush(tree: &mut DocTree, target: Target, lines: Vec<String>) {
    let content = section(&lines);
    match target {
        Target::Summary => {
            if let DocNode::Section(children) = &content
                && !children.is_empty()
            {
                tree.summary = Some(content);
            }
        }
        Target::Block(Tag::Remarks) => tree.remarks = Some(content),
        Target::Block(tag) => tree.custom_blocks.push(CustomBlock { tag, content }),
        Target::Param(name) => {
            if !name.is_empty() {
                tree.param_blocks.entry(name).or_insert(content);
            }
        }
        Target::Discarded => {}
    }
}

/// Build a section: paragraphs split on blank lines, fenced code kept verbatim.
fn section(lines: &[String]) -> DocNode {
    let mut children = Vec::new();
    let mut paragraph: Vec<DocNode> = Vec::new();
    let mut fence: Option<(String, Vec<&str>)> = None;

    for line in lines {
        if let Some((language, code)) = fence.as_mut() {
            if line.starts_with("```") {
                children.push(DocNode::FencedCode {
                    language: std::mem::take(language),
                    code: code.join("\n"),
                });
                fence = None;
            } else {
                code.push(line);
            }
            continue;
        }

        if let Some(language) = line.strip_prefix("```") {
            end_paragraph(&mut children, &mut paragraph);
            fence = Some((language.trim().to_string(), Vec::new()));
        } else if line.trim().is_empty() {
            end_paragraph(&mut children, &mut paragraph);
        } else {
            paragraph.extend(inline_nodes(line));
        }
    }

    // Unterminated fence: keep what was written.
    if let Some((language, code)) = fence {
        children.push(DocNode::FencedCode {
            language,
            code: code.join("\n"),
        });
    }
    end_paragraph(&mut children, &mut paragraph);

    DocNode::Section(children)
}

fn end_paragraph(children: &mut Vec<DocNode>, paragraph: &mut Vec<DocNode>) {
    if !paragraph.is_empty() {
        children.push(DocNode::Paragraph(std::mem::take(paragraph)));
    }
}

/// Split one line into plain text, code spans and links.
fn inline_nodes(line: &str) -> Vec<DocNode> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in INLINE_REGEX.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_text(&mut nodes, &line[last..whole.start()]);
        last = whole.end();

        if let Some(code) = caps.get(1) {
            nodes.push(DocNode::CodeSpan(code.as_str().to_string()));
        } else if let Some(body) = caps.get(2) {
            nodes.push(DocNode::Link(parse_link(body.as_str())));
        }
    }
    push_text(&mut nodes, &line[last..]);

    nodes
}

fn push_text(nodes: &mut Vec<DocNode>, text: &str) {
    if !text.trim().is_empty() {
        nodes.push(DocNode::PlainText(text.to_string()));
    }
}

/// Parse the body of `{@link ...}`: `dest | text`, `url text` or `dest`.
fn parse_link(body: &str) -> DocLink {
    let body = body.trim();
    let (dest, text) = match body.split_once('|') {
        Some((dest, text)) => (dest.trim(), text.trim()),
        None => match body.split_once(char::is_whitespace) {
            Some((dest, text)) => (dest, text.trim()),
            None => (body, ""),
        },
    };
    let text = (!text.is_empty()).then(|| text.to_string());

    let destination = if dest.contains("://") || dest.starts_with("mailto:") {
        LinkDestination::Url(dest.to_string())
    } else {
        // `package#Member.member`: the package part is not a member.
        let reference = dest.rsplit_once('#').map_or(dest, |(_, member)| member);
        LinkDestination::Declaration(
            reference
                .split('.')
                .filter(|part| !part.is_empty())
                .map(|part| DocNode::MemberIdentifier(part.to_string()))
                .collect(),
        )
    };

    DocLink { destination, text }
}
