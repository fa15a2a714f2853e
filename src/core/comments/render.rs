//! Doc-tree rendering to markdown-flavoured strings.

use super::tsdoc::{DocLink, DocNode, LinkDestination};

/// Render a doc node to a string.
///
/// Returns `None` for nodes without renderable content, so callers can tell an
/// undocumented member from an empty string.
pub fn render(node: &DocNode) -> Option<String> {
    match node {
        DocNode::Section(children) | DocNode::Paragraph(children) => render_container(children),
        DocNode::PlainText(text) => non_empty(text.trim().to_string()),
        DocNode::CodeSpan(code) => Some(format!("`{}`", code)),
        DocNode::FencedCode { language, code } => Some(format!("```{}\n{}\n```", language, code)),
        DocNode::MemberIdentifier(identifier) => non_empty(identifier.clone()),
        DocNode::Link(link) => render_link(link),
    }
}

/// Render a node and drop the trailing paragraph separator.
///
/// This is the form stored in summaries, remarks and presets.
pub fn render_trimmed(node: &DocNode) -> Option<String> {
    render(node).and_then(|text| non_empty(text.trim_end().to_string()))
}

fn render_container(children: &[DocNode]) -> Option<String> {
    let parts: Vec<String> = children.iter().filter_map(render).collect();
    if parts.is_empty() {
        return None;
    }

    let mut text = parts.join("\n");
    // Keep blocks apart when rendered pieces are concatenated.
    if !text.ends_with("\n\n") {
        text.push_str(if text.ends_with('\n') { "\n" } else { "\n\n" });
    }
    Some(text)
}

fn render_link(link: &DocLink) -> Option<String> {
    match &link.destination {
        LinkDestination::Url(url) => {
            let text = link.text.as_deref().unwrap_or(url);
            Some(format!("[{}]({})", text, url))
        }
        LinkDestination::Declaration(reference) => {
            let inner = match &link.text {
                Some(text) => text.clone(),
                None => reference
                    .iter()
                    .filter_map(render)
                    .collect::<Vec<_>>()
                    .join("."),
            };
            non_empty(inner).map(|inner| format!("`{}`", inner))
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
