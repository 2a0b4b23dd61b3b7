//! Enumeration of searchable text nodes.

use finder_dom::{Document, NodeId};

/// Elements whose text is never searched.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Text nodes under `root` in document order, skipping non-content
/// elements, subtrees of elements carrying one of `skip_classes`, and
/// whitespace-only text.
pub fn searchable_text_nodes(doc: &Document, root: NodeId, skip_classes: &[String]) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = doc.children(root).iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        if let Some(text) = doc.text(node) {
            if !text.trim().is_empty() {
                out.push(node);
            }
            continue;
        }
        let Some(tag) = doc.tag_name(node) else {
            continue;
        };
        if SKIPPED_TAGS.contains(&tag) || skip_classes.iter().any(|c| doc.has_class(node, c)) {
            continue;
        }
        stack.extend(doc.children(node).iter().rev().copied());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_dom::parse_html;

    fn texts(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(|n| doc.text(*n).map(str::to_string))
            .collect()
    }

    #[test]
    fn walks_in_document_order() {
        let doc = parse_html("<p>one <b>two</b></p><div>three</div>").unwrap();
        let nodes = searchable_text_nodes(&doc, doc.body(), &[]);
        assert_eq!(texts(&doc, &nodes), vec!["one ", "two", "three"]);
    }

    #[test]
    fn skips_scripts_styles_and_templates() {
        let doc = parse_html(
            "<p>hit</p><script>var x = 'hit';</script><style>.hit{}</style>\
             <noscript>hit</noscript><template>hit</template>",
        )
        .unwrap();
        let nodes = searchable_text_nodes(&doc, doc.body(), &[]);
        assert_eq!(texts(&doc, &nodes), vec!["hit"]);
    }

    #[test]
    fn skips_whitespace_only_text() {
        let doc = parse_html("<div>\n  <p>x</p>\n</div>").unwrap();
        let nodes = searchable_text_nodes(&doc, doc.body(), &[]);
        assert_eq!(texts(&doc, &nodes), vec!["x"]);
    }

    #[test]
    fn skips_marked_subtrees() {
        let doc = parse_html(
            r#"<p>a <span class="tf-highlight">b</span> <span class="tf-hidden-indicator">3</span></p>"#,
        )
        .unwrap();
        let skip = vec!["tf-highlight".to_string(), "tf-hidden-indicator".to_string()];
        let nodes = searchable_text_nodes(&doc, doc.body(), &skip);
        assert_eq!(texts(&doc, &nodes), vec!["a "]);
    }
}
