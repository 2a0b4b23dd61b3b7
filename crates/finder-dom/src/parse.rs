//! Loading HTML into a [`Document`].
//!
//! Parsing is html5ever's (through `scraper`), so tree construction, implied
//! end tags and character references follow the HTML standard. This module
//! only copies the parsed tree into the arena: `html`, `head` and `body`
//! land on the document skeleton, comments, doctypes and processing
//! instructions are dropped, and adjacent text is merged. The copy uses an
//! explicit stack, so deeply nested markup cannot overflow.

use scraper::node::Element as ParsedElement;
use scraper::{Html, Node as ParsedNode};
use tracing::debug;

use finder_common::DomError;

use crate::document::Document;
use crate::node::NodeId;

/// Parse a document or fragment. Fragments end up in `body`.
pub fn parse_html(html: &str) -> Result<Document, DomError> {
    let parsed = Html::parse_document(html);
    if !parsed.errors.is_empty() {
        debug!(count = parsed.errors.len(), "html parsed with recoverable errors");
    }

    let mut doc = Document::new();
    let Some(html_element) = parsed
        .tree
        .root()
        .children()
        .find(|n| matches!(n.value(), ParsedNode::Element(e) if e.name() == "html"))
    else {
        return Ok(doc);
    };
    let root_element = doc.document_element();
    if let ParsedNode::Element(element) = html_element.value() {
        copy_attrs(&mut doc, root_element, element)?;
    }

    // (parent in the arena, parsed node), popped in document order.
    let mut pending = Vec::new();
    for child in html_element.children() {
        match child.value() {
            ParsedNode::Element(e) if matches!(e.name(), "head" | "body") => {
                let target = if e.name() == "head" { doc.head() } else { doc.body() };
                copy_attrs(&mut doc, target, e)?;
                pending.extend(child.children().map(|c| (target, c)));
            }
            // Whitespace between head and body stays out of the skeleton.
            ParsedNode::Text(_) => {}
            _ => pending.push((root_element, child)),
        }
    }
    pending.reverse();

    while let Some((parent, source)) = pending.pop() {
        match source.value() {
            ParsedNode::Text(text) => append_text(&mut doc, parent, text)?,
            ParsedNode::Element(element) => {
                let id = doc.create_element(element.name());
                doc.append_child(parent, id)?;
                copy_attrs(&mut doc, id, element)?;
                pending.extend(source.children().rev().map(|c| (id, c)));
            }
            _ => {}
        }
    }
    Ok(doc)
}

fn copy_attrs(doc: &mut Document, target: NodeId, source: &ParsedElement) -> Result<(), DomError> {
    for (name, value) in source.attrs() {
        doc.set_attribute(target, name, value)?;
    }
    Ok(())
}

fn append_text(doc: &mut Document, parent: NodeId, text: &str) -> Result<(), DomError> {
    if text.is_empty() {
        return Ok(());
    }
    if let Some(last) = doc.children(parent).last().copied() {
        if let Some(existing) = doc.text(last) {
            let merged = format!("{existing}{text}");
            return doc.set_text(last, &merged);
        }
    }
    let node = doc.create_text(text);
    doc.append_child(parent, node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(doc: &Document, parent: NodeId) -> Vec<String> {
        doc.element_children(parent)
            .filter_map(|c| doc.tag_name(c).map(str::to_string))
            .collect()
    }

    #[test]
    fn fragment_goes_into_body() {
        let doc = parse_html("<p>Hello <b>world</b></p>").unwrap();
        let body = doc.body();
        assert_eq!(tags(&doc, body), vec!["p"]);
        assert_eq!(doc.text_content(body), "Hello world");
    }

    #[test]
    fn full_document_maps_onto_skeleton() {
        let html = r#"<!DOCTYPE html>
<html lang="en">
  <head><title>T &amp; U</title><meta charset="utf-8"></head>
  <body class="page"><div id="main">x</div></body>
</html>"#;
        let doc = parse_html(html).unwrap();
        assert_eq!(doc.attribute(doc.document_element(), "lang"), Some("en"));
        assert_eq!(tags(&doc, doc.head()), vec!["title", "meta"]);
        assert_eq!(doc.text_content(doc.head()), "T & U");
        assert_eq!(doc.attribute(doc.body(), "class"), Some("page"));
        assert!(doc.element_by_id("main").is_some());
        assert_eq!(
            tags(&doc, doc.document_element()),
            vec!["head", "body"]
        );
    }

    #[test]
    fn comments_are_skipped_and_text_merged() {
        let doc = parse_html("<p>a<!-- hidden -->b</p>").unwrap();
        let p = doc.element_children(doc.body()).next().unwrap();
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "ab");
    }

    #[test]
    fn unclosed_comment_runs_to_the_end() {
        let doc = parse_html("<p>a<!-- oops <b>b</b>").unwrap();
        assert_eq!(doc.text_content(doc.body()), "a");
    }

    #[test]
    fn script_content_is_raw_text() {
        let doc = parse_html("<p>y</p><script>if (a < b) { x = '<p>'; }</script>").unwrap();
        let body = doc.body();
        assert_eq!(tags(&doc, body), vec!["p", "script"]);
        let script = doc.element_children(body).nth(1).unwrap();
        assert_eq!(doc.text_content(script), "if (a < b) { x = '<p>'; }");
    }

    #[test]
    fn leading_scripts_go_to_head() {
        let doc = parse_html("<script>x()</script><p>y</p>").unwrap();
        assert_eq!(tags(&doc, doc.head()), vec!["script"]);
        assert_eq!(tags(&doc, doc.body()), vec!["p"]);
    }

    #[test]
    fn void_and_self_closing_tags_do_not_nest() {
        let doc = parse_html(r#"<p>a<br>b<img src="x.png"/>c</p>"#).unwrap();
        let p = doc.element_children(doc.body()).next().unwrap();
        assert_eq!(tags(&doc, p), vec!["br", "img"]);
        assert_eq!(doc.text_content(p), "abc");
    }

    #[test]
    fn character_references_are_decoded() {
        let doc =
            parse_html(r#"<p title="&quot;q&quot;">a &lt;b&gt; &#65;&#x42; &bogus; & c</p>"#)
                .unwrap();
        let p = doc.element_children(doc.body()).next().unwrap();
        assert_eq!(doc.text_content(p), "a <b> AB &bogus; & c");
        assert_eq!(doc.attribute(p, "title"), Some("\"q\""));
    }

    #[test]
    fn attributes_keep_source_order_and_bare_names() {
        let doc = parse_html(r#"<details open class='x' data-target=#panel></details>"#).unwrap();
        let details = doc.element_children(doc.body()).next().unwrap();
        let attrs = doc.element(details).unwrap().attrs().to_vec();
        assert_eq!(
            attrs,
            vec![
                ("open".to_string(), String::new()),
                ("class".to_string(), "x".to_string()),
                ("data-target".to_string(), "#panel".to_string()),
            ]
        );
    }

    #[test]
    fn implied_end_tags_for_list_items_and_paragraphs() {
        let doc = parse_html("<ul><li>one<li>two</ul><p>a<div>b</div>").unwrap();
        let body = doc.body();
        assert_eq!(tags(&doc, body), vec!["ul", "p", "div"]);
        let ul = doc.element_children(body).next().unwrap();
        assert_eq!(tags(&doc, ul), vec!["li", "li"]);
    }

    #[test]
    fn tables_get_their_implied_body() {
        let doc = parse_html("<table><tr><td>cell</td></tr></table>").unwrap();
        let table = doc.element_children(doc.body()).next().unwrap();
        assert_eq!(tags(&doc, table), vec!["tbody"]);
        assert_eq!(doc.text_content(table), "cell");
    }

    #[test]
    fn stray_end_tags_are_ignored() {
        let doc = parse_html("<div>a</span>b</div>").unwrap();
        let div = doc.element_children(doc.body()).next().unwrap();
        assert_eq!(doc.children(div).len(), 1);
        assert_eq!(doc.text_content(div), "ab");
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let doc = parse_html("<p>1 < 2</p>").unwrap();
        assert_eq!(doc.text_content(doc.body()), "1 < 2");
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let depth = 2000;
        let html = format!("{}x{}", "<span>".repeat(depth), "</span>".repeat(depth));
        let doc = parse_html(&html).unwrap();
        assert_eq!(doc.text_content(doc.body()), "x");
    }
}
