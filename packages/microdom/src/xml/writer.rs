//! Serialize micro trees to XML text.
//!
//! Containers are written as their children. Namespace declarations are
//! emitted where an element or attribute needs a binding that is not in
//! scope; namespaced attributes without a known prefix get a generated
//! `ns{n}` prefix.

use tracing::debug;

use crate::config::{WriterSettings, XML_NS_URI};
use crate::document::MicroDocument;
use crate::element::MicroElement;
use crate::node::{DataAware, MicroNode};
use crate::parent::MicroParent;

/// Serialize a document.
///
/// # Example
/// ```
/// use microcommons_microdom::{xml, MicroDocument, MicroElement, MicroParent, WriterSettings};
///
/// let mut root = MicroElement::new("root");
/// root.append_element("child").set_attribute("a", "1 < 2");
/// let doc = MicroDocument::with_root(root);
///
/// let text = xml::write_document(&doc, &WriterSettings::compact());
/// assert_eq!(text, r#"<root><child a="1 &lt; 2"/></root>"#);
/// ```
pub fn write_document(document: &MicroDocument, settings: &WriterSettings) -> String {
    let mut writer = XmlWriter::new(settings);
    if settings.xml_declaration {
        writer.out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    }
    for (index, node) in spliced(document.children()).into_iter().enumerate() {
        if index > 0 || settings.xml_declaration {
            writer.out.push_str(&settings.newline);
        }
        writer.node(node, 0);
    }
    debug!(output_bytes = writer.out.len(), "Wrote XML document");
    writer.out
}

/// Serialize a single element and its subtree.
pub fn write_element(element: &MicroElement, settings: &WriterSettings) -> String {
    let mut writer = XmlWriter::new(settings);
    writer.element(element, 0);
    writer.out
}

/// Serialize any node.
pub fn write_node(node: &MicroNode, settings: &WriterSettings) -> String {
    let mut writer = XmlWriter::new(settings);
    writer.node(node, 0);
    writer.out
}

/// Children with containers replaced by their own children.
fn spliced(children: &[MicroNode]) -> Vec<&MicroNode> {
    let mut out = Vec::with_capacity(children.len());
    collect_spliced(children, &mut out);
    out
}

fn collect_spliced<'a>(children: &'a [MicroNode], out: &mut Vec<&'a MicroNode>) {
    for child in children {
        match child {
            MicroNode::Container(container) => collect_spliced(container.children(), out),
            other => out.push(other),
        }
    }
}

struct XmlWriter<'s> {
    settings: &'s WriterSettings,
    out: String,
    /// Namespace bindings per open element: `(prefix, uri)`, `""` prefix is
    /// the default namespace.
    scopes: Vec<Vec<(String, String)>>,
    generated_prefixes: usize,
}

impl<'s> XmlWriter<'s> {
    fn new(settings: &'s WriterSettings) -> Self {
        Self {
            settings,
            out: String::new(),
            scopes: Vec::new(),
            generated_prefixes: 0,
        }
    }

    fn node(&mut self, node: &MicroNode, depth: usize) {
        match node {
            MicroNode::Element(element) => self.element(element, depth),
            MicroNode::Text(text) => escape_text(text.data(), &mut self.out),
            MicroNode::CData(cdata) => {
                self.out.push_str("<![CDATA[");
                self.out.push_str(&cdata.data().replace("]]>", "]]]]><![CDATA[>"));
                self.out.push_str("]]>");
            }
            MicroNode::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(&comment_text(comment.data()));
                self.out.push_str("-->");
            }
            MicroNode::ProcessingInstruction(pi) => {
                self.out.push_str("<?");
                self.out.push_str(pi.target());
                if let Some(data) = pi.data() {
                    self.out.push(' ');
                    self.out.push_str(&data.replace("?>", "? >"));
                }
                self.out.push_str("?>");
            }
            MicroNode::Container(container) => {
                for child in spliced(container.children()) {
                    self.node(child, depth);
                }
            }
        }
    }

    fn element(&mut self, element: &MicroElement, depth: usize) {
        self.scopes.push(Vec::new());

        let prefix = element.prefix().unwrap_or_default();
        let uri = element.namespace_uri().unwrap_or_default();
        let needs_binding = prefix != "xml" && (prefix.is_empty() || !uri.is_empty());
        if needs_binding && self.lookup_uri(prefix) != uri {
            self.bind(prefix, uri);
        }

        let attributes: Vec<(String, &str)> = element
            .attributes()
            .iter()
            .map(|(name, value)| {
                let qualified = match name.namespace_uri() {
                    None => name.local_name().to_string(),
                    Some(XML_NS_URI) => format!("xml:{}", name.local_name()),
                    Some(ns) => format!("{}:{}", self.attribute_prefix(ns), name.local_name()),
                };
                (qualified, value)
            })
            .collect();

        self.out.push('<');
        self.out.push_str(element.tag_name());
        let declarations = self.scopes.last().cloned().unwrap_or_default();
        for (prefix, uri) in &declarations {
            self.out.push_str(" xmlns");
            if !prefix.is_empty() {
                self.out.push(':');
                self.out.push_str(prefix);
            }
            self.out.push_str("=\"");
            escape_attribute(uri, &mut self.out);
            self.out.push('"');
        }
        for (name, value) in &attributes {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            escape_attribute(value, &mut self.out);
            self.out.push('"');
        }

        let mut children = spliced(element.children());
        let indent = self.settings.is_indenting() && !has_character_data(&children);
        if indent {
            // Replaced by the writer's own line breaks
            children.retain(|node| !is_ignorable_whitespace(node));
        }
        if children.is_empty() && self.settings.self_closing_empty {
            self.out.push_str("/>");
        } else {
            self.out.push('>');
            for child in &children {
                if indent {
                    self.line_break(depth + 1);
                }
                self.node(child, depth + 1);
            }
            if indent && !children.is_empty() {
                self.line_break(depth);
            }
            self.out.push_str("</");
            self.out.push_str(element.tag_name());
            self.out.push('>');
        }

        self.scopes.pop();
    }

    fn line_break(&mut self, depth: usize) {
        self.out.push_str(&self.settings.newline);
        for _ in 0..depth {
            self.out.push_str(&self.settings.indent);
        }
    }

    /// URI bound to `prefix` in the current scope, `""` when unbound.
    fn lookup_uri(&self, prefix: &str) -> &str {
        self.scopes
            .iter()
            .rev()
            .flatten()
            .find(|(p, _)| p == prefix)
            .map_or("", |(_, uri)| uri.as_str())
    }

    /// A non-default prefix bound to `uri` that is not shadowed.
    fn lookup_prefix(&self, uri: &str) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .flatten()
            .find(|(p, u)| !p.is_empty() && u == uri && self.lookup_uri(p) == uri)
            .map(|(p, _)| p.clone())
    }

    fn attribute_prefix(&mut self, uri: &str) -> String {
        if let Some(prefix) = self.lookup_prefix(uri) {
            return prefix;
        }
        let prefix = loop {
            self.generated_prefixes += 1;
            let candidate = format!("ns{}", self.generated_prefixes);
            if self.lookup_uri(&candidate).is_empty() {
                break candidate;
            }
        };
        self.bind(&prefix, uri);
        prefix
    }

    fn bind(&mut self, prefix: &str, uri: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push((prefix.to_string(), uri.to_string()));
        }
    }
}

fn is_ignorable_whitespace(node: &MicroNode) -> bool {
    matches!(node, MicroNode::Text(text) if text.is_ignorable_whitespace())
}

fn has_character_data(children: &[&MicroNode]) -> bool {
    children.iter().any(|node| match node {
        MicroNode::Text(text) => !text.is_ignorable_whitespace(),
        MicroNode::CData(_) => true,
        _ => false,
    })
}

/// Comment data that cannot close the comment early: no `--` and no
/// trailing `-`.
fn comment_text(data: &str) -> String {
    let mut text = data.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    if text.ends_with('-') {
        text.push(' ');
    }
    text
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{MicroCData, MicroComment, MicroProcessingInstruction, MicroText};
    use crate::xml::read_document;
    use crate::qname::QName;
    use pretty_assertions::assert_eq;

    fn compact() -> WriterSettings {
        WriterSettings::compact()
    }

    #[test]
    fn test_escaping() {
        let mut root = MicroElement::new("r");
        root.set_attribute("a", "\"x\" & y\n");
        root.append_text("1 < 2 & 3 > 2");
        assert_eq!(
            write_element(&root, &compact()),
            r#"<r a="&quot;x&quot; &amp; y&#10;">1 &lt; 2 &amp; 3 &gt; 2</r>"#
        );
    }

    #[test]
    fn test_cdata_split_and_comment() {
        let mut root = MicroElement::new("r");
        root.append_child(MicroCData::new("a]]>b"));
        root.append_child(MicroComment::new(" c "));
        assert_eq!(
            write_element(&root, &compact()),
            "<r><![CDATA[a]]]]><![CDATA[>b]]><!-- c --></r>"
        );
    }

    #[test]
    fn test_comment_and_pi_data_stay_well_formed() {
        let mut root = MicroElement::new("r");
        root.append_comment("a -- b ---");
        root.append_comment("trailing-");
        root.append_child(MicroProcessingInstruction::new("pi", Some("x ?> y")));
        let text = write_element(&root, &compact());
        assert_eq!(
            text,
            "<r><!--a - - b - - - --><!--trailing- --><?pi x ? > y?></r>"
        );

        let doc = read_document(&text).unwrap();
        let comments: Vec<_> = doc
            .document_element()
            .unwrap()
            .children()
            .iter()
            .filter_map(MicroNode::data)
            .collect();
        assert_eq!(comments, vec!["a - - b - - - ", "trailing- "]);
    }

    #[test]
    fn test_ignorable_whitespace_replaced_when_indenting() {
        let mut root = MicroElement::new("root");
        root.append_child(MicroText::ignorable_whitespace("\n    "));
        root.append_element("a");
        root.append_child(MicroText::ignorable_whitespace("\n"));

        let settings = WriterSettings::default().with_xml_declaration(false);
        assert_eq!(write_element(&root, &settings), "<root>\n  <a/>\n</root>");
        assert_eq!(
            write_element(&root, &compact()),
            "<root>\n    <a/>\n</root>"
        );

        let mut only_whitespace = MicroElement::new("e");
        only_whitespace.append_child(MicroText::ignorable_whitespace(" "));
        assert_eq!(write_element(&only_whitespace, &settings), "<e/>");
    }

    #[test]
    fn test_namespace_declarations() {
        let mut root = MicroElement::with_namespace("urn:d", "root");
        let child = root.append_element_ns("urn:x", "x:child");
        child.set_attribute(("urn:x", "id"), "1");
        child.set_attribute(("urn:other", "v"), "2");
        child.set_attribute((XML_NS_URI, "lang"), "en");
        root.append_element("plain");

        assert_eq!(
            write_element(&root, &compact()),
            concat!(
                r#"<root xmlns="urn:d">"#,
                r#"<x:child xmlns:x="urn:x" xmlns:ns1="urn:other" x:id="1" ns1:v="2" xml:lang="en"/>"#,
                r#"<plain xmlns=""/>"#,
                "</root>"
            )
        );
    }

    #[test]
    fn test_inherited_namespace_not_redeclared() {
        let mut root = MicroElement::with_namespace("urn:d", "root");
        root.append_element_ns("urn:d", "child");
        assert_eq!(
            write_element(&root, &compact()),
            r#"<root xmlns="urn:d"><child/></root>"#
        );
    }

    #[test]
    fn test_indentation_and_containers() {
        let mut root = MicroElement::new("root");
        let container = root.append_container();
        container.append_element("a");
        container.append_element("b").append_text("text");
        root.append_element("c");

        let settings = WriterSettings::default().with_xml_declaration(false);
        assert_eq!(
            write_element(&root, &settings),
            "<root>\n  <a/>\n  <b>text</b>\n  <c/>\n</root>"
        );
    }

    #[test]
    fn test_document_with_declaration() {
        let mut doc = MicroDocument::new();
        doc.append_comment("c");
        doc.append_element("root");
        let settings = WriterSettings::default();
        assert_eq!(
            write_document(&doc, &settings),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!--c-->\n<root/>"
        );
    }

    #[test]
    fn test_empty_elements_not_self_closing() {
        let mut settings = compact();
        settings.self_closing_empty = false;
        let element = MicroElement::new("e");
        assert_eq!(write_element(&element, &settings), "<e></e>");
        let node = MicroNode::from(element);
        assert_eq!(write_node(&node, &settings), "<e></e>");
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let mut element = MicroElement::new("e");
        element.set_attribute(QName::new("z"), "1");
        element.set_attribute(QName::new("a"), "2");
        element.set_attribute(QName::new("z"), "3");
        assert_eq!(write_element(&element, &compact()), r#"<e z="3" a="2"/>"#);
    }
}
