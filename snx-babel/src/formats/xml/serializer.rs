//! Tree-to-XML serializer
//!
//!     One serializer drives both the pretty printer and the minifier;
//!     [`SerializeOptions::indent`] selects between them. Pretty output is
//!     line-oriented: every element without significant text gets a block
//!     layout (open tag line, indented children, close tag line), and an
//!     element WITH significant text collapses onto a single line so the
//!     text survives a re-parse byte for byte. Minified output is the
//!     whole document in that collapsed form.

use snx_parser::xml::{Attribute, Node, NodeId, Tree};

/// Knobs for the XML serializer.
///
/// `indent_string`, `wrap_column` and `separator` are only consulted when
/// `indent` is true; the minifier emits no inter-node whitespace at all.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerializeOptions {
    /// Pretty-print when true, minify when false.
    pub indent: bool,
    /// One level of indentation.
    pub indent_string: String,
    /// Open tags wider than this wrap to one attribute per line.
    pub wrap_column: usize,
    /// Line separator for pretty output.
    pub separator: String,
}

impl SerializeOptions {
    /// Options for single-line output with no inter-node whitespace.
    pub fn minified() -> Self {
        SerializeOptions {
            indent: false,
            ..SerializeOptions::default()
        }
    }

    pub fn with_indent_string(mut self, indent_string: impl Into<String>) -> Self {
        self.indent_string = indent_string.into();
        self
    }

    pub fn with_wrap_column(mut self, wrap_column: usize) -> Self {
        self.wrap_column = wrap_column;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            indent: true,
            indent_string: "    ".to_string(),
            wrap_column: 80,
            separator: "\n".to_string(),
        }
    }
}

enum Frame {
    Open(NodeId),
    Close(NodeId),
}

#[derive(Clone, Copy)]
enum TagShape {
    Open,
    SelfClosing,
}

pub struct XmlSerializer {
    options: SerializeOptions,
    output: String,
    indent_level: usize,
}

impl XmlSerializer {
    pub fn new(options: SerializeOptions) -> Self {
        Self {
            options,
            output: String::new(),
            indent_level: 0,
        }
    }

    pub fn serialize(mut self, tree: &Tree) -> String {
        if self.options.indent {
            self.render_pretty(tree);
        } else {
            self.render_compact(tree);
        }
        self.output
    }

    fn indent(&self) -> String {
        self.options.indent_string.repeat(self.indent_level)
    }

    fn indent_width(&self) -> usize {
        self.options.indent_string.chars().count() * self.indent_level
    }

    fn write_line(&mut self, text: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(text);
        self.output.push_str(&self.options.separator);
    }

    fn render_compact(&mut self, tree: &Tree) {
        if let Some(decl) = tree.declaration() {
            self.output.push_str(decl);
        }
        let root = tree.node(tree.root());
        if let Some(text) = root.significant_text() {
            push_escaped_text(text, &mut self.output);
        }
        for &child in &root.children {
            compact_subtree(tree, child, &mut self.output);
        }
    }

    fn render_pretty(&mut self, tree: &Tree) {
        if let Some(decl) = tree.declaration() {
            let line = decl.to_string();
            self.write_line(&line);
        }
        let root = tree.node(tree.root());
        if let Some(text) = root.significant_text() {
            let mut line = String::new();
            push_escaped_text(text, &mut line);
            self.write_line(&line);
        }
        let mut stack: Vec<Frame> = root.children.iter().rev().map(|&id| Frame::Open(id)).collect();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Open(id) => self.open_element(tree, id, &mut stack),
                Frame::Close(id) => self.close_element(tree, id),
            }
        }
    }

    fn open_element(&mut self, tree: &Tree, id: NodeId, stack: &mut Vec<Frame>) {
        let node = tree.node(id);
        if node.significant_text().is_some() {
            // Mixed content stays on one line: breaking it across lines
            // would change the text a re-parse recovers.
            let mut line = String::new();
            compact_subtree(tree, id, &mut line);
            self.write_line(&line);
            return;
        }
        if node.children.is_empty() {
            self.write_tag_line(node, TagShape::SelfClosing);
            return;
        }
        self.write_tag_line(node, TagShape::Open);
        stack.push(Frame::Close(id));
        for &child in node.children.iter().rev() {
            stack.push(Frame::Open(child));
        }
        self.indent_level += 1;
    }

    fn close_element(&mut self, tree: &Tree, id: NodeId) {
        self.indent_level -= 1;
        let mut line = String::from("</");
        line.push_str(&tree.node(id).name);
        line.push('>');
        self.write_line(&line);
    }

    /// Open or self-closing tag, wrapped to one attribute per line when the
    /// single-line form would cross the wrap column.
    fn write_tag_line(&mut self, node: &Node, shape: TagShape) {
        let mut line = String::new();
        push_open_tag(node, matches!(shape, TagShape::SelfClosing), &mut line);
        let width = self.indent_width() + line.chars().count();
        if width <= self.options.wrap_column || node.attributes.is_empty() {
            self.write_line(&line);
            return;
        }

        let mut head = String::from("<");
        head.push_str(&node.name);
        self.write_line(&head);
        self.indent_level += 1;
        for (i, attr) in node.attributes.iter().enumerate() {
            let mut attr_line = String::new();
            push_attribute(attr, &mut attr_line);
            if i + 1 == node.attributes.len() {
                attr_line.push_str(match shape {
                    TagShape::SelfClosing => "/>",
                    TagShape::Open => ">",
                });
            }
            self.write_line(&attr_line);
        }
        self.indent_level -= 1;
    }
}

/// Render one element subtree with no inter-node whitespace.
///
/// Text is emitted before child elements; the builder accumulates text
/// runs into a single field, so their original positions among the
/// children are not recorded.
fn compact_subtree(tree: &Tree, id: NodeId, out: &mut String) {
    let mut stack = vec![Frame::Open(id)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Open(id) => {
                let node = tree.node(id);
                if node.children.is_empty() && node.significant_text().is_none() {
                    push_open_tag(node, true, out);
                    continue;
                }
                push_open_tag(node, false, out);
                if let Some(text) = node.significant_text() {
                    push_escaped_text(text, out);
                }
                stack.push(Frame::Close(id));
                for &child in node.children.iter().rev() {
                    stack.push(Frame::Open(child));
                }
            }
            Frame::Close(id) => {
                out.push_str("</");
                out.push_str(&tree.node(id).name);
                out.push('>');
            }
        }
    }
}

fn push_open_tag(node: &Node, self_closing: bool, out: &mut String) {
    out.push('<');
    out.push_str(&node.name);
    for attr in &node.attributes {
        out.push(' ');
        push_attribute(attr, out);
    }
    out.push_str(if self_closing { "/>" } else { ">" });
}

fn push_attribute(attr: &Attribute, out: &mut String) {
    out.push_str(&attr.key);
    out.push_str("=\"");
    push_escaped_attr(&attr.value, out);
    out.push('"');
}

fn push_escaped_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snx_parser::xml::parse;

    fn pretty(source: &str) -> String {
        let tree = parse(source).unwrap();
        XmlSerializer::new(SerializeOptions::default()).serialize(&tree)
    }

    fn mini(source: &str) -> String {
        let tree = parse(source).unwrap();
        XmlSerializer::new(SerializeOptions::minified()).serialize(&tree)
    }

    #[test]
    fn block_layout_for_containers() {
        let out = pretty("<users><user id=\"1\"><posts/></user></users>");
        assert_eq!(
            out,
            "<users>\n    <user id=\"1\">\n        <posts/>\n    </user>\n</users>\n"
        );
    }

    #[test]
    fn text_bearing_element_stays_on_one_line() {
        let out = pretty("<users><name>  Ada Lovelace </name></users>");
        assert_eq!(out, "<users>\n    <name>  Ada Lovelace </name>\n</users>\n");
    }

    #[test]
    fn mixed_content_collapses_inline() {
        let out = pretty("<post>Hello <b>world</b> again</post>");
        assert_eq!(out, "<post>Hello  again<b>world</b></post>\n");
    }

    #[test]
    fn empty_element_self_closes() {
        assert_eq!(pretty("<a></a>"), "<a/>\n");
        assert_eq!(pretty("<a/>"), "<a/>\n");
    }

    #[test]
    fn whitespace_only_text_is_replaced_by_layout() {
        let out = pretty("<users>\n\t<user>\n\t</user>\n</users>");
        assert_eq!(out, "<users>\n    <user/>\n</users>\n");
    }

    #[test]
    fn declaration_is_kept_verbatim_on_its_own_line() {
        let out = pretty("<?xml version=\"1.0\"?><a/>");
        assert_eq!(out, "<?xml version=\"1.0\"?>\n<a/>\n");
    }

    #[test]
    fn text_and_attr_escaping() {
        let out = pretty("<a q=\"5 &lt; 6 &quot;x&quot;\">a &amp; b</a>");
        assert_eq!(out, "<a q=\"5 &lt; 6 &quot;x&quot;\">a &amp; b</a>\n");
    }

    #[test]
    fn wide_open_tag_wraps_one_attribute_per_line() {
        let source = "<user alpha=\"00000000001111111111\" beta=\"00000000001111111111\" gamma=\"00000000001111111111\"><x/></user>";
        let out = pretty(source);
        assert_eq!(
            out,
            "<user\n    alpha=\"00000000001111111111\"\n    beta=\"00000000001111111111\"\n    gamma=\"00000000001111111111\">\n    <x/>\n</user>\n"
        );
    }

    #[test]
    fn wide_self_closing_tag_wraps_with_trailing_slash() {
        let options = SerializeOptions::default().with_wrap_column(10);
        let tree = parse("<u aa=\"1\" bb=\"2\"/>").unwrap();
        let out = XmlSerializer::new(options).serialize(&tree);
        assert_eq!(out, "<u\n    aa=\"1\"\n    bb=\"2\"/>\n");
    }

    #[test]
    fn wrap_column_is_measured_at_current_indent() {
        let options = SerializeOptions::default().with_wrap_column(24);
        let tree = parse("<a><b k=\"0123456789012\"/></a>").unwrap();
        let out = XmlSerializer::new(options).serialize(&tree);
        // 4 indent chars + 22 tag chars cross the column.
        assert_eq!(out, "<a>\n    <b\n        k=\"0123456789012\"/>\n</a>\n");
    }

    #[test]
    fn attribute_free_tag_never_wraps() {
        let options = SerializeOptions::default().with_wrap_column(4);
        let tree = parse("<longtagname/>").unwrap();
        let out = XmlSerializer::new(options).serialize(&tree);
        assert_eq!(out, "<longtagname/>\n");
    }

    #[test]
    fn custom_indent_and_separator() {
        let options = SerializeOptions::default()
            .with_indent_string("\t")
            .with_separator("\r\n");
        let tree = parse("<a><b/></a>").unwrap();
        let out = XmlSerializer::new(options).serialize(&tree);
        assert_eq!(out, "<a>\r\n\t<b/>\r\n</a>\r\n");
    }

    #[test]
    fn minified_output_has_no_inter_node_whitespace() {
        let out = mini("<users>\n  <user id=\"1\">\n    <name>Ada</name>\n  </user>\n</users>");
        assert_eq!(out, "<users><user id=\"1\"><name>Ada</name></user></users>");
    }

    #[test]
    fn minified_keeps_declaration_and_significant_text() {
        let out = mini("<?xml version=\"1.0\"?><a><b> x </b></a>");
        assert_eq!(out, "<?xml version=\"1.0\"?><a><b> x </b></a>");
    }

    #[test]
    fn empty_tree_serializes_to_nothing() {
        let tree = Tree::new();
        assert_eq!(XmlSerializer::new(SerializeOptions::default()).serialize(&tree), "");
        assert_eq!(XmlSerializer::new(SerializeOptions::minified()).serialize(&tree), "");
    }

    #[test]
    fn pretty_output_reparses_to_the_same_normalized_tree() {
        let source = "<?xml version=\"1.0\"?>\n<users>\n  <user id=\"1\"><name> Ada </name><posts><post id=\"9\">hi &amp; bye</post></posts></user>\n</users>";
        let tree = parse(source).unwrap();
        let out = pretty(source);
        let reparsed = parse(&out).unwrap();
        assert_eq!(reparsed.normalized(), tree.normalized());
    }

    #[test]
    fn formatting_is_idempotent() {
        let source = "<users><user id=\"1\"><name>Ada</name></user><user id=\"2\"/></users>";
        let once = pretty(source);
        let twice = pretty(&once);
        assert_eq!(once, twice);
    }
}
