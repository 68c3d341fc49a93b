use super::{Element, Node};

const INDENT: &str = "  ";

/// Render a layout tree as indented HTML
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, 0, &mut out);
    out
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);

    match node {
        Node::Text { text } => {
            out.push_str(&pad);
            out.push_str(&escape_text(text));
            out.push('\n');
        }
        Node::Raw { markup } => {
            for line in markup.lines() {
                out.push_str(&pad);
                out.push_str(line);
                out.push('\n');
            }
        }
        Node::Element(element) => write_element(element, depth, out),
    }
}

fn write_element(element: &Element, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);

    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.tag);

    if let Some(layer) = element.layer {
        out.push_str(&format!(" data-layer=\"{}\"", layer.as_str()));
    }

    if !element.style.is_empty() {
        let style = element
            .style
            .iter()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ");
        out.push_str(&format!(" style=\"{}\"", escape_attr(&style)));
    }

    // Single text child stays inline
    if let [Node::Text { text }] = element.children.as_slice() {
        out.push_str(&format!(">{}</{}>\n", escape_text(text), element.tag));
        return;
    }

    if element.children.is_empty() {
        out.push_str(&format!("></{}>\n", element.tag));
        return;
    }

    out.push_str(">\n");
    for child in &element.children {
        write_node(child, depth + 1, out);
    }
    out.push_str(&pad);
    out.push_str(&format!("</{}>\n", element.tag));
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
