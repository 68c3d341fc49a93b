use serde::Serialize;

use super::Declarations;

/// Role of an element within the background layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Background,
    Content,
    Container,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Content => "content",
            Layer::Container => "container",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub style: Declarations,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// Framework-free description of a visual tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { text: String },
    /// Caller-supplied markup, emitted verbatim
    Raw { markup: String },
}

impl Node {
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag: tag.into(),
            layer: None,
            style: Vec::new(),
            children,
        })
    }

    pub fn layer(layer: Layer, style: Declarations, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag: "div".to_string(),
            layer: Some(layer),
            style,
            children,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Node::Raw {
            markup: markup.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// All elements tagged with `layer`, depth first
    pub fn find_layers(&self, layer: Layer) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_layers(layer, &mut found);
        found
    }

    fn collect_layers<'a>(&'a self, layer: Layer, found: &mut Vec<&'a Element>) {
        if let Some(element) = self.as_element() {
            if element.layer == Some(layer) {
                found.push(element);
            }
            for child in &element.children {
                child.collect_layers(layer, found);
            }
        }
    }
}

impl Element {
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Stacking order declared on this element, if any
    pub fn z_index(&self) -> Option<i32> {
        self.style_value("z-index").and_then(|z| z.parse().ok())
    }
}
