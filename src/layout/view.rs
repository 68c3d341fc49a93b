use super::{ImageSource, Layer, LayoutTheme, Node};

/// Compose a fixed full-viewport background behind a scrollable content layer.
///
/// The result is a root `div` with exactly two children: the background
/// layer, then the content layer holding a centered container that wraps
/// `children`. The background depends only on `theme` and `image`.
pub fn background_layout(theme: &LayoutTheme, image: &ImageSource, children: Vec<Node>) -> Node {
    let background = Node::layer(
        Layer::Background,
        theme.background.declarations(image.url()),
        Vec::new(),
    );

    let container = Node::layer(Layer::Container, theme.container.declarations(), children);

    let content = Node::layer(
        Layer::Content,
        theme.content.declarations(None),
        vec![container],
    );

    Node::element("div", vec![background, content])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bg() -> ImageSource {
        ImageSource::Resolved {
            url: "bg.png".to_string(),
        }
    }

    #[test]
    fn test_scenario_hello_paragraph() {
        let hello = Node::element("p", vec![Node::text("Hello")]);
        let tree = background_layout(&LayoutTheme::default(), &bg(), vec![hello.clone()]);

        let backgrounds = tree.find_layers(Layer::Background);
        let contents = tree.find_layers(Layer::Content);
        assert_eq!(backgrounds.len(), 1);
        assert_eq!(contents.len(), 1);

        let background = backgrounds[0];
        assert_eq!(background.style_value("position"), Some("fixed"));
        assert_eq!(background.style_value("background-size"), Some("cover"));
        assert_eq!(background.style_value("background-image"), Some("url(\"bg.png\")"));
        assert!(background.children.is_empty());

        let content = contents[0];
        assert!(background.z_index().unwrap() < content.z_index().unwrap());

        let container = content.children[0].as_element().unwrap();
        assert_eq!(container.layer, Some(Layer::Container));
        assert_eq!(container.style_value("max-width"), Some("1200px"));
        assert_eq!(container.children, vec![hello]);
    }

    #[test]
    fn test_background_comes_first() {
        let tree = background_layout(&LayoutTheme::default(), &bg(), Vec::new());
        let root = tree.as_element().unwrap();

        let layers: Vec<_> = root
            .children
            .iter()
            .map(|c| c.as_element().unwrap().layer)
            .collect();
        assert_eq!(layers, vec![Some(Layer::Background), Some(Layer::Content)]);
    }

    #[test]
    fn test_children_do_not_affect_background() {
        let theme = LayoutTheme::default();
        let a = background_layout(&theme, &bg(), vec![Node::text("one")]);
        let b = background_layout(&theme, &bg(), vec![Node::raw("<h1>two</h1>"), Node::text("three")]);

        assert_eq!(
            a.find_layers(Layer::Background),
            b.find_layers(Layer::Background)
        );
    }

    #[test]
    fn test_unresolved_image_still_renders() {
        let missing = ImageSource::Unresolved {
            reference: "missing.png".to_string(),
        };
        let tree = background_layout(&LayoutTheme::default(), &missing, vec![Node::text("x")]);

        let background = tree.find_layers(Layer::Background)[0];
        assert_eq!(background.style_value("background-image"), None);
        assert_eq!(background.style_value("position"), Some("fixed"));
        assert_eq!(tree.find_layers(Layer::Content).len(), 1);
    }
}
