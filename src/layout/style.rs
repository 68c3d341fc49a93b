use serde::Serialize;

/// CSS positioning scheme of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Fixed,
}

impl Position {
    fn as_css(&self) -> &'static str {
        match self {
            Position::Relative => "relative",
            Position::Fixed => "fixed",
        }
    }
}

/// How the background image is painted.
///
/// Always cover, no-repeat, centered, fixed attachment; the struct exists so
/// a layer either has a fill or does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundFill {
    pub size: &'static str,
    pub repeat: &'static str,
    pub position: &'static str,
    pub attachment: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutStyle {
    pub position: Position,
    /// Pinned to all four viewport edges at full viewport size
    pub covers_viewport: bool,
    pub z_index: i32,
    /// Minimum height in viewport-height units
    pub min_height_vh: Option<u32>,
    /// Top and bottom padding in pixels
    pub padding_y_px: u32,
    pub background: Option<BackgroundFill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerStyle {
    pub max_width_px: u32,
    /// Left and right padding in pixels
    pub gutter_px: u32,
}

pub const BACKGROUND_FILL: BackgroundFill = BackgroundFill {
    size: "cover",
    repeat: "no-repeat",
    position: "center",
    attachment: "fixed",
};

pub const BACKGROUND_STYLE: LayoutStyle = LayoutStyle {
    position: Position::Fixed,
    covers_viewport: true,
    z_index: -1,
    min_height_vh: None,
    padding_y_px: 0,
    background: Some(BACKGROUND_FILL),
};

pub const CONTENT_STYLE: LayoutStyle = LayoutStyle {
    position: Position::Relative,
    covers_viewport: false,
    z_index: 1,
    min_height_vh: Some(100),
    padding_y_px: 64,
    background: None,
};

pub const CONTAINER_STYLE: ContainerStyle = ContainerStyle {
    max_width_px: 1200,
    gutter_px: 16,
};

/// CSS property/value pairs in emission order
pub type Declarations = Vec<(String, String)>;

impl LayoutStyle {
    /// CSS declarations for this layer; `image_url` is only used when the
    /// style has a background fill.
    pub fn declarations(&self, image_url: Option<&str>) -> Declarations {
        let mut out = vec![decl("position", self.position.as_css())];

        if self.covers_viewport {
            out.push(decl("inset", "0"));
            out.push(decl("width", "100vw"));
            out.push(decl("height", "100vh"));
        }

        out.push(decl("z-index", &self.z_index.to_string()));

        if let Some(vh) = self.min_height_vh {
            out.push(decl("min-height", &format!("{}vh", vh)));
        }

        if self.padding_y_px > 0 {
            out.push(decl(
                "padding",
                &format!("{}px 0", self.padding_y_px),
            ));
        }

        if let Some(fill) = &self.background {
            if let Some(url) = image_url {
                out.push(decl("background-image", &format!("url(\"{}\")", css_escape(url))));
            }
            out.push(decl("background-size", fill.size));
            out.push(decl("background-repeat", fill.repeat));
            out.push(decl("background-position", fill.position));
            out.push(decl("background-attachment", fill.attachment));
        }

        out
    }
}

impl ContainerStyle {
    pub fn declarations(&self) -> Declarations {
        vec![
            decl("max-width", &format!("{}px", self.max_width_px)),
            decl("margin", "0 auto"),
            decl("padding", &format!("0 {}px", self.gutter_px)),
        ]
    }
}

/// The three style records used by the background layout.
///
/// Built once per process and passed by reference into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutTheme {
    pub background: LayoutStyle,
    pub content: LayoutStyle,
    pub container: ContainerStyle,
}

impl Default for LayoutTheme {
    fn default() -> Self {
        Self {
            background: BACKGROUND_STYLE,
            content: CONTENT_STYLE,
            container: CONTAINER_STYLE,
        }
    }
}

impl LayoutTheme {
    pub fn with_content_padding(mut self, padding_y_px: u32) -> Self {
        self.content.padding_y_px = padding_y_px;
        self
    }

    pub fn with_max_width(mut self, max_width_px: u32) -> Self {
        self.container.max_width_px = max_width_px;
        self
    }
}

fn decl(property: &str, value: &str) -> (String, String) {
    (property.to_string(), value.to_string())
}

fn css_escape(url: &str) -> String {
    url.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(decls: &'a Declarations, property: &str) -> Option<&'a str> {
        decls
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_background_sits_below_content() {
        assert!(BACKGROUND_STYLE.z_index < CONTENT_STYLE.z_index);
    }

    #[test]
    fn test_background_declarations() {
        let decls = BACKGROUND_STYLE.declarations(Some("bg.png"));
        assert_eq!(value(&decls, "position"), Some("fixed"));
        assert_eq!(value(&decls, "inset"), Some("0"));
        assert_eq!(value(&decls, "background-image"), Some("url(\"bg.png\")"));
        assert_eq!(value(&decls, "background-size"), Some("cover"));
        assert_eq!(value(&decls, "background-repeat"), Some("no-repeat"));
        assert_eq!(value(&decls, "background-attachment"), Some("fixed"));
    }

    #[test]
    fn test_background_without_image_keeps_fill() {
        let decls = BACKGROUND_STYLE.declarations(None);
        assert_eq!(value(&decls, "background-image"), None);
        assert_eq!(value(&decls, "background-size"), Some("cover"));
    }

    #[test]
    fn test_content_ignores_image() {
        let decls = CONTENT_STYLE.declarations(Some("bg.png"));
        assert_eq!(value(&decls, "background-image"), None);
        assert_eq!(value(&decls, "min-height"), Some("100vh"));
        assert_eq!(value(&decls, "padding"), Some("64px 0"));
    }

    #[test]
    fn test_theme_overrides() {
        let theme = LayoutTheme::default().with_content_padding(32).with_max_width(960);
        assert_eq!(theme.content.padding_y_px, 32);
        assert_eq!(theme.container.max_width_px, 960);
        assert_eq!(theme.background, BACKGROUND_STYLE);
    }

    #[test]
    fn test_image_url_quotes_are_escaped() {
        let decls = BACKGROUND_STYLE.declarations(Some("a\"b.png"));
        assert_eq!(value(&decls, "background-image"), Some("url(\"a\\\"b.png\")"));
    }
}
