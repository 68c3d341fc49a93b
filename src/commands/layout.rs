use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use buildstamp::layout::{
    background_layout, render_html, AssetResolver, ImageSource, Layer, LayoutTheme, Node,
};

use crate::cli::{LayoutFormat, LayoutOptions};
use crate::config::resolve_config;

#[derive(Serialize)]
struct LayoutDocument<'a> {
    image: &'a ImageSource,
    tree: &'a Node,
}

pub fn run(options: LayoutOptions) -> Result<()> {
    let config = resolve_config(options.config.as_deref())?;

    let theme = LayoutTheme::default()
        .with_content_padding(config.layout.padding_y)
        .with_max_width(config.layout.max_width);

    let asset_dir = options
        .asset_dir
        .clone()
        .unwrap_or_else(|| config.layout.asset_dir.clone());

    let reference = options
        .image
        .clone()
        .or_else(|| config.layout.image.clone())
        .unwrap_or_else(|| "bg.png".to_string());
    let image = AssetResolver::new(asset_dir).resolve(&reference);

    let children = match (&options.content, &options.text) {
        (Some(path), _) => {
            let markup = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read content file: {}", path.display()))?;
            vec![Node::raw(markup)]
        }
        (None, Some(text)) => vec![Node::text(text.clone())],
        (None, None) => Vec::new(),
    };

    let tree = background_layout(&theme, &image, children);
    for layer in [Layer::Background, Layer::Content] {
        if let Some(element) = tree.find_layers(layer).first() {
            tracing::debug!("{} layer at z-index {:?}", layer.as_str(), element.z_index());
        }
    }

    tracing::debug!("Rendering layout as {}", options.format);
    let rendered = match options.format {
        LayoutFormat::Html => render_html(&tree),
        LayoutFormat::Json => {
            let document = LayoutDocument {
                image: &image,
                tree: &tree,
            };
            serde_json::to_string_pretty(&document)? + "\n"
        }
    };

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write layout: {}", path.display()))?;
            println!(
                "{} Wrote layout: {}",
                style("✓").green().bold(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
