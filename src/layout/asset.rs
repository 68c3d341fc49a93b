use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Image reference after asset resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ImageSource {
    Resolved { url: String },
    /// Reference that could not be found; the background renders without it
    Unresolved { reference: String },
}

impl ImageSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSource::Resolved { url } => Some(url),
            ImageSource::Unresolved { .. } => None,
        }
    }
}

/// Resolves asset references against a directory on disk
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, reference: &str) -> ImageSource {
        if is_absolute_url(reference) {
            return ImageSource::Resolved {
                url: reference.to_string(),
            };
        }

        let path = self.root.join(reference);
        if path.is_file() {
            tracing::debug!("Resolved asset {} -> {}", reference, path.display());
            return ImageSource::Resolved {
                url: to_url_path(&path),
            };
        }

        tracing::warn!(
            "Background image not found: {} (looked in {})",
            reference,
            self.root.display()
        );
        ImageSource::Unresolved {
            reference: reference.to_string(),
        }
    }
}

fn is_absolute_url(reference: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| reference.starts_with(scheme))
}

fn to_url_path(path: &Path) -> String {
    let mut url = String::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::RootDir => url.push('/'),
            Component::Prefix(prefix) => url.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !url.is_empty() && !url.ends_with('/') {
                    url.push('/');
                }
                url.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_file_resolves() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("bg.png"), b"png").unwrap();

        let source = AssetResolver::new(temp_dir.path()).resolve("bg.png");
        let url = source.url().unwrap();
        assert!(url.ends_with("/bg.png"));
        assert!(!url.contains('\\'));
    }

    #[test]
    fn test_relative_root_has_no_dot_segment() {
        assert_eq!(to_url_path(Path::new("./assets/bg.png")), "assets/bg.png");
    }

    #[test]
    fn test_missing_file_is_unresolved() {
        let temp_dir = TempDir::new().unwrap();
        let source = AssetResolver::new(temp_dir.path()).resolve("missing.png");
        assert_eq!(
            source,
            ImageSource::Unresolved {
                reference: "missing.png".to_string()
            }
        );
        assert_eq!(source.url(), None);
    }

    #[test]
    fn test_remote_urls_pass_through() {
        let resolver = AssetResolver::new("does-not-exist");
        assert_eq!(
            resolver.resolve("https://cdn.example.com/bg.png").url(),
            Some("https://cdn.example.com/bg.png")
        );
    }
}
