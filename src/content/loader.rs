//! Content loader - builds the catalog and renders article bodies

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Catalog, MarkdownRenderer};
use crate::Blog;

/// Rendered HTML bodies keyed by article slug
pub type ArticleBodies = HashMap<String, String>;

macro_rules! builtin_bodies {
    ($($slug:literal),* $(,)?) => {
        &[$(($slug, include_str!(concat!("../../data/articles/", $slug, ".md")))),*]
    };
}

/// Markdown bodies shipped with the built-in article list
const BUILTIN_BODIES: &[(&str, &str)] = builtin_bodies![
    "essential-developer-tools-2026",
    "api-integration-patterns",
    "nextjs-portfolio-guide",
    "data-pipeline-csv-to-clean",
    "git-workflow-guide",
    "typescript-patterns-2026",
    "docker-essentials-developers",
    "react-performance-optimization",
];

/// Built-in markdown body for `slug`, if one ships with the binary
pub fn builtin_body(slug: &str) -> Option<&'static str> {
    BUILTIN_BODIES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, body)| *body)
}

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let renderer =
            MarkdownRenderer::with_options(&blog.config.highlight_theme, blog.config.line_numbers);
        Self { blog, renderer }
    }

    /// Path of the article list inside the source directory
    pub fn articles_path(&self) -> PathBuf {
        self.blog.source_dir.join(&self.blog.config.articles_file)
    }

    /// Build the catalog from the article list file, or the built-in list
    /// when no such file exists
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.articles_path();
        if !path.exists() {
            tracing::debug!("No article list at {:?}, using built-in catalog", path);
            return Ok(Catalog::builtin()?);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let catalog = Catalog::from_yaml(&content)
            .with_context(|| format!("Invalid article list {:?}", path))?;
        tracing::info!("Loaded {} articles from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Render `<bodies_dir>/<slug>.md` for every catalog article that has one.
    /// Articles without a source file fall back to their built-in body.
    pub fn load_bodies(&self, catalog: &Catalog) -> Result<ArticleBodies> {
        let bodies_dir = self.blog.source_dir.join(&self.blog.config.bodies_dir);
        let mut bodies = ArticleBodies::new();

        if bodies_dir.exists() {
            for entry in WalkDir::new(&bodies_dir)
                .max_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !path.is_file() || !is_markdown_file(path) {
                    continue;
                }

                let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if catalog.get(slug).is_none() {
                    tracing::warn!("Skipping {:?}: no article with slug {:?}", path, slug);
                    continue;
                }

                let markdown = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {:?}", path))?;
                let html = self.renderer.render(&markdown)?;
                tracing::debug!("Rendered body for {}", slug);
                bodies.insert(slug.to_string(), html);
            }
        }

        // Fill the gaps from the bodies compiled into the binary
        for slug in catalog.slugs() {
            if bodies.contains_key(slug) {
                continue;
            }
            if let Some(markdown) = builtin_body(slug) {
                bodies.insert(slug.to_string(), self.renderer.render(markdown)?);
                tracing::debug!("Rendered built-in body for {}", slug);
            }
        }

        Ok(bodies)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
