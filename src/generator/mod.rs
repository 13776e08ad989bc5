//! Generator module - writes the static site using the built-in Tera templates

pub mod metadata;
pub mod sitemap;

use anyhow::{Context as _, Result};
use chrono::{Datelike, Utc};
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::loader::ArticleBodies;
use crate::content::Catalog;
use crate::helpers::escape_script_json;
use crate::templates::{ArticleData, SiteData, TemplateRenderer, STYLESHEET};
use crate::Blog;

pub use metadata::{article_json_ld, PageMetadata};
pub use sitemap::{Sitemap, SitemapEntry};

/// Output directories owned by fixed pages rather than articles
const FIXED_PAGES: &[&str] = &["privacy"];

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site, returning the number of article pages written
    pub fn generate(&self, catalog: &Catalog, bodies: &ArticleBodies) -> Result<usize> {
        let public_dir = &self.blog.public_dir;

        // Ensure public directory exists
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        // Drop pages of articles that left the catalog since the last run
        self.prune_stale_pages(catalog)?;

        // Stylesheet, then source assets (images, etc.)
        write_file(&public_dir.join("style.css"), STYLESHEET)?;
        self.copy_source_assets()?;

        // Generate home page
        let index = self.render_index(catalog)?;
        write_file(&public_dir.join("index.html"), &index)?;

        // Generate article pages
        let pages = self.generate_article_pages(catalog, bodies)?;

        // Generate fixed pages
        let privacy = self.render_privacy()?;
        write_file(&public_dir.join("privacy").join("index.html"), &privacy)?;

        let not_found = self.render_not_found()?;
        write_file(&public_dir.join("404.html"), &not_found)?;

        // Generate sitemap
        if self.blog.config.sitemap.enable {
            let sitemap = Sitemap::build(&self.blog.config, catalog, Utc::now());
            write_file(&public_dir.join("sitemap.xml"), &sitemap.to_xml())?;
            tracing::info!("Generated sitemap.xml ({} entries)", sitemap.entries().len());
        }

        Ok(pages)
    }

    /// Create a base context with common variables
    fn create_base_context(&self, meta: &PageMetadata) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&self.blog.config, Utc::now().year()));
        context.insert("meta", meta);
        context
    }

    /// Render the home page: featured hero plus every other article
    pub fn render_index(&self, catalog: &Catalog) -> Result<String> {
        let config = &self.blog.config;
        let meta = PageMetadata::home(config, catalog);

        let featured = catalog.featured().map(|a| ArticleData::new(config, a));
        let articles: Vec<ArticleData> = catalog
            .unfeatured()
            .into_iter()
            .map(|a| ArticleData::new(config, a))
            .collect();

        let mut context = self.create_base_context(&meta);
        context.insert("featured", &featured);
        context.insert("articles", &articles);

        self.renderer.render("index.html", &context)
    }

    /// One page per slug, as enumerated by the catalog
    fn generate_article_pages(&self, catalog: &Catalog, bodies: &ArticleBodies) -> Result<usize> {
        let mut written = 0;

        for slug in catalog.slugs() {
            let Some(html) = self.render_article(catalog, bodies, slug)? else {
                continue;
            };
            let output_path = self.blog.public_dir.join(slug).join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated article: {:?}", output_path);
            written += 1;
        }

        tracing::info!("Generated {} article pages", written);
        Ok(written)
    }

    /// Render the page for `slug`. `None` means there is no such article.
    pub fn render_article(
        &self,
        catalog: &Catalog,
        bodies: &ArticleBodies,
        slug: &str,
    ) -> Result<Option<String>> {
        let config = &self.blog.config;
        let (Some(meta), Some(article)) = (
            PageMetadata::for_article(config, catalog, slug),
            catalog.get(slug),
        ) else {
            return Ok(None);
        };

        // Related articles share at least one tag, capped by config
        let related: Vec<ArticleData> = catalog
            .related(slug, config.related_limit)
            .into_iter()
            .map(|a| ArticleData::new(config, a))
            .collect();

        // JSON-LD goes inside <script>, so it must not be able to close the tag
        let json_ld = serde_json::to_string(&article_json_ld(config, article))?;

        let mut context = self.create_base_context(&meta);
        context.insert("article", &ArticleData::new(config, article));
        context.insert("body", &bodies.get(slug));
        context.insert("related", &related);
        context.insert("json_ld", &escape_script_json(&json_ld));

        self.renderer.render("article.html", &context).map(Some)
    }

    /// Render the privacy page
    pub fn render_privacy(&self) -> Result<String> {
        let meta = PageMetadata::privacy(&self.blog.config);
        let mut context = self.create_base_context(&meta);
        context.insert("privacy", &self.blog.config.privacy);
        self.renderer.render("privacy.html", &context)
    }

    /// Render the not-found page
    pub fn render_not_found(&self) -> Result<String> {
        let meta = PageMetadata::not_found(&self.blog.config);
        let context = self.create_base_context(&meta);
        self.renderer.render("404.html", &context)
    }

    /// Remove `<public>/<dir>/index.html` pages whose directory is no longer
    /// a catalog slug. Fixed pages and copied source assets are kept.
    fn prune_stale_pages(&self, catalog: &Catalog) -> Result<()> {
        let public_dir = &self.blog.public_dir;

        for entry in fs::read_dir(public_dir)
            .with_context(|| format!("Failed to read {:?}", public_dir))?
        {
            let path = entry?.path();
            if !path.is_dir() || !path.join("index.html").is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if catalog.get(name).is_some()
                || FIXED_PAGES.contains(&name)
                || self.blog.source_dir.join(name).exists()
            {
                continue;
            }

            fs::remove_dir_all(&path).with_context(|| format!("Failed to remove {:?}", path))?;
            tracing::info!("Removed stale page: {}", name);
        }

        Ok(())
    }

    /// Copy static files from the source directory, skipping `_`-prefixed entries
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.blog.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        // `_`-prefixed entries (_data, _articles) are inputs, not assets
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('_'))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Preserve the directory layout under public/
            let relative = path.strip_prefix(source_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            tracing::debug!("Copied asset: {:?}", relative);
        }

        Ok(())
    }
}

/// Write a file, creating parent directories
fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}
