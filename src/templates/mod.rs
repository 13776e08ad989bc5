//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary; there is no theme directory.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Article;
use crate::helpers::{date_w3c, url_for};

/// Stylesheet written to `<public_dir>/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("index.html", include_str!("site/index.html")),
            ("article.html", include_str!("site/article.html")),
            ("privacy.html", include_str!("site/privacy.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub root: String,
    pub language: String,
    pub tools_url: String,
    pub portfolio_url: String,
    pub support_url: String,
    pub adsense_client: Option<String>,
    pub year: i32,
}

impl SiteData {
    pub fn new(config: &SiteConfig, year: i32) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            root: url_for(config, ""),
            language: config.language.clone(),
            tools_url: config.links.tools.clone(),
            portfolio_url: config.links.portfolio.clone(),
            support_url: config.links.support.clone(),
            adsense_client: config
                .adsense_client
                .clone()
                .filter(|client| !client.trim().is_empty()),
            year,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub slug: String,
    pub path: String,
    pub title: String,
    pub description: String,
    /// Date as authored
    pub date: String,
    /// Date for `<time datetime>`
    pub date_iso: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub featured: bool,
}

impl ArticleData {
    pub fn new(config: &SiteConfig, article: &Article) -> Self {
        Self {
            slug: article.slug.clone(),
            path: url_for(config, &article.slug),
            title: article.title.clone(),
            description: article.description.clone(),
            date: article.date.to_string(),
            date_iso: date_w3c(article.date.day()),
            read_time: article.read_time.clone(),
            tags: article.tags.clone(),
            featured: article.featured,
        }
    }
}
