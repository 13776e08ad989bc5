//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub language: String,
    pub locale: String,

    // Authorship (JSON-LD)
    pub author: String,
    pub author_url: String,
    pub publisher: String,
    pub publisher_url: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    /// Article list, relative to `source_dir`; the built-in list is used when absent
    pub articles_file: String,
    /// Markdown bodies (`<slug>.md`), relative to `source_dir`
    pub bodies_dir: String,

    // Article page
    pub related_limit: usize,
    pub highlight_theme: String,
    pub line_numbers: bool,

    /// AdSense publisher id (`ca-pub-…`); `~` turns the ad script off
    pub adsense_client: Option<String>,

    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub privacy: PrivacyConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Elunari Blog".to_string(),
            tagline: "Developer Articles & Guides".to_string(),
            description: "In-depth articles on software engineering, developer tools, TypeScript, React, Docker, Git workflows, and building modern web applications.".to_string(),
            keywords: Vec::new(),
            language: "en".to_string(),
            locale: "en_US".to_string(),

            author: "Mark Kenneth Badilla".to_string(),
            author_url: "https://marks-portfolio.elunari.uk".to_string(),
            publisher: "Elunari".to_string(),
            publisher_url: "https://elunari.uk".to_string(),

            url: "https://blog.elunari.uk".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            articles_file: "_data/articles.yml".to_string(),
            bodies_dir: "_articles".to_string(),

            related_limit: 3,
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,

            adsense_client: Some("ca-pub-7465302364385209".to_string()),

            sitemap: SitemapConfig::default(),
            links: LinksConfig::default(),
            privacy: PrivacyConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Full `<title>` for a page: "<page> | <site>"
    pub fn page_title(&self, page: &str) -> String {
        format!("{} | {}", page, self.title)
    }

    /// `<title>` of the home page: "<site> | <tagline>"
    pub fn home_title(&self) -> String {
        if self.tagline.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.tagline)
        }
    }
}

/// Static sitemap values; none of these are computed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    pub home_changefreq: String,
    pub home_priority: f32,
    pub article_changefreq: String,
    pub article_priority: f32,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            home_changefreq: "weekly".to_string(),
            home_priority: 1.0,
            article_changefreq: "monthly".to_string(),
            article_priority: 0.8,
        }
    }
}

/// Outbound links shown in the header, footer and call-to-action cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub tools: String,
    pub portfolio: String,
    pub support: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            tools: "https://tools.elunari.uk".to_string(),
            portfolio: "https://marks-portfolio.elunari.uk".to_string(),
            support: "https://buymeacoffee.com/moonlitcapy".to_string(),
        }
    }
}

/// Privacy page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    pub last_updated: String,
    pub contact: String,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            last_updated: "February 21, 2026".to_string(),
            contact: "https://marks-portfolio.elunari.uk".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Elunari Blog");
        assert_eq!(config.url, "https://blog.elunari.uk");
        assert_eq!(config.related_limit, 3);
        assert_eq!(config.sitemap.article_changefreq, "monthly");
        assert_eq!(config.sitemap.home_priority, 1.0);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://example.com
related_limit: 5
sitemap:
  article_priority: 0.5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.url, "https://example.com");
        assert_eq!(config.related_limit, 5);
        assert_eq!(config.sitemap.article_priority, 0.5);
        assert_eq!(config.sitemap.article_changefreq, "monthly");
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_adsense_client() {
        let config = SiteConfig::default();
        assert_eq!(config.adsense_client.as_deref(), Some("ca-pub-7465302364385209"));

        let config: SiteConfig = serde_yaml::from_str("adsense_client: ca-pub-1\n").unwrap();
        assert_eq!(config.adsense_client.as_deref(), Some("ca-pub-1"));

        let config: SiteConfig = serde_yaml::from_str("adsense_client: ~\n").unwrap();
        assert_eq!(config.adsense_client, None);
    }

    #[test]
    fn test_titles() {
        let config = SiteConfig::default();
        assert_eq!(config.page_title("Privacy Policy"), "Privacy Policy | Elunari Blog");
        assert_eq!(config.home_title(), "Elunari Blog | Developer Articles & Guides");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(dir.path().join("_config.yml")).is_err());
    }
}
