//! Page metadata (title, description, Open Graph) and JSON-LD structured data

use serde::Serialize;
use serde_json::json;

use crate::config::SiteConfig;
use crate::content::{Article, Catalog};
use crate::helpers::{article_url, full_url_for, site_url};

/// Head metadata for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    /// Full `<title>`
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_title: String,
    pub og_type: String,
    pub site_name: String,
    pub locale: String,
    pub keywords: Vec<String>,
    pub robots: String,
}

impl PageMetadata {
    fn base(config: &SiteConfig, title: String, og_title: String, description: String) -> Self {
        Self {
            title,
            og_title,
            description,
            canonical_url: site_url(config),
            og_type: "website".to_string(),
            site_name: config.title.clone(),
            locale: config.locale.clone(),
            keywords: Vec::new(),
            robots: "index, follow".to_string(),
        }
    }

    /// Metadata for the home page; keywords are every tag in the catalog
    pub fn home(config: &SiteConfig, catalog: &Catalog) -> Self {
        let title = config.home_title();
        let mut meta = Self::base(config, title.clone(), title, config.description.clone());
        meta.keywords = if config.keywords.is_empty() {
            catalog.tags().into_iter().map(String::from).collect()
        } else {
            config.keywords.clone()
        };
        meta
    }

    /// Metadata for an article page
    pub fn article(config: &SiteConfig, article: &Article) -> Self {
        let mut meta = Self::base(
            config,
            config.page_title(&article.title),
            article.title.clone(),
            article.description.clone(),
        );
        meta.canonical_url = article_url(config, &article.slug);
        meta.og_type = "article".to_string();
        meta.keywords = article.tags.clone();
        meta
    }

    /// Metadata for the article at `slug`; `None` means the page does not
    /// exist and the caller must answer "not found"
    pub fn for_article(config: &SiteConfig, catalog: &Catalog, slug: &str) -> Option<Self> {
        catalog.get(slug).map(|article| Self::article(config, article))
    }

    /// Metadata for the privacy page
    pub fn privacy(config: &SiteConfig) -> Self {
        let mut meta = Self::base(
            config,
            config.page_title("Privacy Policy"),
            "Privacy Policy".to_string(),
            format!("Privacy policy for {}", host_of(&config.url)),
        );
        meta.canonical_url = full_url_for(config, "privacy/");
        meta
    }

    /// Metadata for the not-found page
    pub fn not_found(config: &SiteConfig) -> Self {
        let mut meta = Self::base(
            config,
            config.page_title("Page Not Found"),
            "Page Not Found".to_string(),
            "This page could not be found.".to_string(),
        );
        meta.robots = "noindex".to_string();
        meta
    }
}

/// schema.org `Article` structured data for an article page
pub fn article_json_ld(config: &SiteConfig, article: &Article) -> serde_json::Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": article.title,
        "description": article.description,
        "datePublished": article.date.as_str(),
        "url": article_url(config, &article.slug),
        "author": {
            "@type": "Person",
            "name": config.author,
            "url": config.author_url,
        },
        "publisher": {
            "@type": "Organization",
            "name": config.publisher,
            "url": config.publisher_url,
        },
        "keywords": article.tags.join(", "),
    })
}

/// Host part of a URL, for display
fn host_of(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_article_metadata() {
        let config = SiteConfig::default();
        let meta = PageMetadata::for_article(&config, &catalog(), "git-workflow-guide").unwrap();

        assert_eq!(
            meta.title,
            "The Complete Git Workflow Guide for Teams in 2026 | Elunari Blog"
        );
        assert_eq!(meta.og_title, "The Complete Git Workflow Guide for Teams in 2026");
        assert_eq!(meta.og_type, "article");
        assert_eq!(meta.canonical_url, "https://blog.elunari.uk/git-workflow-guide");
        assert_eq!(meta.keywords, vec!["Git", "DevOps", "Team Workflow"]);
        assert_eq!(meta.site_name, "Elunari Blog");
    }

    #[test]
    fn test_article_metadata_miss() {
        let config = SiteConfig::default();
        assert!(PageMetadata::for_article(&config, &catalog(), "nonexistent-slug").is_none());
    }

    #[test]
    fn test_home_metadata_uses_catalog_tags() {
        let config = SiteConfig::default();
        let catalog = catalog();
        let meta = PageMetadata::home(&config, &catalog);
        assert_eq!(meta.title, "Elunari Blog | Developer Articles & Guides");
        assert_eq!(meta.canonical_url, "https://blog.elunari.uk");
        assert_eq!(meta.og_type, "website");
        assert_eq!(meta.keywords.len(), catalog.tags().len());
    }

    #[test]
    fn test_privacy_and_not_found() {
        let config = SiteConfig::default();
        let privacy = PageMetadata::privacy(&config);
        assert_eq!(privacy.description, "Privacy policy for blog.elunari.uk");
        assert_eq!(privacy.canonical_url, "https://blog.elunari.uk/privacy/");

        let missing = PageMetadata::not_found(&config);
        assert_eq!(missing.robots, "noindex");
    }

    #[test]
    fn test_article_json_ld() {
        let config = SiteConfig::default();
        let catalog = catalog();
        let article = catalog.get("docker-essentials-developers").unwrap();
        let ld = article_json_ld(&config, article);

        assert_eq!(ld["@type"], "Article");
        assert_eq!(ld["datePublished"], "February 5, 2026");
        assert_eq!(ld["url"], "https://blog.elunari.uk/docker-essentials-developers");
        assert_eq!(ld["author"]["name"], "Mark Kenneth Badilla");
        assert_eq!(ld["publisher"]["name"], "Elunari");
        assert_eq!(ld["keywords"], "Docker, DevOps, Infrastructure");
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://blog.elunari.uk"), "blog.elunari.uk");
        assert_eq!(host_of("http://example.com/blog/"), "example.com");
        assert_eq!(host_of("example.com"), "example.com");
    }
}
