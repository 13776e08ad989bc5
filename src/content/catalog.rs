//! Article catalog - the fixed, read-only set of articles and its queries

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::Article;

/// The site's own article list, compiled into the binary
const BUILTIN_ARTICLES: &str = include_str!("../../data/articles.yml");

/// Errors raised while assembling a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    /// Slugs are lowercase kebab-case (`[a-z0-9]+(-[a-z0-9]+)*`). Other
    /// URL-safe forms such as `my_post` or `v2.0-notes` are rejected too.
    #[error("invalid slug {0:?}: expected lowercase kebab-case")]
    InvalidSlug(String),

    #[error("more than one featured article: {0} and {1}")]
    MultipleFeatured(String, String),

    #[error("failed to parse article list: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Immutable, slug-indexed article collection.
///
/// Iteration and every ordered query follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: IndexMap<String, Article>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or malformed slugs and more
    /// than one featured article
    pub fn new(articles: Vec<Article>) -> Result<Self, CatalogError> {
        let mut map = IndexMap::with_capacity(articles.len());
        let mut featured: Option<String> = None;

        for article in articles {
            if !is_valid_slug(&article.slug) {
                return Err(CatalogError::InvalidSlug(article.slug));
            }
            if map.contains_key(&article.slug) {
                return Err(CatalogError::DuplicateSlug(article.slug));
            }
            if article.featured {
                if let Some(first) = &featured {
                    return Err(CatalogError::MultipleFeatured(
                        first.clone(),
                        article.slug,
                    ));
                }
                featured = Some(article.slug.clone());
            }
            map.insert(article.slug.clone(), article);
        }

        tracing::debug!("Catalog built with {} articles", map.len());
        Ok(Self { articles: map })
    }

    /// Parse a YAML sequence of articles and build a catalog from it
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let articles: Vec<Article> = serde_yaml::from_str(yaml)?;
        Self::new(articles)
    }

    /// The built-in article list
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_ARTICLES)
    }

    /// Look up an article by slug. `None` is a routing miss.
    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.articles.get(slug)
    }

    /// Every slug, in catalog order
    pub fn slugs(&self) -> Vec<&str> {
        self.articles.keys().map(String::as_str).collect()
    }

    /// Every distinct tag, sorted ascending.
    ///
    /// Order is by Unicode code point (UTF-8 bytes). This matches a UTF-16
    /// code unit sort for every tag inside the Basic Multilingual Plane;
    /// tags with astral characters (emoji) may sort differently.
    pub fn tags(&self) -> Vec<&str> {
        self.articles
            .values()
            .flat_map(|a| a.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tags with the number of articles carrying each, sorted by tag
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for article in self.articles.values() {
            let distinct: BTreeSet<&str> = article.tags.iter().map(String::as_str).collect();
            for tag in distinct {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    /// Other articles sharing at least one tag with `slug`, in catalog
    /// order, at most `limit` of them. Unknown slugs have no relations.
    pub fn related(&self, slug: &str, limit: usize) -> Vec<&Article> {
        let Some(target) = self.get(slug) else {
            return Vec::new();
        };

        self.articles
            .values()
            .filter(|a| a.slug != target.slug && a.shares_tag_with(target))
            .take(limit)
            .collect()
    }

    /// The homepage hero article, if one is flagged
    pub fn featured(&self) -> Option<&Article> {
        self.articles.values().find(|a| a.featured)
    }

    /// Every article not flagged as featured, in catalog order
    pub fn unfeatured(&self) -> Vec<&Article> {
        self.articles.values().filter(|a| !a.featured).collect()
    }

    /// Iterate over articles in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Article;
    type IntoIter = indexmap::map::Values<'a, String, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.values()
    }
}

/// Lowercase ASCII letters and digits in hyphen-separated runs
fn is_valid_slug(slug: &str) -> bool {
    slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    })
}
