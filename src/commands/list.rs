//! List catalog content

use anyhow::{bail, Result};
use std::fmt::Write;

use crate::content::loader::ContentLoader;
use crate::content::Catalog;
use crate::Blog;

/// List catalog content by type
pub fn run(blog: &Blog, content_type: &str, slug: Option<&str>) -> Result<()> {
    let catalog = ContentLoader::new(blog).load_catalog()?;
    let output = render(&catalog, content_type, slug, blog.config.related_limit)?;
    print!("{}", output);
    Ok(())
}

/// Render a listing as text
pub fn render(
    catalog: &Catalog,
    content_type: &str,
    slug: Option<&str>,
    related_limit: usize,
) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "article" | "articles" => {
            writeln!(out, "Articles ({}):", catalog.len())?;
            for article in catalog {
                let marker = if article.featured { " *" } else { "" };
                writeln!(
                    out,
                    "  {} - {} [{}]{}",
                    article.date.day().format("%Y-%m-%d"),
                    article.title,
                    article.slug,
                    marker
                )?;
            }
        }
        "slug" | "slugs" | "route" | "routes" => {
            for slug in catalog.slugs() {
                writeln!(out, "{}", slug)?;
            }
        }
        "tag" | "tags" => {
            let tags = catalog.tag_counts();
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        "related" => {
            let Some(slug) = slug else {
                bail!("Usage: list related <slug>");
            };
            if catalog.get(slug).is_none() {
                bail!("No article with slug: {}", slug);
            }
            let related = catalog.related(slug, related_limit);
            writeln!(out, "Related to {} ({}):", slug, related.len())?;
            for article in related {
                writeln!(out, "  {} [{}]", article.title, article.slug)?;
            }
        }
        _ => {
            bail!(
                "Unknown type: {}. Available: articles, slugs, tags, related",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_articles() {
        let catalog = Catalog::builtin().unwrap();
        let out = render(&catalog, "articles", None, 3).unwrap();
        assert!(out.starts_with("Articles (11):"));
        assert!(out.contains("  2026-02-20 - 25 Essential Free Developer Tools You Should Be Using in 2026 [essential-developer-tools-2026] *"));
    }

    #[test]
    fn test_list_slugs() {
        let catalog = Catalog::builtin().unwrap();
        let out = render(&catalog, "slugs", None, 3).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, catalog.slugs());
    }

    #[test]
    fn test_list_tags() {
        let catalog = Catalog::builtin().unwrap();
        let out = render(&catalog, "tags", None, 3).unwrap();
        assert!(out.contains("  DevOps (2)"));
        assert!(out.contains("  Frontend (2)"));
    }

    #[test]
    fn test_list_related() {
        let catalog = Catalog::builtin().unwrap();
        let out = render(&catalog, "related", Some("react-performance-optimization"), 3).unwrap();
        assert!(out.contains("[css-architecture-scalable-apps]"));
        assert!(!out.contains("[react-performance-optimization]"));
    }

    #[test]
    fn test_list_errors() {
        let catalog = Catalog::builtin().unwrap();
        assert!(render(&catalog, "related", None, 3).is_err());
        assert!(render(&catalog, "related", Some("nonexistent-slug"), 3).is_err());
        assert!(render(&catalog, "categories", None, 3).is_err());
    }
}
