//! XML sitemap (sitemaps.org 0.9)

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Catalog;
use crate::helpers::{article_url, date_w3c, date_xml, escape_xml, site_url};

/// One `<url>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    /// W3C date or datetime
    pub lastmod: String,
    pub changefreq: String,
    pub priority: f32,
}

/// The site root followed by every article, in catalog order
#[derive(Debug, Clone)]
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    /// Build the sitemap. `now` stamps the root entry; articles carry their
    /// publication day.
    pub fn build(config: &SiteConfig, catalog: &Catalog, now: DateTime<Utc>) -> Self {
        let settings = &config.sitemap;
        let mut entries = Vec::with_capacity(catalog.len() + 1);

        entries.push(SitemapEntry {
            loc: site_url(config),
            lastmod: date_xml(&now),
            changefreq: settings.home_changefreq.clone(),
            priority: settings.home_priority,
        });

        entries.extend(catalog.iter().map(|article| SitemapEntry {
            loc: article_url(config, &article.slug),
            lastmod: date_w3c(article.date.day()),
            changefreq: settings.article_changefreq.clone(),
            priority: settings.article_priority,
        }));

        Self { entries }
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    /// Render as XML
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                escape_xml(&entry.changefreq)
            ));
            xml.push_str(&format!(
                "    <priority>{}</priority>\n",
                format_priority(entry.priority)
            ));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Configured priority as written, keeping at least one decimal place
fn format_priority(priority: f32) -> String {
    if priority.fract() == 0.0 {
        format!("{:.1}", priority)
    } else {
        priority.to_string()
    }
}
