//! Article record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::helpers::parse_date;

/// Publication date that could not be read as a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised publication date {0:?} (expected e.g. \"February 20, 2026\" or \"2026-02-20\")")]
pub struct InvalidDate(pub String);

/// Publication date as authored, plus the calendar day it names.
///
/// The authored text is what pages display; the parsed day feeds the
/// sitemap's `lastmod` and any chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublishDate {
    day: NaiveDate,
    text: String,
}

impl PublishDate {
    /// Parse an authored date string
    pub fn parse(text: &str) -> Result<Self, InvalidDate> {
        let text = text.trim();
        let day = parse_date(text).ok_or_else(|| InvalidDate(text.to_string()))?;
        Ok(Self {
            day,
            text: text.to_string(),
        })
    }

    /// The date exactly as authored
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The calendar day
    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for PublishDate {
    type Error = InvalidDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PublishDate> for String {
    fn from(date: PublishDate) -> Self {
        date.text
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// URL-safe primary key
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Publication date
    pub date: PublishDate,

    /// Display string such as "8 min read"; authored, never computed
    pub read_time: String,

    /// Tags in authored order (not deduplicated)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Homepage hero placement
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    /// Create an article with no description, read time or tags
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: PublishDate) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            date,
            read_time: String::new(),
            tags: Vec::new(),
            featured: false,
        }
    }

    /// Whether this article carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the two articles have at least one tag in common
    pub fn shares_tag_with(&self, other: &Article) -> bool {
        self.tags.iter().any(|t| other.has_tag(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form_date() {
        let date = PublishDate::parse("February 20, 2026").unwrap();
        assert_eq!(date.day(), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert_eq!(date.as_str(), "February 20, 2026");
    }

    #[test]
    fn test_parse_single_digit_day() {
        let date = PublishDate::parse("March 1, 2026").unwrap();
        assert_eq!(date.day(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date() {
        let date = PublishDate::parse("2026-02-05").unwrap();
        assert_eq!(date.day(), NaiveDate::from_ymd_opt(2026, 2, 5).unwrap());
        assert_eq!(date.to_string(), "2026-02-05");
    }

    #[test]
    fn test_reject_garbage_date() {
        let err = PublishDate::parse("sometime soon").unwrap_err();
        assert_eq!(err, InvalidDate("sometime soon".to_string()));
    }

    #[test]
    fn test_deserialize_article() {
        let yaml = r#"
slug: git-workflow-guide
title: The Complete Git Workflow Guide for Teams in 2026
description: Branching strategies.
date: February 10, 2026
readTime: 12 min read
tags: [Git, DevOps, Team Workflow]
"#;
        let article: Article = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(article.slug, "git-workflow-guide");
        assert_eq!(article.read_time, "12 min read");
        assert_eq!(article.tags, vec!["Git", "DevOps", "Team Workflow"]);
        assert!(!article.featured);
        assert_eq!(article.date.as_str(), "February 10, 2026");
    }

    #[test]
    fn test_deserialize_rejects_bad_date() {
        let yaml = r#"
slug: broken
title: Broken
description: ""
date: not a date
readTime: 1 min read
"#;
        let result: Result<Article, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_keeps_authored_date() {
        let article = Article::new("a", "A", PublishDate::parse("Feb 2, 2026").unwrap());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["date"], "Feb 2, 2026");
        assert_eq!(json["readTime"], "");
    }

    #[test]
    fn test_shares_tag_with() {
        let date = PublishDate::parse("2026-01-01").unwrap();
        let mut a = Article::new("a", "A", date.clone());
        a.tags = vec!["React".into(), "Frontend".into()];
        let mut b = Article::new("b", "B", date.clone());
        b.tags = vec!["CSS".into(), "Frontend".into()];
        let mut c = Article::new("c", "C", date);
        c.tags = vec!["Python".into()];

        assert!(a.shares_tag_with(&b));
        assert!(!a.shares_tag_with(&c));
        assert!(!c.shares_tag_with(&Article::new("d", "D", c.date.clone())));
    }
}
