//! Content module - the article catalog, its loader and body rendering

mod article;
mod catalog;
pub mod loader;
mod markdown;

pub use article::{Article, InvalidDate, PublishDate};
pub use catalog::{Catalog, CatalogError};
pub use markdown::MarkdownRenderer;
