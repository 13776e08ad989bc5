//! Configuration module

mod site;

pub use site::LinksConfig;
pub use site::PrivacyConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
