//! Generate static files

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Blog;

/// Load the catalog and article bodies, then write the whole site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(blog);
    let catalog = loader.load_catalog()?;
    let bodies = loader.load_bodies(&catalog)?;

    tracing::info!(
        "Loaded {} articles ({} with bodies, {} tags)",
        catalog.len(),
        bodies.len(),
        catalog.tags().len()
    );

    let generator = Generator::new(blog)?;
    generator.generate(&catalog, &bodies)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
