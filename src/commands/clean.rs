//! Remove the generated manifest

use anyhow::Result;
use std::fs;

use crate::Site;

/// Delete the manifest if it exists
pub fn run(site: &Site) -> Result<()> {
    if site.manifest_path.exists() {
        fs::remove_file(&site.manifest_path)?;
        tracing::info!("Deleted: {:?}", site.manifest_path);
    }

    Ok(())
}
