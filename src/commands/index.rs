//! Build the post manifest from the content directory

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

use crate::content::{extract_meta, sort_manifest, MetaError, PostRecord};
use crate::Site;

/// Why a single document did not make it into the manifest
#[derive(Debug, Error)]
enum DocumentError {
    #[error(transparent)]
    Meta(#[from] MetaError),

    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of one indexer run
#[derive(Debug, Clone, Default)]
pub struct IndexReport {
    /// Manifest that was written
    pub manifest: PathBuf,
    /// Number of posts written to the manifest
    pub indexed: usize,
    /// Documents without a metadata block
    pub skipped: Vec<String>,
    /// Documents whose metadata could not be read, with the reason
    pub failed: Vec<(String, String)>,
}

/// Scan the content directory and rewrite the manifest
pub fn run(site: &Site) -> Result<IndexReport> {
    let start = std::time::Instant::now();
    let mut report = IndexReport {
        manifest: site.manifest_path.clone(),
        ..Default::default()
    };

    if !site.content_dir.is_dir() {
        tracing::error!("Content directory {:?} does not exist", site.content_dir);
        return Ok(report);
    }

    tracing::info!("Indexing posts in {:?}", site.content_dir);

    let mut posts = Vec::new();

    for path in list_documents(&site.content_dir, &site.config.extension) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match load_document(site, &path, &file_name) {
            Ok(post) => {
                tracing::info!("[OK] {}", file_name);
                posts.push(post);
            }
            Err(DocumentError::Meta(MetaError::Missing)) => {
                tracing::warn!(
                    "[SKIP] {}: no metadata, add <!-- blog-meta: {{ ... }} -->",
                    file_name
                );
                report.skipped.push(file_name);
            }
            Err(e) => {
                tracing::error!("[ERROR] {}: {}", file_name, e);
                report.failed.push((file_name, e.to_string()));
            }
        }
    }

    sort_manifest(&mut posts);
    write_manifest(&site.manifest_path, &posts)?;

    report.indexed = posts.len();
    tracing::info!(
        "Indexed {} posts into {:?} in {:.2}s",
        report.indexed,
        site.manifest_path,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Documents directly inside `dir` ending in `.{extension}`, by filename
fn list_documents(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(&suffix))
        .map(|e| e.into_path())
        .collect()
}

/// Read one document and turn its metadata block into a record
fn load_document(site: &Site, path: &Path, file_name: &str) -> Result<PostRecord, DocumentError> {
    let content = fs::read_to_string(path)?;
    let meta = extract_meta(&content)?;

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let url = format!(
        "{}/{}",
        site.config.content_dir.trim_end_matches('/'),
        file_name
    );

    let post = PostRecord::from_meta(&id, &url, meta).map_err(MetaError::from)?;
    Ok(post)
}

/// Write the manifest, replacing the previous one only once fully written
pub fn write_manifest(path: &Path, posts: &[PostRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, posts)?;

    // Temp files are owner-only; the manifest is served to readers
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    file.as_file().sync_all()?;
    file.persist(path)?;

    tracing::debug!("Wrote manifest {:?}", path);
    Ok(())
}

/// Read a manifest written by [`write_manifest`]
pub fn read_manifest(path: &Path) -> Result<Vec<PostRecord>> {
    let content = fs::read_to_string(path)?;
    let posts = serde_json::from_str(&content)?;
    Ok(posts)
}
