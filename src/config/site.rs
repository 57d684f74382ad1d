//! Site configuration (_feed.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub content_dir: String,
    pub manifest: String,
    pub extension: String,

    // Renderer
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "entradas-blog".to_string(),
            manifest: "posts.json".to_string(),
            extension: "html".to_string(),
            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Feed renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Manifest location, relative to the page that hosts the feed
    pub manifest_path: String,
    pub page_size: usize,
    /// Distance in pixels from the document bottom that loads the next page
    pub scroll_threshold: f64,
    pub entrance_delay_ms: u64,
    /// chrono locale name used for date display
    pub locale: String,
    /// Prefix applied to image paths stored in the manifest
    pub asset_prefix: String,
    pub default_image: String,
    pub card_category_fallback: String,
    pub overlay_category_fallback: String,
    pub author_fallback: String,
    #[serde(default)]
    pub messages: FeedMessages,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            manifest_path: "posts.json".to_string(),
            page_size: 6,
            scroll_threshold: 800.0,
            entrance_delay_ms: 50,
            locale: "es_ES".to_string(),
            asset_prefix: "../".to_string(),
            default_image: "assets/hero-home.png".to_string(),
            card_category_fallback: "VARIOS".to_string(),
            overlay_category_fallback: "ENTRADA".to_string(),
            author_fallback: "Ángel".to_string(),
            messages: FeedMessages::default(),
        }
    }
}

impl FeedConfig {
    /// Image source for a post, falling back to the default asset
    pub fn image_src(&self, image: Option<&str>) -> String {
        match image.map(str::trim).filter(|s| !s.is_empty()) {
            Some(path) => format!("{}{}", self.asset_prefix, path),
            None => self.default_image_src(),
        }
    }

    pub fn default_image_src(&self) -> String {
        format!("{}{}", self.asset_prefix, self.default_image)
    }
}

/// User-visible strings shown by the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedMessages {
    pub error_title: String,
    pub unavailable: String,
    pub unavailable_hint: String,
    pub fetch_failed: String,
    /// `{reason}` and `{manifest}` are substituted
    pub fetch_failed_hint: String,
    pub no_results: String,
    pub preview: String,
    pub read: String,
    pub read_full: String,
}

impl Default for FeedMessages {
    fn default() -> Self {
        Self {
            error_title: "Ocurrió un problema".to_string(),
            unavailable: "El navegador bloquea la carga de datos al abrir el archivo directamente."
                .to_string(),
            unavailable_hint: "Para que el blog funcione, sirve la carpeta con un servidor local \
                (por ejemplo `blogfeed serve`) o súbela a un servidor real. Los navegadores no \
                permiten cargar archivos JSON desde rutas locales (file://)."
                .to_string(),
            fetch_failed: "No se pudieron cargar las entradas del blog.".to_string(),
            fetch_failed_hint:
                "Error: {reason}. Verifica que {manifest} exista en la misma carpeta.".to_string(),
            no_results: "No se encontraron resultados para esta categoría.".to_string(),
            preview: "Vista Previa".to_string(),
            read: "Leer".to_string(),
            read_full: "Leer entrada completa".to_string(),
        }
    }
}
