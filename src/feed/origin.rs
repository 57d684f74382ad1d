//! Page origin checks

use url::Url;

/// The address the feed page was loaded from
#[derive(Debug, Clone)]
pub struct PageOrigin {
    url: Url,
}

impl PageOrigin {
    pub fn parse(s: &str) -> Result<Self, url::ParseError> {
        Ok(Self { url: Url::parse(s)? })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Pages opened straight from disk cannot fetch the manifest
    pub fn is_served(&self) -> bool {
        self.url.scheme() != "file"
    }

    /// Resolve the manifest location relative to the page
    pub fn manifest_url(&self, manifest_path: &str) -> Result<Url, url::ParseError> {
        self.url.join(manifest_path)
    }
}

impl From<Url> for PageOrigin {
    fn from(url: Url) -> Self {
        Self { url }
    }
}
