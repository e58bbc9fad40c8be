use serde::Serialize;
use serde_json::json;

pub const PAGE_TITLE: &str = "Media-Node Uptime Tracker by Daksha";
pub const META_DESCRIPTION: &str = "Track media-node uptime with percentages and status bricks.";
const STRUCTURED_DATA_DESCRIPTION: &str = "Monitor media-node uptime and reliability.";

/// Document metadata owned by the mounted dashboard view: title, meta
/// description and one `application/ld+json` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHead {
    pub title: String,
    pub description: String,
    public_url: Option<String>,
}

impl PageHead {
    pub fn new(public_url: Option<String>) -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            description: META_DESCRIPTION.to_string(),
            public_url,
        }
    }

    /// The schema.org `WebApplication` payload. `request_url` is used when no
    /// public URL is configured.
    pub fn structured_data(&self, request_url: &str) -> serde_json::Value {
        json!({
            "@context": "https://schema.org",
            "@type": "WebApplication",
            "name": PAGE_TITLE,
            "applicationCategory": "Utility",
            "description": STRUCTURED_DATA_DESCRIPTION,
            "url": self.public_url.as_deref().unwrap_or(request_url),
        })
    }

    /// [`Self::structured_data`] serialized for embedding inside a `<script>` tag.
    pub fn structured_data_script(&self, request_url: &str) -> String {
        // `<` never appears raw so the payload cannot close the script element.
        self.structured_data(request_url)
            .to_string()
            .replace('<', "\\u003c")
    }
}
