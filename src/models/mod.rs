use serde::{Deserialize, Deserializer, Serialize};

/// Namespace prefix carried by every id this add-on serves
pub const ID_PREFIX: &str = "openmusic:";

/// The single search catalog exposed by the add-on
pub const CATALOG_ID: &str = "openmusiccat";

/// Stremio content type used for catalog items and metas
pub const CONTENT_TYPE: &str = "tv";

const CATALOG_ITEM_NAME: &str = "Click for Music Results";
const ARTWORK_URL: &str = "https://cdn-az.allevents.in/banners/18914930-3283-11e9-8faf-bbc45c200318-rimg-w300-h300-gmir.jpg";

// ============================================================================
// Add-on protocol types
// ============================================================================

/// A playable stream returned to the add-on host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stream {
    pub title: String,
    pub url: String,
}

/// Catalog entry representing one search query
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub poster: String,
    pub poster_shape: String,
}

impl MetaPreview {
    /// Synthetic item whose id carries the encoded query
    pub fn search_item(id: String) -> Self {
        Self {
            id,
            item_type: CONTENT_TYPE.to_string(),
            name: CATALOG_ITEM_NAME.to_string(),
            poster: ARTWORK_URL.to_string(),
            poster_shape: "square".to_string(),
        }
    }
}

/// Meta object shown when the user opens a catalog item
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetaDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub logo: String,
}

impl MetaDetail {
    pub fn for_query(id: String, query: String) -> Self {
        Self {
            id,
            item_type: CONTENT_TYPE.to_string(),
            name: query,
            logo: ARTWORK_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub meta: MetaDetail,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub streams: Vec<Stream>,
    /// Seconds the host may cache this response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_max_age: Option<u64>,
}

// ============================================================================
// FilePursuit API Types
// ============================================================================

/// One record of a FilePursuit search response
///
/// Every field is optional and accepts strings or numbers, so one odd record can
/// be skipped without losing the rest of the response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub file: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reg_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub filesize: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub filetype: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
}

/// Accepts a string, number or bool; empty strings, nulls and anything else become `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

impl SearchRecord {
    /// Builds the stream for this record, or `None` when it carries no link
    pub fn into_stream(self) -> Option<Stream> {
        // FilePursuit escapes slashes in links; the backslashes are dropped, not unescaped
        let url = self.link?.replace('\\', "");

        let mut title = format!(
            "{}\n{}",
            self.file.unwrap_or_default(),
            self.reg_date.unwrap_or_default()
        );
        for extra in [self.filesize, self.filetype].into_iter().flatten() {
            title.push_str(" | ");
            title.push_str(&extra);
        }

        Some(Stream { title, url })
    }
}
