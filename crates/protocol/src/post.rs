use crate::query::DEFAULT_CATEGORY;
use serde::{Deserialize, Serialize};

/// A published post as returned by the listing endpoint. Only identity and
/// title are required; older records may lack the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Envelope of the posts listing endpoint. No total count is provided;
/// callers infer continuation from the page length.
#[derive(Debug, Clone, Deserialize)]
pub struct PostListing {
    pub posts: Vec<Post>,
}
