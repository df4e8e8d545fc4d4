use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

/// One search hit. Field names follow the wire format of the search API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The slice of the search response body we care about.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub hits: Vec<Story>,
    #[serde(rename = "nbHits", default)]
    pub nb_hits: Option<u64>,
}

/// The API sends `null` for missing urls, titles and counters.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Builds `<endpoint>?query=<term>[&hitsPerPage=<n>]`.
///
/// The term is form-encoded; `hits_per_page` is only appended when set.
pub fn query_url(endpoint: &Url, term: &str, hits_per_page: Option<u32>) -> String {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("query", term);
        if let Some(n) = hits_per_page {
            pairs.append_pair("hitsPerPage", &n.to_string());
        }
    }
    url.to_string()
}
