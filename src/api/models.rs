//! Wire types for the Felt API and the session derived from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"data": ...}` wrapper around every Felt response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateMapRequest<'a> {
    pub title: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MapData {
    pub id: String,
    pub attributes: MapAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MapAttributes {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LayerUploadRequest<'a> {
    pub file_names: [&'a str; 1],
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LayerUploadData {
    pub attributes: LayerUploadAttributes,
}

/// Presigned upload grant for one layer.
#[derive(Debug, Deserialize)]
pub(crate) struct LayerUploadAttributes {
    pub layer_id: String,
    pub url: String,
    #[serde(default)]
    pub presigned_attributes: serde_json::Map<String, Value>,
}

impl LayerUploadAttributes {
    /// Presigned attributes as multipart text fields.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.presigned_attributes
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FinishUploadRequest<'a> {
    pub filename: &'a str,
}

/// The map a client is currently working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSession {
    /// Felt map id.
    pub map_id: String,
    /// URL for browsing the map.
    pub map_url: String,
    /// URL for embedding the map in an iframe.
    pub embed_url: String,
}

impl MapSession {
    /// Build a session, deriving the embed URL from the map URL.
    pub fn new(map_id: impl Into<String>, map_url: impl Into<String>) -> Self {
        let map_url = map_url.into();
        Self {
            map_id: map_id.into(),
            embed_url: embed_url_for(&map_url),
            map_url,
        }
    }
}

/// First `/map/` becomes `/embed/map/`; anything else is left alone.
pub fn embed_url_for(map_url: &str) -> String {
    map_url.replacen("/map/", "/embed/map/", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embed_url_replaces_once() {
        assert_eq!(
            embed_url_for("https://felt.com/map/m1"),
            "https://felt.com/embed/map/m1"
        );
        assert_eq!(
            embed_url_for("https://felt.com/map/Demo-map/x"),
            "https://felt.com/embed/map/Demo-map/x"
        );
        assert_eq!(
            embed_url_for("https://felt.com/map/a/map/b"),
            "https://felt.com/embed/map/a/map/b"
        );
        assert_eq!(embed_url_for("https://felt.com/m1"), "https://felt.com/m1");
    }

    #[test]
    fn test_layer_request_shape() {
        let body = serde_json::to_value(LayerUploadRequest {
            file_names: ["dataframe.csv"],
            name: "DataFrame",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"file_names": ["dataframe.csv"], "name": "DataFrame"})
        );
    }

    #[test]
    fn test_form_fields_keep_service_order() {
        let attrs: LayerUploadAttributes = serde_json::from_str(
            r#"{
                "layer_id": "l1",
                "url": "https://s3.example/bucket",
                "presigned_attributes": {
                    "success_action_status": 201,
                    "key": "uploads/l1",
                    "policy": "p0"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            attrs.form_fields(),
            vec![
                ("success_action_status".to_string(), "201".to_string()),
                ("key".to_string(), "uploads/l1".to_string()),
                ("policy".to_string(), "p0".to_string()),
            ]
        );
    }
}
