//! Document API records
//!
//! Wire shapes exchanged with the document-management API. The server owns
//! these records; the client only reads them, except for the create payload.
//! Both list records keep unknown fields in `extra` so nothing the server
//! adds is lost when a record is cloned around the UI.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A server-side tag used to group documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored document: metadata plus the key of its page image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Stored filename of the page image under `/uploads`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Title to show in lists
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "Untitled Document"
        } else {
            title
        }
    }

    /// The stored image key, if the record has a usable one
    pub fn stored_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Metadata sent when creating a document record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub path: String,
    pub created_by: i64,
}

/// Body of `POST /api/v1/documents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub document: NewDocument,
}

impl CreateDocumentRequest {
    pub fn new(title: impl Into<String>, path: impl Into<String>, created_by: i64) -> Self {
        Self {
            document: NewDocument {
                title: title.into(),
                path: path.into(),
                created_by,
            },
        }
    }
}

/// What the client learned from a successful create call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedDocument {
    /// Server id, when the response body carried one
    pub id: Option<String>,
}

impl CreatedDocument {
    /// Pull an id out of a create response body.
    ///
    /// Accepts `{"id": ..}` and `{"document": {"id": ..}}`. Anything else,
    /// including an empty body, yields no id.
    pub fn from_body(body: &str) -> Self {
        let id = serde_json::from_str::<Value>(body).ok().and_then(|value| {
            value
                .get("id")
                .or_else(|| value.get("document").and_then(|d| d.get("id")))
                .and_then(value_to_id)
        });
        Self { id }
    }
}

/// Decode a list endpoint body. A JSON value that is not an array is
/// treated as an empty list.
pub fn decode_list<T>(body: &str) -> Result<Vec<T>, serde_json::Error>
where
    T: for<'de> Deserialize<'de>,
{
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items.into_iter().map(serde_json::from_value).collect(),
        _ => Ok(Vec::new()),
    }
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_id(&value).ok_or_else(|| serde::de::Error::custom("id must be a string or number"))
}
