use serde::{Deserialize, Deserializer, Serialize};

/// One generated result set as returned by the generation service.
///
/// Field names on the wire follow the service payload; the Rust names describe
/// what the front end does with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub pack_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_at: String,
    #[serde(rename = "sentence_nzsl", default, deserialize_with = "null_as_default")]
    pub gloss_text: String,
    #[serde(rename = "sentence_en", default, deserialize_with = "null_as_default")]
    pub summary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_tip: Option<String>,
    #[serde(rename = "pack_content", default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
    #[serde(rename = "pdf_base64", default, skip_serializing_if = "Option::is_none")]
    pub document_payload: Option<String>,
}

impl Pack {
    pub fn has_document(&self) -> bool {
        self.document_payload
            .as_deref()
            .is_some_and(|payload| !payload.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
    #[serde(rename = "phase", default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(rename = "pedagogical_purpose", default, deserialize_with = "null_as_default")]
    pub purpose: String,
    #[serde(rename = "language_focus", default, deserialize_with = "null_as_default")]
    pub focus_tag: String,
    #[serde(rename = "image_data_url", default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl Card {
    /// The image source, if one is present and non-blank.
    pub fn image_src(&self) -> Option<&str> {
        self.image_data
            .as_deref()
            .map(str::trim)
            .filter(|src| !src.is_empty())
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub theme: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

/// The user-editable generation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateForm {
    pub theme: String,
    pub level: String,
    pub keywords: String,
    pub subject: String,
}

impl Default for GenerateForm {
    fn default() -> Self {
        Self {
            theme: String::new(),
            level: DEFAULT_LEVEL.to_string(),
            keywords: String::new(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}

pub const DEFAULT_LEVEL: &str = "ECE";
pub const DEFAULT_SUBJECT: &str = "general";
