use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::pack::Pack;

pub const DOCUMENT_MIME: &str = "application/pdf";
pub const DOCUMENT_EXTENSION: &str = "pdf";
const FALLBACK_THEME: &str = "tohu-kaiako";
const FALLBACK_SLUG: &str = "learning-pack";

/// A pack's rendered document, ready to hand to the browser as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentExport {
    pub file_name: String,
    pub mime: &'static str,
    pub payload: String,
}

impl DocumentExport {
    pub fn from_pack(pack: &Pack) -> Option<Self> {
        if !pack.has_document() {
            return None;
        }
        let payload = pack.document_payload.as_deref()?.trim().to_string();
        Some(Self {
            file_name: document_file_name(&pack.theme),
            mime: DOCUMENT_MIME,
            payload,
        })
    }

    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.payload.as_bytes())
    }
}

/// Lowercases the theme and collapses every run of non-alphanumeric ASCII
/// characters into a single `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut in_gap = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

pub fn document_file_name(theme: &str) -> String {
    let source = if theme.is_empty() { FALLBACK_THEME } else { theme };
    let slug = slugify(source);
    let stem = if slug.is_empty() { FALLBACK_SLUG } else { slug.as_str() };
    format!("{stem}.{DOCUMENT_EXTENSION}")
}
