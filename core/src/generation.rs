use serde_json::Value;

use crate::catalog::activity_for_subject;
use crate::error::{AppError, TransportError, GENERIC_FAILURE_MESSAGE, UNREADABLE_PACK_MESSAGE};
use crate::pack::{GenerateForm, GenerateRequest, Pack};

pub const IDLE_BUTTON_LABEL: &str = "Generate Pack";
pub const DEFAULT_BUSY_LABEL: &str = "Generating pack…";

/// Raw answer from the generation endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceReply {
    pub status: u16,
    pub body: String,
}

impl ServiceReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The remote pack generator.
#[allow(async_fn_in_trait)]
pub trait GenerationService {
    async fn submit(&self, request: &GenerateRequest) -> Result<ServiceReply, TransportError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    Generated { pack_id: String },
    /// Another request was still in flight; nothing was sent.
    Busy,
    Rejected(AppError),
    Failed(AppError),
}

pub fn build_request(form: &GenerateForm) -> Result<GenerateRequest, AppError> {
    let theme = form.theme.trim();
    if theme.is_empty() {
        return Err(AppError::Validation);
    }
    let keywords = form.keywords.trim();
    let subject = form.subject.trim();
    Ok(GenerateRequest {
        theme: theme.to_string(),
        level: form.level.trim().to_string(),
        keywords: (!keywords.is_empty()).then(|| keywords.to_string()),
        subject: subject.to_string(),
        activity: activity_for_subject(subject).map(str::to_string),
    })
}

/// Picks the message shown for a failed response: a structured `detail`
/// first, then the raw body, then the generic message.
pub fn failure_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => GENERIC_FAILURE_MESSAGE.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                GENERIC_FAILURE_MESSAGE.to_string()
            } else {
                text.to_string()
            }
        }
    }
}

pub fn transport_message(error: &TransportError) -> String {
    let message = error.0.trim();
    if message.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

pub fn parse_reply(reply: &ServiceReply) -> Result<Pack, AppError> {
    if !reply.is_success() {
        return Err(AppError::Transport(failure_message(&reply.body)));
    }
    serde_json::from_str::<Pack>(&reply.body)
        .map_err(|_| AppError::Transport(UNREADABLE_PACK_MESSAGE.to_string()))
}
