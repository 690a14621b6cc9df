pub mod catalog;
pub mod controller;
pub mod error;
pub mod export;
pub mod generation;
pub mod history;
pub mod history_store;
pub mod identity;
pub mod pack;
pub mod render;
pub mod store;
pub mod suggestion;
pub mod view;

pub use catalog::{activity_for_subject, Choice, Suggestion, LEVEL_CHOICES, SUBJECT_CHOICES, SUGGESTION_CATALOG};
pub use controller::{AppSnapshot, Controller, Subscriber, Subscription};
pub use error::{AppError, StoreError, TransportError};
pub use export::{document_file_name, slugify, DocumentExport};
pub use generation::{GenerateOutcome, GenerationService, ServiceReply};
pub use history::HistoryCache;
pub use history_store::{HistoryStore, HISTORY_LIMIT, HISTORY_STORAGE_KEY};
pub use identity::{IdentityProvider, OfflineIdentity};
pub use pack::{Card, GenerateForm, GenerateRequest, Pack};
pub use render::{
    format_generated_at, render_history, render_pack, sorted_cards, CardBlock, CardImage,
    HistoryEntryView, HistoryListView, PackView, RenderVariant,
};
pub use store::{KeyValueStore, MemoryStore};
pub use suggestion::{SuggestionRotator, SuggestionSlot, ROTATION_INTERVAL_MS};
pub use view::{View, ViewState, ViewTransition};
