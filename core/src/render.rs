//! Pure transformations from packs into view models.
//!
//! The Yew components only map these structures to markup, so everything that
//! decides ordering, placeholders and labels lives here and can be compared
//! directly in tests.

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::Timestamp;

use crate::pack::{Card, Pack};

pub const IMAGE_UNAVAILABLE: &str = "Image unavailable";
pub const EMPTY_HISTORY_MESSAGE: &str = "No packs saved yet. Generate one in the Daily Generator.";
const DATE_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";
const KEYCAP_SUFFIX: &str = "\u{FE0F}\u{20E3}";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderVariant {
    Interactive,
    Print,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardImage {
    Illustration { src: String, alt: String },
    Unavailable { text: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardBlock {
    pub order: i64,
    pub position: String,
    pub label: String,
    pub purpose: String,
    pub image: CardImage,
    pub focus_tag: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackView {
    pub variant: RenderVariant,
    pub pack_id: String,
    pub title: String,
    pub date_line: String,
    pub gloss: String,
    pub summary: String,
    pub teacher_tip: Option<String>,
    pub cards: Vec<CardBlock>,
    pub has_document: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntryView {
    pub pack_id: String,
    pub theme: String,
    pub date_line: String,
    pub gloss: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryListView {
    Empty { message: &'static str },
    Entries(Vec<HistoryEntryView>),
}

/// Cards in display order. The sort is stable, so cards sharing an `order`
/// keep their arrival order.
pub fn sorted_cards(cards: &[Card]) -> Vec<&Card> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by_key(|card| card.order);
    sorted
}

pub fn render_pack(pack: &Pack, variant: RenderVariant) -> PackView {
    let generated = format_generated_at(&pack.generated_at);
    let date_line = match variant {
        RenderVariant::Interactive => format!("Generated: {generated}"),
        RenderVariant::Print => format!("Resource generated {generated}"),
    };
    let teacher_tip = match variant {
        RenderVariant::Interactive => pack
            .teacher_tip
            .as_deref()
            .map(str::trim)
            .filter(|tip| !tip.is_empty())
            .map(str::to_string),
        RenderVariant::Print => None,
    };
    let cards = sorted_cards(&pack.cards)
        .into_iter()
        .map(|card| render_card(card, variant))
        .collect();
    PackView {
        variant,
        pack_id: pack.pack_id.clone(),
        title: pack.theme.clone(),
        date_line,
        gloss: pack.gloss_text.clone(),
        summary: pack.summary_text.clone(),
        teacher_tip,
        cards,
        has_document: pack.has_document(),
    }
}

pub fn render_card(card: &Card, variant: RenderVariant) -> CardBlock {
    let position = match variant {
        RenderVariant::Interactive => format!("{}{KEYCAP_SUFFIX}", card.order),
        RenderVariant::Print => card.order.to_string(),
    };
    let image = match card.image_src() {
        Some(src) => CardImage::Illustration {
            src: src.to_string(),
            alt: format!("{} illustration", card.label),
        },
        None => CardImage::Unavailable {
            text: IMAGE_UNAVAILABLE,
        },
    };
    CardBlock {
        order: card.order,
        position,
        label: card.label.clone(),
        purpose: card.purpose.clone(),
        image,
        focus_tag: card.focus_tag.clone(),
    }
}

pub fn render_history(entries: &[Pack]) -> HistoryListView {
    if entries.is_empty() {
        return HistoryListView::Empty {
            message: EMPTY_HISTORY_MESSAGE,
        };
    }
    HistoryListView::Entries(
        entries
            .iter()
            .map(|pack| HistoryEntryView {
                pack_id: pack.pack_id.clone(),
                theme: pack.theme.clone(),
                date_line: format!("Generated: {}", format_generated_at(&pack.generated_at)),
                gloss: pack.gloss_text.clone(),
            })
            .collect(),
    )
}

/// Formats a service timestamp as a medium date with a short time, in UTC.
///
/// Strings without an offset are read as civil time. Anything unparseable is
/// returned unchanged.
pub fn format_generated_at(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let civil = if let Ok(timestamp) = trimmed.parse::<Timestamp>() {
        timestamp.to_zoned(TimeZone::UTC).datetime()
    } else if let Ok(datetime) = trimmed.parse::<DateTime>() {
        datetime
    } else {
        return raw.to_string();
    };
    civil.strftime(DATE_FORMAT).to_string()
}
