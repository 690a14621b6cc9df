use rand::rngs::SmallRng;
use rand::Rng;

use crate::catalog::Suggestion;

/// Redraws allowed when trying to avoid the previous pick.
pub const EXCLUDE_ATTEMPTS: usize = 6;
pub const ROTATION_INTERVAL_MS: u32 = 20_000;

/// Picks random catalog entries, trying not to repeat the previous pick.
pub struct SuggestionRotator<R = SmallRng> {
    catalog: &'static [Suggestion],
    rng: R,
    last_index: Option<usize>,
}

impl<R: Rng> SuggestionRotator<R> {
    pub fn new(catalog: &'static [Suggestion], rng: R) -> Self {
        Self {
            catalog,
            rng,
            last_index: None,
        }
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Best effort only: after [`EXCLUDE_ATTEMPTS`] redraws the last draw is
    /// accepted even if it repeats.
    pub fn choose(&mut self, exclude_current: bool) -> Option<&'static Suggestion> {
        let len = self.catalog.len();
        if len == 0 {
            return None;
        }
        let mut index = self.rng.random_range(0..len);
        if exclude_current && len > 1 {
            let mut attempts = 0;
            while Some(index) == self.last_index && attempts < EXCLUDE_ATTEMPTS {
                index = self.rng.random_range(0..len);
                attempts += 1;
            }
        }
        self.last_index = Some(index);
        self.catalog.get(index)
    }
}

/// Display-only text derived from a suggestion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionSlot {
    pub chip_text: String,
    pub focus_text: String,
    pub category: String,
    pub icon: String,
    pub theme: String,
    pub focus: String,
}

impl From<&Suggestion> for SuggestionSlot {
    fn from(suggestion: &Suggestion) -> Self {
        let parts = [suggestion.icon, suggestion.category]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let label = if parts.is_empty() {
            suggestion.category
        } else {
            parts.as_str()
        };
        let focus_text = if suggestion.focus.is_empty() {
            String::new()
        } else {
            format!("(Focus: {})", suggestion.focus)
        };
        Self {
            chip_text: format!("{label} — {}", suggestion.theme),
            focus_text,
            category: suggestion.category.to_string(),
            icon: suggestion.icon.to_string(),
            theme: suggestion.theme.to_string(),
            focus: suggestion.focus.to_string(),
        }
    }
}
