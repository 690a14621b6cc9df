use std::rc::Rc;

use gloo::timers::callback::Interval;
use tohu_kaiako_core::ROTATION_INTERVAL_MS;

use crate::AppController;

/// Owns the one repeating suggestion timer. Starting again replaces the
/// previous interval rather than stacking a second one.
#[derive(Default)]
pub(crate) struct SuggestionTicker {
    interval: Option<Interval>,
}

impl SuggestionTicker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&mut self, controller: Rc<AppController>) {
        self.stop();
        self.interval = Some(Interval::new(ROTATION_INTERVAL_MS, move || {
            controller.rotate_suggestion(true);
        }));
    }

    pub(crate) fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}
