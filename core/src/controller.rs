//! The application state object and its named operations.
//!
//! Everything the page shows is derived from [`AppState`] and published as an
//! immutable [`AppSnapshot`] after each mutation. The state is never borrowed
//! across an `.await`, so UI callbacks may run while a generation request is
//! pending.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::catalog::{Suggestion, SUGGESTION_CATALOG};
use crate::error::AppError;
use crate::export::DocumentExport;
use crate::generation::{
    build_request, parse_reply, transport_message, GenerateOutcome, GenerationService,
    DEFAULT_BUSY_LABEL, IDLE_BUTTON_LABEL,
};
use crate::history::HistoryCache;
use crate::history_store::HistoryStore;
use crate::pack::{GenerateForm, Pack};
use crate::render::{render_history, render_pack, HistoryListView, PackView, RenderVariant};
use crate::store::KeyValueStore;
use crate::suggestion::{SuggestionRotator, SuggestionSlot};
use crate::view::{View, ViewState, ViewTransition};

pub type Subscriber = Rc<dyn Fn()>;

#[derive(Clone, Debug, PartialEq)]
pub struct AppSnapshot {
    pub view: View,
    pub print_region_visible: bool,
    pub current_pack_id: Option<String>,
    pub pack_view: Option<PackView>,
    pub print_view: Option<PackView>,
    pub history: HistoryListView,
    pub form: GenerateForm,
    pub theme_placeholder: String,
    pub suggestion: Option<SuggestionSlot>,
    pub error_message: Option<String>,
    pub generating: bool,
    pub button_label: String,
    pub trigger_enabled: bool,
    pub user_status: String,
}

struct AppState<S, R> {
    view: ViewState,
    print_region_visible: bool,
    history: HistoryCache<S>,
    history_view: HistoryListView,
    rotator: SuggestionRotator<R>,
    current_pack: Option<Pack>,
    pack_views: Option<(PackView, PackView)>,
    form: GenerateForm,
    theme_placeholder: String,
    suggestion: Option<SuggestionSlot>,
    error: Option<AppError>,
    generating: bool,
    busy_label: Option<String>,
    user_status: String,
}

impl<S: KeyValueStore, R: Rng> AppState<S, R> {
    fn show_pack(&mut self, pack: Pack) {
        let interactive = render_pack(&pack, RenderVariant::Interactive);
        let print = render_pack(&pack, RenderVariant::Print);
        self.pack_views = Some((interactive, print));
        self.current_pack = Some(pack);
    }

    fn refresh_history_view(&mut self) {
        self.history_view = render_history(self.history.all());
    }

    fn apply_transition(&mut self, transition: ViewTransition) {
        if transition.refreshes_history() {
            self.refresh_history_view();
        }
        if transition.to == View::Print {
            self.print_region_visible = true;
        } else if transition.hides_print_region() {
            self.print_region_visible = false;
        }
    }

    fn rotate(&mut self, exclude_current: bool) -> Option<&'static Suggestion> {
        let suggestion = self.rotator.choose(exclude_current)?;
        self.suggestion = Some(SuggestionSlot::from(suggestion));
        if self.form.theme.is_empty() {
            self.theme_placeholder = suggestion.theme.to_string();
        }
        Some(suggestion)
    }

    fn snapshot(&self) -> AppSnapshot {
        let (pack_view, print_view) = match &self.pack_views {
            Some((interactive, print)) => (Some(interactive.clone()), Some(print.clone())),
            None => (None, None),
        };
        let button_label = if self.generating {
            self.busy_label
                .clone()
                .unwrap_or_else(|| DEFAULT_BUSY_LABEL.to_string())
        } else {
            IDLE_BUTTON_LABEL.to_string()
        };
        AppSnapshot {
            view: self.view.current(),
            print_region_visible: self.print_region_visible,
            current_pack_id: self.current_pack.as_ref().map(|pack| pack.pack_id.clone()),
            pack_view,
            print_view,
            history: self.history_view.clone(),
            form: self.form.clone(),
            theme_placeholder: self.theme_placeholder.clone(),
            suggestion: self.suggestion.clone(),
            error_message: self.error.as_ref().map(ToString::to_string),
            generating: self.generating,
            button_label,
            trigger_enabled: !self.generating,
            user_status: self.user_status.clone(),
        }
    }
}

pub struct Controller<S, G, R = SmallRng> {
    state: RefCell<AppState<S, R>>,
    service: G,
    snapshot: RefCell<AppSnapshot>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<S, G, R> Controller<S, G, R>
where
    S: KeyValueStore,
    G: GenerationService,
    R: Rng,
{
    /// Loads saved history, restores the most recent pack and picks the first
    /// suggestion.
    pub fn new(store: S, service: G, rng: R) -> Rc<Self> {
        let history = HistoryCache::load(HistoryStore::new(store));
        let history_view = render_history(history.all());
        let latest = history.latest().cloned();
        let mut state = AppState {
            view: ViewState::default(),
            print_region_visible: false,
            history,
            history_view,
            rotator: SuggestionRotator::new(SUGGESTION_CATALOG, rng),
            current_pack: None,
            pack_views: None,
            form: GenerateForm::default(),
            theme_placeholder: String::new(),
            suggestion: None,
            error: None,
            generating: false,
            busy_label: None,
            user_status: String::new(),
        };
        if let Some(pack) = latest {
            state.show_pack(pack);
        }
        state.rotate(true);
        let snapshot = state.snapshot();
        Rc::new(Self {
            state: RefCell::new(state),
            service,
            snapshot: RefCell::new(snapshot),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub fn subscribe(&self, subscriber: Subscriber) -> Subscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        Subscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.snapshot.borrow().clone()
    }

    fn notify(&self) {
        let snapshot = self.state.borrow().snapshot();
        *self.snapshot.borrow_mut() = snapshot;
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    fn mutate<T>(&self, update: impl FnOnce(&mut AppState<S, R>) -> T) -> T {
        let result = {
            let mut state = self.state.borrow_mut();
            update(&mut state)
        };
        self.notify();
        result
    }

    // ── Views ──

    /// Returns `false` when the switch was refused.
    pub fn set_view(&self, target: View) -> bool {
        self.mutate(|state| {
            let has_pack = state.current_pack.is_some();
            match state.view.request(target, has_pack) {
                Some(transition) => {
                    state.apply_transition(transition);
                    true
                }
                None => false,
            }
        })
    }

    pub fn open_print_view(&self) -> bool {
        self.set_view(View::Print)
    }

    pub fn close_print_view(&self) -> bool {
        self.set_view(View::Generator)
    }

    // ── Form ──

    pub fn set_theme_input(&self, value: &str) {
        self.mutate(|state| state.form.theme = value.to_string());
    }

    pub fn set_level(&self, value: &str) {
        self.mutate(|state| state.form.level = value.to_string());
    }

    pub fn set_keywords(&self, value: &str) {
        self.mutate(|state| state.form.keywords = value.to_string());
    }

    pub fn set_subject(&self, value: &str) {
        self.mutate(|state| state.form.subject = value.to_string());
    }

    pub fn dismiss_error(&self) {
        self.mutate(|state| state.error = None);
    }

    pub fn set_user_status(&self, status: String) {
        self.mutate(|state| state.user_status = status);
    }

    // ── Suggestions ──

    pub fn rotate_suggestion(&self, exclude_current: bool) -> Option<&'static Suggestion> {
        self.mutate(|state| state.rotate(exclude_current))
    }

    pub fn theme_focused(&self) {
        self.rotate_suggestion(true);
    }

    pub fn theme_blurred(&self) {
        self.rotate_suggestion(false);
    }

    /// Like a rotation, but also writes the theme into the input.
    pub fn surprise_me(&self) -> Option<&'static Suggestion> {
        self.mutate(|state| {
            let suggestion = state.rotate(true)?;
            state.form.theme = suggestion.theme.to_string();
            state.error = None;
            Some(suggestion)
        })
    }

    // ── History ──

    pub fn revisit(&self, pack_id: &str) -> Result<(), AppError> {
        self.mutate(|state| {
            let Some(pack) = state.history.find(pack_id).cloned() else {
                let error = AppError::Lookup {
                    pack_id: pack_id.to_string(),
                };
                state.error = Some(error.clone());
                return Err(error);
            };
            if let Some(transition) = state.view.request(View::Generator, true) {
                state.apply_transition(transition);
            }
            state.show_pack(pack);
            state.error = None;
            Ok(())
        })
    }

    pub fn document_export(&self) -> Option<DocumentExport> {
        self.state
            .borrow()
            .current_pack
            .as_ref()
            .and_then(DocumentExport::from_pack)
    }

    // ── Generation ──

    pub async fn generate(&self) -> GenerateOutcome {
        self.generate_with_label(None).await
    }

    pub async fn generate_with_label(&self, busy_label: Option<&str>) -> GenerateOutcome {
        let prepared = {
            let state = self.state.borrow();
            if state.generating {
                return GenerateOutcome::Busy;
            }
            build_request(&state.form)
        };
        let request = match prepared {
            Ok(request) => request,
            Err(error) => {
                self.mutate(|state| state.error = Some(error.clone()));
                return GenerateOutcome::Rejected(error);
            }
        };

        self.mutate(|state| {
            state.generating = true;
            state.error = None;
            state.busy_label = busy_label.map(str::to_string);
        });

        let result = match self.service.submit(&request).await {
            Ok(reply) => parse_reply(&reply),
            Err(error) => Err(AppError::Transport(transport_message(&error))),
        };

        self.mutate(|state| {
            let outcome = match result {
                Ok(pack) => {
                    let pack_id = pack.pack_id.clone();
                    state.history.add(pack.clone());
                    state.refresh_history_view();
                    state.show_pack(pack);
                    state.error = None;
                    GenerateOutcome::Generated { pack_id }
                }
                Err(error) => {
                    #[cfg(target_arch = "wasm32")]
                    {
                        gloo::console::warn!("pack generation failed", error.to_string());
                    }
                    state.error = Some(error.clone());
                    GenerateOutcome::Failed(error)
                }
            };
            state.generating = false;
            state.busy_label = None;
            outcome
        })
    }
}

pub struct Subscription {
    subscriber: Subscriber,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
