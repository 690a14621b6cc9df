use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::block_on;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use tohu_kaiako_core::error::{GENERIC_FAILURE_MESSAGE, LOOKUP_MESSAGE, UNREADABLE_PACK_MESSAGE, VALIDATION_MESSAGE};
use tohu_kaiako_core::{
    AppError, AppSnapshot, Controller, GenerateOutcome, GenerateRequest, GenerationService, HistoryListView,
    MemoryStore, ServiceReply, TransportError, View, HISTORY_STORAGE_KEY,
};

type Reply = Result<ServiceReply, TransportError>;

#[derive(Clone, Default)]
struct ScriptedService {
    replies: Rc<RefCell<VecDeque<Reply>>>,
    requests: Rc<RefCell<Vec<GenerateRequest>>>,
}

impl ScriptedService {
    fn with_replies(replies: Vec<Reply>) -> Self {
        Self {
            replies: Rc::new(RefCell::new(replies.into())),
            requests: Rc::default(),
        }
    }
}

impl GenerationService for ScriptedService {
    async fn submit(&self, request: &GenerateRequest) -> Reply {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no reply scripted".to_string())))
    }
}

struct GatedService {
    gate: RefCell<Option<oneshot::Receiver<ServiceReply>>>,
    calls: Rc<Cell<usize>>,
}

impl GenerationService for GatedService {
    async fn submit(&self, _request: &GenerateRequest) -> Reply {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(receiver) => receiver
                .await
                .map_err(|_| TransportError("gate dropped".to_string())),
            None => Err(TransportError("gate already used".to_string())),
        }
    }
}

fn ok(body: serde_json::Value) -> Reply {
    Ok(ServiceReply {
        status: 200,
        body: body.to_string(),
    })
}

fn failure(status: u16, body: &str) -> Reply {
    Ok(ServiceReply {
        status,
        body: body.to_string(),
    })
}

fn pack_json(id: &str, theme: &str) -> serde_json::Value {
    json!({
        "pack_id": id,
        "theme": theme,
        "generated_at": "2026-10-18T15:04:05Z",
        "sentence_nzsl": "DUCK FEED",
        "sentence_en": "We feed the ducks.",
        "teacher_tip": "Point to the pond.",
        "pack_content": [
            {"order": 2, "phase": "Throw", "pedagogical_purpose": "action", "language_focus": "verbs"},
            {"order": 1, "phase": "Walk", "pedagogical_purpose": "setting", "language_focus": "places"}
        ]
    })
}

fn history_ids(snapshot: &AppSnapshot) -> Vec<String> {
    match &snapshot.history {
        HistoryListView::Entries(entries) => {
            entries.iter().map(|entry| entry.pack_id.clone()).collect()
        }
        HistoryListView::Empty { .. } => Vec::new(),
    }
}

fn controller(service: ScriptedService) -> Rc<Controller<MemoryStore, ScriptedService>> {
    Controller::new(MemoryStore::new(), service, SmallRng::seed_from_u64(42))
}

fn generate_failing_with(reply: Reply) -> (GenerateOutcome, Option<String>) {
    let controller = controller(ScriptedService::with_replies(vec![reply]));
    controller.set_theme_input("Feeding ducks");
    let outcome = block_on(controller.generate());
    let snapshot = controller.snapshot();
    assert!(!snapshot.generating);
    assert!(snapshot.trigger_enabled);
    assert_eq!(snapshot.button_label, "Generate Pack");
    (outcome, snapshot.error_message)
}

#[test]
fn successful_generation_feeds_history_and_display() {
    let service = ScriptedService::with_replies(vec![ok(pack_json("p1", "Feeding ducks"))]);
    let requests = service.requests.clone();
    let controller = controller(service);
    controller.set_theme_input("Feeding ducks");
    controller.set_level("ECE");
    controller.set_subject("general");

    let outcome = block_on(controller.generate());
    assert_eq!(
        outcome,
        GenerateOutcome::Generated {
            pack_id: "p1".to_string()
        }
    );

    assert_eq!(history_ids(&controller.snapshot()), ["p1"]);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.current_pack_id.as_deref(), Some("p1"));
    let view = snapshot.pack_view.expect("pack rendered");
    let orders: Vec<i64> = view.cards.iter().map(|card| card.order).collect();
    assert_eq!(orders, [1, 2]);
    assert_eq!(snapshot.print_view.expect("print rendered").cards.len(), 2);
    assert_eq!(snapshot.error_message, None);
    assert!(!snapshot.generating);

    let sent = requests.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        serde_json::to_value(&sent[0]).unwrap(),
        json!({"theme": "Feeding ducks", "level": "ECE", "subject": "general"})
    );
}

#[test]
fn empty_theme_never_reaches_the_service() {
    let service = ScriptedService::default();
    let requests = service.requests.clone();
    let controller = controller(service);
    let loading_seen = Rc::new(Cell::new(false));
    let _subscription = {
        let loading_seen = loading_seen.clone();
        let observer = Rc::downgrade(&controller);
        controller.subscribe(Rc::new(move || {
            if let Some(controller) = observer.upgrade() {
                if controller.snapshot().generating {
                    loading_seen.set(true);
                }
            }
        }))
    };
    controller.set_theme_input("   ");

    let outcome = block_on(controller.generate());
    assert_eq!(outcome, GenerateOutcome::Rejected(AppError::Validation));
    assert!(requests.borrow().is_empty());
    assert!(!loading_seen.get());
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.error_message.as_deref(), Some(VALIDATION_MESSAGE));
    assert!(!snapshot.generating);
    assert!(history_ids(&snapshot).is_empty());
}

#[test]
fn structured_detail_is_shown_verbatim() {
    let (outcome, message) = generate_failing_with(failure(500, r#"{"detail":"quota exceeded"}"#));
    assert_eq!(
        outcome,
        GenerateOutcome::Failed(AppError::Transport("quota exceeded".to_string()))
    );
    assert_eq!(message.as_deref(), Some("quota exceeded"));
}

#[test]
fn failure_messages_fall_back_in_order() {
    let cases = [
        (failure(502, "Bad gateway\n"), "Bad gateway"),
        (failure(500, ""), GENERIC_FAILURE_MESSAGE),
        (failure(500, r#"{"error":"nope"}"#), GENERIC_FAILURE_MESSAGE),
        (failure(422, r#"{"detail":[{"msg":"too short"}]}"#), r#"[{"msg":"too short"}]"#),
        (Err(TransportError("Failed to fetch".to_string())), "Failed to fetch"),
        (Err(TransportError(String::new())), GENERIC_FAILURE_MESSAGE),
        (ok(json!({"unexpected": true})), UNREADABLE_PACK_MESSAGE),
    ];
    for (reply, expected) in cases {
        let (_, message) = generate_failing_with(reply);
        assert_eq!(message.as_deref(), Some(expected));
    }
}

#[test]
fn second_generate_while_pending_is_ignored() {
    let (sender, receiver) = oneshot::channel();
    let calls = Rc::new(Cell::new(0));
    let service = GatedService {
        gate: RefCell::new(Some(receiver)),
        calls: calls.clone(),
    };
    let controller = Controller::new(MemoryStore::new(), service, SmallRng::seed_from_u64(5));
    controller.set_theme_input("Feeding ducks");

    block_on(async {
        let first = controller.generate_with_label(Some("Drawing cards…"));
        futures::pin_mut!(first);
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert_eq!(calls.get(), 1);

        let pending = controller.snapshot();
        assert!(pending.generating);
        assert!(!pending.trigger_enabled);
        assert_eq!(pending.button_label, "Drawing cards…");

        assert_eq!(controller.generate().await, GenerateOutcome::Busy);
        assert_eq!(calls.get(), 1);
        assert!(controller.snapshot().generating);

        assert!(controller.rotate_suggestion(true).is_some());
        let surprise = controller.surprise_me().expect("catalog has entries");
        let meanwhile = controller.snapshot();
        assert_eq!(meanwhile.form.theme, surprise.theme);
        assert!(meanwhile.generating);
        assert_eq!(meanwhile.button_label, "Drawing cards…");
        assert_eq!(calls.get(), 1);

        sender
            .send(ServiceReply {
                status: 200,
                body: pack_json("p1", "Feeding ducks").to_string(),
            })
            .unwrap();
        assert_eq!(
            first.await,
            GenerateOutcome::Generated {
                pack_id: "p1".to_string()
            }
        );
    });

    let snapshot = controller.snapshot();
    assert!(!snapshot.generating);
    assert_eq!(snapshot.button_label, "Generate Pack");
    assert_eq!(history_ids(&controller.snapshot()), ["p1"]);
}

#[test]
fn maths_requests_carry_the_activity_marker() {
    let service = ScriptedService::with_replies(vec![ok(pack_json("p2", "Counting ducks"))]);
    let requests = service.requests.clone();
    let controller = controller(service);
    controller.set_theme_input("  Counting ducks ");
    controller.set_keywords(" five, pond ");
    controller.set_subject("math");

    block_on(controller.generate());

    let sent = requests.borrow();
    assert_eq!(sent[0].theme, "Counting ducks");
    assert_eq!(sent[0].keywords.as_deref(), Some("five, pond"));
    assert_eq!(sent[0].activity.as_deref(), Some("name_the_number"));
}

#[test]
fn revisiting_a_missing_pack_changes_nothing() {
    let controller = controller(ScriptedService::with_replies(vec![ok(pack_json("p1", "Ducks"))]));
    controller.set_theme_input("Ducks");
    block_on(controller.generate());
    assert!(controller.set_view(View::Revisit));
    let before = controller.snapshot();

    let result = controller.revisit("gone");
    assert_eq!(
        result,
        Err(AppError::Lookup {
            pack_id: "gone".to_string()
        })
    );
    let after = controller.snapshot();
    assert_eq!(after.error_message.as_deref(), Some(LOOKUP_MESSAGE));
    assert_eq!(after.view, View::Revisit);
    assert_eq!(after.current_pack_id, before.current_pack_id);
    assert_eq!(after.history, before.history);
}

#[test]
fn revisiting_a_saved_pack_shows_it_in_the_generator() {
    let controller = controller(ScriptedService::with_replies(vec![
        ok(pack_json("p1", "Ducks")),
        ok(pack_json("p2", "Seeds")),
    ]));
    controller.set_theme_input("Ducks");
    block_on(controller.generate());
    block_on(controller.generate());
    assert_eq!(history_ids(&controller.snapshot()), ["p2", "p1"]);

    controller.set_view(View::Revisit);
    let HistoryListView::Entries(entries) = controller.snapshot().history else {
        panic!("history should list both packs");
    };
    assert_eq!(entries.len(), 2);

    assert_eq!(controller.revisit("p1"), Ok(()));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.view, View::Generator);
    assert_eq!(snapshot.current_pack_id.as_deref(), Some("p1"));
    assert_eq!(history_ids(&controller.snapshot()), ["p2", "p1"]);
}

#[test]
fn print_view_requires_a_pack() {
    let controller = controller(ScriptedService::with_replies(vec![ok(pack_json("p1", "Ducks"))]));
    assert!(!controller.open_print_view());
    assert_eq!(controller.snapshot().view, View::Generator);
    assert!(!controller.snapshot().print_region_visible);

    controller.set_theme_input("Ducks");
    block_on(controller.generate());
    assert!(controller.open_print_view());
    let printing = controller.snapshot();
    assert_eq!(printing.view, View::Print);
    assert!(printing.print_region_visible);

    assert!(controller.close_print_view());
    let closed = controller.snapshot();
    assert_eq!(closed.view, View::Generator);
    assert!(!closed.print_region_visible);
}

#[test]
fn saved_history_is_restored_on_start() {
    let saved = json!([pack_json("p7", "Puddles"), pack_json("p6", "Leaves")]).to_string();
    let controller = Controller::new(
        MemoryStore::with_value(HISTORY_STORAGE_KEY, &saved),
        ScriptedService::default(),
        SmallRng::seed_from_u64(9),
    );
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.current_pack_id.as_deref(), Some("p7"));
    assert_eq!(history_ids(&controller.snapshot()), ["p7", "p6"]);
    assert!(matches!(snapshot.history, HistoryListView::Entries(ref entries) if entries.len() == 2));
}

#[test]
fn corrupt_history_starts_empty() {
    let controller = Controller::new(
        MemoryStore::with_value(HISTORY_STORAGE_KEY, "{broken"),
        ScriptedService::default(),
        SmallRng::seed_from_u64(9),
    );
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.current_pack_id, None);
    assert!(matches!(snapshot.history, HistoryListView::Empty { .. }));
}

#[test]
fn rotation_only_touches_the_placeholder_while_input_is_empty() {
    let controller = controller(ScriptedService::default());
    let start = controller.snapshot();
    assert!(start.suggestion.is_some());
    assert!(!start.theme_placeholder.is_empty());
    assert_eq!(start.form.theme, "");

    controller.set_theme_input("My own idea");
    let placeholder = controller.snapshot().theme_placeholder;
    for _ in 0..5 {
        controller.theme_focused();
        controller.theme_blurred();
        controller.rotate_suggestion(true);
    }
    let after = controller.snapshot();
    assert_eq!(after.form.theme, "My own idea");
    assert_eq!(after.theme_placeholder, placeholder);
}

#[test]
fn surprise_me_fills_the_theme_and_clears_errors() {
    let controller = controller(ScriptedService::default());
    block_on(controller.generate());
    assert!(controller.snapshot().error_message.is_some());

    let suggestion = controller.surprise_me().expect("catalog has entries");
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.form.theme, suggestion.theme);
    assert_eq!(snapshot.error_message, None);
    assert_eq!(
        snapshot.suggestion.map(|slot| slot.theme),
        Some(suggestion.theme.to_string())
    );
}

#[test]
fn document_export_uses_the_theme_slug() {
    let mut with_document = pack_json("p1", "Feeding Ducks!");
    with_document["pdf_base64"] = json!("JVBERi0=");
    let controller = controller(ScriptedService::with_replies(vec![
        ok(with_document),
        ok(pack_json("p2", "No document")),
    ]));
    assert!(controller.document_export().is_none());

    controller.set_theme_input("Ducks");
    block_on(controller.generate());
    let export = controller.document_export().expect("document present");
    assert_eq!(export.file_name, "feeding-ducks-.pdf");
    assert_eq!(export.mime, "application/pdf");
    assert_eq!(export.bytes().unwrap(), b"%PDF-");

    block_on(controller.generate());
    assert!(controller.document_export().is_none());
}

#[test]
fn dropped_subscriptions_stop_receiving_updates() {
    let controller = controller(ScriptedService::default());
    let hits = Rc::new(Cell::new(0));
    let subscription = {
        let hits = hits.clone();
        controller.subscribe(Rc::new(move || hits.set(hits.get() + 1)))
    };
    controller.set_keywords("pond");
    assert_eq!(hits.get(), 1);
    drop(subscription);
    controller.set_keywords("ducks");
    assert_eq!(hits.get(), 1);
}
