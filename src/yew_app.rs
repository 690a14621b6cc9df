use std::rc::Rc;

use tohu_kaiako_core::{
    CardBlock, CardImage, Choice, HistoryListView, PackView, RenderVariant, SuggestionSlot, View,
    LEVEL_CHOICES, SUBJECT_CHOICES,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::download::download_document;
use crate::ticker::SuggestionTicker;
use crate::AppController;

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) controller: Rc<AppController>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let controller = props.controller.clone();
    let snapshot = use_state(|| controller.snapshot());
    let ticker = use_mut_ref(SuggestionTicker::new);
    {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let controller_for_cb = controller.clone();
            let subscription = controller.subscribe(Rc::new(move || {
                snapshot.set(controller_for_cb.snapshot());
            }));
            move || drop(subscription)
        });
    }
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            ticker.borrow_mut().start(controller);
            move || ticker.borrow_mut().stop()
        });
    }

    let nav = |view: View| {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.set_view(view);
        })
    };
    let on_theme_input = {
        let controller = controller.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            controller.set_theme_input(&input.value());
        })
    };
    let on_theme_focus = {
        let controller = controller.clone();
        Callback::from(move |_: FocusEvent| controller.theme_focused())
    };
    let on_theme_blur = {
        let controller = controller.clone();
        Callback::from(move |_: FocusEvent| controller.theme_blurred())
    };
    let on_keywords_input = {
        let controller = controller.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            controller.set_keywords(&input.value());
        })
    };
    let on_level_change = {
        let controller = controller.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            controller.set_level(&select.value());
        })
    };
    let on_subject_change = {
        let controller = controller.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            controller.set_subject(&select.value());
        })
    };
    let on_surprise = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.surprise_me();
        })
    };
    let on_generate = {
        let controller = controller.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let controller = controller.clone();
            spawn_local(async move {
                controller.generate().await;
            });
        })
    };
    let on_dismiss_error = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.dismiss_error())
    };
    let on_revisit = {
        let controller = controller.clone();
        Callback::from(move |pack_id: String| {
            let _ = controller.revisit(&pack_id);
        })
    };
    let on_open_print = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.open_print_view();
        })
    };
    let on_close_print = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.close_print_view();
        })
    };
    let on_print = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    });
    let on_download = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(export) = controller.document_export() else {
                return;
            };
            if let Err(err) = download_document(&export) {
                gloo::console::warn!("document download failed", err);
            }
        })
    };

    let current = snapshot.view;
    let tab_class = |view: View| classes!("nav-tab", (current == view).then_some("active"));
    let error_banner = match &snapshot.error_message {
        Some(message) => html! {
            <div class="error-banner" role="alert">
                <span>{ message.clone() }</span>
                <button type="button" class="dismiss" onclick={on_dismiss_error}>{ "×" }</button>
            </div>
        },
        None => html! {},
    };
    let pack_display = match &snapshot.pack_view {
        Some(view) => html! {
            <PackDisplay
                view={view.clone()}
                on_print={on_open_print}
                on_download={on_download}
            />
        },
        None => html! {},
    };
    let content = match current {
        View::Generator => html! {
            <section class="generator">
                <form class="generate-form" onsubmit={on_generate}>
                    <label for="theme-input">{ "Theme or moment" }</label>
                    <input
                        id="theme-input"
                        type="text"
                        value={snapshot.form.theme.clone()}
                        placeholder={snapshot.theme_placeholder.clone()}
                        oninput={on_theme_input}
                        onfocus={on_theme_focus}
                        onblur={on_theme_blur}
                    />
                    <SuggestionChip slot={snapshot.suggestion.clone()} />
                    <button type="button" class="surprise" onclick={on_surprise}>
                        { "✨ Surprise me" }
                    </button>
                    <label for="level-select">{ "Level" }</label>
                    <ChoiceSelect
                        id="level-select"
                        choices={LEVEL_CHOICES}
                        selected={snapshot.form.level.clone()}
                        onchange={on_level_change}
                    />
                    <label for="subject-select">{ "Subject" }</label>
                    <ChoiceSelect
                        id="subject-select"
                        choices={SUBJECT_CHOICES}
                        selected={snapshot.form.subject.clone()}
                        onchange={on_subject_change}
                    />
                    <label for="keywords-input">{ "Keywords (optional)" }</label>
                    <input
                        id="keywords-input"
                        type="text"
                        value={snapshot.form.keywords.clone()}
                        oninput={on_keywords_input}
                    />
                    <button
                        type="submit"
                        class={classes!("generate", snapshot.generating.then_some("loading"))}
                        disabled={!snapshot.trigger_enabled}
                    >
                        { snapshot.button_label.clone() }
                    </button>
                </form>
                { error_banner }
                { pack_display }
            </section>
        },
        View::Revisit => html! {
            <section class="revisit">
                { error_banner }
                <HistoryList history={snapshot.history.clone()} on_open={on_revisit} />
            </section>
        },
        View::Print => html! {},
    };
    let print_region = match (&snapshot.print_view, snapshot.print_region_visible) {
        (Some(view), true) => html! {
            <section class="print-region">
                <div class="print-toolbar">
                    <button type="button" onclick={on_print}>{ "Print" }</button>
                    <button type="button" onclick={on_close_print}>{ "Close" }</button>
                </div>
                <PrintSheet view={view.clone()} />
            </section>
        },
        _ => html! {},
    };

    html! {
        <main class="app" data-view={current.as_str()}>
            <header class="app-header">
                <nav>
                    <button type="button" class={tab_class(View::Generator)} onclick={nav(View::Generator)}>
                        { "Daily Generator" }
                    </button>
                    <button type="button" class={tab_class(View::Revisit)} onclick={nav(View::Revisit)}>
                        { "Revisit" }
                    </button>
                </nav>
                <p class="user-status">{ snapshot.user_status.clone() }</p>
            </header>
            { content }
            { print_region }
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct SuggestionChipProps {
    slot: Option<SuggestionSlot>,
}

#[function_component(SuggestionChip)]
fn suggestion_chip(props: &SuggestionChipProps) -> Html {
    let Some(slot) = &props.slot else {
        return html! {};
    };
    html! {
        <p class="spark-prompt">
            <span class="spark-chip">{ slot.chip_text.clone() }</span>
            if !slot.focus_text.is_empty() {
                <span class="spark-focus">{ slot.focus_text.clone() }</span>
            }
        </p>
    }
}

#[derive(Properties, PartialEq)]
struct ChoiceSelectProps {
    id: AttrValue,
    choices: &'static [Choice],
    selected: String,
    onchange: Callback<Event>,
}

#[function_component(ChoiceSelect)]
fn choice_select(props: &ChoiceSelectProps) -> Html {
    html! {
        <select id={props.id.clone()} onchange={props.onchange.clone()}>
            { for props.choices.iter().map(|choice| html! {
                <option value={choice.value} selected={choice.value == props.selected}>
                    { choice.label }
                </option>
            }) }
        </select>
    }
}

#[derive(Properties, PartialEq)]
struct PackDisplayProps {
    view: PackView,
    on_print: Callback<MouseEvent>,
    on_download: Callback<MouseEvent>,
}

#[function_component(PackDisplay)]
fn pack_display(props: &PackDisplayProps) -> Html {
    let view = &props.view;
    html! {
        <article class="pack" data-pack-id={view.pack_id.clone()}>
            <header>
                <h2>{ view.title.clone() }</h2>
                <p class="pack-date">{ view.date_line.clone() }</p>
            </header>
            <div class="cards">
                { for view.cards.iter().map(|card| card_tile(card, view.variant)) }
            </div>
            <footer>
                <p class="gloss">{ view.gloss.clone() }</p>
                <p class="summary">{ view.summary.clone() }</p>
                if let Some(tip) = &view.teacher_tip {
                    <p class="teacher-tip">{ tip.clone() }</p>
                }
                <div class="pack-actions">
                    <button type="button" onclick={props.on_print.clone()}>{ "Print view" }</button>
                    if view.has_document {
                        <button type="button" onclick={props.on_download.clone()}>
                            { "Download PDF" }
                        </button>
                    }
                </div>
            </footer>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct PrintSheetProps {
    view: PackView,
}

#[function_component(PrintSheet)]
fn print_sheet(props: &PrintSheetProps) -> Html {
    let view = &props.view;
    html! {
        <article class="print-sheet">
            <h1>{ view.title.clone() }</h1>
            <ol class="print-cards">
                { for view.cards.iter().map(|card| card_tile(card, view.variant)) }
            </ol>
            <p class="gloss">{ view.gloss.clone() }</p>
            <p class="summary">{ view.summary.clone() }</p>
            <p class="print-date">{ view.date_line.clone() }</p>
        </article>
    }
}

fn card_tile(card: &CardBlock, variant: RenderVariant) -> Html {
    let image = match &card.image {
        CardImage::Illustration { src, alt } => html! {
            <img src={src.clone()} alt={alt.clone()} loading="lazy" />
        },
        CardImage::Unavailable { text } => html! {
            <div class="image-placeholder">{ *text }</div>
        },
    };
    let body = html! {
        <>
            <span class="card-position">{ card.position.clone() }</span>
            <h3>{ card.label.clone() }</h3>
            <p class="card-purpose">{ card.purpose.clone() }</p>
            { image }
            <p class="card-focus">{ card.focus_tag.clone() }</p>
        </>
    };
    match variant {
        RenderVariant::Interactive => html! {
            <div class="card">{ body }</div>
        },
        RenderVariant::Print => html! { <li class="print-card">{ body }</li> },
    }
}

#[derive(Properties, PartialEq)]
struct HistoryListProps {
    history: HistoryListView,
    on_open: Callback<String>,
}

#[function_component(HistoryList)]
fn history_list(props: &HistoryListProps) -> Html {
    match &props.history {
        HistoryListView::Empty { message } => html! {
            <p class="empty-history">{ *message }</p>
        },
        HistoryListView::Entries(entries) => html! {
            <ul class="history">
                { for entries.iter().map(|entry| {
                    let on_open = props.on_open.clone();
                    let pack_id = entry.pack_id.clone();
                    let onclick = Callback::from(move |_: MouseEvent| on_open.emit(pack_id.clone()));
                    html! {
                        <li class="history-entry">
                            <button type="button" {onclick}>
                                <strong>{ entry.theme.clone() }</strong>
                                <span class="history-date">{ entry.date_line.clone() }</span>
                                <span class="history-gloss">{ entry.gloss.clone() }</span>
                            </button>
                        </li>
                    }
                }) }
            </ul>
        },
    }
}

pub(crate) fn run(controller: Rc<AppController>) {
    yew::Renderer::<App>::with_props(AppProps { controller }).render();
}
