use crate::{
    clipboard::{copied_message, manual_copy_message, CopySource},
    config::PageConfig,
    contact::{build_mailto, outcome_from_response, ContactFlow, Field, SubmitOutcome, SubmitTarget},
    log::{log_event, LogLevel},
    reveal::{reveal_delays, RevealTarget, REVEAL_ORDER},
    skills::{fill_style, parse_fill_percent, SkillBar, FILL_ATTRIBUTE},
    theme::{Theme, ThemeController, ThemeStore},
    tilt::{tilt_transform, Bounds},
    typewriter::{Timing, Typewriter},
};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Reflect};
use serde_json::json;
use std::{cell::Cell, rc::Rc};
use url::Url;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, Document, Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, InputEvent, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, Storage, SubmitEvent,
};
use yew::prelude::*;

const EMAIL_TEXT_SELECTOR: &str = "#emailText";
const TABBING_CLASS: &str = "user-is-tabbing";
const SKILLS: [(&str, Option<&str>); 4] = [
    ("HTML & CSS", Some("90")),
    ("JavaScript", Some("80")),
    ("UI/UX Design", Some("70")),
    ("SQL & Data", None),
];

fn document() -> Option<Document> {
    window()?.document()
}

fn mount_point() -> Option<Element> {
    document()?.get_element_by_id("app")
}

fn load_page_config() -> PageConfig {
    let root = mount_point();
    PageConfig::from_lookup(|name| root.as_ref()?.get_attribute(&format!("data-{name}")))
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

struct LocalThemeStore {
    key: String,
}

impl ThemeStore for LocalThemeStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&mut self, theme: Theme) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(&self.key, theme.as_str());
        }
    }
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn system_prefers_dark() -> bool {
    media_matches("(prefers-color-scheme: dark)")
}

fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

fn apply_theme(theme: Theme) {
    if let Some(root) = document().and_then(|d| d.document_element()) {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = document() else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Some(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn element_text(selector: &str) -> Option<String> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.text_content())
}

async fn write_clipboard(text: &str) -> bool {
    let Some(win) = window() else {
        return false;
    };
    let navigator = win.navigator();
    let Ok(clipboard) = Reflect::get(&navigator, &JsValue::from_str("clipboard")) else {
        return false;
    };
    if clipboard.is_undefined() || clipboard.is_null() {
        return false;
    }

    let Some(write_fn) = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return false;
    };

    let Some(promise) = write_fn
        .call1(&clipboard, &JsValue::from_str(text))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Promise>().ok())
    else {
        return false;
    };

    JsFuture::from(promise).await.is_ok()
}

/// Copies `source` (selector or literal) and reports through `on_feedback`.
/// A selector that matches nothing copies nothing.
fn copy_text(source: &str, on_feedback: Callback<String>, clear_ms: u32, log_level: LogLevel) {
    let Some(text) = CopySource::parse(source).resolve(element_text) else {
        return;
    };

    spawn_local(async move {
        if write_clipboard(&text).await {
            on_feedback.emit(copied_message(&text));
            TimeoutFuture::new(clear_ms).await;
            on_feedback.emit(String::new());
            return;
        }

        log_event(log_level, LogLevel::Info, "clipboard_write_failed", json!({}));
        if let Some(win) = window() {
            let _ = win.alert_with_message(&manual_copy_message(&text));
        }
    });
}

async fn submit_remote(url: &Url, form_data: FormData) -> SubmitOutcome {
    let Ok(request) = Request::post(url.as_str())
        .header("Accept", "application/json")
        .body(form_data)
    else {
        return SubmitOutcome::NetworkFailure;
    };

    let Ok(response) = request.send().await else {
        return SubmitOutcome::NetworkFailure;
    };

    if response.ok() {
        return outcome_from_response(true, None);
    }

    let body = response.text().await.ok();
    outcome_from_response(false, body.as_deref())
}

#[derive(Properties, PartialEq)]
struct RoleTextProps {
    roles: Vec<String>,
    timing: Timing,
}

#[function_component(RoleText)]
fn role_text(props: &RoleTextProps) -> Html {
    let text = use_state(String::new);

    {
        let text = text.clone();
        use_effect_with(
            (props.roles.clone(), props.timing),
            move |(roles, timing)| {
                let alive = Rc::new(Cell::new(true));

                if let Some(mut machine) = Typewriter::new(roles, *timing) {
                    let running = alive.clone();
                    spawn_local(async move {
                        while running.get() {
                            let frame = machine.step();
                            if let Some(next) = frame.text {
                                text.set(next);
                            }
                            TimeoutFuture::new(frame.delay_ms).await;
                        }
                    });
                }

                move || alive.set(false)
            },
        );
    }

    html! {
        <span id="roleText" class="role-text">{(*text).clone()}</span>
    }
}

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    label: AttrValue,
    #[prop_or_default]
    fill: Option<AttrValue>,
    default_fill: u8,
    threshold: f64,
}

#[function_component(SkillBarView)]
fn skill_bar_view(props: &SkillBarProps) -> Html {
    let node_ref = use_node_ref();
    let fill = use_state(|| None::<u8>);

    {
        let node_ref = node_ref.clone();
        let fill = fill.clone();
        let default_fill = props.default_fill;
        let threshold = props.threshold;
        use_effect_with((), move |_| {
            let mut bar = SkillBar::default();
            let element = node_ref.cast::<Element>();
            let percent_of = move |target: &Element| {
                parse_fill_percent(target.get_attribute(FILL_ATTRIBUTE).as_deref(), default_fill)
            };

            let callback = {
                let fill = fill.clone();
                Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                    move |entries: Array, observer: IntersectionObserver| {
                        for entry in entries.iter() {
                            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                                continue;
                            };
                            let target = entry.target();
                            if let Some(percent) =
                                bar.on_intersection(entry.is_intersecting(), percent_of(&target))
                            {
                                fill.set(Some(percent));
                                observer.unobserve(&target);
                            }
                        }
                    },
                )
            };

            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(threshold));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok();

            match (observer.as_ref(), element.as_ref()) {
                (Some(observer), Some(element)) => observer.observe(element),
                (None, Some(element)) => fill.set(Some(parse_fill_percent(
                    element.get_attribute(FILL_ATTRIBUTE).as_deref(),
                    default_fill,
                ))),
                _ => {}
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                drop(callback);
            }
        });
    }

    html! {
        <div class="skill">
            <span class="skill-label">{props.label.clone()}</span>
            <div class="bar">
                <div
                    ref={node_ref}
                    class="bar-fill"
                    data-fill={props.fill.clone()}
                    style={fill.map(fill_style)}
                ></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CopyButtonProps {
    copy: AttrValue,
    label: AttrValue,
    #[prop_or_default]
    id: Option<AttrValue>,
    on_feedback: Callback<String>,
    clear_ms: u32,
    log_level: LogLevel,
}

#[function_component(CopyButton)]
fn copy_button(props: &CopyButtonProps) -> Html {
    let onclick = {
        let copy = props.copy.clone();
        let on_feedback = props.on_feedback.clone();
        let clear_ms = props.clear_ms;
        let log_level = props.log_level;
        Callback::from(move |_: MouseEvent| {
            copy_text(&copy, on_feedback.clone(), clear_ms, log_level);
        })
    };

    html! {
        <button
            id={props.id.clone()}
            class="btn btn-ghost"
            type="button"
            data-copy={props.copy.clone()}
            onclick={onclick}
        >
            {props.label.clone()}
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct PhotoTiltProps {
    classes: &'static str,
}

#[function_component(PhotoTilt)]
fn photo_tilt(props: &PhotoTiltProps) -> Html {
    let node_ref = use_node_ref();
    let transform = use_state(|| None::<String>);

    let onmousemove = {
        let node_ref = node_ref.clone();
        let transform = transform.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(element) = node_ref.cast::<Element>() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            let bounds = Bounds {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            };
            if let Some(next) =
                tilt_transform(bounds, f64::from(event.client_x()), f64::from(event.client_y()))
            {
                transform.set(Some(next));
            }
        })
    };

    let onmouseleave = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(None))
    };

    html! {
        <div
            id="photoWrap"
            ref={node_ref}
            class={classes!("photo-wrap", props.classes)}
            style={(*transform).clone()}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
        >
            <img class="photo" src="/photo.svg" alt="Foto profil" loading="lazy" />
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| load_page_config());
    let theme_controller = use_mut_ref(|| {
        ThemeController::init(
            LocalThemeStore {
                key: config.theme_key.clone(),
            },
            system_prefers_dark(),
        )
    });
    let theme = use_state(|| theme_controller.borrow().current());
    let revealed = use_state(|| 0usize);
    let flow = use_mut_ref(|| ContactFlow::new(config.close_delay_ms));
    let redraw = use_force_update();
    let modal_ref = use_node_ref();
    let form_ref = use_node_ref();
    let first_input_ref = use_node_ref();

    {
        let current = *theme;
        let log_level = config.log_level;
        use_effect_with((), move |_| {
            apply_theme(current);
            log_event(log_level, LogLevel::Debug, "theme_applied", json!({ "theme": current.as_str() }));
            || ()
        });
    }

    {
        let revealed = revealed.clone();
        let step_ms = config.reveal_step_ms;
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));
            let running = alive.clone();
            spawn_local(async move {
                let mut elapsed = 0u32;
                for (index, at) in reveal_delays(REVEAL_ORDER.len(), step_ms).into_iter().enumerate() {
                    TimeoutFuture::new(at.saturating_sub(elapsed)).await;
                    elapsed = at;
                    if !running.get() {
                        return;
                    }
                    revealed.set(index + 1);
                }
            });
            move || alive.set(false)
        });
    }

    {
        let flow = flow.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "Tab" {
                    if let Some(root) = document().and_then(|d| d.document_element()) {
                        let _ = root.class_list().add_1(TABBING_CLASS);
                    }
                }
                if flow.borrow_mut().on_key(&key) {
                    redraw.force_update();
                }
            });

            let target = document();
            if let Some(target) = target.as_ref() {
                let _ = target
                    .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }

            move || {
                if let Some(target) = target {
                    let _ = target.remove_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                drop(listener);
            }
        });
    }

    {
        let flow = flow.clone();
        let first_input_ref = first_input_ref.clone();
        use_effect(move || {
            if flow.borrow_mut().take_focus_request() {
                if let Some(input) = first_input_ref.cast::<HtmlElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        let theme_controller = theme_controller.clone();
        let log_level = config.log_level;
        Callback::from(move |_: MouseEvent| {
            let next = theme_controller.borrow_mut().toggle();
            apply_theme_with_transition(next);
            log_event(log_level, LogLevel::Debug, "theme_applied", json!({ "theme": next.as_str() }));
            theme.set(next);
        })
    };

    let open_modal = {
        let flow = flow.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            flow.borrow_mut().open();
            redraw.force_update();
        })
    };

    let close_modal = {
        let flow = flow.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            flow.borrow_mut().close();
            redraw.force_update();
        })
    };

    let on_backdrop_click = {
        let flow = flow.clone();
        let redraw = redraw.clone();
        let modal_ref = modal_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let clicked = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let on_backdrop = clicked.is_some() && clicked == modal_ref.cast::<Element>();
            if flow.borrow_mut().on_backdrop_click(on_backdrop) {
                redraw.force_update();
            }
        })
    };

    let on_feedback = {
        let flow = flow.clone();
        let redraw = redraw.clone();
        Callback::from(move |message: String| {
            flow.borrow_mut().show_status(message);
            redraw.force_update();
        })
    };

    let on_field = |field: Field| {
        let flow = flow.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            let value = match field {
                Field::Message => event.target_unchecked_into::<HtmlTextAreaElement>().value(),
                Field::Name | Field::Email => {
                    event.target_unchecked_into::<HtmlInputElement>().value()
                }
            };
            flow.borrow_mut().set_field(field, value);
            redraw.force_update();
        })
    };

    let on_submit = {
        let form_ref = form_ref.clone();
        let flow = flow.clone();
        let redraw = redraw.clone();
        let config = config.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let action = form.get_attribute("action").unwrap_or_default();
            let Some(target) = flow.borrow_mut().begin_submit(&action) else {
                return;
            };
            redraw.force_update();

            match target {
                SubmitTarget::Remote(url) => {
                    let Ok(form_data) = FormData::new_with_form(&form) else {
                        flow.borrow_mut().finish_submit(&SubmitOutcome::NetworkFailure);
                        redraw.force_update();
                        return;
                    };
                    log_event(
                        config.log_level,
                        LogLevel::Info,
                        "contact_submit_started",
                        json!({ "host": url.host_str() }),
                    );

                    let flow = flow.clone();
                    let redraw = redraw.clone();
                    let log_level = config.log_level;
                    spawn_local(async move {
                        let outcome = submit_remote(&url, form_data).await;
                        log_event(
                            log_level,
                            LogLevel::Info,
                            "contact_submit_finished",
                            json!({ "outcome": outcome.kind() }),
                        );
                        let follow_up = flow.borrow_mut().finish_submit(&outcome);
                        redraw.force_update();

                        if let Some(delay_ms) = follow_up.close_after_ms {
                            TimeoutFuture::new(delay_ms).await;
                            flow.borrow_mut().close();
                            redraw.force_update();
                        }
                    });
                }
                SubmitTarget::Mailto => {
                    let message = flow.borrow().draft().clone();
                    let recipient = element_text(EMAIL_TEXT_SELECTOR)
                        .map(|text| text.trim().to_string())
                        .filter(|text| !text.is_empty())
                        .unwrap_or_else(|| config.contact_email.clone());

                    if let Some(win) = window() {
                        let _ = win.location().set_href(&build_mailto(&recipient, &message));
                    }
                }
            }
        })
    };

    let (modal_open, submitting, status, draft) = {
        let flow = flow.borrow();
        (
            flow.is_open(),
            flow.in_flight(),
            flow.status().to_string(),
            flow.draft().clone(),
        )
    };

    let year = js_sys::Date::new_0().get_full_year();
    let timing = Timing {
        type_delay_ms: config.type_delay_ms,
        full_pause_ms: config.full_pause_ms,
        erase_delay_ms: config.erase_delay_ms,
        empty_pause_ms: config.empty_pause_ms,
    };
    let reveal = |target: RevealTarget| target.classes(*revealed);

    html! {
        <>
            <a class="skip-link" href="#content">{"Lewati ke konten utama"}</a>
            <div class="page-shell">
                <header class="site-header">
                    <span class="brand">{config.owner_name.clone()}</span>
                    <button
                        id="themeToggle"
                        class="theme-toggle"
                        type="button"
                        aria-label={(*theme).toggle_label()}
                        aria-pressed={(*theme).pressed().to_string()}
                        onclick={on_toggle_theme}
                    >
                        {(*theme).icon()}
                    </button>
                </header>

                <main id="content" class="hero">
                    <div class="hero-copy">
                        <h1 class={reveal(RevealTarget::Heading)}>
                            {format!("Halo, saya {}", config.owner_name)}
                        </h1>
                        <p class={classes!("lead", reveal(RevealTarget::Lead))}>
                            <RoleText roles={config.roles.clone()} timing={timing} />
                            <span class="caret" aria-hidden="true">{"|"}</span>
                        </p>
                        <div class={classes!("meta", reveal(RevealTarget::Meta))}>
                            <span id="emailText">{config.contact_email.clone()}</span>
                            <CopyButton
                                id={Some(AttrValue::from("copyEmailBtn"))}
                                copy={EMAIL_TEXT_SELECTOR}
                                label="Salin email"
                                on_feedback={on_feedback.clone()}
                                clear_ms={config.feedback_clear_ms}
                                log_level={config.log_level}
                            />
                        </div>
                        <div class={classes!("skills", reveal(RevealTarget::Skills))}>
                            { for SKILLS.iter().map(|(label, fill)| html! {
                                <SkillBarView
                                    label={*label}
                                    fill={fill.map(AttrValue::from)}
                                    default_fill={config.default_fill}
                                    threshold={config.skill_threshold}
                                />
                            }) }
                        </div>
                        <div class={classes!("actions", reveal(RevealTarget::Actions))}>
                            <button id="contactBtn" class="btn btn-primary" type="button" onclick={open_modal.clone()}>
                                {"Hubungi saya"}
                            </button>
                            <button id="openContact" class="btn btn-ghost" type="button" onclick={open_modal}>
                                {"Kirim pesan"}
                            </button>
                        </div>
                    </div>
                    <PhotoTilt classes={reveal(RevealTarget::Photo)} />
                </main>

                <footer class="site-footer">
                    <p>{"© "}<span id="year">{year}</span>{" "}{config.owner_name.clone()}</p>
                </footer>
            </div>

            <div
                id="contactModal"
                ref={modal_ref}
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby="contactTitle"
                aria-hidden={(!modal_open).to_string()}
                onclick={on_backdrop_click}
            >
                <div class="modal-panel">
                    <button id="modalClose" class="modal-close" type="button" aria-label="Tutup" onclick={close_modal.clone()}>
                        {"×"}
                    </button>
                    <h2 id="contactTitle">{"Kirim pesan"}</h2>
                    <form
                        id="contactForm"
                        ref={form_ref}
                        action={config.contact_action.clone()}
                        method="POST"
                        onsubmit={on_submit}
                    >
                        <label>
                            {"Nama"}
                            <input
                                ref={first_input_ref}
                                type="text"
                                name="name"
                                required=true
                                value={draft.name}
                                oninput={on_field(Field::Name)}
                            />
                        </label>
                        <label>
                            {"Email"}
                            <input
                                type="email"
                                name="email"
                                required=true
                                value={draft.email}
                                oninput={on_field(Field::Email)}
                            />
                        </label>
                        <label>
                            {"Pesan"}
                            <textarea
                                name="message"
                                rows="5"
                                required=true
                                value={draft.message}
                                oninput={on_field(Field::Message)}
                            ></textarea>
                        </label>
                        <div class="form-actions">
                            <button class="btn btn-primary" type="submit" disabled={submitting}>{"Kirim"}</button>
                            <button id="contactCancel" class="btn btn-ghost" type="button" onclick={close_modal}>
                                {"Batal"}
                            </button>
                        </div>
                        <p id="formFeedback" class="form-feedback" role="status" aria-live="polite">
                            {status}
                        </p>
                    </form>
                    <p class="copy-hint">
                        {"Atau salin langsung: "}
                        <CopyButton
                            copy={config.contact_email.clone()}
                            label={config.contact_email.clone()}
                            on_feedback={on_feedback}
                            clear_ms={config.feedback_clear_ms}
                            log_level={config.log_level}
                        />
                    </p>
                </div>
            </div>
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(mount_point().expect("missing #app mount point")).render();
}
