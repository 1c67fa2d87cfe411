use gloo_net::http::Request;
use js_sys::{Array, Date, Reflect};
use std::collections::HashMap;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    console, window, Document, Element, Event, EventTarget, FormData, HtmlElement,
    HtmlFormElement, HtmlImageElement, HtmlScriptElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, Node, ScrollBehavior,
    ScrollToOptions, Storage,
};

use crate::behavior::{
    active_section, anchor_target_id, email_from_mailto, navbar_scrolled, scroll_target_top,
    updated_footer_text, MenuState, RevealTracker, SectionSpan, Theme, TrackedEvent, ACTIVE_CLASS,
    DARK_THEME_CLASS, REVEAL_CLASS, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD, SCROLLED_CLASS,
    THEME_STORAGE_KEY,
};
use crate::contact::{ContactSubmission, SubmissionOutcome, SubmissionResponse};
use crate::timing::Throttle;

// None keeps the local acknowledgment stub; point this at a JSON endpoint to
// deliver submissions for real.
const CONTACT_ENDPOINT: Option<&str> = None;
const SCROLL_THROTTLE_MS: f64 = 100.0;
const LAZYSIZES_SRC: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/lazysizes/5.3.2/lazysizes.min.js";

pub fn run() {
    init_theme();
    init_mobile_menu();
    init_scroll_effects();
    init_smooth_scroll();
    init_contact_form();
    init_reveal_on_scroll();
    init_email_links();
    init_footer_year();
    init_page_load();
    init_lazy_loading();
    init_click_tracking();
}

fn document() -> Option<Document> {
    window()?.document()
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn listen(target: &EventTarget, event_type: &str, handler: Box<dyn FnMut(Event)>) {
    let closure = Closure::wrap(handler);
    let _ = target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn sync_marker(element: &Element, class: &str, present: bool) {
    if present {
        let _ = element.class_list().add_1(class);
    } else {
        let _ = element.class_list().remove_1(class);
    }
}

fn stored_theme() -> Theme {
    local_storage()
        .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
        .and_then(|value| Theme::from_str(&value))
        .unwrap_or(Theme::Light)
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

fn current_theme(body: &HtmlElement) -> Theme {
    if body.class_list().contains(DARK_THEME_CLASS) {
        Theme::Dark
    } else {
        Theme::Light
    }
}

fn apply_theme(body: &HtmlElement, icon: Option<&Element>, theme: Theme) {
    sync_marker(body, DARK_THEME_CLASS, theme.is_dark());

    if let Some(icon) = icon {
        icon.set_text_content(Some(theme.icon()));
    }
}

fn init_theme() {
    let Some(document) = document() else { return };
    let Some(toggle) = document.get_element_by_id("theme-toggle") else {
        return;
    };
    let Some(body) = document.body() else { return };
    let icon = document.query_selector(".theme-icon").ok().flatten();

    apply_theme(&body, icon.as_ref(), stored_theme());

    let body_handle = body.clone();
    listen(
        &toggle,
        "click",
        Box::new(move |_: Event| {
            let next = current_theme(&body_handle).toggled();
            apply_theme(&body_handle, icon.as_ref(), next);
            persist_theme(next);
        }),
    );
}

fn menu_state(menu: &Element) -> MenuState {
    MenuState::from_marker(menu.class_list().contains(ACTIVE_CLASS))
}

fn apply_menu_state(toggle: &Element, menu: &Element, state: MenuState) {
    sync_marker(toggle, ACTIVE_CLASS, state.is_open());
    sync_marker(menu, ACTIVE_CLASS, state.is_open());
}

fn click_landed_inside(event: &Event, element: &Element) -> bool {
    let Some(target) = event.target() else {
        return false;
    };
    let Some(node) = target.dyn_ref::<Node>() else {
        return false;
    };

    element.contains(Some(node))
}

fn init_mobile_menu() {
    let Some(document) = document() else { return };
    let Some(toggle) = document.get_element_by_id("mobile-menu-toggle") else {
        return;
    };
    let Some(menu) = document.get_element_by_id("nav-menu") else {
        return;
    };

    {
        let toggle_handle = toggle.clone();
        let menu_handle = menu.clone();
        listen(
            &toggle,
            "click",
            Box::new(move |_: Event| {
                let next = menu_state(&menu_handle).toggled();
                apply_menu_state(&toggle_handle, &menu_handle, next);
            }),
        );
    }

    for link in query_all(&document, ".nav-link") {
        let toggle_handle = toggle.clone();
        let menu_handle = menu.clone();
        listen(
            &link,
            "click",
            Box::new(move |_: Event| {
                apply_menu_state(&toggle_handle, &menu_handle, MenuState::Closed);
            }),
        );
    }

    {
        let toggle_handle = toggle.clone();
        let menu_handle = menu.clone();
        listen(
            &document,
            "click",
            Box::new(move |event: Event| {
                if click_landed_inside(&event, &toggle_handle)
                    || click_landed_inside(&event, &menu_handle)
                {
                    return;
                }

                apply_menu_state(&toggle_handle, &menu_handle, MenuState::Closed);
            }),
        );
    }

    {
        let toggle_handle = toggle.clone();
        let menu_handle = menu.clone();
        listen(
            &document,
            "keydown",
            Box::new(move |event: Event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if key_event.key() != "Escape" {
                    return;
                }

                if menu_state(&menu_handle).is_open() {
                    apply_menu_state(&toggle_handle, &menu_handle, MenuState::Closed);
                }
            }),
        );
    }
}

fn current_scroll_offset() -> f64 {
    window()
        .and_then(|win| win.page_y_offset().ok())
        .unwrap_or(0.0)
}

fn section_spans(document: &Document) -> Vec<SectionSpan> {
    query_all(document, "section[id]")
        .into_iter()
        .filter_map(|section| {
            let id = section.get_attribute("id")?;
            let layout = section.dyn_ref::<HtmlElement>()?;

            Some(SectionSpan::from_layout(
                id,
                f64::from(layout.offset_top()),
                f64::from(layout.offset_height()),
            ))
        })
        .collect()
}

fn highlight_navigation(document: &Document, scroll_y: f64) {
    let spans = section_spans(document);
    let active = active_section(&spans, scroll_y);

    for span in &spans {
        let selector = format!(".nav-link[href=\"#{}\"]", span.id);
        let Some(link) = document.query_selector(&selector).ok().flatten() else {
            continue;
        };

        sync_marker(&link, ACTIVE_CLASS, active == Some(span.id.as_str()));
    }
}

fn init_scroll_effects() {
    let Some(win) = window() else { return };
    let Some(document) = document() else { return };
    let navbar = document.get_element_by_id("navbar");

    let mut throttle = Throttle::new(SCROLL_THROTTLE_MS);
    listen(
        &win,
        "scroll",
        Box::new(move |_: Event| {
            if !throttle.try_fire(Date::now()) {
                return;
            }

            let scroll_y = current_scroll_offset();
            if let Some(navbar) = navbar.as_ref() {
                sync_marker(navbar, SCROLLED_CLASS, navbar_scrolled(scroll_y));
            }
            highlight_navigation(&document, scroll_y);
        }),
    );
}

fn scroll_to_element(id: &str) {
    let Some(target) = document().and_then(|document| document.get_element_by_id(id)) else {
        return;
    };
    let Ok(target) = target.dyn_into::<HtmlElement>() else {
        return;
    };
    let Some(win) = window() else { return };

    let options = ScrollToOptions::new();
    options.set_top(scroll_target_top(f64::from(target.offset_top())));
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

fn init_smooth_scroll() {
    let Some(document) = document() else { return };

    for anchor in query_all(&document, r##"a[href^="#"]"##) {
        let anchor_handle = anchor.clone();
        listen(
            &anchor,
            "click",
            Box::new(move |event: Event| {
                event.prevent_default();

                let Some(href) = anchor_handle.get_attribute("href") else {
                    return;
                };
                let Some(id) = anchor_target_id(&href) else { return };

                scroll_to_element(id);
            }),
        );
    }
}

fn read_submission(form: &HtmlFormElement) -> ContactSubmission {
    let mut fields = HashMap::new();

    if let Ok(data) = FormData::new_with_form(form) {
        if let Ok(Some(entries)) = js_sys::try_iter(&data) {
            for entry in entries.flatten() {
                let Ok(pair) = entry.dyn_into::<Array>() else {
                    continue;
                };
                let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string())
                else {
                    continue;
                };

                fields.insert(name, value);
            }
        }
    }

    ContactSubmission::from_fields(fields)
}

async fn post_submission(endpoint: &str, submission: &ContactSubmission) -> SubmissionOutcome {
    let Ok(request) = Request::post(endpoint).json(submission.fields()) else {
        return SubmissionOutcome::NetworkUnreachable;
    };
    let Ok(response) = request.send().await else {
        return SubmissionOutcome::NetworkUnreachable;
    };
    if !response.ok() {
        return SubmissionOutcome::RejectedByEndpoint;
    }

    match response.json::<SubmissionResponse>().await {
        Ok(payload) => SubmissionOutcome::from_response(&payload),
        Err(_) => SubmissionOutcome::RejectedByEndpoint,
    }
}

fn deliver_submission(
    endpoint: &'static str,
    submission: ContactSubmission,
    form: HtmlFormElement,
) {
    spawn_local(async move {
        let outcome = post_submission(endpoint, &submission).await;
        show_message(outcome.user_message());

        if outcome.should_reset_form() {
            form.reset();
        }
    });
}

fn show_message(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

fn init_contact_form() {
    let Some(form) = document()
        .and_then(|document| document.get_element_by_id("contact-form"))
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };

    let form_handle = form.clone();
    listen(
        &form,
        "submit",
        Box::new(move |event: Event| {
            event.prevent_default();

            let submission = read_submission(&form_handle);
            match CONTACT_ENDPOINT {
                Some(endpoint) => deliver_submission(endpoint, submission, form_handle.clone()),
                None => {
                    show_message(&submission.acknowledgment());
                    form_handle.reset();
                }
            }
        }),
    );
}

fn init_reveal_on_scroll() {
    let Some(document) = document() else { return };
    let targets = query_all(&document, ".project-card, .skill-category, .stat-card");
    if targets.is_empty() {
        return;
    }

    let mut tracker = RevealTracker::new();
    let observed = targets.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                let Some(index) = observed.iter().position(|element| *element == target) else {
                    continue;
                };

                if tracker.mark(index) {
                    let _ = target.class_list().add_1(REVEAL_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        return;
    };
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
}

fn copy_to_clipboard(text: String) {
    let Some(win) = window() else { return };
    let navigator = win.navigator();

    let navigator_js: JsValue = navigator.clone().into();
    let clipboard =
        Reflect::get(&navigator_js, &JsValue::from_str("clipboard")).unwrap_or(JsValue::UNDEFINED);
    if clipboard.is_undefined() || clipboard.is_null() {
        return;
    }

    let promise = navigator.clipboard().write_text(&text);
    spawn_local(async move {
        let _ = JsFuture::from(promise).await;
    });
}

fn init_email_links() {
    let Some(document) = document() else { return };

    for link in query_all(&document, r#"a[href^="mailto:"]"#) {
        let link_handle = link.clone();
        listen(
            &link,
            "click",
            Box::new(move |_: Event| {
                let Some(email) = link_handle
                    .get_attribute("href")
                    .as_deref()
                    .and_then(email_from_mailto)
                    .map(ToString::to_string)
                else {
                    return;
                };

                copy_to_clipboard(email);
            }),
        );
    }
}

fn init_footer_year() {
    let Some(document) = document() else { return };
    let Some(footer) = document.query_selector(".footer p").ok().flatten() else {
        return;
    };
    let Some(text) = footer.text_content() else { return };

    let year = Date::new_0().get_full_year();
    footer.set_text_content(Some(&updated_footer_text(&text, year)));
}

fn init_page_load() {
    let Some(win) = window() else { return };

    listen(
        &win,
        "load",
        Box::new(move |_: Event| {
            let Some(document) = document() else { return };

            if let Some(loader) = document.query_selector(".loader").ok().flatten() {
                if let Some(loader) = loader.dyn_ref::<HtmlElement>() {
                    let _ = loader.style().set_property("display", "none");
                }
            }

            if let Some(hero) = document.query_selector(".hero").ok().flatten() {
                let _ = hero.class_list().add_1(REVEAL_CLASS);
            }
        }),
    );
}

fn native_lazy_loading_supported() -> bool {
    let Some(win) = window() else { return false };

    let window_js: JsValue = win.into();
    let Ok(constructor) = Reflect::get(&window_js, &JsValue::from_str("HTMLImageElement")) else {
        return false;
    };
    let Ok(prototype) = Reflect::get(&constructor, &JsValue::from_str("prototype")) else {
        return false;
    };

    Reflect::has(&prototype, &JsValue::from_str("loading")).unwrap_or(false)
}

fn init_lazy_loading() {
    let Some(document) = document() else { return };

    if native_lazy_loading_supported() {
        for image in query_all(&document, r#"img[loading="lazy"]"#) {
            let Ok(image) = image.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            image.set_src(&image.src());
        }
        return;
    }

    let Some(body) = document.body() else { return };
    let Ok(script) = document.create_element("script") else { return };
    let Ok(script) = script.dyn_into::<HtmlScriptElement>() else { return };
    script.set_src(LAZYSIZES_SRC);
    let _ = body.append_child(&script);
}

fn track_event(category: &str, action: &str, label: &str) {
    let event = TrackedEvent::new(category, action, label);
    console::log_1(&JsValue::from_str(&event.log_line()));
}

fn init_click_tracking() {
    let Some(document) = document() else { return };

    for link in query_all(&document, ".project-link") {
        let link_handle = link.clone();
        listen(
            &link,
            "click",
            Box::new(move |_: Event| {
                let title = link_handle
                    .closest(".project-card")
                    .ok()
                    .flatten()
                    .and_then(|card| card.query_selector(".project-title").ok().flatten())
                    .and_then(|title| title.text_content());

                track_event("Project", "Click", title.as_deref().unwrap_or("Unknown"));
            }),
        );
    }

    for link in query_all(&document, "a[download]") {
        listen(
            &link,
            "click",
            Box::new(move |_: Event| {
                track_event("Resume", "Download", "PDF");
            }),
        );
    }
}
