//! Browser entry point: wires DOM events to a [`Presentation`] over the live document.

mod dom;

pub use dom::DomSurface;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, KeyboardEvent, TouchEvent, WheelEvent, Window};

use crate::config::{CONFIG_ELEMENT_ID, Config};
use crate::input::{Key, Tap};
use crate::layout::TransformStyle;
use crate::presentation::Presentation;

type SharedPresentation = Rc<RefCell<Presentation<DomSurface>>>;

/// A running presentation and the listeners feeding it. Dropping it detaches
/// every listener.
struct App {
    _presentation: SharedPresentation,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn run() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let win = window.clone();
        let doc = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| boot(win, doc)).forget();
    } else {
        boot(window, document);
    }
}

fn boot(window: Window, document: Document) {
    let (config, config_error) = match load_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Some(err) = config_error {
        log::warn!("{err:#}; using defaults");
    }

    match start(window, &document, config) {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(err) => log::error!("prezo: {err:#}"),
    }
}

fn load_config(document: &Document) -> Result<Config> {
    let source = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .unwrap_or_default();
    Config::from_yaml(&source)
}

fn start(window: Window, document: &Document, config: Config) -> Result<App> {
    let (surface, stage) = DomSurface::attach(window.clone(), document, &config)?;
    let transform = config
        .transform
        .unwrap_or_else(|| TransformStyle::detect(&surface.user_agent()));
    log::debug!("transform strategy: {transform:?}");

    let slides: Vec<Element> = surface.slides().iter().map(|s| s.clone().into()).collect();
    let presentation = Rc::new(RefCell::new(Presentation::new(
        surface, stage, transform, config,
    )));
    let mut listeners = install_listeners(&window, document, &presentation);
    listeners.extend(install_transition_listeners(&slides, &presentation));

    with_presentation(&presentation, |p| {
        p.start();
    });

    Ok(App {
        _presentation: presentation,
        _listeners: listeners,
    })
}

/// Run `f` on the presentation unless it is already borrowed, in which case
/// the event is dropped.
fn with_presentation<R>(
    presentation: &SharedPresentation,
    f: impl FnOnce(&mut Presentation<DomSurface>) -> R,
) -> Option<R> {
    match presentation.try_borrow_mut() {
        Ok(mut p) => Some(f(&mut p)),
        Err(_) => {
            log::warn!("presentation busy, event dropped");
            None
        }
    }
}

fn install_listeners(
    window: &Window,
    document: &Document,
    presentation: &SharedPresentation,
) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    let active = EventListenerOptions::enable_prevent_default();

    let p = Rc::clone(presentation);
    listeners.push(EventListener::new_with_options(
        document,
        "keydown",
        active,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_dom(&event.key(), event.key_code());
            let handled = with_presentation(&p, |p| p.handle_key(key));
            if handled.is_some_and(|h| h.prevent_default) {
                event.prevent_default();
            }
        },
    ));

    let p = Rc::clone(presentation);
    listeners.push(EventListener::new_with_options(
        document,
        "touchstart",
        active,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let touches = event.touches();
            let Some(first) = touches.get(0) else {
                return;
            };
            let target_tag = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|e| e.tag_name())
                .unwrap_or_default();
            let tap = Tap {
                touches: touches.length() as usize,
                target_tag,
                x: f64::from(first.client_x()),
            };
            let handled = with_presentation(&p, |p| p.handle_tap(&tap));
            if handled.is_some_and(|h| h.prevent_default) {
                event.prevent_default();
            }
        },
    ));

    let p = Rc::clone(presentation);
    listeners.push(EventListener::new_with_options(
        document,
        "wheel",
        active,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            // `deltaY` is positive when scrolling down.
            let handled = with_presentation(&p, |p| p.handle_wheel(-event.delta_y()));
            if handled.is_some_and(|h| h.prevent_default) {
                event.prevent_default();
            }
        },
    ));

    let p = Rc::clone(presentation);
    listeners.push(EventListener::new(window, "hashchange", move |_| {
        with_presentation(&p, |p| p.on_hash_change());
    }));

    for kind in ["resize", "orientationchange"] {
        let p = Rc::clone(presentation);
        listeners.push(EventListener::new(window, kind, move |_| {
            with_presentation(&p, |p| p.relayout());
        }));
    }

    listeners
}

fn install_transition_listeners(
    slides: &[Element],
    presentation: &SharedPresentation,
) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    for (index, slide) in slides.iter().enumerate() {
        for kind in ["transitionend", "webkitTransitionEnd"] {
            let p = Rc::clone(presentation);
            listeners.push(EventListener::new(slide, kind, move |_| {
                with_presentation(&p, |p| p.on_transition_end(index));
            }));
        }
    }
    listeners
}
