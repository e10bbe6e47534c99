use anyhow::{Context, Result};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::Config;
use crate::deck::SlideState;
use crate::layout::{StageGeometry, StageLayout, TransformStyle, Viewport};
use crate::surface::Surface;

const FULLSCREEN_METHODS: [&str; 2] = ["requestFullscreen", "webkitRequestFullScreen"];

pub(crate) fn js_error(err: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{}", err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// The live document: the stage element and its slides in document order.
pub struct DomSurface {
    window: Window,
    stage: HtmlElement,
    slides: Vec<HtmlElement>,
}

impl DomSurface {
    /// Look up the stage and its slides, and measure the stage as authored.
    pub fn attach(
        window: Window,
        document: &Document,
        config: &Config,
    ) -> Result<(Self, StageGeometry)> {
        let stage = document
            .query_selector(&config.stage_selector)
            .map_err(js_error)
            .with_context(|| format!("Invalid stage selector '{}'", config.stage_selector))?
            .ok_or_else(|| {
                anyhow::anyhow!("No stage element matches '{}'", config.stage_selector)
            })?
            .dyn_into::<HtmlElement>()
            .map_err(|_| {
                anyhow::anyhow!("Stage '{}' is not an HTML element", config.stage_selector)
            })?;

        let nodes = document
            .query_selector_all(&config.slide_selector)
            .map_err(js_error)
            .with_context(|| format!("Invalid slide selector '{}'", config.slide_selector))?;
        let slides: Vec<HtmlElement> = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();

        let geometry = StageGeometry::new(
            f64::from(stage.offset_width()),
            f64::from(stage.offset_height()),
        );
        log::debug!(
            "stage {}x{} with {} slides",
            geometry.width,
            geometry.height,
            slides.len()
        );

        Ok((
            Self {
                window,
                stage,
                slides,
            },
            geometry,
        ))
    }

    pub fn slides(&self) -> &[HtmlElement] {
        &self.slides
    }

    pub fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(err) = element.style().set_property(property, value) {
            log::debug!("could not set {property}: {err:?}");
        }
    }
}

fn apply_state(element: &Element, state: SlideState) {
    let classes = element.class_list();
    for candidate in SlideState::ALL {
        let _ = classes.toggle_with_force(candidate.class_name(), candidate == state);
    }
}

impl Surface for DomSurface {
    type Task = Timeout;

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide_state(&self, index: usize) -> Option<SlideState> {
        let classes = self.slides.get(index)?.class_list();
        SlideState::ALL
            .into_iter()
            .find(|state| classes.contains(state.class_name()))
    }

    fn set_slide_state(&mut self, index: usize, state: SlideState) {
        if let Some(slide) = self.slides.get(index) {
            apply_state(slide, state);
        }
    }

    fn set_force_hidden(&mut self, index: usize, hidden: bool) {
        let Some(slide) = self.slides.get(index) else {
            return;
        };
        if hidden {
            Self::set_style(slide, "display", "none");
        } else if let Err(err) = slide.style().remove_property("display") {
            log::debug!("could not clear display: {err:?}");
        }
    }

    fn schedule_present(&mut self, index: usize, delay_ms: u32) -> Timeout {
        let slide: Option<Element> = self.slides.get(index).map(|s| s.clone().into());
        Timeout::new(delay_ms, move || {
            if let Some(slide) = slide {
                apply_state(&slide, SlideState::Present);
            }
        })
    }

    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn set_fragment(&mut self, fragment: &str) {
        if let Err(err) = self.window.location().set_hash(fragment) {
            log::warn!("could not update location hash: {err:?}");
        }
    }

    fn viewport(&self) -> Viewport {
        let read = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            width: read(self.window.inner_width()),
            height: read(self.window.inner_height()),
        }
    }

    fn place_stage(&mut self, layout: &StageLayout, transform: TransformStyle) {
        Self::set_style(&self.stage, "position", "absolute");
        Self::set_style(&self.stage, "left", &format!("{}px", layout.offset_x));
        Self::set_style(&self.stage, "top", &format!("{}px", layout.offset_y));
        Self::set_style(&self.stage, transform.property(), &transform.value(layout.scale));
    }

    fn request_fullscreen(&mut self) {
        let target: &JsValue = self.stage.as_ref();
        for method in FULLSCREEN_METHODS {
            let Ok(function) = js_sys::Reflect::get(target, &JsValue::from_str(method)) else {
                continue;
            };
            let Some(function) = function.dyn_ref::<js_sys::Function>() else {
                continue;
            };
            match function.call0(target) {
                Ok(result) => {
                    // Without a user gesture the promise rejects; swallow it.
                    if let Some(promise) = result.dyn_ref::<js_sys::Promise>() {
                        let ignore = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
                            log::debug!("fullscreen refused: {err:?}");
                        });
                        let _ = promise.catch(&ignore);
                        ignore.forget();
                    }
                }
                Err(err) => log::debug!("{method} failed: {err:?}"),
            }
            return;
        }
        log::debug!("fullscreen not available");
    }
}
