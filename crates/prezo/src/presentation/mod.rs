#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::deck::{self, Deck, Direction, SlideState};
use crate::fragment;
use crate::input::{self, Handled, Key, Tap};
use crate::layout::{StageGeometry, StageLayout, TransformStyle, compute_layout};
use crate::surface::Surface;
use crate::task::DeferredSlot;

/// Result of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub from: usize,
    pub to: usize,
}

impl Navigation {
    /// False when the command was clamped away at a boundary.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// The presentation controller.
///
/// Owns the index model, the stage geometry captured at construction and the
/// per-slide deferred tasks. All host access goes through `S`.
pub struct Presentation<S: Surface> {
    surface: S,
    deck: Deck,
    stage: StageGeometry,
    transform: TransformStyle,
    config: Config,
    pending: Vec<DeferredSlot<S::Task>>,
}

impl<S: Surface> Presentation<S> {
    pub fn new(
        surface: S,
        stage: StageGeometry,
        transform: TransformStyle,
        config: Config,
    ) -> Self {
        let slide_count = surface.slide_count();
        let pending = (0..slide_count).map(|_| DeferredSlot::new()).collect();
        Self {
            surface,
            deck: Deck::new(slide_count),
            stage,
            transform,
            config,
            pending,
        }
    }

    /// Bring the page into its initial state: hide every slide that is not
    /// already present, show the slide named by the fragment, fit the stage
    /// and ask for full-window display.
    pub fn start(&mut self) -> usize {
        for index in 0..self.deck.slide_count() {
            if self.surface.slide_state(index) != Some(SlideState::Present) {
                self.surface.set_force_hidden(index, true);
            }
        }
        let index = self.read_url();
        self.relayout();
        if self.config.fullscreen {
            self.surface.request_fullscreen();
        }
        log::info!(
            "presentation started: {} slides, at slide {index}",
            self.deck.slide_count()
        );
        index
    }

    pub fn current_index(&self) -> usize {
        self.deck.current()
    }

    pub fn slide_count(&self) -> usize {
        self.deck.slide_count()
    }

    pub fn is_first(&self) -> bool {
        self.deck.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.deck.is_last()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn set_index(&mut self, index: i64) {
        self.deck.set_index(index);
    }

    /// Apply the current index to every slide and return it clamped.
    pub fn render(&mut self) -> usize {
        let count = self.deck.slide_count();
        if count == 0 {
            return self.deck.settle();
        }
        let index = self.deck.settle();

        if let Some(slot) = self.pending.get_mut(index) {
            slot.cancel();
            self.surface.set_force_hidden(index, false);
            let task = self
                .surface
                .schedule_present(index, self.config.present_delay_ms);
            slot.replace(task);
        }

        // A slide leaving `present` must not be flipped back by its old task.
        for (position, state) in deck::states(index, count).enumerate() {
            if state != SlideState::Present {
                self.pending[position].cancel();
                self.surface.set_slide_state(position, state);
            }
        }

        index
    }

    /// Write the current index into the address fragment.
    ///
    /// Nothing is written when the fragment already encodes the index, so the
    /// host raises no change notification for it.
    pub fn write_url(&mut self) {
        let index = self.deck.current();
        if fragment::encodes(&self.surface.fragment(), index) {
            return;
        }
        self.surface.set_fragment(&fragment::format_index(index));
    }

    /// Navigate to the slide named by the address fragment.
    pub fn read_url(&mut self) -> usize {
        let requested = fragment::parse_index(&self.surface.fragment());
        self.deck.set_index(requested);
        self.render()
    }

    /// Handle a fragment change notification.
    ///
    /// A fragment that resolves to the slide already shown leaves the page
    /// untouched; this is what our own [`write_url`](Self::write_url) produces.
    pub fn on_hash_change(&mut self) -> Option<Navigation> {
        let from = self.deck.current();
        let requested = fragment::parse_index(&self.surface.fragment());
        if deck::clamp_index(requested, self.deck.slide_count()) == from {
            log::trace!("fragment change to slide {from} ignored");
            return None;
        }
        let to = self.read_url();
        log::debug!("fragment navigation {from} -> {to}");
        Some(Navigation { from, to })
    }

    /// Step one slide in `direction`, render, then write the URL.
    pub fn advance(&mut self, direction: Direction) -> Navigation {
        let from = self.deck.current();
        self.deck.advance(direction);
        let to = self.render();
        self.write_url();
        if from == to {
            log::trace!("navigation {direction:?} clamped at slide {to}");
        } else {
            log::debug!("navigation {from} -> {to}");
        }
        Navigation { from, to }
    }

    pub fn handle_key(&mut self, key: Key) -> Handled<Navigation> {
        match input::route_key(key) {
            Some(direction) => Handled {
                prevent_default: true,
                outcome: Some(self.advance(direction)),
            },
            None => Handled::ignored(),
        }
    }

    pub fn handle_tap(&mut self, tap: &Tap) -> Handled<Navigation> {
        let width = self.surface.viewport().width;
        let route = input::route_tap(tap, width, self.config.hot_zone);
        if !route.suppresses_default() {
            return Handled::ignored();
        }
        let outcome = route.direction().map(|direction| self.advance(direction));
        Handled {
            prevent_default: true,
            outcome,
        }
    }

    /// `delta` follows the legacy `wheelDelta` sign: positive scrolls up.
    pub fn handle_wheel(&mut self, delta: f64) -> Handled<Navigation> {
        let direction = input::route_wheel(delta);
        Handled {
            prevent_default: true,
            outcome: Some(self.advance(direction)),
        }
    }

    /// Hide a slide once its exit transition is over.
    pub fn on_transition_end(&mut self, index: usize) {
        if index >= self.deck.slide_count() {
            return;
        }
        if self.surface.slide_state(index) != Some(SlideState::Present) {
            self.surface.set_force_hidden(index, true);
        }
    }

    /// Fit the stage to the current viewport.
    pub fn relayout(&mut self) -> StageLayout {
        let viewport = self.surface.viewport();
        let layout = compute_layout(viewport, &self.stage);
        log::debug!(
            "layout: viewport {}x{}, stage {}x{}, scale {:.3}",
            viewport.width,
            viewport.height,
            self.stage.width,
            self.stage.height,
            layout.scale
        );
        self.surface.place_stage(&layout, self.transform);
        layout
    }
}
