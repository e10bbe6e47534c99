
use std::cell::Cell;
use std::rc::Rc;

use super::{Navigation, Presentation};
use crate::config::Config;
use crate::deck::SlideState;
use crate::layout::{StageGeometry, StageLayout, TransformStyle, Viewport};
use crate::surface::Surface;

/// Timer handle that records its own cancellation.
struct FakeTask {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for FakeTask {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

struct Scheduled {
    index: usize,
    delay_ms: u32,
    cancelled: Rc<Cell<bool>>,
}

/// In-memory document: slide states, inline hiding, a location hash and the
/// stage placement, with a manually driven timer queue.
struct FakeSurface {
    states: Vec<Option<SlideState>>,
    hidden: Vec<bool>,
    fragment: String,
    fragment_writes: Vec<String>,
    /// Hash change notifications the host would dispatch next.
    pending_hash_changes: usize,
    viewport: Viewport,
    placed: Option<(StageLayout, TransformStyle)>,
    timers: Vec<Scheduled>,
    state_writes: usize,
    fullscreen_requests: usize,
}

impl FakeSurface {
    fn new(slide_count: usize) -> Self {
        Self {
            states: vec![None; slide_count],
            hidden: vec![false; slide_count],
            fragment: String::new(),
            fragment_writes: Vec::new(),
            pending_hash_changes: 0,
            viewport: Viewport {
                width: 1000.0,
                height: 800.0,
            },
            placed: None,
            timers: Vec::new(),
            state_writes: 0,
            fullscreen_requests: 0,
        }
    }

    fn with_fragment(mut self, fragment: &str) -> Self {
        self.fragment = fragment.to_string();
        self
    }

    /// Fire every timer that has not been cancelled.
    fn run_timers(&mut self) -> Vec<usize> {
        let mut fired = Vec::new();
        for timer in std::mem::take(&mut self.timers) {
            if !timer.cancelled.get() {
                self.states[timer.index] = Some(SlideState::Present);
                fired.push(timer.index);
            }
        }
        fired
    }

    /// Simulate the user editing the address bar.
    fn navigate_to(&mut self, fragment: &str) {
        if self.fragment != fragment {
            self.fragment = fragment.to_string();
            self.pending_hash_changes += 1;
        }
    }
}

impl Surface for FakeSurface {
    type Task = FakeTask;

    fn slide_count(&self) -> usize {
        self.states.len()
    }

    fn slide_state(&self, index: usize) -> Option<SlideState> {
        self.states.get(index).copied().flatten()
    }

    fn set_slide_state(&mut self, index: usize, state: SlideState) {
        self.states[index] = Some(state);
        self.state_writes += 1;
    }

    fn set_force_hidden(&mut self, index: usize, hidden: bool) {
        self.hidden[index] = hidden;
    }

    fn schedule_present(&mut self, index: usize, delay_ms: u32) -> FakeTask {
        let cancelled = Rc::new(Cell::new(false));
        self.timers.push(Scheduled {
            index,
            delay_ms,
            cancelled: cancelled.clone(),
        });
        FakeTask { cancelled }
    }

    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        let hash = format!("#{fragment}");
        self.fragment_writes.push(hash.clone());
        if self.fragment != hash {
            self.fragment = hash;
            self.pending_hash_changes += 1;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn place_stage(&mut self, layout: &StageLayout, transform: TransformStyle) {
        self.placed = Some((*layout, transform));
    }

    fn request_fullscreen(&mut self) {
        self.fullscreen_requests += 1;
    }
}

type TestPresentation = Presentation<FakeSurface>;

fn presentation(surface: FakeSurface) -> TestPresentation {
    Presentation::new(
        surface,
        StageGeometry::new(1000.0, 600.0),
        TransformStyle::Scale3d,
        Config::default(),
    )
}

/// A started presentation with all deferred tasks already fired.
fn started(slide_count: usize, fragment: &str) -> TestPresentation {
    let mut p = presentation(FakeSurface::new(slide_count).with_fragment(fragment));
    p.start();
    p.surface_mut().run_timers();
    p
}

/// Dispatch queued hash change notifications the way the host would.
fn deliver_hash_changes(p: &mut TestPresentation) {
    while p.surface().pending_hash_changes > 0 {
        p.surface_mut().pending_hash_changes -= 1;
        p.on_hash_change();
    }
}

fn settle(p: &mut TestPresentation) {
    deliver_hash_changes(p);
    p.surface_mut().run_timers();
}

/// Assert the past/present/future partition around `index`.
fn assert_states(p: &TestPresentation, index: usize) {
    let count = p.slide_count();
    for position in 0..count {
        let expected = match position.cmp(&index) {
            std::cmp::Ordering::Less => SlideState::Past,
            std::cmp::Ordering::Equal => SlideState::Present,
            std::cmp::Ordering::Greater => SlideState::Future,
        };
        assert_eq!(
            p.surface().slide_state(position),
            Some(expected),
            "slide {position} with current {index}"
        );
    }
    assert!(!p.surface().hidden[index], "current slide {index} is hidden");
}
