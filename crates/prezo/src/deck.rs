/// Visual state of a slide relative to the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    Past,
    Present,
    Future,
}

impl SlideState {
    pub const ALL: [SlideState; 3] = [SlideState::Past, SlideState::Present, SlideState::Future];

    /// CSS class carried by a slide in this state.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Present => "present",
            Self::Future => "future",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn delta(&self) -> i64 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }
}

/// Clamp a requested index into `[0, slide_count - 1]`, or 0 for an empty deck.
pub fn clamp_index(requested: i64, slide_count: usize) -> usize {
    if slide_count == 0 || requested <= 0 {
        return 0;
    }
    let last = slide_count - 1;
    usize::try_from(requested).map_or(last, |i| i.min(last))
}

/// State of the slide at `position` when `index` is current.
pub fn state_for(position: usize, index: usize) -> SlideState {
    match position.cmp(&index) {
        std::cmp::Ordering::Less => SlideState::Past,
        std::cmp::Ordering::Equal => SlideState::Present,
        std::cmp::Ordering::Greater => SlideState::Future,
    }
}

/// States for every slide in document order.
pub fn states(index: usize, slide_count: usize) -> impl Iterator<Item = SlideState> {
    (0..slide_count).map(move |position| state_for(position, index))
}

/// The index model: a raw current index over a fixed number of slides.
///
/// `advance` and `set_index` store the requested value untouched; the value is
/// only brought back into range by [`Deck::settle`], which the render pass calls.
#[derive(Debug, Clone)]
pub struct Deck {
    current: i64,
    slide_count: usize,
}

impl Deck {
    pub fn new(slide_count: usize) -> Self {
        Self {
            current: 0,
            slide_count,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// The stored index, which may be out of range until the next settle.
    pub fn raw(&self) -> i64 {
        self.current
    }

    pub fn current(&self) -> usize {
        clamp_index(self.current, self.slide_count)
    }

    pub fn advance(&mut self, direction: Direction) {
        self.current = self.current.saturating_add(direction.delta());
    }

    pub fn set_index(&mut self, index: i64) {
        self.current = index;
    }

    /// Clamp the stored index and make it authoritative.
    pub fn settle(&mut self) -> usize {
        let index = self.current();
        self.current = index as i64;
        index
    }

    pub fn is_first(&self) -> bool {
        self.current() == 0
    }

    pub fn is_last(&self) -> bool {
        self.current() + 1 >= self.slide_count
    }
}
