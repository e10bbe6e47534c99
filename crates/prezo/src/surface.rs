use crate::deck::SlideState;
use crate::layout::{StageLayout, TransformStyle, Viewport};

/// The host document as seen by a [`Presentation`](crate::Presentation).
///
/// Slides are addressed by their position in document order. Implementations
/// absorb host failures; none of these calls can fail from the caller's side.
pub trait Surface {
    /// Handle of a scheduled deferred task; dropping it cancels the task.
    type Task;

    fn slide_count(&self) -> usize;

    fn slide_state(&self, index: usize) -> Option<SlideState>;

    fn set_slide_state(&mut self, index: usize, state: SlideState);

    /// Hide the slide with an inline style, or clear that style again.
    fn set_force_hidden(&mut self, index: usize, hidden: bool);

    /// Mark the slide `present` after `delay_ms`.
    fn schedule_present(&mut self, index: usize, delay_ms: u32) -> Self::Task;

    /// Current address fragment, `#` included if the host reports it.
    fn fragment(&self) -> String;

    fn set_fragment(&mut self, fragment: &str);

    fn viewport(&self) -> Viewport;

    fn place_stage(&mut self, layout: &StageLayout, transform: TransformStyle);

    /// Ask for full-window display. Best effort.
    fn request_fullscreen(&mut self) {}
}
