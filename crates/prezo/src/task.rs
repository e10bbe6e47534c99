/// Holder for the pending deferred task of one slide.
///
/// The handle type cancels its task when dropped, so replacing or clearing the
/// slot is all the bookkeeping a reschedule needs.
#[derive(Debug)]
pub struct DeferredSlot<H> {
    pending: Option<H>,
}

impl<H> Default for DeferredSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> DeferredSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly scheduled task, cancelling the previous one.
    pub fn replace(&mut self, handle: H) {
        drop(self.pending.replace(handle));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
