/// Single-slot, overwrite-on-write status display.
///
/// Bound to one UI text element by the embedding application; no history,
/// no queue.
#[derive(Debug, Default)]
pub struct FeedbackChannel {
    message: Option<String>,
}

impl FeedbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
