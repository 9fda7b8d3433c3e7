use crate::types::Update;

/// Polling offset: the lowest `update_id` not yet retrieved.
///
/// Never moves backwards. Owned by exactly one poller; callers that need to
/// poll from several tasks must serialize access themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    next: i64,
}

impl Cursor {
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }

    pub fn current(&self) -> i64 {
        self.next
    }

    /// Move past every update in `batch`. An empty batch is a no-op.
    ///
    /// The maximum is taken over the whole batch rather than trusting the
    /// last element to be the largest.
    pub fn advance(&mut self, batch: &[Update]) {
        self.advance_ids(batch.iter().map(|u| u.update_id));
    }

    pub(crate) fn advance_ids(&mut self, ids: impl IntoIterator<Item = i64>) {
        if let Some(max) = ids.into_iter().max() {
            self.next = self.next.max(max.saturating_add(1));
        }
    }
}
