use std::sync::Arc;

/// A durable, user-visible notification.
///
/// Posting a notification with the same `id` replaces the previous one,
/// so a recurring producer never stacks duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Stable notification id (replacement key).
    pub id: u32,
    /// Title line.
    pub title: Arc<str>,
    /// Body text.
    pub body: Arc<str>,
    /// Target opened when the notification is clicked.
    pub on_click: Arc<str>,
    /// Whether clicking dismisses the notification.
    pub auto_cancel: bool,
}

impl Notification {
    /// Creates an auto-cancelling notification with id `1`.
    pub fn new(
        title: impl Into<Arc<str>>,
        body: impl Into<Arc<str>>,
        on_click: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: 1,
            title: title.into(),
            body: body.into(),
            on_click: on_click.into(),
            auto_cancel: true,
        }
    }

    /// Overrides the notification id.
    #[inline]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }
}
