use std::sync::Arc;

use futures::future::BoxFuture;

use super::ExpandableCard;

/// Callback invoked with the card after a transition.
pub type CardCallback = Arc<dyn Fn(&ExpandableCard) + Send + Sync>;

/// Runs a lazy content load started by a click or key press.
pub type Spawner = Arc<dyn Fn(BoxFuture<'static, ()>) + Send + Sync>;

/// Behaviour shared by cards built from the same markup.
#[derive(Clone, Default)]
pub struct CardOptions {
    /// Collapse when the user clicks anywhere outside the card.
    pub close_on_outside_click: bool,
    /// Runs once an expansion has finished, after lazy content is in place.
    pub on_expand: Option<CardCallback>,
    /// Runs after every collapse.
    pub on_collapse: Option<CardCallback>,
    /// Drives loads started from event handlers. The ambient tokio runtime
    /// is used when unset.
    pub spawner: Option<Spawner>,
}

impl CardOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_on_outside_click(mut self, enabled: bool) -> Self {
        self.close_on_outside_click = enabled;
        self
    }

    pub fn on_expand(mut self, f: impl Fn(&ExpandableCard) + Send + Sync + 'static) -> Self {
        self.on_expand = Some(Arc::new(f));
        self
    }

    pub fn on_collapse(mut self, f: impl Fn(&ExpandableCard) + Send + Sync + 'static) -> Self {
        self.on_collapse = Some(Arc::new(f));
        self
    }

    pub fn spawner(mut self, f: impl Fn(BoxFuture<'static, ()>) + Send + Sync + 'static) -> Self {
        self.spawner = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for CardOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardOptions")
            .field("close_on_outside_click", &self.close_on_outside_click)
            .field("on_expand", &self.on_expand.is_some())
            .field("on_collapse", &self.on_collapse.is_some())
            .field("spawner", &self.spawner.is_some())
            .finish()
    }
}
