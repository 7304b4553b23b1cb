use std::future::Future;

use futures::future::BoxFuture;

use super::content::{CardContent, ContentError};
use super::options::CardOptions;
use super::ExpandableCard;

/// Builder for [`ExpandableCard`].
#[derive(Debug, Default)]
pub struct CardBuilder {
    id: Option<String>,
    collapsed: String,
    content: CardContent,
    options: CardOptions,
}

impl ExpandableCard {
    pub fn builder() -> CardBuilder {
        CardBuilder::default()
    }
}

impl CardBuilder {
    /// Card id. A random `card-<uuid>` id is generated when unset.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Markup shown in the header whether or not the card is expanded.
    pub fn collapsed(mut self, markup: impl Into<String>) -> Self {
        self.collapsed = markup.into();
        self
    }

    /// Static expanded content.
    pub fn expanded(mut self, markup: impl Into<String>) -> Self {
        self.content = CardContent::Static(markup.into());
        self
    }

    /// Expanded content produced on first expansion.
    pub fn lazy<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ContentError>> + Send + 'static,
    {
        self.content = CardContent::lazy(f);
        self
    }

    pub fn content(mut self, content: CardContent) -> Self {
        self.content = content;
        self
    }

    pub fn close_on_outside_click(mut self, enabled: bool) -> Self {
        self.options.close_on_outside_click = enabled;
        self
    }

    pub fn on_expand(mut self, f: impl Fn(&ExpandableCard) + Send + Sync + 'static) -> Self {
        self.options = self.options.on_expand(f);
        self
    }

    pub fn on_collapse(mut self, f: impl Fn(&ExpandableCard) + Send + Sync + 'static) -> Self {
        self.options = self.options.on_collapse(f);
        self
    }

    /// Run event-triggered loads with `f` instead of the tokio runtime.
    pub fn spawner(mut self, f: impl Fn(BoxFuture<'static, ()>) + Send + Sync + 'static) -> Self {
        self.options = self.options.spawner(f);
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: CardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ExpandableCard {
        let id = self
            .id
            .unwrap_or_else(|| format!("card-{}", uuid::Uuid::new_v4()));
        ExpandableCard::from_parts(id, self.collapsed, self.content, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardState;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ExpandableCard::builder().build();
        let b = ExpandableCard::builder().build();
        assert!(a.id().starts_with("card-"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_card_is_collapsed() {
        let card = ExpandableCard::builder()
            .id("c")
            .collapsed("<h3>Title</h3>")
            .expanded("<p>Body</p>")
            .build();
        assert_eq!(card.state(), CardState::Collapsed);
        assert!(!card.is_mounted());
        assert!(!card.options().close_on_outside_click);
    }

    #[test]
    fn test_render_collapsed_structure() {
        let card = ExpandableCard::builder()
            .id("c")
            .collapsed("<h3>Title</h3>")
            .expanded("<p>Body</p>")
            .build();
        let el = card.render();

        assert_eq!(el.id, "c");
        assert!(el.classes.contains(&"expandable-card".to_string()));
        assert!(!el.classes.contains(&"expanded".to_string()));
        assert_eq!(el.attrs.get("aria-expanded").map(String::as_str), Some("false"));
        assert_eq!(el.attrs.get("role").map(String::as_str), Some("button"));
        assert_eq!(el.attrs.get("tabindex").map(String::as_str), Some("0"));
    }
}
