use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// What an element holds: nothing, an opaque markup fragment, or child elements.
///
/// Markup is treated as a leaf. The host renderer interprets it; the tree
/// never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    None,
    Markup(String),
    Children(Vec<Element>),
}

/// A detached element description.
///
/// Elements are built with the fluent API and then mounted into a
/// [`Document`](crate::Document), which assigns them a place in the tree.
///
/// ```
/// use widgetdom::Element;
///
/// let card = Element::div()
///     .id("card")
///     .class("card")
///     .attr("role", "button")
///     .child(Element::span().markup("<b>Title</b>"));
/// assert_eq!(card.id, "card");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub hidden: bool,
    pub content: Content,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            hidden: false,
            content: Content::None,
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// A file input, the target of [`Event::Change`](crate::Event::Change).
    pub fn file_input() -> Self {
        Self::new("input").attr("type", "file")
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Replace the content with a markup fragment.
    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.content = Content::Markup(markup.into());
        self
    }

    /// Append a child, discarding any markup set earlier.
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.content = Content::Children(children);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Element::div();
        let b = Element::div();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("div-"));
    }

    #[test]
    fn test_child_replaces_markup() {
        let el = Element::div().markup("text").child(Element::span().id("s"));
        match el.content {
            Content::Children(children) => assert_eq!(children[0].id, "s"),
            other => panic!("expected children, got {other:?}"),
        }
    }

    #[test]
    fn test_class_is_deduplicated() {
        let el = Element::div().class("a").class("a").class("b");
        assert_eq!(el.classes, vec!["a", "b"]);
    }
}
