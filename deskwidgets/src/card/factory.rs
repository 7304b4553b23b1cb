//! Building cards from marked-up elements.
//!
//! ```text
//! <div data-expandable data-card-id="order-42">
//!   <div data-collapsed><h3>Order #42</h3></div>
//!   <div data-expanded><p>Two items, shipped.</p></div>
//! </div>
//! ```

use log::{debug, warn};
use widgetdom::{Document, DomError};

use super::{CardOptions, ExpandableCard};

/// Marks an element for [`init_expandable_cards`].
pub const MARKER_ATTR: &str = "data-expandable";
/// Marks the child holding the collapsed view.
pub const COLLAPSED_ATTR: &str = "data-collapsed";
/// Marks the child holding the expanded view.
pub const EXPANDED_ATTR: &str = "data-expanded";
/// Optional explicit card id.
pub const CARD_ID_ATTR: &str = "data-card-id";

impl ExpandableCard {
    /// Turn a mounted element into a card, replacing it in place.
    ///
    /// The collapsed view comes from the `data-collapsed` child and the
    /// expanded view from the `data-expanded` child. An element with neither
    /// section uses its whole content as the collapsed view. A missing
    /// expanded section yields empty expanded content.
    pub fn from_element(
        doc: &Document,
        node: &str,
        options: &CardOptions,
    ) -> Result<ExpandableCard, DomError> {
        let collapsed_section = doc.first_child_with_attr(node, COLLAPSED_ATTR);
        let expanded_section = doc.first_child_with_attr(node, EXPANDED_ATTR);

        let collapsed = match (&collapsed_section, &expanded_section) {
            (Some(section), _) => doc.inner_markup(section)?,
            (None, None) => doc.inner_markup(node)?,
            (None, Some(_)) => String::new(),
        };
        let expanded = match &expanded_section {
            Some(section) => doc.inner_markup(section)?,
            None => String::new(),
        };

        let id = doc
            .attr(node, CARD_ID_ATTR)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| node.to_string());

        let card = ExpandableCard::builder()
            .id(id)
            .collapsed(collapsed)
            .expanded(expanded)
            .options(options.clone())
            .build();
        card.mount_replacing(doc, node)?;
        Ok(card)
    }
}

/// Build a card from every `data-expandable` element under `container`.
///
/// Elements are processed in document order. A marker nested inside another
/// marker is consumed by the outer card and skipped. Elements that fail to
/// convert are logged and skipped.
pub fn init_expandable_cards(
    doc: &Document,
    container: &str,
    options: &CardOptions,
) -> Vec<ExpandableCard> {
    let mut cards = Vec::new();
    for node in doc.query_attr(container, MARKER_ATTR) {
        if !doc.exists(&node) {
            continue;
        }
        match ExpandableCard::from_element(doc, &node, options) {
            Ok(card) => cards.push(card),
            Err(e) => warn!("skipping expandable element {node}: {e}"),
        }
    }
    debug!("initialised {} expandable cards under {container}", cards.len());
    cards
}
