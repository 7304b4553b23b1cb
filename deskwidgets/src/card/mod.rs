//! Expandable content card.
//!
//! A card has a header that is always visible and a content region shown only
//! while expanded. Content is either fixed markup or produced on demand by an
//! async function, in which case a loading placeholder is shown until it
//! arrives.
//!
//! Cards toggle on click, on `Enter` and on `Space`. `Escape` collapses. With
//! [`CardOptions::close_on_outside_click`] a click anywhere else in the
//! document collapses the card too.
//!
//! # Example
//!
//! ```ignore
//! let card = ExpandableCard::builder()
//!     .collapsed("<h3>Summary</h3>")
//!     .expanded("<p>Details</p>")
//!     .build();
//! card.mount(&doc, "sidebar")?;
//!
//! doc.dispatch(Event::click_on(card.id()));
//! assert!(card.is_expanded());
//! ```

mod builder;
mod content;
mod events;
mod factory;
mod options;
mod state;

pub use builder::CardBuilder;
pub use content::{CardContent, ContentError, ContentProducer};
pub use factory::{
    CARD_ID_ATTR, COLLAPSED_ATTR, EXPANDED_ATTR, MARKER_ATTR, init_expandable_cards,
};
pub use options::{CardCallback, CardOptions, Spawner};
pub use state::{
    CardState, ERROR_PLACEHOLDER, EXPANDED_CLASS, ExpandableCard, Expansion, LOADING_PLACEHOLDER,
};
