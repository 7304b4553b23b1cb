//! A retained element tree for desktop-renderer widgets.
//!
//! The host renderer owns a [`Document`], mounts [`Element`]s into it, reports
//! rendered bounds, and feeds input as [`Event`]s. Widgets attach listeners
//! and mutate their own subtrees through the same handle.

pub mod document;
pub mod element;
pub mod error;
pub mod event;
mod hit;
pub mod markup;
pub mod rect;

pub use document::{DispatchOutcome, Document, EventContext, ListenerId, Phase, ROOT_ID};
pub use element::{Content, Element};
pub use error::DomError;
pub use event::{DroppedFile, Event, EventKind, Key, Modifiers, MouseButton};
pub use rect::Rect;
