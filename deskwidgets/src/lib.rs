//! Desktop-renderer widgets built on [`widgetdom`].
//!
//! - [`card`]: the expandable content card and its bulk initialisers.
//! - [`upload`]: drop zone and file-input bindings, the progress indicator,
//!   and the glue that drives a gateway upload.
//! - [`notify`]: how widgets surface messages to the user.

pub mod card;
pub mod notify;
pub mod prelude;
pub mod upload;

pub use card::{
    CardContent, CardOptions, CardState, ContentError, Expansion, ExpandableCard,
    init_expandable_cards,
};
pub use notify::{LogNotifier, Notifier};
pub use upload::{ProgressIndicator, ProgressState, UploadBinding};
