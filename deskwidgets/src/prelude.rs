//! Common imports for hosts wiring up widgets.

pub use crate::card::{
    CardContent, CardOptions, CardState, ContentError, Expansion, ExpandableCard,
    init_expandable_cards,
};
pub use crate::notify::{LogNotifier, Notifier};
pub use crate::upload::{
    ProgressIndicator, ProgressState, UploadBinding, bind_drop_zone, bind_file_input,
    file_type_label, format_file_size, upload_with_progress,
};
pub use gateway_lib::{GatewayClient, UploadOptions, UploadPolicy, Validation};
pub use widgetdom::{Document, DroppedFile, Element, Event, Key, Rect};
