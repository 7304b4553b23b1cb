use std::sync::Arc;

use gateway_lib::UploadPolicy;
use log::debug;
use widgetdom::{Document, DomError, DroppedFile, EventKind, Phase};

use super::{FileCallback, UploadBinding, accept_first};
use crate::notify::Notifier;

/// Validate files picked through a file input.
///
/// Works like [`bind_drop_zone`](super::bind_drop_zone) but listens for the
/// input's change events.
pub fn bind_file_input(
    doc: &Document,
    input: &str,
    policy: UploadPolicy,
    notifier: Arc<dyn Notifier>,
    on_file: impl Fn(DroppedFile) + Send + Sync + 'static,
) -> Result<UploadBinding, DomError> {
    if !doc.exists(input) {
        return Err(DomError::NodeNotFound(input.to_string()));
    }
    let on_file: FileCallback = Arc::new(on_file);

    let listener = doc.add_listener(input, EventKind::Change, Phase::Bubble, move |cx| {
        accept_first(cx.event().files(), &policy, notifier.as_ref(), &on_file);
    });

    debug!("file input bound to {input}");
    Ok(UploadBinding::new(doc, input, vec![listener], None))
}
