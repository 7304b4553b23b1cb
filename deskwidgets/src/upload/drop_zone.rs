use std::sync::Arc;

use gateway_lib::UploadPolicy;
use log::{debug, trace};
use widgetdom::{Document, DomError, DroppedFile, EventKind, Phase};

use super::{FileCallback, UploadBinding, accept_first};
use crate::notify::Notifier;

/// Class present on the zone while a drag hovers over it.
pub const DRAG_ACTIVE_CLASS: &str = "drag-active";

/// Make `zone` accept dropped files.
///
/// The host's default drag and drop handling is suppressed on the zone. The
/// first dropped file is checked against `policy`: an accepted file goes to
/// `on_file`, a rejected one is reported through `notifier`. Further files in
/// the same drop are ignored.
pub fn bind_drop_zone(
    doc: &Document,
    zone: &str,
    policy: UploadPolicy,
    notifier: Arc<dyn Notifier>,
    on_file: impl Fn(DroppedFile) + Send + Sync + 'static,
) -> Result<UploadBinding, DomError> {
    if !doc.exists(zone) {
        return Err(DomError::NodeNotFound(zone.to_string()));
    }
    let on_file: FileCallback = Arc::new(on_file);
    let id = zone.to_string();

    let mut listeners = Vec::with_capacity(4);
    for kind in [EventKind::DragEnter, EventKind::DragOver] {
        let zone = id.clone();
        listeners.push(doc.add_listener(&id, kind, Phase::Bubble, move |cx| {
            cx.prevent_default();
            if let Err(e) = cx.document().add_class(&zone, DRAG_ACTIVE_CLASS) {
                debug!("drop zone {zone}: {e}");
            }
        }));
    }

    let zone_id = id.clone();
    listeners.push(doc.add_listener(&id, EventKind::DragLeave, Phase::Bubble, move |cx| {
        if let Err(e) = cx.document().remove_class(&zone_id, DRAG_ACTIVE_CLASS) {
            debug!("drop zone {zone_id}: {e}");
        }
    }));

    let zone_id = id.clone();
    listeners.push(doc.add_listener(&id, EventKind::Drop, Phase::Bubble, move |cx| {
        cx.prevent_default();
        if let Err(e) = cx.document().remove_class(&zone_id, DRAG_ACTIVE_CLASS) {
            debug!("drop zone {zone_id}: {e}");
        }
        trace!("drop on {zone_id}: {} file(s)", cx.event().files().len());
        accept_first(cx.event().files(), &policy, notifier.as_ref(), &on_file);
    }));

    debug!("drop zone bound to {id}");
    Ok(UploadBinding::new(doc, &id, listeners, Some(DRAG_ACTIVE_CLASS)))
}
