//! File upload widgets.
//!
//! [`bind_drop_zone`] and [`bind_file_input`] turn DOM events into validated
//! files, [`ProgressIndicator`] shows an upload's progress, and
//! [`upload_with_progress`] ties a gateway upload to an indicator.

mod drop_zone;
mod file_input;
mod progress;
mod task;

use std::sync::{Arc, Mutex, PoisonError};

use gateway_lib::{FileInfo, UploadFile, UploadPolicy, Validation};
use log::{debug, warn};
use widgetdom::{Document, DroppedFile, ListenerId};

use crate::notify::Notifier;

pub use drop_zone::{DRAG_ACTIVE_CLASS, bind_drop_zone};
pub use file_input::bind_file_input;
pub use gateway_lib::{file_type_label, format_file_size};
pub use progress::{ProgressIndicator, ProgressState};
pub use task::upload_with_progress;

/// Callback receiving an accepted file.
pub type FileCallback = Arc<dyn Fn(DroppedFile) + Send + Sync>;

/// Describe a DOM-side file for validation and display.
pub fn file_info(file: &DroppedFile) -> FileInfo {
    FileInfo::new(&file.name, &file.mime_type, file.size())
}

/// Convert a DOM-side file into an upload payload.
pub fn to_upload_file(file: DroppedFile) -> UploadFile {
    UploadFile::new(file.name, file.mime_type, file.data)
}

/// Validate the first file of an event and hand it on, or tell the user why not.
fn accept_first(
    files: &[DroppedFile],
    policy: &UploadPolicy,
    notifier: &dyn Notifier,
    on_file: &FileCallback,
) {
    let Some(file) = files.first() else {
        debug!("event carried no files");
        return;
    };
    match policy.validate(&file_info(file)) {
        Validation::Valid => on_file(file.clone()),
        Validation::Invalid(failure) => {
            warn!("rejected {}: {failure}", file.name);
            notifier.alert(&failure.to_string());
        }
    }
}

/// Listeners attached by a bind call.
///
/// Dropping the binding leaves the listeners in place; call
/// [`unbind`](Self::unbind) to detach them.
#[derive(Debug, Clone)]
pub struct UploadBinding {
    document: Document,
    node: String,
    state: Arc<Mutex<Option<Vec<ListenerId>>>>,
    cleanup_class: Option<&'static str>,
}

impl UploadBinding {
    fn new(
        document: &Document,
        node: &str,
        listeners: Vec<ListenerId>,
        cleanup_class: Option<&'static str>,
    ) -> Self {
        Self {
            document: document.clone(),
            node: node.to_string(),
            state: Arc::new(Mutex::new(Some(listeners))),
            cleanup_class,
        }
    }

    /// The bound node.
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn is_bound(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Detach every listener. Safe to call repeatedly.
    pub fn unbind(&self) {
        let listeners = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(listeners) = listeners else {
            return;
        };
        for id in listeners {
            self.document.remove_listener(id);
        }
        if let Some(class) = self.cleanup_class
            && self.document.exists(&self.node)
            && let Err(e) = self.document.remove_class(&self.node, class)
        {
            debug!("unbind {}: {e}", self.node);
        }
        debug!("unbound upload listeners from {}", self.node);
    }
}
