use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gateway_lib::{FileInfo, file_type_label, format_file_size};
use log::{debug, trace};
use widgetdom::markup::escape_text;
use widgetdom::{Document, DomError, Element};

const SUCCESS_MESSAGE: &str = "Upload complete";
const FAILURE_MESSAGE: &str = "Upload failed";

/// Where an upload stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// Percent complete, `0..=100`.
    InProgress(u8),
    Succeeded,
    Failed,
}

impl ProgressState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress(_))
    }
}

/// A progress bar with a label, mounted for one upload.
///
/// Once [`complete`](Self::complete) has run the indicator is frozen: later
/// updates and completions are ignored.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    document: Document,
    id: String,
    bar: String,
    label: String,
    state: Arc<Mutex<ProgressState>>,
}

impl ProgressIndicator {
    /// Render an indicator for `file` as the last child of `parent`.
    pub fn mount(doc: &Document, parent: &str, file: &FileInfo) -> Result<Self, DomError> {
        let bar = Element::div()
            .class("upload-progress-bar")
            .attr("style", "width: 0%");
        let label = Element::span().class("upload-progress-label").markup("0%");
        let (bar_id, label_id) = (bar.id.clone(), label.id.clone());

        let root = Element::div()
            .class("upload-progress")
            .attr("role", "progressbar")
            .attr("aria-valuemin", "0")
            .attr("aria-valuemax", "100")
            .attr("aria-valuenow", "0")
            .child(
                Element::div()
                    .class("upload-progress-info")
                    .child(
                        Element::span()
                            .class("upload-progress-name")
                            .markup(escape_text(&file.name)),
                    )
                    .child(
                        Element::span()
                            .class("upload-progress-meta")
                            .markup(format!(
                                "{} · {}",
                                file_type_label(&file.mime_type),
                                format_file_size(file.size)
                            )),
                    ),
            )
            .child(Element::div().class("upload-progress-track").child(bar))
            .child(label);

        let id = doc.append(parent, root)?;
        debug!("progress indicator {id} mounted for {}", file.name);
        Ok(Self {
            document: doc.clone(),
            id,
            bar: bar_id,
            label: label_id,
            state: Arc::new(Mutex::new(ProgressState::InProgress(0))),
        })
    }

    /// Id of the indicator's root node.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ProgressState {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `percent` complete, clamped to `0..=100`.
    ///
    /// Returns `false` if the indicator has already completed.
    pub fn update(&self, percent: f64) -> bool {
        let mut state = self.lock();
        if state.is_terminal() {
            trace!("progress {}: update after completion ignored", self.id);
            return false;
        }
        let percent = if percent.is_nan() {
            0
        } else {
            percent.clamp(0.0, 100.0).round() as u8
        };
        *state = ProgressState::InProgress(percent);
        drop(state);

        self.render(percent, &format!("{percent}%"));
        true
    }

    /// Finish the upload display.
    ///
    /// The bar fills completely either way. The label shows `message`, or a
    /// default for the outcome. Returns `false` if already completed.
    pub fn complete(&self, success: bool, message: Option<&str>) -> bool {
        {
            let mut state = self.lock();
            if state.is_terminal() {
                trace!("progress {}: repeated completion ignored", self.id);
                return false;
            }
            *state = if success {
                ProgressState::Succeeded
            } else {
                ProgressState::Failed
            };
        }

        let default = if success {
            SUCCESS_MESSAGE
        } else {
            FAILURE_MESSAGE
        };
        self.render(100, &escape_text(message.unwrap_or(default)));
        let class = if success { "success" } else { "error" };
        if let Err(e) = self.document.add_class(&self.id, class) {
            debug!("progress {}: {e}", self.id);
        }
        debug!("progress {} completed ({class})", self.id);
        true
    }

    fn render(&self, percent: u8, label: &str) {
        let doc = &self.document;
        let results = [
            doc.set_attr(&self.bar, "style", format!("width: {percent}%")),
            doc.set_attr(&self.id, "aria-valuenow", percent.to_string()),
            doc.set_markup(&self.label, label),
        ];
        for result in results {
            if let Err(e) = result {
                debug!("progress {}: {e}", self.id);
            }
        }
    }

    /// Take the indicator out of the document.
    pub fn remove(&self) -> Result<(), DomError> {
        self.document.remove(&self.id)
    }
}
