//! Expandable card state and transitions.

use std::future::IntoFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::future::BoxFuture;
use log::{debug, error, trace};
use widgetdom::{Document, DomError, Element, ListenerId};

use super::content::{CardContent, ContentError, ContentProducer};
use super::options::CardOptions;

/// Markup shown while lazy content is being produced.
pub const LOADING_PLACEHOLDER: &str =
    "<div class=\"expandable-card-loading\">Loading...</div>";

/// Markup shown when lazy content could not be produced.
pub const ERROR_PLACEHOLDER: &str =
    "<div class=\"expandable-card-error\">Failed to load content</div>";

/// Class set on the card root while expanded.
pub const EXPANDED_CLASS: &str = "expanded";

const INDICATOR_EXPANDED: &str = "▼";
const INDICATOR_COLLAPSED: &str = "▶";

/// Observable card state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Content region hidden. Initial state.
    Collapsed,
    /// Expanded, with a lazy content load in flight.
    Expanding,
    /// Expanded, content (or an error placeholder) shown.
    Expanded,
}

/// Mutable per-card state.
#[derive(Debug, Default)]
struct CardInner {
    expanded: bool,
    loading: bool,
    destroyed: bool,
    /// Whether the content region holds the card's content.
    content_rendered: bool,
    /// Successful result of the lazy producer.
    cached: Option<String>,
    /// Bumped on every expansion; stale deferred work compares against it.
    generation: u64,
    document: Option<Document>,
    listeners: Vec<ListenerId>,
    outside_listener: Option<ListenerId>,
}

pub(super) struct CardShared {
    id: String,
    collapsed: String,
    content: CardContent,
    options: CardOptions,
    inner: Mutex<CardInner>,
}

/// A collapsible card with statically or lazily populated expanded content.
///
/// `ExpandableCard` is a cheap handle (uses `Arc` internally). Clones refer to
/// the same card.
///
/// # Example
///
/// ```ignore
/// let card = ExpandableCard::builder()
///     .id("details")
///     .collapsed("<h3>Order #42</h3>")
///     .lazy(|| async { fetch_order_details().await.map_err(ContentError::new) })
///     .close_on_outside_click(true)
///     .on_expand(|card| log::info!("{} opened", card.id()))
///     .build();
///
/// card.mount(&doc, "orders")?;
/// card.expand().await;
/// ```
#[derive(Clone)]
pub struct ExpandableCard {
    shared: Arc<CardShared>,
}

impl std::fmt::Debug for ExpandableCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableCard")
            .field("id", &self.shared.id)
            .field("state", &self.state())
            .finish()
    }
}

/// What a call to [`ExpandableCard::expand`] left to do.
///
/// Awaiting it (it implements [`IntoFuture`]) waits for a pending lazy load;
/// hosts without an executor of their own call [`spawn`](Self::spawn).
#[must_use = "a pending expansion only loads its content when awaited or spawned"]
pub enum Expansion {
    /// Nothing happened: already expanded, loading, or destroyed.
    Skipped,
    /// The transition finished synchronously.
    Complete,
    /// Lazy content is being produced.
    Pending(BoxFuture<'static, ()>),
}

impl Expansion {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Drive a pending load on the ambient tokio runtime.
    ///
    /// Returns `false` if there is no runtime; the load is then dropped,
    /// which clears the loading state and the placeholder.
    pub fn spawn(self) -> bool {
        let Self::Pending(load) = self else {
            return true;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(load);
                true
            }
            Err(_) => false,
        }
    }
}

impl IntoFuture for Expansion {
    type Output = ();
    type IntoFuture = BoxFuture<'static, ()>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Pending(load) => load,
            Self::Skipped | Self::Complete => Box::pin(std::future::ready(())),
        }
    }
}

impl std::fmt::Debug for Expansion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => f.write_str("Skipped"),
            Self::Complete => f.write_str("Complete"),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// How the content region is filled on expansion.
enum Fill {
    Keep,
    Markup(String),
    Load(ContentProducer),
}

/// Clears the loading flag when a lazy load ends, however it ends.
///
/// If the load never delivered a result (the future was dropped or the
/// producer panicked) the placeholder is cleared as well.
struct LoadGuard {
    card: Weak<CardShared>,
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        let Some(shared) = self.card.upgrade() else {
            return;
        };
        let card = ExpandableCard { shared };
        let document = {
            let mut inner = card.lock();
            inner.loading = false;
            if inner.destroyed {
                return;
            }
            inner.document.clone()
        };
        if let Some(doc) = document
            && doc
                .inner_markup(&card.content_id())
                .is_ok_and(|m| m == LOADING_PLACEHOLDER)
        {
            log_dom(card.id(), doc.set_markup(&card.content_id(), ""));
        }
    }
}

fn log_dom(card: &str, result: Result<(), DomError>) {
    if let Err(e) = result {
        debug!("card {card}: {e}");
    }
}

impl ExpandableCard {
    pub(super) fn from_parts(
        id: String,
        collapsed: String,
        content: CardContent,
        options: CardOptions,
    ) -> Self {
        Self {
            shared: Arc::new(CardShared {
                id,
                collapsed,
                content,
                options,
                inner: Mutex::new(CardInner::default()),
            }),
        }
    }

    pub(super) fn downgrade(&self) -> Weak<CardShared> {
        Arc::downgrade(&self.shared)
    }

    pub(super) fn upgrade(weak: &Weak<CardShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    fn lock(&self) -> MutexGuard<'_, CardInner> {
        self.shared.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// The card id, also the id of its root node.
    pub fn id(&self) -> &str {
        &self.shared.id
    }

    pub fn header_id(&self) -> String {
        format!("{}-header", self.shared.id)
    }

    pub fn content_id(&self) -> String {
        format!("{}-content", self.shared.id)
    }

    fn indicator_id(&self) -> String {
        format!("{}-indicator", self.shared.id)
    }

    pub fn options(&self) -> &CardOptions {
        &self.shared.options
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn state(&self) -> CardState {
        let inner = self.lock();
        match (inner.expanded, inner.loading) {
            (false, _) => CardState::Collapsed,
            (true, true) => CardState::Expanding,
            (true, false) => CardState::Expanded,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.lock().expanded
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn is_destroyed(&self) -> bool {
        self.lock().destroyed
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().document.is_some()
    }

    /// The document this card is mounted in.
    pub fn document(&self) -> Option<Document> {
        self.lock().document.clone()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Build the card's element for its current state.
    pub fn render(&self) -> Element {
        let id = &self.shared.id;
        let (expanded, content) = {
            let inner = self.lock();
            let content = match &self.shared.content {
                CardContent::Static(markup) if inner.content_rendered => Some(markup.clone()),
                CardContent::Lazy(_) => inner.cached.clone(),
                CardContent::Static(_) => None,
            };
            (inner.expanded, content)
        };

        let header = Element::div()
            .id(self.header_id())
            .class("expandable-card-header")
            .child(
                Element::div()
                    .id(format!("{id}-summary"))
                    .class("expandable-card-summary")
                    .markup(self.shared.collapsed.clone()),
            )
            .child(
                Element::span()
                    .id(self.indicator_id())
                    .class("expandable-card-indicator")
                    .attr("aria-hidden", "true")
                    .markup(if expanded {
                        INDICATOR_EXPANDED
                    } else {
                        INDICATOR_COLLAPSED
                    }),
            );

        let mut body = Element::div()
            .id(self.content_id())
            .class("expandable-card-content")
            .hidden(!expanded);
        if let Some(markup) = content {
            body = body.markup(markup);
        }

        let mut card = Element::div()
            .id(id.clone())
            .class("expandable-card")
            .attr("data-card-id", id.clone())
            .attr("role", "button")
            .attr("tabindex", "0")
            .attr("aria-expanded", expanded.to_string())
            .attr("aria-controls", self.content_id())
            .child(header)
            .child(body);
        if expanded {
            card = card.class(EXPANDED_CLASS);
        }
        card
    }

    /// Render the card as the last child of `parent` and attach its listeners.
    pub fn mount(&self, doc: &Document, parent: &str) -> Result<String, DomError> {
        let id = doc.append(parent, self.render())?;
        self.attach(doc);
        Ok(id)
    }

    /// Render the card in place of an existing node and attach its listeners.
    pub fn mount_replacing(&self, doc: &Document, existing: &str) -> Result<String, DomError> {
        let id = doc.replace(existing, self.render())?;
        self.attach(doc);
        Ok(id)
    }

    fn attach(&self, doc: &Document) {
        let previous = {
            let mut inner = self.lock();
            inner.document = Some(doc.clone());
            std::mem::take(&mut inner.listeners)
        };
        for id in previous {
            doc.remove_listener(id);
        }
        let listeners = super::events::attach(self, doc);
        self.lock().listeners = listeners;
        debug!("card {} mounted", self.shared.id);
    }

    /// Reflect the expanded flag in the DOM.
    fn apply_expanded(&self, doc: &Document, expanded: bool) {
        let id = self.id();
        if expanded {
            log_dom(id, doc.add_class(id, EXPANDED_CLASS));
        } else {
            log_dom(id, doc.remove_class(id, EXPANDED_CLASS));
        }
        log_dom(id, doc.set_attr(id, "aria-expanded", expanded.to_string()));
        log_dom(id, doc.set_hidden(&self.content_id(), !expanded));
        let indicator = if expanded {
            INDICATOR_EXPANDED
        } else {
            INDICATOR_COLLAPSED
        };
        log_dom(id, doc.set_markup(&self.indicator_id(), indicator));
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Expand if collapsed, collapse if expanded.
    pub fn toggle(&self) -> Expansion {
        if self.is_expanded() {
            self.collapse();
            Expansion::Complete
        } else {
            self.expand()
        }
    }

    /// Show the expanded content.
    ///
    /// Does nothing while already expanded, while a load is in flight, or after
    /// [`destroy`](Self::destroy). Presentation changes and static content are
    /// applied before this returns; lazy content is produced by the returned
    /// [`Expansion::Pending`] future. A failing producer is logged and shown
    /// inline; the error is never returned.
    pub fn expand(&self) -> Expansion {
        let (document, generation, fill) = {
            let mut inner = self.lock();
            if inner.destroyed || inner.expanded || inner.loading {
                trace!("card {}: expand ignored", self.shared.id);
                return Expansion::Skipped;
            }
            inner.expanded = true;
            inner.generation += 1;

            let fill = match &self.shared.content {
                CardContent::Static(markup) if !inner.content_rendered => {
                    inner.content_rendered = true;
                    Fill::Markup(markup.clone())
                }
                CardContent::Lazy(producer) if inner.cached.is_none() => {
                    inner.loading = true;
                    Fill::Load(producer.clone())
                }
                _ => Fill::Keep,
            };
            (inner.document.clone(), inner.generation, fill)
        };
        debug!("card {} expanding", self.shared.id);

        if let Some(doc) = &document {
            self.apply_expanded(doc, true);
            if self.shared.options.close_on_outside_click {
                super::events::schedule_outside_listener(self, doc, generation);
            }
        }

        match fill {
            Fill::Keep => {
                self.notify_expanded();
                Expansion::Complete
            }
            Fill::Markup(markup) => {
                if let Some(doc) = &document {
                    log_dom(self.id(), doc.set_markup(&self.content_id(), markup));
                }
                self.notify_expanded();
                Expansion::Complete
            }
            Fill::Load(producer) => {
                if let Some(doc) = &document {
                    log_dom(
                        self.id(),
                        doc.set_markup(&self.content_id(), LOADING_PLACEHOLDER),
                    );
                }
                let guard = LoadGuard {
                    card: self.downgrade(),
                };
                let card = self.clone();
                Expansion::Pending(Box::pin(async move {
                    let result = producer.produce().await;
                    card.apply_loaded(result);
                    drop(guard);
                    card.notify_expanded();
                }))
            }
        }
    }

    /// Start a pending load from an event handler.
    ///
    /// Uses the configured spawner, else the ambient tokio runtime. A load
    /// that cannot be started counts as a failed one.
    pub(super) fn drive(&self, expansion: Expansion) {
        let Expansion::Pending(load) = expansion else {
            return;
        };
        if let Some(spawner) = &self.shared.options.spawner {
            spawner(load);
        } else if !Expansion::Pending(load).spawn() {
            self.apply_loaded(Err(ContentError::new("no async runtime to run the load")));
            self.notify_expanded();
        }
    }

    /// Write a finished load into the content region.
    fn apply_loaded(&self, result: Result<String, ContentError>) {
        let document = {
            let mut inner = self.lock();
            if inner.destroyed {
                debug!(
                    "card {} destroyed while loading; discarding result",
                    self.shared.id
                );
                return;
            }
            if let Ok(markup) = &result {
                inner.cached = Some(markup.clone());
                inner.content_rendered = true;
            }
            inner.document.clone()
        };

        let markup = match result {
            Ok(markup) => {
                debug!("card {} content loaded", self.shared.id);
                markup
            }
            Err(e) => {
                error!("failed to load content for card {}: {e}", self.shared.id);
                ERROR_PLACEHOLDER.to_string()
            }
        };
        if let Some(doc) = document {
            log_dom(self.id(), doc.set_markup(&self.content_id(), markup));
        }
    }

    fn notify_expanded(&self) {
        {
            let inner = self.lock();
            if inner.destroyed || !inner.expanded {
                return;
            }
        }
        if let Some(callback) = &self.shared.options.on_expand {
            callback(self);
        }
    }

    /// Hide the expanded content. Returns `false` if there was nothing to do.
    ///
    /// The content region is hidden, not cleared, so a later expansion shows
    /// the same rendering.
    pub fn collapse(&self) -> bool {
        let (document, outside) = {
            let mut inner = self.lock();
            if inner.destroyed || !inner.expanded {
                trace!("card {}: collapse ignored", self.shared.id);
                return false;
            }
            inner.expanded = false;
            (inner.document.clone(), inner.outside_listener.take())
        };
        debug!("card {} collapsing", self.shared.id);

        if let Some(doc) = &document {
            if let Some(listener) = outside {
                doc.remove_listener(listener);
            }
            self.apply_expanded(doc, false);
        }

        if let Some(callback) = &self.shared.options.on_collapse {
            callback(self);
        }
        true
    }

    /// Forget cached lazy content so the next expansion produces it again.
    ///
    /// Static content is unaffected.
    pub fn invalidate(&self) {
        if self.shared.content.is_lazy() {
            self.lock().cached = None;
        }
    }

    /// Detach every listener. Safe to call repeatedly, or on a card that was
    /// never mounted.
    ///
    /// A load still in flight finishes but no longer touches the DOM. The
    /// rendered subtree stays where it is; removing it is up to the host.
    pub fn destroy(&self) {
        let (document, listeners) = {
            let mut inner = self.lock();
            if inner.destroyed {
                return;
            }
            inner.destroyed = true;
            let mut listeners = std::mem::take(&mut inner.listeners);
            listeners.extend(inner.outside_listener.take());
            (inner.document.clone(), listeners)
        };

        if let Some(doc) = document {
            for id in listeners {
                doc.remove_listener(id);
            }
        }
        debug!("card {} destroyed", self.shared.id);
    }

    // -------------------------------------------------------------------------
    // Outside-click bookkeeping (used by the event module)
    // -------------------------------------------------------------------------

    /// Register the outside listener if this expansion is still current.
    pub(super) fn install_outside_listener(
        &self,
        generation: u64,
        register: impl FnOnce() -> ListenerId,
    ) {
        let mut inner = self.lock();
        if inner.destroyed
            || !inner.expanded
            || inner.generation != generation
            || inner.outside_listener.is_some()
        {
            return;
        }
        inner.outside_listener = Some(register());
    }
}
