//! Listener registry and event dispatch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, trace};

use super::{Document, ROOT_ID};
use crate::event::{Event, EventKind};

/// Handle returned by [`Document::add_listener`], used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// When a listener runs relative to the event target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// On the way down, root first. Runs even if a descendant later stops propagation.
    Capture,
    /// On the way back up, target first.
    Bubble,
}

type Handler = Arc<dyn Fn(&mut EventContext<'_>) + Send + Sync>;

struct Listener {
    id: ListenerId,
    node: String,
    kind: EventKind,
    phase: Phase,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct ListenerTable {
    entries: Vec<Listener>,
}

impl ListenerTable {
    fn matching(&self, node: &str, kind: EventKind, phase: Phase) -> Vec<(ListenerId, Handler)> {
        self.entries
            .iter()
            .filter(|l| l.node == node && l.kind == kind && l.phase == phase)
            .map(|l| (l.id, l.handler.clone()))
            .collect()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|l| l.id == id)
    }

    pub(crate) fn remove_nodes(&mut self, nodes: &[String]) {
        self.entries.retain(|l| !nodes.contains(&l.node));
    }
}

/// What a handler sees while an event is dispatched.
pub struct EventContext<'a> {
    document: &'a Document,
    event: &'a Event,
    target: &'a str,
    current_target: &'a str,
    phase: Phase,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<'a> EventContext<'a> {
    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// The node the event was dispatched to.
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> &'a str {
        self.current_target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Suppress the host's default handling of this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event after the listeners of the current node have run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Result of [`Document::dispatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The resolved target.
    pub target: String,
    /// Number of listeners that ran.
    pub handled: usize,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl Document {
    /// Register a listener on `node`. Returns a handle for removal.
    ///
    /// Listeners may be registered on ids that are not mounted yet; they
    /// simply never fire until a node with that id exists.
    pub fn add_listener(
        &self,
        node: impl Into<String>,
        kind: EventKind,
        phase: Phase,
        handler: impl Fn(&mut EventContext<'_>) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId::new();
        let node = node.into();
        trace!("listener {id:?} added on {node} for {kind:?} ({phase:?})");
        self.listeners().entries.push(Listener {
            id,
            node,
            kind,
            phase,
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut table = self.listeners();
        let before = table.entries.len();
        table.entries.retain(|l| l.id != id);
        before != table.entries.len()
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners().is_registered(id)
    }

    /// Total registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners().entries.len()
    }

    /// Listeners registered on one node.
    pub fn listener_count_for(&self, node: &str) -> usize {
        self.listeners()
            .entries
            .iter()
            .filter(|l| l.node == node)
            .count()
    }

    /// Deliver an event through capture and bubble phases.
    ///
    /// The target is the event's explicit target if it is mounted, else the
    /// node under the pointer, else the root. Deferred work queued before the
    /// event runs first; work queued by handlers runs once dispatch finishes.
    pub fn dispatch(&self, event: Event) -> DispatchOutcome {
        self.tick();

        let target = self.resolve_target(&event);
        let path = self.read().path_to(&target);
        let kind = event.kind();
        trace!("dispatch {kind:?} to {target}");

        let mut cx = EventContext {
            document: self,
            event: &event,
            target: &target,
            current_target: &target,
            phase: Phase::Capture,
            default_prevented: false,
            propagation_stopped: false,
        };
        let mut handled = 0;

        let bubble_path = path.iter().rev().map(|id| (id, Phase::Bubble));
        let capture_path = path.iter().map(|id| (id, Phase::Capture));
        let mut current_node: Option<&String> = None;

        for (node, phase) in capture_path.chain(bubble_path) {
            if cx.propagation_stopped && current_node != Some(node) {
                break;
            }
            current_node = Some(node);

            let handlers = self.listeners().matching(node, kind, phase);
            cx.current_target = node;
            cx.phase = phase;
            for (id, handler) in handlers {
                // Skip listeners removed by an earlier handler in this dispatch.
                if !self.has_listener(id) {
                    continue;
                }
                handler(&mut cx);
                handled += 1;
            }
        }

        let outcome = DispatchOutcome {
            target: target.clone(),
            handled,
            default_prevented: cx.default_prevented,
            propagation_stopped: cx.propagation_stopped,
        };

        self.tick();
        outcome
    }

    fn resolve_target(&self, event: &Event) -> String {
        if let Some(target) = event.target() {
            if self.exists(target) {
                return target.to_string();
            }
            debug!("event target {target} is not mounted, falling back");
        }
        event
            .position()
            .and_then(|(x, y)| self.hit_test(x, y))
            .unwrap_or_else(|| ROOT_ID.to_string())
    }
}
