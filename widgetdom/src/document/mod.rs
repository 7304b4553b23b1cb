//! The host-owned element tree.
//!
//! A [`Document`] is a cheap, cloneable handle. Widgets keep a clone and
//! address their nodes by id; the tree itself stays with the host.

mod dispatch;
pub(crate) mod tree;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::trace;

pub use dispatch::{DispatchOutcome, EventContext, ListenerId, Phase};
pub use tree::ROOT_ID;

use crate::element::Element;
use crate::error::DomError;
use crate::hit;
use crate::markup;
use crate::rect::Rect;
use dispatch::ListenerTable;
use tree::Tree;

type DeferredTask = Box<dyn FnOnce(&Document) + Send>;

#[derive(Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

struct DocumentInner {
    tree: RwLock<Tree>,
    listeners: Mutex<ListenerTable>,
    deferred: Mutex<VecDeque<DeferredTask>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DocumentInner {
                tree: RwLock::new(Tree::new()),
                listeners: Mutex::new(ListenerTable::default()),
                deferred: Mutex::new(VecDeque::new()),
            }),
        }
    }

    pub fn root(&self) -> &'static str {
        ROOT_ID
    }

    // -------------------------------------------------------------------------
    // Lock helpers
    // -------------------------------------------------------------------------

    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner.tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners(&self) -> MutexGuard<'_, ListenerTable> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Mount `element` as the last child of `parent`. Returns the element id.
    pub fn append(&self, parent: &str, element: Element) -> Result<String, DomError> {
        self.write().insert(parent, None, element)
    }

    /// Replace a mounted node with `element`, keeping its sibling position.
    ///
    /// The old subtree is dropped along with every listener registered on it.
    /// The new element may reuse the old node's id.
    pub fn replace(&self, existing: &str, element: Element) -> Result<String, DomError> {
        let (id, removed) = self.write().replace(existing, element)?;
        self.listeners().remove_nodes(&removed);
        trace!("replaced {existing} with {id}");
        Ok(id)
    }

    /// Remove a node and its subtree, along with their listeners.
    pub fn remove(&self, id: &str) -> Result<(), DomError> {
        let removed = self.write().remove(id)?;
        self.listeners().remove_nodes(&removed);
        Ok(())
    }

    pub fn exists(&self, id: &str) -> bool {
        self.read().exists(id)
    }

    pub fn parent(&self, id: &str) -> Option<String> {
        self.read().get(id).ok().and_then(|n| n.parent.clone())
    }

    pub fn children(&self, id: &str) -> Vec<String> {
        self.read()
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn tag(&self, id: &str) -> Option<String> {
        self.read().get(id).ok().map(|n| n.tag.clone())
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: &str, node: &str) -> bool {
        self.read().contains(ancestor, node)
    }

    /// Descendants of `container` carrying attribute `name`, in document order.
    pub fn query_attr(&self, container: &str, name: &str) -> Vec<String> {
        let tree = self.read();
        tree.descendants(container)
            .into_iter()
            .filter(|id| tree.get(id).is_ok_and(|n| n.attrs.contains_key(name)))
            .collect()
    }

    /// First direct child of `id` carrying attribute `name`.
    pub fn first_child_with_attr(&self, id: &str, name: &str) -> Option<String> {
        let tree = self.read();
        let node = tree.get(id).ok()?;
        node.children
            .iter()
            .find(|c| tree.get(c).is_ok_and(|n| n.attrs.contains_key(name)))
            .cloned()
    }

    // -------------------------------------------------------------------------
    // Attributes and classes
    // -------------------------------------------------------------------------

    pub fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.read().get(id).ok()?.attrs.get(name).cloned()
    }

    pub fn set_attr(
        &self,
        id: &str,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.write()
            .get_mut(id)?
            .attrs
            .insert(name.into(), value.into());
        Ok(())
    }

    pub fn remove_attr(&self, id: &str, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.write().get_mut(id)?.attrs.remove(name))
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.read()
            .get(id)
            .is_ok_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&self, id: &str, class: &str) -> Result<(), DomError> {
        let mut tree = self.write();
        let node = tree.get_mut(id)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&self, id: &str, class: &str) -> Result<(), DomError> {
        self.write().get_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.read().get(id).is_ok_and(|n| n.hidden)
    }

    pub fn set_hidden(&self, id: &str, hidden: bool) -> Result<(), DomError> {
        self.write().get_mut(id)?.hidden = hidden;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Markup
    // -------------------------------------------------------------------------

    /// The node's content as markup: its leaf fragment, or its serialised children.
    pub fn inner_markup(&self, id: &str) -> Result<String, DomError> {
        let tree = self.read();
        let node = tree.get(id)?;
        Ok(markup::inner(&tree, node))
    }

    /// The node itself serialised as markup.
    pub fn outer_markup(&self, id: &str) -> Result<String, DomError> {
        let tree = self.read();
        let node = tree.get(id)?;
        Ok(markup::outer(&tree, id, node))
    }

    /// Replace the node's content with a markup fragment, dropping its children.
    pub fn set_markup(&self, id: &str, markup: impl Into<String>) -> Result<(), DomError> {
        let removed = self.write().set_markup(id, markup.into())?;
        if !removed.is_empty() {
            self.listeners().remove_nodes(&removed);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Record the rendered bounds of a node, as reported by the host.
    pub fn set_bounds(&self, id: &str, bounds: Rect) -> Result<(), DomError> {
        self.write().get_mut(id)?.bounds = Some(bounds);
        Ok(())
    }

    pub fn bounds(&self, id: &str) -> Option<Rect> {
        self.read().get(id).ok()?.bounds
    }

    /// Find the deepest visible node under the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<String> {
        hit::hit_test(&self.read(), x, y)
    }

    // -------------------------------------------------------------------------
    // Deferred work
    // -------------------------------------------------------------------------

    /// Queue work for the next tick.
    ///
    /// The queue is drained before and after every [`dispatch`](Self::dispatch)
    /// and by [`tick`](Self::tick), so work deferred while handling an event
    /// never observes that same event.
    pub fn defer(&self, task: impl FnOnce(&Document) + Send + 'static) {
        self.inner
            .deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Box::new(task));
    }

    /// Run all queued deferred work. Returns how many tasks ran.
    pub fn tick(&self) -> usize {
        let tasks: Vec<DeferredTask> = self
            .inner
            .deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        let count = tasks.len();
        for task in tasks {
            task(self);
        }
        count
    }

    pub fn pending_tasks(&self) -> usize {
        self.inner
            .deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
