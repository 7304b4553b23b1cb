//! Node arena backing a [`Document`](super::Document).

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::element::{Content, Element};
use crate::error::DomError;
use crate::rect::Rect;

pub const ROOT_ID: &str = "root";

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub hidden: bool,
    /// Leaf markup. Mutually exclusive with `children`.
    pub markup: Option<String>,
    pub children: Vec<String>,
    pub parent: Option<String>,
    pub bounds: Option<Rect>,
}

impl Node {
    fn detached(element: &Element) -> Self {
        Self {
            tag: element.tag.clone(),
            attrs: element.attrs.clone(),
            classes: element.classes.clone(),
            hidden: element.hidden,
            markup: None,
            children: Vec::new(),
            parent: None,
            bounds: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Tree {
    nodes: HashMap<String, Node>,
}

impl Tree {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            ROOT_ID.to_string(),
            Node {
                tag: "body".into(),
                attrs: BTreeMap::new(),
                classes: Vec::new(),
                hidden: false,
                markup: None,
                children: Vec::new(),
                parent: None,
                bounds: None,
            },
        );
        Self { nodes }
    }

    pub fn get(&self, id: &str) -> Result<&Node, DomError> {
        self.nodes
            .get(id)
            .ok_or_else(|| DomError::NodeNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Node, DomError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| DomError::NodeNotFound(id.to_string()))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert `element` under `parent` at `index` (or at the end).
    pub fn insert(
        &mut self,
        parent: &str,
        index: Option<usize>,
        element: Element,
    ) -> Result<String, DomError> {
        self.get(parent)?;
        self.check_ids(&element, &HashSet::new())?;

        let id = element.id.clone();
        self.mount(parent, element);

        let node = self.get_mut(parent)?;
        node.markup = None;
        match index {
            Some(i) if i <= node.children.len() => node.children.insert(i, id.clone()),
            _ => node.children.push(id.clone()),
        }
        Ok(id)
    }

    /// Replace `existing` with `element` at the same sibling position.
    ///
    /// Ids are checked before anything is removed, so a failed replace leaves
    /// the tree untouched. Returns the new id and every removed id.
    pub fn replace(
        &mut self,
        existing: &str,
        element: Element,
    ) -> Result<(String, Vec<String>), DomError> {
        if existing == ROOT_ID {
            return Err(DomError::RootImmutable);
        }
        let (parent, index) = self.index_in_parent(existing)?;
        let outgoing: HashSet<String> = std::iter::once(existing.to_string())
            .chain(self.descendants(existing))
            .collect();
        self.check_ids(&element, &outgoing)?;

        let removed = self.remove(existing)?;
        let id = self.insert(&parent, Some(index), element)?;
        Ok((id, removed))
    }

    /// Reject elements whose ids collide with mounted nodes (other than
    /// `outgoing`) or with each other.
    fn check_ids(&self, element: &Element, outgoing: &HashSet<String>) -> Result<(), DomError> {
        let mut seen = HashSet::new();
        let mut stack = vec![element];
        while let Some(el) = stack.pop() {
            let taken = self.exists(&el.id) && !outgoing.contains(&el.id);
            if taken || !seen.insert(el.id.as_str()) {
                return Err(DomError::DuplicateId(el.id.clone()));
            }
            if let Content::Children(children) = &el.content {
                stack.extend(children.iter());
            }
        }
        Ok(())
    }

    fn mount(&mut self, parent: &str, element: Element) {
        let mut node = Node::detached(&element);
        node.parent = Some(parent.to_string());

        let id = element.id;
        match element.content {
            Content::None => {}
            Content::Markup(markup) => node.markup = Some(markup),
            Content::Children(children) => {
                node.children = children.iter().map(|c| c.id.clone()).collect();
                for child in children {
                    self.mount(&id, child);
                }
            }
        }
        self.nodes.insert(id, node);
    }

    /// Detach a node and drop its whole subtree. Returns every removed id.
    pub fn remove(&mut self, id: &str) -> Result<Vec<String>, DomError> {
        if id == ROOT_ID {
            return Err(DomError::RootImmutable);
        }
        let parent = self.get(id)?.parent.clone();
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| c != id);
        }
        Ok(self.drop_subtree(id))
    }

    fn drop_subtree(&mut self, id: &str) -> Vec<String> {
        let mut removed = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed.push(current);
            }
        }
        removed
    }

    /// Replace the children of `id` with a markup leaf. Returns the dropped ids.
    pub fn set_markup(&mut self, id: &str, markup: String) -> Result<Vec<String>, DomError> {
        let children = std::mem::take(&mut self.get_mut(id)?.children);
        let removed = children
            .iter()
            .flat_map(|child| self.drop_subtree(child))
            .collect();
        self.get_mut(id)?.markup = Some(markup);
        Ok(removed)
    }

    pub fn index_in_parent(&self, id: &str) -> Result<(String, usize), DomError> {
        let parent = self.get(id)?.parent.clone().ok_or(DomError::RootImmutable)?;
        let index = self
            .get(&parent)?
            .children
            .iter()
            .position(|c| c == id)
            .unwrap_or(0);
        Ok((parent, index))
    }

    /// Ids from the root down to `id`, inclusive.
    pub fn path_to(&self, id: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id.to_string());
        while let Some(node_id) = current {
            current = self.nodes.get(&node_id).and_then(|n| n.parent.clone());
            path.push(node_id);
        }
        path.reverse();
        path
    }

    pub fn contains(&self, ancestor: &str, node: &str) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent.as_deref());
        }
        false
    }

    /// Descendants of `container` (excluding itself) in document order.
    pub fn descendants(&self, container: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = match self.nodes.get(container) {
            Some(node) => node.children.iter().rev().map(String::as_str).collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id.to_string());
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().map(String::as_str));
            }
        }
        out
    }
}
