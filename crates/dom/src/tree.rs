//! Mutable node store over scraper's `Html` tree.
//!
//! `ego_tree` never frees nodes, so removed subtrees are unlinked node by node
//! and their slots go on a free list. Each slot carries a generation; a
//! [`NodeKey`] minted before the slot was freed no longer resolves.

use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
use html5ever::{tendril::StrTendril, Attribute, LocalName, Namespace, QualName};
use scraper::{node::Element, CaseSensitivity, ElementRef, Html, Node, Selector};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    id: NodeId,
    generation: u32,
}

pub(crate) struct Dom {
    html: Html,
    body: NodeId,
    generations: HashMap<NodeId, u32>,
    free: Vec<NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let html = Html::parse_fragment("");
        let body = html.root_element().id();
        Self {
            html,
            body,
            generations: HashMap::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn body(&self) -> NodeKey {
        self.key(self.body)
    }

    pub(crate) fn key(&self, id: NodeId) -> NodeKey {
        NodeKey {
            id,
            generation: self.generations.get(&id).copied().unwrap_or(0),
        }
    }

    /// The live node behind `key`, if its slot has not been freed since.
    pub(crate) fn resolve(&self, key: NodeKey) -> Option<NodeId> {
        (self.key(key.id) == key).then_some(key.id)
    }

    /// Attached plus free slots.
    pub(crate) fn capacity(&self) -> usize {
        self.html.tree.values().len()
    }

    fn node(&self, key: NodeKey) -> Option<NodeRef<'_, Node>> {
        self.resolve(key).and_then(|id| self.html.tree.get(id))
    }

    fn element_ref(&self, key: NodeKey) -> Option<ElementRef<'_>> {
        self.node(key).and_then(ElementRef::wrap)
    }

    pub(crate) fn element(&self, key: NodeKey) -> Option<&Element> {
        self.node(key).and_then(|node| node.value().as_element())
    }

    pub(crate) fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.node(key)
            .and_then(|node| node.parent())
            .map(|parent| self.key(parent.id()))
    }

    pub(crate) fn has_class(&self, key: NodeKey, class: &str) -> bool {
        self.element(key)
            .is_some_and(|element| element.has_class(class, CaseSensitivity::CaseSensitive))
    }

    pub(crate) fn set_attr(&mut self, key: NodeKey, name: &str, value: &str) {
        let Some(mut node) = self.resolve(key).and_then(|id| self.html.tree.get_mut(id)) else {
            return;
        };
        let Node::Element(element) = node.value() else {
            return;
        };

        let mut replaced = false;
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(attr_name, current)| {
                let kept: &str = if &*attr_name.local == name {
                    replaced = true;
                    value
                } else {
                    &**current
                };
                Attribute {
                    name: attr_name.clone(),
                    value: StrTendril::from_slice(kept),
                }
            })
            .collect();
        if !replaced {
            attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: StrTendril::from_slice(value),
            });
        }
        // Rebuilt rather than patched: scraper caches the id and class list.
        *element = Element::new(element.name.clone(), attrs);
    }

    pub(crate) fn text_content(&self, key: NodeKey) -> String {
        self.element_ref(key)
            .map(|element| element.text().collect())
            .unwrap_or_default()
    }

    pub(crate) fn inner_html(&self, key: NodeKey) -> String {
        self.element_ref(key)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    /// Elements under `scope`, in document order, matching `selector`.
    pub(crate) fn query_all(&self, scope: NodeKey, selector: &Selector) -> Vec<NodeKey> {
        let Some(scope) = self.node(scope) else {
            return Vec::new();
        };
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .map(|element| self.key(element.id()))
            .collect()
    }

    /// Swaps the children of `parent` for the parsed `markup`.
    ///
    /// Markup is parsed before anything is touched, so a parse error leaves
    /// the tree as it was. Returns the keys of the nodes that were removed.
    pub(crate) fn replace_children(
        &mut self,
        parent: NodeKey,
        markup: &str,
    ) -> Result<Vec<NodeKey>> {
        let fragment = parse(markup)?;
        let parent = self.resolve(parent).ok_or(Error::DetachedElement)?;

        let children: Vec<NodeId> = match self.html.tree.get(parent) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => return Err(Error::DetachedElement),
        };
        let mut removed = Vec::new();
        for child in children {
            removed.extend(self.release(child));
        }

        self.import(&fragment, parent);
        Ok(removed)
    }

    pub(crate) fn append_children(&mut self, parent: NodeKey, markup: &str) -> Result<()> {
        let fragment = parse(markup)?;
        let parent = self.resolve(parent).ok_or(Error::DetachedElement)?;
        self.import(&fragment, parent);
        Ok(())
    }

    /// Unlinks the subtree at `id` node by node and frees its slots.
    fn release(&mut self, id: NodeId) -> Vec<NodeKey> {
        let subtree: Vec<NodeId> = match self.html.tree.get(id) {
            Some(node) => node.descendants().map(|node| node.id()).collect(),
            None => return Vec::new(),
        };

        let mut released = Vec::with_capacity(subtree.len());
        for node_id in subtree.into_iter().rev() {
            released.push(self.key(node_id));
            if let Some(mut node) = self.html.tree.get_mut(node_id) {
                node.detach();
                *node.value() = Node::Fragment;
            }
            let generation = self.generations.entry(node_id).or_insert(0);
            *generation = generation.wrapping_add(1);
            self.free.push(node_id);
        }
        released
    }

    fn import(&mut self, fragment: &Html, parent: NodeId) {
        let source = fragment.root_element();
        let mut pending: Vec<(NodeRef<'_, Node>, NodeId)> =
            source.children().rev().map(|child| (child, parent)).collect();

        while let Some((source, parent)) = pending.pop() {
            let id = self.alloc(source.value().clone());
            if let Some(mut parent) = self.html.tree.get_mut(parent) {
                parent.append_id(id);
            }
            pending.extend(source.children().rev().map(|child| (child, id)));
        }
    }

    fn alloc(&mut self, value: Node) -> NodeId {
        while let Some(id) = self.free.pop() {
            if let Some(mut slot) = self.html.tree.get_mut(id) {
                *slot.value() = value;
                return id;
            }
        }
        self.html.tree.orphan(value).id()
    }
}

fn parse(markup: &str) -> Result<Html> {
    let fragment = Html::parse_fragment(markup);
    match fragment.errors.first() {
        Some(err) => Err(Error::HtmlParse(err.to_string())),
        None => Ok(fragment),
    }
}
