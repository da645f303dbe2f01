//! Headless document used by the CLI and by tests in place of a browser DOM.
//! Parsing and selector matching come from `scraper`; listeners and click
//! dispatch live here.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use scraper::Selector;
use tracing::{debug, warn};

use crate::{
    tree::{Dom, NodeKey},
    Document, Element, Error, EventKind, Listener, ModalWidget, Result,
};

/// Selector of the receipt preview dialog rendered by the bills page.
pub const MODAL_SELECTOR: &str = "#modaleFile";

struct Inner {
    dom: Dom,
    listeners: HashMap<NodeKey, Vec<(EventKind, Listener)>>,
}

impl Inner {
    fn replace_children(&mut self, parent: NodeKey, html: &str) -> Result<()> {
        let removed = self.dom.replace_children(parent, html)?;
        for key in &removed {
            self.listeners.remove(key);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct HeadlessDocument {
    inner: Rc<RefCell<Inner>>,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                dom: Dom::new(),
                listeners: HashMap::new(),
            })),
        }
    }

    pub fn parse(html: &str) -> Result<Self> {
        let document = Self::new();
        document.append_body_html(html)?;
        Ok(document)
    }

    /// Replaces the whole body. Listeners on the old content are dropped and
    /// handles to it go inert. Malformed markup is rejected without touching
    /// the current body.
    pub fn set_body_html(&self, html: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let body = inner.dom.body();
        inner.replace_children(body, html)
    }

    pub fn append_body_html(&self, html: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let body = inner.dom.body();
        inner.dom.append_children(body, html)
    }

    pub fn body_html(&self) -> String {
        let inner = self.inner.borrow();
        inner.dom.inner_html(inner.dom.body())
    }

    /// Node slots held by the document, attached or waiting for reuse.
    pub fn node_capacity(&self) -> usize {
        self.inner.borrow().dom.capacity()
    }

    pub fn find(&self, selector: &str) -> Result<Option<HeadlessElement>> {
        let body = self.inner.borrow().dom.body();
        Ok(self.find_all_from(body, selector)?.into_iter().next())
    }

    pub fn find_all(&self, selector: &str) -> Result<Vec<HeadlessElement>> {
        let body = self.inner.borrow().dom.body();
        self.find_all_from(body, selector)
    }

    pub fn get_by_test_id(&self, test_id: &str) -> Result<HeadlessElement> {
        let selector = test_id_selector(test_id);
        self.find(&selector)?.ok_or(Error::SelectorNotFound(selector))
    }

    pub fn get_all_by_test_id(&self, test_id: &str) -> Result<Vec<HeadlessElement>> {
        self.find_all(&test_id_selector(test_id))
    }

    fn find_all_from(&self, scope: NodeKey, selector: &str) -> Result<Vec<HeadlessElement>> {
        let parsed = Selector::parse(selector)
            .map_err(|err| Error::UnsupportedSelector(format!("{selector}: {err}")))?;
        let inner = self.inner.borrow();
        Ok(inner
            .dom
            .query_all(scope, &parsed)
            .into_iter()
            .map(|node| HeadlessElement {
                inner: Rc::clone(&self.inner),
                node,
            })
            .collect())
    }
}

fn test_id_selector(test_id: &str) -> String {
    format!("[data-testid=\"{test_id}\"]")
}

impl Document for HeadlessDocument {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>> {
        match self.find(selector) {
            Ok(found) => found.map(|element| Rc::new(element) as Rc<dyn Element>),
            Err(err) => {
                warn!(selector, error = %err, "query_selector failed");
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Rc<dyn Element>> {
        match self.find_all(selector) {
            Ok(found) => found
                .into_iter()
                .map(|element| Rc::new(element) as Rc<dyn Element>)
                .collect(),
            Err(err) => {
                warn!(selector, error = %err, "query_selector_all failed");
                Vec::new()
            }
        }
    }
}

/// Handle to one element of a [`HeadlessDocument`]. Once the element is
/// removed from the document the handle reads as empty and ignores writes.
#[derive(Clone)]
pub struct HeadlessElement {
    inner: Rc<RefCell<Inner>>,
    node: NodeKey,
}

impl HeadlessElement {
    pub fn tag_name(&self) -> String {
        self.inner
            .borrow()
            .dom
            .element(self.node)
            .map(|element| element.name().to_string())
            .unwrap_or_default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .dom
            .element(self.node)
            .and_then(|element| element.attr(name))
            .map(str::to_string)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner.borrow_mut().dom.set_attr(self.node, name, value);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().dom.has_class(self.node, class)
    }

    pub fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attribute("class") {
            Some(current) if !current.trim().is_empty() => format!("{} {class}", current.trim()),
            _ => class.to_string(),
        };
        self.set_attribute("class", &classes);
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().dom.resolve(self.node).is_some()
    }

    pub fn text_content(&self) -> String {
        self.inner.borrow().dom.text_content(self.node)
    }

    pub fn inner_html(&self) -> String {
        self.inner.borrow().dom.inner_html(self.node)
    }

    pub fn set_inner_html(&self, html: &str) -> Result<()> {
        self.inner.borrow_mut().replace_children(self.node, html)
    }

    pub fn find(&self, selector: &str) -> Result<Option<HeadlessElement>> {
        let document = HeadlessDocument {
            inner: Rc::clone(&self.inner),
        };
        Ok(document.find_all_from(self.node, selector)?.into_iter().next())
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&self.node)
            .map(|listeners| listeners.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    /// Dispatches a click that bubbles from this element up to the root.
    /// Returns the number of listeners invoked.
    pub fn click(&self) -> usize {
        self.dispatch(EventKind::Click)
    }

    fn dispatch(&self, kind: EventKind) -> usize {
        // Collect first: listeners are free to mutate the document.
        let listeners: Vec<Listener> = {
            let inner = self.inner.borrow();
            if inner.dom.resolve(self.node).is_none() {
                return 0;
            }
            let mut path = vec![self.node];
            let mut current = inner.dom.parent(self.node);
            while let Some(node) = current {
                path.push(node);
                current = inner.dom.parent(node);
            }
            path.iter()
                .filter_map(|node| inner.listeners.get(node))
                .flatten()
                .filter(|(k, _)| *k == kind)
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };
        debug!(event = kind.as_str(), listeners = listeners.len(), "dispatching event");
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }
}

impl Element for HeadlessElement {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attribute(name)
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener) {
        let mut inner = self.inner.borrow_mut();
        if inner.dom.resolve(self.node).is_none() {
            debug!(event = kind.as_str(), "listener ignored on a detached element");
            return;
        }
        inner
            .listeners
            .entry(self.node)
            .or_default()
            .push((kind, listener));
    }
}

/// [`ModalWidget`] over the receipt dialog of a headless document.
pub struct HeadlessModal {
    document: HeadlessDocument,
    selector: String,
    width: f64,
}

impl HeadlessModal {
    pub fn new(document: HeadlessDocument, width: f64) -> Self {
        Self {
            document,
            selector: MODAL_SELECTOR.to_string(),
            width,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    fn dialog(&self) -> Result<HeadlessElement> {
        self.document
            .find(&self.selector)?
            .ok_or_else(|| Error::SelectorNotFound(self.selector.clone()))
    }

    pub fn is_shown(&self) -> bool {
        self.dialog().is_ok_and(|dialog| dialog.has_class("show"))
    }
}

impl ModalWidget for HeadlessModal {
    fn width(&self) -> f64 {
        self.width
    }

    fn set_body_html(&self, html: &str) -> Result<()> {
        let body = self
            .dialog()?
            .find(".modal-body")?
            .ok_or_else(|| Error::SelectorNotFound(format!("{} .modal-body", self.selector)))?;
        body.set_inner_html(html)
    }

    fn show(&self) -> Result<()> {
        let dialog = self.dialog()?;
        dialog.add_class("show");
        dialog.set_attribute("aria-hidden", "false");
        dialog.set_attribute("style", "display: block;");
        debug!(selector = %self.selector, "modal shown");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/headless_tests.rs"]
mod tests;
