//! Minimal DOM capability surface used by the bills containers, plus a headless
//! implementation over `scraper` for the CLI and tests.

use std::rc::Rc;

use thiserror::Error;

pub mod headless;
mod tree;

pub use headless::{HeadlessDocument, HeadlessElement, HeadlessModal, MODAL_SELECTOR};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("element is no longer attached to the document")]
    DetachedElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
        }
    }
}

pub type Listener = Rc<dyn Fn()>;

/// A located element: attribute reads and listener registration only.
pub trait Element {
    fn get_attribute(&self, name: &str) -> Option<String>;
    fn add_event_listener(&self, kind: EventKind, listener: Listener);
}

/// Element lookup. Lookups never fail: an unknown or unsupported selector
/// simply finds nothing.
pub trait Document {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>>;
    fn query_selector_all(&self, selector: &str) -> Vec<Rc<dyn Element>>;
}

/// Show/hide widget wrapping the receipt preview dialog.
pub trait ModalWidget {
    /// Rendered width of the dialog in CSS pixels.
    fn width(&self) -> f64;
    fn set_body_html(&self, html: &str) -> Result<()>;
    fn show(&self) -> Result<()>;
}
