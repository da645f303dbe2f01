use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use super::*;
use anyhow::anyhow;
use async_trait::async_trait;
use dom::{HeadlessDocument, HeadlessModal, Listener};
use shared::domain::BillStatus;
use storage::{fixtures, Storage};

use crate::views::bills_ui::BillsUi;

#[derive(Default)]
struct MockElement {
    attrs: HashMap<String, String>,
    listeners: RefCell<Vec<(EventKind, Listener)>>,
    attribute_reads: RefCell<Vec<String>>,
}

impl MockElement {
    fn with_attr(name: &str, value: &str) -> Self {
        Self {
            attrs: HashMap::from([(name.to_string(), value.to_string())]),
            ..Self::default()
        }
    }

    fn click(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == EventKind::Click)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn click_listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == EventKind::Click)
            .count()
    }
}

impl Element for MockElement {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attribute_reads.borrow_mut().push(name.to_string());
        self.attrs.get(name).cloned()
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener) {
        self.listeners.borrow_mut().push((kind, listener));
    }
}

#[derive(Default)]
struct MockDocument {
    button: Option<Rc<MockElement>>,
    icons: Vec<Rc<MockElement>>,
    queries: RefCell<Vec<String>>,
}

impl Document for MockDocument {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>> {
        self.queries.borrow_mut().push(selector.to_string());
        self.button
            .clone()
            .map(|button| button as Rc<dyn Element>)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Rc<dyn Element>> {
        self.queries.borrow_mut().push(selector.to_string());
        self.icons
            .iter()
            .map(|icon| Rc::clone(icon) as Rc<dyn Element>)
            .collect()
    }
}

struct RecordingModal {
    width: f64,
    body: RefCell<String>,
    shown: Cell<u32>,
}

impl RecordingModal {
    fn new(width: f64) -> Self {
        Self {
            width,
            body: RefCell::new(String::new()),
            shown: Cell::new(0),
        }
    }
}

impl ModalWidget for RecordingModal {
    fn width(&self) -> f64 {
        self.width
    }

    fn set_body_html(&self, html: &str) -> dom::Result<()> {
        *self.body.borrow_mut() = html.to_string();
        Ok(())
    }

    fn show(&self) -> dom::Result<()> {
        self.shown.set(self.shown.get() + 1);
        Ok(())
    }
}

struct FixedSource(Vec<BillRecord>);

#[async_trait(?Send)]
impl BillsSource for FixedSource {
    async fn list_bills(&self, _session: &UserSession) -> anyhow::Result<Vec<BillRecord>> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

#[async_trait(?Send)]
impl BillsSource for FailingSource {
    async fn list_bills(&self, _session: &UserSession) -> anyhow::Result<Vec<BillRecord>> {
        Err(anyhow!("Erreur 500"))
    }
}

type Navigations = Rc<RefCell<Vec<Route>>>;

fn recording_navigate() -> (Navigate, Navigations) {
    let calls: Navigations = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    (Rc::new(move |route: Route| sink.borrow_mut().push(route)), calls)
}

fn container(
    document: Rc<dyn Document>,
    store: Option<Rc<dyn BillsSource>>,
    modal: Rc<dyn ModalWidget>,
) -> (Rc<Bills>, Navigations) {
    let (on_navigate, calls) = recording_navigate();
    let bills = Bills::new(BillsContext {
        document,
        on_navigate,
        store,
        session: UserSession::employee(fixtures::FIXTURE_EMAIL),
        modal,
    });
    (bills, calls)
}

#[test]
fn binds_new_bill_button_and_eye_icons() {
    let button = Rc::new(MockElement::default());
    let icons = vec![
        Rc::new(MockElement::with_attr(BILL_URL_ATTRIBUTE, "http://example.com/1.jpg")),
        Rc::new(MockElement::with_attr(BILL_URL_ATTRIBUTE, "http://example.com/2.jpg")),
    ];
    let document = Rc::new(MockDocument {
        button: Some(Rc::clone(&button)),
        icons: icons.clone(),
        ..MockDocument::default()
    });
    let (bills, _) = container(document.clone(), None, Rc::new(RecordingModal::new(800.0)));

    let report = bills.bind();

    assert_eq!(
        report,
        BindReport {
            new_bill_button: true,
            eye_icons: 2
        }
    );
    assert_eq!(button.click_listener_count(), 1);
    assert!(icons.iter().all(|icon| icon.click_listener_count() == 1));
    assert_eq!(
        *document.queries.borrow(),
        [NEW_BILL_BUTTON_SELECTOR, EYE_ICON_SELECTOR]
    );
}

#[test]
fn construction_alone_does_not_touch_the_document() {
    let document = Rc::new(MockDocument::default());
    let _bills = container(document.clone(), None, Rc::new(RecordingModal::new(800.0)));
    assert!(document.queries.borrow().is_empty());
}

#[test]
fn binding_tolerates_missing_elements() {
    let document = Rc::new(MockDocument::default());
    let (bills, calls) = container(document, None, Rc::new(RecordingModal::new(800.0)));

    let report = bills.bind();

    assert_eq!(report, BindReport::default());
    assert!(calls.borrow().is_empty());
}

#[test]
fn clicking_new_bill_navigates_once() {
    let button = Rc::new(MockElement::default());
    let document = Rc::new(MockDocument {
        button: Some(Rc::clone(&button)),
        ..MockDocument::default()
    });
    let (bills, calls) = container(document, None, Rc::new(RecordingModal::new(800.0)));
    bills.bind();

    button.click();

    assert_eq!(*calls.borrow(), [Route::NewBill]);
    assert_eq!(calls.borrow()[0].path(), "#employee/bill/new");
}

#[test]
fn eye_click_shows_modal_with_the_bill_image() {
    let icon = Rc::new(MockElement::with_attr(
        BILL_URL_ATTRIBUTE,
        "http://example.com/bill.jpg",
    ));
    let document = Rc::new(MockDocument {
        icons: vec![Rc::clone(&icon)],
        ..MockDocument::default()
    });
    let modal = Rc::new(RecordingModal::new(801.0));
    let (bills, _) = container(document, None, modal.clone());
    bills.bind();

    icon.click();

    assert_eq!(*icon.attribute_reads.borrow(), [BILL_URL_ATTRIBUTE]);
    let body = modal.body.borrow();
    assert!(body.contains("<img"));
    assert!(body.contains(r#"src="http://example.com/bill.jpg""#));
    assert!(body.contains(r#"width="400""#));
    assert_eq!(modal.shown.get(), 1);
}

#[test]
fn eye_handler_reports_missing_url() {
    let (bills, _) = container(
        Rc::new(MockDocument::default()),
        None,
        Rc::new(RecordingModal::new(800.0)),
    );
    let icon = MockElement::default();
    assert!(matches!(
        bills.handle_click_icon_eye(&icon),
        Err(ContainerError::MissingBillUrl)
    ));
}

#[test]
fn listeners_are_inert_once_the_container_is_dropped() {
    let button = Rc::new(MockElement::default());
    let document = Rc::new(MockDocument {
        button: Some(Rc::clone(&button)),
        ..MockDocument::default()
    });
    let (bills, calls) = container(document, None, Rc::new(RecordingModal::new(800.0)));
    bills.bind();
    drop(bills);

    button.click();

    assert!(calls.borrow().is_empty());
}

#[test]
fn headless_eye_click_fills_the_rendered_modal() {
    let bills_data = fixtures::bills();
    let document = HeadlessDocument::parse(&BillsUi::with_data(&bills_data).render())
        .expect("parse bills page");
    let modal = Rc::new(HeadlessModal::new(document.clone(), 800.0));
    let (bills, calls) = container(Rc::new(document.clone()), None, modal.clone());
    let report = bills.bind();
    assert_eq!(report.eye_icons, bills_data.len());

    for icon in document.get_all_by_test_id("icon-eye").expect("icons") {
        let url = icon.attribute(BILL_URL_ATTRIBUTE).expect("url");
        assert_eq!(icon.click(), 1);

        document.get_by_test_id("modalDialog").expect("modal dialog");
        let body = document
            .find("#modaleFile .modal-body")
            .expect("query")
            .expect("modal body");
        let img = body.find("img").expect("query").expect("img");
        assert_eq!(img.attribute("src"), Some(url));
        assert_eq!(img.attribute("width").as_deref(), Some("400"));
        assert!(modal.is_shown());
    }

    document.get_by_test_id("btn-new-bill").expect("button").click();
    assert_eq!(*calls.borrow(), [Route::NewBill]);
}

#[tokio::test]
async fn get_bills_formats_dates_in_store_order() {
    let store = Storage::from_records(fixtures::bills());
    let (bills, _) = container(
        Rc::new(MockDocument::default()),
        Some(Rc::new(store)),
        Rc::new(RecordingModal::new(800.0)),
    );

    let fetched = bills.get_bills().await.expect("bills");

    let dates: Vec<_> = fetched.iter().map(|bill| bill.date.as_str()).collect();
    assert_eq!(dates, ["4 Apr. 04", "1 Jan. 01", "3 Mar. 03", "2 Feb. 02"]);
}

#[tokio::test]
async fn get_bills_keeps_malformed_dates_raw() {
    let source = FixedSource(vec![
        BillRecord::new("ok-1", "2004-04-04", BillStatus::Pending, 1.0),
        BillRecord::new("broken", "not-a-date", BillStatus::Accepted, 2.0),
        BillRecord::new("ok-2", "2003-03-03", BillStatus::Refused, 3.0),
    ]);
    let (bills, _) = container(
        Rc::new(MockDocument::default()),
        Some(Rc::new(source)),
        Rc::new(RecordingModal::new(800.0)),
    );

    let fetched = bills.get_bills().await.expect("bills");

    assert_eq!(fetched.len(), 3);
    assert_eq!(fetched[0].date, "4 Apr. 04");
    assert_eq!(fetched[1].date, "not-a-date");
    assert_eq!(fetched[1].id.as_str(), "broken");
    assert_eq!(fetched[2].date, "3 Mar. 03");
}

#[tokio::test]
async fn get_bills_propagates_store_failures() {
    let (bills, _) = container(
        Rc::new(MockDocument::default()),
        Some(Rc::new(FailingSource)),
        Rc::new(RecordingModal::new(800.0)),
    );
    let err = bills.get_bills().await.expect_err("store failure");
    assert_eq!(err.to_string(), "Erreur 500");
}

#[tokio::test]
async fn get_bills_without_store_is_empty() {
    let (bills, _) = container(
        Rc::new(MockDocument::default()),
        None,
        Rc::new(RecordingModal::new(800.0)),
    );
    assert!(bills.get_bills().await.expect("bills").is_empty());
    assert_eq!(bills.session().email, fixtures::FIXTURE_EMAIL);
}
