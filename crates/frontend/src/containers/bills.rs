use std::rc::Rc;

use dom::{Document, Element, EventKind, ModalWidget};
use shared::{
    domain::{BillRecord, UserSession},
    routes::Route,
};
use storage::BillsSource;
use tracing::{debug, info, warn};

use crate::{error::ContainerError, format::format_date, views::bills_ui::receipt_preview};

pub const NEW_BILL_BUTTON_SELECTOR: &str = r#"button[data-testid="btn-new-bill"]"#;
pub const EYE_ICON_SELECTOR: &str = r#"div[data-testid="icon-eye"]"#;
pub const BILL_URL_ATTRIBUTE: &str = "data-bill-url";
/// Share of the modal width given to the receipt image.
const RECEIPT_WIDTH_RATIO: f64 = 0.5;

pub type Navigate = Rc<dyn Fn(Route)>;

pub struct BillsContext {
    pub document: Rc<dyn Document>,
    pub on_navigate: Navigate,
    pub store: Option<Rc<dyn BillsSource>>,
    pub session: UserSession,
    pub modal: Rc<dyn ModalWidget>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindReport {
    pub new_bill_button: bool,
    pub eye_icons: usize,
}

pub struct Bills {
    document: Rc<dyn Document>,
    on_navigate: Navigate,
    store: Option<Rc<dyn BillsSource>>,
    session: UserSession,
    modal: Rc<dyn ModalWidget>,
}

impl Bills {
    /// Builds the container without touching the document; call [`Bills::bind`]
    /// once the bills markup is in place.
    pub fn new(ctx: BillsContext) -> Rc<Self> {
        Rc::new(Self {
            document: ctx.document,
            on_navigate: ctx.on_navigate,
            store: ctx.store,
            session: ctx.session,
            modal: ctx.modal,
        })
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    /// Attaches click listeners to the new-bill button and every receipt icon
    /// present in the document. Missing elements are skipped.
    ///
    /// Listeners hold a weak reference: once the container is dropped they do
    /// nothing.
    pub fn bind(self: &Rc<Self>) -> BindReport {
        let mut report = BindReport::default();

        match self.document.query_selector(NEW_BILL_BUTTON_SELECTOR) {
            Some(button) => {
                let this = Rc::downgrade(self);
                button.add_event_listener(
                    EventKind::Click,
                    Rc::new(move || {
                        if let Some(bills) = this.upgrade() {
                            bills.handle_click_new_bill();
                        }
                    }),
                );
                report.new_bill_button = true;
            }
            None => debug!("no new bill button to bind"),
        }

        for icon in self.document.query_selector_all(EYE_ICON_SELECTOR) {
            let this = Rc::downgrade(self);
            let target = Rc::clone(&icon);
            icon.add_event_listener(
                EventKind::Click,
                Rc::new(move || {
                    let Some(bills) = this.upgrade() else {
                        return;
                    };
                    if let Err(err) = bills.handle_click_icon_eye(target.as_ref()) {
                        warn!(error = %err, "failed to open receipt preview");
                    }
                }),
            );
            report.eye_icons += 1;
        }

        debug!(
            new_bill_button = report.new_bill_button,
            eye_icons = report.eye_icons,
            "bound bills container"
        );
        report
    }

    pub fn handle_click_new_bill(&self) {
        info!(route = Route::NewBill.path(), "navigating to new bill");
        (self.on_navigate)(Route::NewBill);
    }

    /// Puts the receipt referenced by `icon` into the modal body and shows it.
    pub fn handle_click_icon_eye(&self, icon: &dyn Element) -> Result<(), ContainerError> {
        let bill_url = icon
            .get_attribute(BILL_URL_ATTRIBUTE)
            .ok_or(ContainerError::MissingBillUrl)?;
        let width = (self.modal.width() * RECEIPT_WIDTH_RATIO).floor().max(0.0) as u32;
        let body = receipt_preview(&bill_url, width).into_string();
        self.modal.set_body_html(&body)?;
        self.modal.show()?;
        debug!(bill_url = %bill_url, width, "opened receipt preview");
        Ok(())
    }

    /// Fetches the session's bills and formats their dates for display.
    ///
    /// A bill whose date cannot be parsed keeps its raw date. Order and count
    /// match what the store returned; sorting is left to the view.
    pub async fn get_bills(&self) -> anyhow::Result<Vec<BillRecord>> {
        let Some(store) = &self.store else {
            debug!("no bills store configured");
            return Ok(Vec::new());
        };

        let bills = store.list_bills(&self.session).await?;
        Ok(bills.into_iter().map(format_bill).collect())
    }
}

fn format_bill(mut bill: BillRecord) -> BillRecord {
    match format_date(&bill.date) {
        Ok(date) => bill.date = date,
        Err(err) => warn!(
            bill_id = %bill.id,
            date = %bill.date,
            error = %err,
            "keeping unformatted bill date"
        ),
    }
    bill
}

#[cfg(test)]
#[path = "tests/bills_tests.rs"]
mod tests;
