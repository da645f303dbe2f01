//! Mounting of the employee bills route into a headless document.

use std::rc::Rc;

use dom::{HeadlessDocument, HeadlessModal};
use shared::{domain::UserSession, routes::Route};
use storage::BillsSource;
use tracing::{info, warn};

use crate::{
    containers::bills::{Bills, BillsContext, BindReport, Navigate},
    views::bills_ui::BillsUi,
};

pub struct BillsRoute {
    pub store: Rc<dyn BillsSource>,
    pub session: UserSession,
    pub on_navigate: Navigate,
    pub modal_width: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loaded { bills: usize },
    Failed { message: String },
}

pub struct MountedBills {
    pub container: Rc<Bills>,
    pub state: PageState,
    pub bindings: BindReport,
}

/// Shows the loading page, fetches the bills, then renders either the bills
/// table (and binds the container to it) or the error page.
pub async fn mount_bills_page(
    document: &HeadlessDocument,
    route: BillsRoute,
) -> dom::Result<MountedBills> {
    info!(route = Route::Bills.path(), email = %route.session.email, "mounting bills page");
    document.set_body_html(&BillsUi::loading().render())?;

    let container = Bills::new(BillsContext {
        document: Rc::new(document.clone()),
        on_navigate: route.on_navigate,
        store: Some(route.store),
        session: route.session,
        modal: Rc::new(HeadlessModal::new(document.clone(), route.modal_width)),
    });

    match container.get_bills().await {
        Ok(bills) => {
            document.set_body_html(&BillsUi::with_data(&bills).render())?;
            let bindings = container.bind();
            Ok(MountedBills {
                container,
                state: PageState::Loaded { bills: bills.len() },
                bindings,
            })
        }
        Err(err) => {
            let message = err.to_string();
            warn!(error = %message, "failed to load bills");
            document.set_body_html(&BillsUi::error(&message).render())?;
            Ok(MountedBills {
                container,
                state: PageState::Failed { message },
                bindings: BindReport::default(),
            })
        }
    }
}
