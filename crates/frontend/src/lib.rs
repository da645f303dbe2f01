//! Employee bills page: views rendering markup, the `Bills` container binding
//! behavior onto rendered markup, and the route tying both together.

pub mod containers;
pub mod error;
pub mod format;
pub mod router;
pub mod views;

pub use containers::bills::{BillsContext, BindReport, Bills, Navigate};
pub use error::{ContainerError, FormatError};
pub use views::bills_ui::BillsUi;
