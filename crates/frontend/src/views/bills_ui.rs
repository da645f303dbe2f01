use std::cmp::Ordering;

use maud::{html, Markup, PreEscaped};
use shared::{
    domain::{BillRecord, UserKind},
    routes::Route,
};

use super::{
    icons::EYE_ICON,
    layout::{vertical_layout, LAYOUT_HEIGHT},
    pages::{error_page, loading_page},
};
use crate::format::{format_amount, format_status};

/// Options of the bills page. `loading` wins over `error`, which wins over
/// `data`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BillsUi<'a> {
    pub data: &'a [BillRecord],
    pub loading: bool,
    pub error: Option<&'a str>,
}

impl<'a> BillsUi<'a> {
    pub fn with_data(data: &'a [BillRecord]) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn error(message: &'a str) -> Self {
        Self {
            error: Some(message),
            ..Self::default()
        }
    }

    pub fn render(&self) -> String {
        self.markup().into_string()
    }

    pub fn markup(&self) -> Markup {
        if self.loading {
            return loading_page();
        }
        if let Some(message) = self.error {
            return error_page(message);
        }

        let rows = anti_chrono_order(self.data);
        html! {
            div.layout {
                (vertical_layout(LAYOUT_HEIGHT, UserKind::Employee, Some(Route::Bills)))
                div.content {
                    div.content-header {
                        div.content-title { "My expense reports" }
                        button.btn.btn-primary type="button" data-testid="btn-new-bill" { "New Bill" }
                    }
                    div #data-table {
                        table #example.table.table-striped style="width:100%" {
                            thead {
                                tr {
                                    th { "Type" }
                                    th { "Name" }
                                    th { "Date" }
                                    th { "Amount" }
                                    th { "Status" }
                                    th { "Actions" }
                                }
                            }
                            tbody data-testid="tbody" {
                                @for bill in rows {
                                    (row(bill))
                                }
                            }
                        }
                    }
                }
                (receipt_modal())
            }
        }
    }
}

/// `a < b ? after : before`. Never reports equality.
pub fn anti_chrono(a: &str, b: &str) -> Ordering {
    if a < b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Orders bills newest first by their displayed date.
///
/// Each bill is inserted before the first already-placed bill it does not sort
/// after under [`anti_chrono`], so equal dates come out with the later input
/// first. The comparator is not a total order, hence no `sort_by` here.
// suspect: the listing hands over display dates ("4 Apr. 04"), so this orders
// them as text and "12 Jan. 20" lands below "4 Apr. 04".
pub fn anti_chrono_order(bills: &[BillRecord]) -> Vec<&BillRecord> {
    let mut ordered: Vec<&BillRecord> = Vec::with_capacity(bills.len());
    for bill in bills {
        let position = ordered
            .iter()
            .position(|placed| anti_chrono(&bill.date, &placed.date) == Ordering::Less)
            .unwrap_or(ordered.len());
        ordered.insert(position, bill);
    }
    ordered
}

fn row(bill: &BillRecord) -> Markup {
    html! {
        tr data-testid="tbody-row" {
            td { (bill.expense_type.as_deref().unwrap_or_default()) }
            td { (bill.name.as_deref().unwrap_or_default()) }
            td { (bill.date) }
            td { (format_amount(bill.amount)) }
            td {
                span class=(format!("badge status-{}", bill.status.as_key())) {
                    (format_status(bill.status))
                }
            }
            td {
                @if let Some(url) = &bill.file_url {
                    (actions(url))
                }
            }
        }
    }
}

fn actions(bill_url: &str) -> Markup {
    html! {
        div.icon-actions {
            div #eye data-testid="icon-eye" data-bill-url=(bill_url) {
                (PreEscaped(EYE_ICON))
            }
        }
    }
}

fn receipt_modal() -> Markup {
    html! {
        div.modal.fade #modaleFile data-testid="modaleFile" tabindex="-1" role="dialog" aria-labelledby="receiptModalLabel" aria-hidden="true" {
            div.modal-dialog.modal-dialog-centered.modal-lg role="document" data-testid="modalDialog" {
                div.modal-content {
                    div.modal-header {
                        h5.modal-title #receiptModalLabel { "Receipt" }
                        button.close type="button" data-dismiss="modal" aria-label="Close" {
                            span aria-hidden="true" { "×" }
                        }
                    }
                    div.modal-body {}
                }
            }
        }
    }
}

/// Body of the receipt modal: the receipt image, `width` pixels wide.
pub fn receipt_preview(bill_url: &str, width: u32) -> Markup {
    html! {
        div.bill-proof-container style="text-align: center;" {
            img width=(width) src=(bill_url) alt="Bill";
        }
    }
}

#[cfg(test)]
#[path = "tests/bills_ui_tests.rs"]
mod tests;
