use maud::{html, Markup, PreEscaped};
use shared::{domain::UserKind, routes::Route};

use super::icons::{DISCONNECT_ICON, MAIL_ICON, WINDOW_ICON};

/// Height, in `vh`, of the navigation bar on employee pages.
pub const LAYOUT_HEIGHT: u32 = 120;

/// Left navigation bar. Employees get the bills and new-bill icons, the one
/// matching `active` carrying the `active-icon` class; admins get the logo only.
pub fn vertical_layout(height_vh: u32, kind: UserKind, active: Option<Route>) -> Markup {
    html! {
        div.vertical-navbar style=(format!("height: {height_vh}vh;")) {
            div.layout-title { span { "Billed" } }
            @if kind == UserKind::Employee {
                div #layout-icon1.active-icon[active == Some(Route::Bills)] data-testid="icon-window" {
                    (PreEscaped(WINDOW_ICON))
                }
                div #layout-icon2.active-icon[active == Some(Route::NewBill)] data-testid="icon-mail" {
                    (PreEscaped(MAIL_ICON))
                }
                div #layout-disconnect {
                    (PreEscaped(DISCONNECT_ICON))
                }
            }
        }
    }
}
