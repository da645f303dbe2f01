use maud::{html, Markup};
use shared::domain::UserKind;

use super::layout::{vertical_layout, LAYOUT_HEIGHT};

pub const LOADING_TEXT: &str = "Loading...";

pub fn loading_page() -> Markup {
    html! {
        div.layout {
            (vertical_layout(LAYOUT_HEIGHT, UserKind::Employee, None))
            div.content #loading { (LOADING_TEXT) }
        }
    }
}

pub fn error_page(message: &str) -> Markup {
    html! {
        div.layout {
            (vertical_layout(LAYOUT_HEIGHT, UserKind::Employee, None))
            div.content {
                div.content-header {
                    div.content-title { "Error" }
                }
                div data-testid="error-message" { (message) }
            }
        }
    }
}
