//! Markup builders. Everything here is pure: data in, HTML out.

pub mod bills_ui;
mod icons;
pub mod layout;
pub mod pages;
