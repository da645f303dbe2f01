pub(crate) const WINDOW_ICON: &str = r#"<svg width="30" height="30" viewBox="0 0 30 30" xmlns="http://www.w3.org/2000/svg"><path d="M4 5h22v20H4z M4 10h22" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#;

pub(crate) const MAIL_ICON: &str = r#"<svg width="30" height="30" viewBox="0 0 30 30" xmlns="http://www.w3.org/2000/svg"><path d="M3 7h24v16H3z M3 7l12 9 12-9" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#;

pub(crate) const DISCONNECT_ICON: &str = r#"<svg width="30" height="30" viewBox="0 0 30 30" xmlns="http://www.w3.org/2000/svg"><path d="M12 5H5v20h7 M18 10l5 5-5 5 M23 15H11" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#;

pub(crate) const EYE_ICON: &str = r##"<svg width="20" height="20" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M1 12s4-7 11-7 11 7 11 7-4 7-11 7S1 12 1 12z" fill="none" stroke="#0e5ae5" stroke-width="2"/><circle cx="12" cy="12" r="3" fill="#0e5ae5"/></svg>"##;
