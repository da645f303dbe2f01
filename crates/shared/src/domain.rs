use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(pub String);

impl BillId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// Lowercase key used in CSS class names and on the wire.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }
}

/// One submitted expense bill as stored by the data source.
///
/// `date` holds whatever string is meant for display: the raw ISO date when it
/// comes out of storage, the short display form once the bills container has
/// formatted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: BillId,
    pub date: String,
    pub status: BillStatus,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl BillRecord {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        status: BillStatus,
        amount: f64,
    ) -> Self {
        Self {
            id: BillId(id.into()),
            date: date.into(),
            status,
            amount,
            file_url: None,
            file_name: None,
            expense_type: None,
            name: None,
            email: None,
            vat: None,
            pct: None,
            commentary: None,
            comment_admin: None,
        }
    }

    pub fn with_file(mut self, url: impl Into<String>, name: impl Into<String>) -> Self {
        self.file_url = Some(url.into());
        self.file_name = Some(name.into());
        self
    }

    pub fn with_owner(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_label(mut self, expense_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.expense_type = Some(expense_type.into());
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserKind {
    Employee,
    Admin,
}

impl std::str::FromStr for UserKind {
    type Err = SessionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.eq_ignore_ascii_case("employee") {
            Ok(Self::Employee)
        } else if raw.eq_ignore_ascii_case("admin") {
            Ok(Self::Admin)
        } else {
            Err(SessionError::UnknownUserKind(raw.to_string()))
        }
    }
}

/// Authenticated user handed explicitly to views and containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(rename = "type")]
    pub kind: UserKind,
    #[serde(default)]
    pub email: String,
}

impl UserSession {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            kind: UserKind::Employee,
            email: email.into(),
        }
    }

    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            kind: UserKind::Admin,
            email: email.into(),
        }
    }

    /// Parses the `{"type": "Employee", "email": "..."}` session blob.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(raw)?)
    }
}
