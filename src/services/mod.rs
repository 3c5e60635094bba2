//! Services assembling list pages and exports from a record source.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::domain::broker::BROKER_LIST_VIEW;
use crate::domain::certificate::CERTIFICATE_LIST_VIEW;
use crate::domain::client::CLIENT_LIST_VIEW;
use crate::domain::company::COMPANY_LIST_VIEW;
use crate::domain::user::USER_LIST_VIEW;
use crate::forms::FormError;
use crate::list_view::ListViewSpec;
use crate::repository::errors::RepositoryError;

pub mod export;
pub mod lists;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("form error: {0}")]
    Form(#[from] FormError),

    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("output error: {0}")]
    Output(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::Output(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Output(err.to_string())
    }
}

/// The list views of the portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListViewKind {
    Users,
    Clients,
    Companies,
    Brokers,
    Certificates,
}

impl ListViewKind {
    pub const ALL: [ListViewKind; 5] = [
        ListViewKind::Users,
        ListViewKind::Clients,
        ListViewKind::Companies,
        ListViewKind::Brokers,
        ListViewKind::Certificates,
    ];

    pub fn spec(self) -> &'static ListViewSpec {
        match self {
            ListViewKind::Users => &USER_LIST_VIEW,
            ListViewKind::Clients => &CLIENT_LIST_VIEW,
            ListViewKind::Companies => &COMPANY_LIST_VIEW,
            ListViewKind::Brokers => &BROKER_LIST_VIEW,
            ListViewKind::Certificates => &CERTIFICATE_LIST_VIEW,
        }
    }

    /// Columns written by the CSV export, in order.
    pub fn export_columns(self) -> &'static [&'static str] {
        match self {
            ListViewKind::Users => &["id", "name", "email", "role", "status", "createdAt"],
            ListViewKind::Clients => &[
                "id",
                "name",
                "email",
                "phone",
                "companyName",
                "brokerName",
                "status",
                "submitDate",
            ],
            ListViewKind::Companies => &[
                "id",
                "name",
                "type",
                "industry",
                "email",
                "phone",
                "city",
                "createdAt",
            ],
            ListViewKind::Brokers => &[
                "id",
                "name",
                "email",
                "phone",
                "companyName",
                "licenseNumber",
                "status",
                "createdAt",
            ],
            ListViewKind::Certificates => &[
                "certificateNumber",
                "clientName",
                "brokerName",
                "companyName",
                "policyType",
                "status",
                "issueDate",
                "expiryDate",
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListViewKind::Users => "users",
            ListViewKind::Clients => "clients",
            ListViewKind::Companies => "companies",
            ListViewKind::Brokers => "brokers",
            ListViewKind::Certificates => "certificates",
        }
    }
}

impl Display for ListViewKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListViewKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ListViewKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ServiceError::UnknownView(s.to_string()))
    }
}
