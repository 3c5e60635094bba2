use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::record::{FieldValue, Record};
use crate::domain::types::{EmailAddress, PersonName, RecordId};
use crate::list_view::ListViewSpec;

/// Portal account with its role and granted permissions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// Display status used by the status column and searches.
    pub fn status(&self) -> &'static str {
        if self.is_active { "active" } else { "inactive" }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

pub const USER_LIST_VIEW: ListViewSpec = ListViewSpec {
    searchable_fields: &["name", "email", "role"],
    tag_field: Some("role"),
    date_field: Some("createdAt"),
};

impl Record for User {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "status" => Some(self.status().into()),
            "createdAt" => self.created_at.map(FieldValue::from),
            _ => None,
        }
    }
}
