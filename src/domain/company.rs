use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::record::{FieldValue, Record};
use crate::domain::types::{CompanyName, EmailAddress, PhoneNumber, RecordId};
use crate::list_view::ListViewSpec;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: RecordId,
    pub name: CompanyName,
    pub industry: Option<String>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<String>,
    /// Category shown in the type filter, e.g. `carrier` or `agency`.
    #[serde(rename = "type")]
    pub company_type: String,
    pub created_at: Option<NaiveDateTime>,
}

pub const COMPANY_LIST_VIEW: ListViewSpec = ListViewSpec {
    searchable_fields: &["name", "industry", "email", "city"],
    tag_field: Some("type"),
    date_field: Some("createdAt"),
};

impl Record for Company {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "industry" => self.industry.as_deref().map(FieldValue::from),
            "email" => self.email.as_ref().map(|e| FieldValue::from(e.as_str())),
            "phone" => self.phone.as_ref().map(|p| FieldValue::from(p.as_str())),
            "phoneE164" => self
                .phone
                .as_ref()
                .and_then(PhoneNumber::e164)
                .map(FieldValue::from),
            "city" => self.city.as_deref().map(FieldValue::from),
            "type" => Some(self.company_type.as_str().into()),
            "createdAt" => self.created_at.map(FieldValue::from),
            _ => None,
        }
    }
}
