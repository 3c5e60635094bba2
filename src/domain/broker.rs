use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::record::{FieldValue, Record};
use crate::domain::types::{EmailAddress, PersonName, PhoneNumber, RecordId};
use crate::list_view::ListViewSpec;

/// Licensed broker working for one of the registered companies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub id: RecordId,
    pub name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub company_name: Option<String>,
    pub license_number: Option<String>,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

pub const BROKER_LIST_VIEW: ListViewSpec = ListViewSpec {
    searchable_fields: &["name", "email", "companyName", "licenseNumber"],
    tag_field: Some("status"),
    date_field: Some("createdAt"),
};

impl Record for Broker {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "email" => self.email.as_ref().map(|e| FieldValue::from(e.as_str())),
            "phone" => self.phone.as_ref().map(|p| FieldValue::from(p.as_str())),
            "phoneE164" => self
                .phone
                .as_ref()
                .and_then(PhoneNumber::e164)
                .map(FieldValue::from),
            "companyName" => self.company_name.as_deref().map(FieldValue::from),
            "licenseNumber" => self.license_number.as_deref().map(FieldValue::from),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => self.created_at.map(FieldValue::from),
            _ => None,
        }
    }
}
