use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::record::{FieldValue, Record};
use crate::domain::types::{CertificateNumber, RecordId};
use crate::list_view::ListViewSpec;

/// Certificate of insurance issued to a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: RecordId,
    pub certificate_number: CertificateNumber,
    pub client_name: Option<String>,
    pub broker_name: Option<String>,
    pub company_name: Option<String>,
    pub policy_type: Option<String>,
    pub status: String,
    pub issue_date: Option<NaiveDateTime>,
    pub expiry_date: Option<NaiveDateTime>,
}

pub const CERTIFICATE_LIST_VIEW: ListViewSpec = ListViewSpec {
    searchable_fields: &[
        "certificateNumber",
        "clientName",
        "brokerName",
        "companyName",
        "policyType",
    ],
    tag_field: Some("status"),
    date_field: Some("issueDate"),
};

impl Record for Certificate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "certificateNumber" => Some(self.certificate_number.as_str().into()),
            "clientName" => self.client_name.as_deref().map(FieldValue::from),
            "brokerName" => self.broker_name.as_deref().map(FieldValue::from),
            "companyName" => self.company_name.as_deref().map(FieldValue::from),
            "policyType" => self.policy_type.as_deref().map(FieldValue::from),
            "status" => Some(self.status.as_str().into()),
            "issueDate" => self.issue_date.map(FieldValue::from),
            "expiryDate" => self.expiry_date.map(FieldValue::from),
            _ => None,
        }
    }
}
