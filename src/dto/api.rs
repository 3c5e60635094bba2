//! Raw payloads returned by the brokerage REST API and their normalization.
//!
//! The API is loose about field spellings (`userId`, `userid`, `user_id`) and
//! about scalar types (ids and dates arrive as numbers or strings). All of that
//! is absorbed here, once, so the rest of the crate only sees the canonical
//! entities from [`crate::domain`].
//!
//! Each entry is read as a JSON object. A field is resolved from an ordered
//! list of spellings: the first key holding a non-blank scalar wins. Nested
//! objects, arrays and nulls read as absent for that field only.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::broker::Broker;
use crate::domain::certificate::Certificate;
use crate::domain::client::Client;
use crate::domain::company::Company;
use crate::domain::types::{
    CertificateNumber, CompanyName, EmailAddress, PersonName, PhoneNumber, RecordId,
    TypeConstraintError,
};
use crate::domain::user::User;
use crate::list_view::parse_timestamp;

/// One API entry before field resolution.
pub type ApiObject = Map<String, Value>;

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid `{field}`: {source}")]
    Constraint {
        field: &'static str,
        #[source]
        source: TypeConstraintError,
    },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// A JSON scalar as the API sends it.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiScalar {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ApiScalar {
    /// Scalar view of a JSON value. Blank strings count as absent.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(ApiScalar::Text(s.clone())),
            Value::Bool(b) => Some(ApiScalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ApiScalar::Integer(i)),
                None => n.as_f64().map(ApiScalar::Float),
            },
            Value::String(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Trimmed text form; `None` when blank.
    fn into_text(self) -> Option<String> {
        let text = match self {
            ApiScalar::Integer(n) => n.to_string(),
            ApiScalar::Float(n) => n.to_string(),
            ApiScalar::Bool(b) => b.to_string(),
            ApiScalar::Text(s) => s.trim().to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// Numbers are epoch milliseconds, strings go through [`parse_timestamp`].
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        match self {
            ApiScalar::Integer(millis) => {
                DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
            }
            ApiScalar::Text(s) => parse_timestamp(&s),
            ApiScalar::Float(_) | ApiScalar::Bool(_) => None,
        }
    }
}

/// First of `keys` holding a usable scalar.
fn pick(object: &ApiObject, keys: &[&str]) -> Option<ApiScalar> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(ApiScalar::from_value)
}

/// A list response: either a bare array or wrapped in `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiList<T> {
    Bare(Vec<T>),
    Envelope { data: Vec<T> },
}

impl<T> ApiList<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ApiList::Bare(items) | ApiList::Envelope { data: items } => items,
        }
    }
}

fn required_text(value: Option<ApiScalar>, field: &'static str) -> Result<String, IngestError> {
    value
        .and_then(ApiScalar::into_text)
        .ok_or(IngestError::MissingField(field))
}

fn optional_text(value: Option<ApiScalar>) -> Option<String> {
    value.and_then(ApiScalar::into_text)
}

fn optional_phone(value: Option<ApiScalar>) -> Option<PhoneNumber> {
    optional_text(value).and_then(|raw| PhoneNumber::new(raw).ok())
}

fn constrained<T>(
    result: Result<T, TypeConstraintError>,
    field: &'static str,
) -> Result<T, IngestError> {
    result.map_err(|source| IngestError::Constraint { field, source })
}

fn optional_email(value: Option<ApiScalar>, field: &'static str) -> Option<EmailAddress> {
    let raw = optional_text(value)?;
    match EmailAddress::new(raw.as_str()) {
        Ok(email) => Some(email),
        Err(err) => {
            log::debug!("Dropping `{field}` value {raw:?}: {err}");
            None
        }
    }
}

fn optional_timestamp(value: Option<ApiScalar>, field: &'static str) -> Option<NaiveDateTime> {
    let value = value?;
    let raw = value.clone();
    let parsed = value.into_timestamp();
    if parsed.is_none() {
        log::debug!("Unparsable `{field}` value {raw:?}");
    }
    parsed
}

const PHONE_KEYS: &[&str] = &["phone", "phoneNumber", "phone_number"];
const EMAIL_KEYS: &[&str] = &["email", "emailAddress", "email_address"];
const CREATED_AT_KEYS: &[&str] = &["createdAt", "created_at", "dateCreated"];

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "ApiObject")]
pub struct ApiUser {
    pub id: Option<ApiScalar>,
    pub name: Option<ApiScalar>,
    pub email: Option<ApiScalar>,
    pub role: Option<ApiScalar>,
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub created_at: Option<ApiScalar>,
}

impl From<ApiObject> for ApiUser {
    fn from(object: ApiObject) -> Self {
        let permissions = object
            .get("permissions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            });
        let is_active = ["isActive", "is_active", "active"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_bool));

        Self {
            id: pick(&object, &["userId", "userid", "user_id", "id", "_id"]),
            name: pick(&object, &["name", "fullName", "full_name", "username"]),
            email: pick(&object, EMAIL_KEYS),
            role: pick(&object, &["role", "userRole", "user_role"]),
            permissions,
            is_active,
            created_at: pick(&object, CREATED_AT_KEYS),
        }
    }
}

impl TryFrom<ApiUser> for User {
    type Error = IngestError;

    fn try_from(raw: ApiUser) -> Result<Self, Self::Error> {
        let id = constrained(RecordId::new(required_text(raw.id, "id")?), "id")?;
        let name = constrained(PersonName::new(required_text(raw.name, "name")?), "name")?;
        let email = constrained(
            EmailAddress::new(required_text(raw.email, "email")?),
            "email",
        )?;
        let mut permissions: Vec<String> = raw
            .permissions
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        permissions.sort_unstable();
        permissions.dedup();

        Ok(User {
            id,
            name,
            email,
            role: optional_text(raw.role).unwrap_or_default(),
            permissions,
            is_active: raw.is_active.unwrap_or(true),
            created_at: optional_timestamp(raw.created_at, "createdAt"),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "ApiObject")]
pub struct ApiClient {
    pub id: Option<ApiScalar>,
    pub name: Option<ApiScalar>,
    pub email: Option<ApiScalar>,
    pub phone: Option<ApiScalar>,
    pub company_name: Option<ApiScalar>,
    pub broker_name: Option<ApiScalar>,
    pub status: Option<ApiScalar>,
    pub submit_date: Option<ApiScalar>,
}

impl From<ApiObject> for ApiClient {
    fn from(object: ApiObject) -> Self {
        Self {
            id: pick(&object, &["clientId", "clientid", "client_id", "id", "_id"]),
            name: pick(&object, &["name", "clientName", "client_name", "fullName"]),
            email: pick(&object, EMAIL_KEYS),
            phone: pick(&object, PHONE_KEYS),
            company_name: pick(&object, &["companyName", "company_name", "company"]),
            broker_name: pick(&object, &["brokerName", "broker_name", "broker"]),
            status: pick(&object, &["status"]),
            submit_date: pick(
                &object,
                &["submitDate", "submit_date", "submittedAt", "submitted_at"],
            ),
        }
    }
}

impl TryFrom<ApiClient> for Client {
    type Error = IngestError;

    fn try_from(raw: ApiClient) -> Result<Self, Self::Error> {
        Ok(Client {
            id: constrained(RecordId::new(required_text(raw.id, "id")?), "id")?,
            name: constrained(PersonName::new(required_text(raw.name, "name")?), "name")?,
            email: optional_email(raw.email, "email"),
            phone: optional_phone(raw.phone),
            company_name: optional_text(raw.company_name),
            broker_name: optional_text(raw.broker_name),
            status: optional_text(raw.status).unwrap_or_default(),
            submit_date: optional_timestamp(raw.submit_date, "submitDate"),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "ApiObject")]
pub struct ApiCompany {
    pub id: Option<ApiScalar>,
    pub name: Option<ApiScalar>,
    pub industry: Option<ApiScalar>,
    pub email: Option<ApiScalar>,
    pub phone: Option<ApiScalar>,
    pub city: Option<ApiScalar>,
    pub company_type: Option<ApiScalar>,
    pub created_at: Option<ApiScalar>,
}

impl From<ApiObject> for ApiCompany {
    fn from(object: ApiObject) -> Self {
        Self {
            id: pick(&object, &["companyId", "companyid", "company_id", "id", "_id"]),
            name: pick(&object, &["name", "companyName", "company_name"]),
            industry: pick(&object, &["industry"]),
            email: pick(&object, EMAIL_KEYS),
            phone: pick(&object, PHONE_KEYS),
            city: pick(&object, &["city"]),
            company_type: pick(&object, &["type", "companyType", "company_type", "category"]),
            created_at: pick(&object, CREATED_AT_KEYS),
        }
    }
}

impl TryFrom<ApiCompany> for Company {
    type Error = IngestError;

    fn try_from(raw: ApiCompany) -> Result<Self, Self::Error> {
        Ok(Company {
            id: constrained(RecordId::new(required_text(raw.id, "id")?), "id")?,
            name: constrained(CompanyName::new(required_text(raw.name, "name")?), "name")?,
            industry: optional_text(raw.industry),
            email: optional_email(raw.email, "email"),
            phone: optional_phone(raw.phone),
            city: optional_text(raw.city),
            company_type: optional_text(raw.company_type).unwrap_or_default(),
            created_at: optional_timestamp(raw.created_at, "createdAt"),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "ApiObject")]
pub struct ApiBroker {
    pub id: Option<ApiScalar>,
    pub name: Option<ApiScalar>,
    pub email: Option<ApiScalar>,
    pub phone: Option<ApiScalar>,
    pub company_name: Option<ApiScalar>,
    pub license_number: Option<ApiScalar>,
    pub status: Option<ApiScalar>,
    pub created_at: Option<ApiScalar>,
}

impl From<ApiObject> for ApiBroker {
    fn from(object: ApiObject) -> Self {
        Self {
            id: pick(&object, &["brokerId", "brokerid", "broker_id", "id", "_id"]),
            name: pick(&object, &["name", "brokerName", "broker_name", "fullName"]),
            email: pick(&object, EMAIL_KEYS),
            phone: pick(&object, PHONE_KEYS),
            company_name: pick(&object, &["companyName", "company_name", "company"]),
            license_number: pick(
                &object,
                &["licenseNumber", "license_number", "licenseNo", "license"],
            ),
            status: pick(&object, &["status"]),
            created_at: pick(&object, CREATED_AT_KEYS),
        }
    }
}

impl TryFrom<ApiBroker> for Broker {
    type Error = IngestError;

    fn try_from(raw: ApiBroker) -> Result<Self, Self::Error> {
        Ok(Broker {
            id: constrained(RecordId::new(required_text(raw.id, "id")?), "id")?,
            name: constrained(PersonName::new(required_text(raw.name, "name")?), "name")?,
            email: optional_email(raw.email, "email"),
            phone: optional_phone(raw.phone),
            company_name: optional_text(raw.company_name),
            license_number: optional_text(raw.license_number),
            status: optional_text(raw.status).unwrap_or_default(),
            created_at: optional_timestamp(raw.created_at, "createdAt"),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "ApiObject")]
pub struct ApiCertificate {
    pub id: Option<ApiScalar>,
    pub certificate_number: Option<ApiScalar>,
    pub client_name: Option<ApiScalar>,
    pub broker_name: Option<ApiScalar>,
    pub company_name: Option<ApiScalar>,
    pub policy_type: Option<ApiScalar>,
    pub status: Option<ApiScalar>,
    pub issue_date: Option<ApiScalar>,
    pub expiry_date: Option<ApiScalar>,
}

impl From<ApiObject> for ApiCertificate {
    fn from(object: ApiObject) -> Self {
        Self {
            id: pick(&object, &["certificateId", "certificate_id", "id", "_id"]),
            certificate_number: pick(
                &object,
                &["certificateNumber", "certificate_number", "certificateNo", "certNumber"],
            ),
            client_name: pick(&object, &["clientName", "client_name", "client"]),
            broker_name: pick(&object, &["brokerName", "broker_name", "broker"]),
            company_name: pick(&object, &["companyName", "company_name", "company"]),
            policy_type: pick(&object, &["policyType", "policy_type", "coverageType"]),
            status: pick(&object, &["status"]),
            issue_date: pick(&object, &["issueDate", "issue_date", "issuedAt", "issued_at"]),
            expiry_date: pick(
                &object,
                &["expiryDate", "expiry_date", "expirationDate", "expiresAt"],
            ),
        }
    }
}

impl TryFrom<ApiCertificate> for Certificate {
    type Error = IngestError;

    fn try_from(raw: ApiCertificate) -> Result<Self, Self::Error> {
        let certificate_number = constrained(
            CertificateNumber::new(required_text(raw.certificate_number, "certificateNumber")?),
            "certificateNumber",
        )?;
        // Older payloads only carry the certificate number.
        let id = match optional_text(raw.id) {
            Some(id) => constrained(RecordId::new(id), "id")?,
            None => constrained(RecordId::new(certificate_number.as_str()), "id")?,
        };

        Ok(Certificate {
            id,
            certificate_number,
            client_name: optional_text(raw.client_name),
            broker_name: optional_text(raw.broker_name),
            company_name: optional_text(raw.company_name),
            policy_type: optional_text(raw.policy_type),
            status: optional_text(raw.status).unwrap_or_default(),
            issue_date: optional_timestamp(raw.issue_date, "issueDate"),
            expiry_date: optional_timestamp(raw.expiry_date, "expiryDate"),
        })
    }
}

/// Converts raw JSON entries into canonical entities.
///
/// Entries that do not decode or fail normalization are logged and skipped;
/// the others keep their order.
pub fn normalize_collection<A, T>(entries: Vec<Value>) -> Vec<T>
where
    A: DeserializeOwned,
    T: TryFrom<A, Error = IngestError>,
{
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let raw = match serde_json::from_value::<A>(entry) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Skipping entry #{index}: {err}");
                continue;
            }
        };
        match T::try_from(raw) {
            Ok(record) => records.push(record),
            Err(err) => log::warn!("Skipping entry #{index}: {err}"),
        }
    }
    records
}

/// Decodes a list response body and normalizes its entries.
pub fn parse_list_response<A, T>(body: &str) -> Result<Vec<T>, IngestError>
where
    A: DeserializeOwned,
    T: TryFrom<A, Error = IngestError>,
{
    let list: ApiList<Value> =
        serde_json::from_str(body).map_err(|err| IngestError::Malformed(err.to_string()))?;
    let entries = list.into_items();
    let total = entries.len();
    let records = normalize_collection::<A, T>(entries);
    if records.len() < total {
        log::warn!("Normalized {} of {total} entries", records.len());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn user_accepts_alternate_id_spellings() {
        for key in ["id", "userId", "userid", "user_id", "_id"] {
            let raw: ApiUser = serde_json::from_value(json!({
                key: 7,
                "name": "Ada",
                "email": "ADA@example.com",
            }))
            .unwrap();
            let user = User::try_from(raw).unwrap();
            assert_eq!(user.id.as_str(), "7");
            assert_eq!(user.email.as_str(), "ada@example.com");
            assert!(user.is_active);
        }
    }

    #[test]
    fn user_without_email_is_rejected() {
        let raw = ApiUser {
            id: Some(ApiScalar::Integer(1)),
            name: Some(ApiScalar::Text("Ada".into())),
            ..ApiUser::default()
        };
        assert_eq!(User::try_from(raw), Err(IngestError::MissingField("email")));
    }

    #[test]
    fn user_permissions_are_deduplicated() {
        let raw: ApiUser = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "permissions": ["write", " read ", "write", ""],
        }))
        .unwrap();
        let user = User::try_from(raw).unwrap();
        assert_eq!(user.permissions, vec!["read", "write"]);
        assert!(user.has_permission("read"));
    }

    #[test]
    fn client_keeps_unparsable_date_as_missing() {
        let raw: ApiClient = serde_json::from_value(json!({
            "clientid": "c-1",
            "clientName": "Acme Logistics",
            "email": "broken@",
            "status": "active",
            "submitDate": "sometime",
        }))
        .unwrap();
        let client = Client::try_from(raw).unwrap();
        assert_eq!(client.email, None);
        assert_eq!(client.submit_date, None);
        assert_eq!(client.status, "active");
    }

    #[test]
    fn epoch_millis_are_timestamps() {
        let raw: ApiClient = serde_json::from_value(json!({
            "id": 1,
            "name": "Acme",
            "submitDate": 1_704_067_200_000_i64,
        }))
        .unwrap();
        let client = Client::try_from(raw).unwrap();
        assert_eq!(
            client.submit_date.map(|dt| dt.date()),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn certificate_id_falls_back_to_number() {
        let raw: ApiCertificate = serde_json::from_value(json!({
            "certificateNo": "COI-2024-001",
            "issuedAt": "2024-02-10T09:00:00Z",
        }))
        .unwrap();
        let certificate = Certificate::try_from(raw).unwrap();
        assert_eq!(certificate.id.as_str(), "COI-2024-001");
        assert!(certificate.issue_date.is_some());
    }

    #[test]
    fn list_response_accepts_envelope_and_skips_bad_entries() {
        let body = json!({
            "data": [
                {"id": 1, "name": "Alpha Insurance", "type": "carrier"},
                {"id": 2},
                "garbage",
                {"companyId": 3, "companyName": "Beta Agency", "category": "agency"},
            ]
        })
        .to_string();
        let companies = parse_list_response::<ApiCompany, Company>(&body).unwrap();
        let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Insurance", "Beta Agency"]);
        assert_eq!(companies[1].company_type, "agency");
    }

    #[test]
    fn user_with_database_id_and_user_id_is_kept() {
        let users = normalize_collection::<ApiUser, User>(vec![json!({
            "id": 10,
            "userId": "u-10",
            "name": "Ada",
            "email": "ada@example.com",
        })]);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id.as_str(), "u-10");
    }

    #[test]
    fn nested_company_object_reads_as_absent() {
        let clients = normalize_collection::<ApiClient, Client>(vec![
            json!({"clientId": "c1", "id": 5, "name": "First", "status": "active"}),
            json!({
                "id": "c2",
                "name": "Second",
                "company": {"name": "Nested"},
                "status": "pending",
            }),
            json!({
                "id": "c3",
                "name": "Third",
                "company": {"name": "Nested"},
                "companyName": "Flat Co",
            }),
        ]);
        let ids: Vec<_> = clients.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(clients[1].company_name, None);
        assert_eq!(clients[2].company_name.as_deref(), Some("Flat Co"));
    }

    #[test]
    fn blank_or_null_spelling_falls_through_to_next_key() {
        let raw: ApiBroker = serde_json::from_value(json!({
            "brokerId": null,
            "broker_id": " ",
            "id": "b-1",
            "name": "Grace",
            "licenseNumber": ["L-1"],
            "licenseNo": "L-2",
        }))
        .unwrap();
        let broker = Broker::try_from(raw).unwrap();
        assert_eq!(broker.id.as_str(), "b-1");
        assert_eq!(broker.license_number.as_deref(), Some("L-2"));
    }

    #[test]
    fn phone_keeps_display_text() {
        let raw: ApiClient = serde_json::from_value(json!({
            "id": 1,
            "name": "Acme",
            "phoneNumber": " +1 415-555-2671 ",
        }))
        .unwrap();
        let client = Client::try_from(raw).unwrap();
        let phone = client.phone.unwrap();
        assert_eq!(phone.as_str(), "+1 415-555-2671");
        assert_eq!(phone.e164(), Some("+14155552671"));
    }

    #[test]
    fn list_response_rejects_non_list() {
        let result = parse_list_response::<ApiBroker, Broker>("{\"brokers\": 1}");
        assert!(matches!(result, Err(IngestError::Malformed(_))));
    }
}
