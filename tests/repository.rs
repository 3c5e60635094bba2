use std::fs;

use broker_portal::dto::list::ListQuery;
use broker_portal::forms::list::ListQueryForm;
use broker_portal::repository::errors::RepositoryError;
use broker_portal::repository::{
    BrokerReader, CertificateReader, ClientReader, CompanyReader, SnapshotRepository, UserReader,
};
use broker_portal::services::ListViewKind;
use broker_portal::services::export::export_list_view;
use broker_portal::services::lists::{load_clients_page, load_users_page};
use serde_json::json;
use tempfile::TempDir;

fn snapshot_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, value: serde_json::Value| {
        fs::write(dir.path().join(name), value.to_string()).unwrap();
    };

    write(
        "users.json",
        json!([
            {"userId": 1, "name": "Alice Admin", "email": "alice@example.com", "role": "admin",
             "permissions": ["users.manage"], "createdAt": "2024-01-10T08:00:00Z"},
            {"userid": "2", "fullName": "Bob Broker", "email": "BOB@example.com", "role": "broker",
             "isActive": false},
            {"id": 3, "name": "No Email"},
        ]),
    );
    write(
        "clients.json",
        json!({"data": [
            {"clientId": "c1", "name": "Harbor Logistics", "status": "active",
             "submitDate": "2024-02-01", "broker": "Bob Broker"},
            {"clientId": "c2", "name": "Summit Dental", "status": "pending",
             "submitDate": "2024-05-20T14:30:00"},
            {"clientId": "c3", "name": "Harbor Bakery", "status": "active"},
        ]}),
    );
    write(
        "companies.json",
        json!([{"companyId": 9, "companyName": "Northwind Mutual", "type": "carrier"}]),
    );
    write(
        "brokers.json",
        json!([{"brokerId": 4, "name": "Bob Broker", "licenseNo": "LIC-77", "status": "active"}]),
    );
    write(
        "certificates.json",
        json!([{"certificateNumber": "COI-1", "clientName": "Harbor Logistics",
                "status": "issued", "issueDate": "2024-03-01"}]),
    );

    dir
}

#[test]
fn reads_every_snapshot() {
    let dir = snapshot_dir();
    let repo = SnapshotRepository::new(dir.path());

    let users = repo.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].email.as_str(), "bob@example.com");
    assert!(!users[1].is_active);

    assert_eq!(repo.list_clients().unwrap().len(), 3);
    assert_eq!(repo.list_companies().unwrap()[0].company_type, "carrier");
    assert_eq!(
        repo.list_brokers().unwrap()[0].license_number.as_deref(),
        Some("LIC-77")
    );
    assert_eq!(repo.list_certificates().unwrap()[0].id.as_str(), "COI-1");
}

#[test]
fn missing_snapshot_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SnapshotRepository::new(dir.path());

    assert!(matches!(repo.list_users(), Err(RepositoryError::NotFound(_))));
}

#[test]
fn malformed_snapshot_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("brokers.json"), "{not json").unwrap();
    let repo = SnapshotRepository::new(dir.path());

    assert!(matches!(repo.list_brokers(), Err(RepositoryError::Decode(_))));
}

#[test]
fn clients_page_from_query_string() {
    let dir = snapshot_dir();
    let repo = SnapshotRepository::new(dir.path());
    let form =
        ListQueryForm::from_query_string("?search=harbor&tag=active&from=2024-01-01").unwrap();
    let query = ListQuery::try_from(form).unwrap();

    let data = load_clients_page(&repo, &query, 20).unwrap();

    let names: Vec<_> = data.records.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Harbor Logistics"]);
    assert_eq!(data.tag_options, vec!["active", "pending"]);
}

#[test]
fn users_page_filters_by_role() {
    let dir = snapshot_dir();
    let repo = SnapshotRepository::new(dir.path());
    let query = ListQuery::try_from(ListQueryForm::from_query_string("tag=broker").unwrap()).unwrap();

    let data = load_users_page(&repo, &query, 20).unwrap();

    assert_eq!(data.total, 1);
    assert_eq!(data.records.items[0].name.as_str(), "Bob Broker");
}

#[test]
fn exports_filtered_clients() {
    let dir = snapshot_dir();
    let repo = SnapshotRepository::new(dir.path());
    let query =
        ListQuery::try_from(ListQueryForm::from_query_string("search=harbor").unwrap()).unwrap();

    let mut out = Vec::new();
    let written = export_list_view(&repo, ListViewKind::Clients, &query.filters, &mut out).unwrap();

    assert_eq!(written, 2);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("id,name,email,phone,companyName,brokerName,status,submitDate\n"));
    assert!(text.contains("c1,Harbor Logistics,,,,Bob Broker,active,2024-02-01T00:00:00\n"));
}
