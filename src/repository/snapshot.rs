//! [`SnapshotRepository`] reader implementations.

use std::fs;
use std::io::ErrorKind;

use serde::de::DeserializeOwned;

use crate::domain::broker::Broker;
use crate::domain::certificate::Certificate;
use crate::domain::client::Client;
use crate::domain::company::Company;
use crate::domain::user::User;
use crate::dto::api::{
    ApiBroker, ApiCertificate, ApiClient, ApiCompany, ApiUser, IngestError, parse_list_response,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BrokerReader, CertificateReader, ClientReader, CompanyReader, SnapshotRepository, UserReader,
};

pub const USERS_FILE: &str = "users.json";
pub const CLIENTS_FILE: &str = "clients.json";
pub const COMPANIES_FILE: &str = "companies.json";
pub const BROKERS_FILE: &str = "brokers.json";
pub const CERTIFICATES_FILE: &str = "certificates.json";

impl SnapshotRepository {
    fn load<A, T>(&self, file_name: &str) -> RepositoryResult<Vec<T>>
    where
        A: DeserializeOwned,
        T: TryFrom<A, Error = IngestError>,
    {
        let path = self.data_dir().join(file_name);
        let body = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => RepositoryError::NotFound(path.display().to_string()),
            _ => RepositoryError::Io(err),
        })?;

        let records = parse_list_response::<A, T>(&body).map_err(|err| {
            log::error!("Failed to decode {}: {err}", path.display());
            err
        })?;
        log::debug!("Loaded {} records from {}", records.len(), path.display());

        Ok(records)
    }
}

impl UserReader for SnapshotRepository {
    fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.load::<ApiUser, User>(USERS_FILE)
    }
}

impl ClientReader for SnapshotRepository {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.load::<ApiClient, Client>(CLIENTS_FILE)
    }
}

impl CompanyReader for SnapshotRepository {
    fn list_companies(&self) -> RepositoryResult<Vec<Company>> {
        self.load::<ApiCompany, Company>(COMPANIES_FILE)
    }
}

impl BrokerReader for SnapshotRepository {
    fn list_brokers(&self) -> RepositoryResult<Vec<Broker>> {
        self.load::<ApiBroker, Broker>(BROKERS_FILE)
    }
}

impl CertificateReader for SnapshotRepository {
    fn list_certificates(&self) -> RepositoryResult<Vec<Certificate>> {
        self.load::<ApiCertificate, Certificate>(CERTIFICATES_FILE)
    }
}
