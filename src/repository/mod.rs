//! Record sources feeding the list views.
//!
//! Each reader hands back the complete collection for one view. Filtering and
//! paging happen afterwards, in memory, in [`crate::list_view`].

use std::path::{Path, PathBuf};

use crate::domain::broker::Broker;
use crate::domain::certificate::Certificate;
use crate::domain::client::Client;
use crate::domain::company::Company;
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod snapshot;

pub trait UserReader {
    fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

pub trait ClientReader {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait CompanyReader {
    fn list_companies(&self) -> RepositoryResult<Vec<Company>>;
}

pub trait BrokerReader {
    fn list_brokers(&self) -> RepositoryResult<Vec<Broker>>;
}

pub trait CertificateReader {
    fn list_certificates(&self) -> RepositoryResult<Vec<Certificate>>;
}

/// Reads completed API list responses saved as JSON files in one directory.
#[derive(Clone, Debug)]
pub struct SnapshotRepository {
    data_dir: PathBuf,
}

impl SnapshotRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
