//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::broker::Broker;
use crate::domain::certificate::Certificate;
use crate::domain::client::Client;
use crate::domain::company::Company;
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BrokerReader, CertificateReader, ClientReader, CompanyReader, UserReader};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn list_users(&self) -> RepositoryResult<Vec<User>>;
    }

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl CompanyReader for Repository {
        fn list_companies(&self) -> RepositoryResult<Vec<Company>>;
    }

    impl BrokerReader for Repository {
        fn list_brokers(&self) -> RepositoryResult<Vec<Broker>>;
    }

    impl CertificateReader for Repository {
        fn list_certificates(&self) -> RepositoryResult<Vec<Certificate>>;
    }
}
