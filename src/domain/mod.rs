//! Canonical entities shown by the portal list views.

pub mod broker;
pub mod certificate;
pub mod client;
pub mod company;
pub mod record;
pub mod types;
pub mod user;
