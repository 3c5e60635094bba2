//! Data layer of the brokerage admin portal.
//!
//! Every list page of the portal (users, clients, companies, brokers,
//! certificates) shows records fetched from the brokerage API through the same
//! pure pipeline in [`list_view`]: free-text search, tag filter, date-range
//! filter and pagination. The `cli` feature adds a file-backed record source,
//! the page services and the `broker-portal` binary.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "cli")]
pub mod forms;
#[cfg(feature = "data")]
pub mod list_view;
#[cfg(feature = "cli")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "cli")]
pub mod repository;
#[cfg(feature = "cli")]
pub mod services;
