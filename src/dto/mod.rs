//! DTO modules that bridge the remote API, services and the render surface.

pub mod api;
pub mod list;
