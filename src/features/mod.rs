//! Resource clients built on [`crate::transport::ApiClient`]. Every call goes
//! through the request authorizer; authorization is enforced by the backend.

pub mod products;
