//! Feature modules, each split into `controller` (HTTP handlers), `service`
//! (queries and business rules), and `router`.

pub mod auth;
pub mod contents;
pub mod templates;
pub mod users;
