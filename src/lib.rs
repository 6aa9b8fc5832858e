//! Client core for a small CRM web application: the session guard, the
//! customer query service, and the REST transport they share. Views sit
//! on top of this crate; the REST API itself is an external collaborator.

pub mod config;
pub mod error;
pub mod state;
pub mod routing;

pub mod models {
    pub mod user;
    pub mod session;
    pub mod customer;
    pub mod interaction;
    pub mod query;
}

pub mod store {
    pub mod session;
}

pub mod api {
    pub mod client;
    pub mod auth;
    pub mod customers;
    pub mod users;
}

pub mod services {
    pub mod guard;
    pub mod customers;
    pub mod users;
    pub mod dashboard;
}

pub mod validation {
    pub mod auth;
    pub mod customer;
}

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
