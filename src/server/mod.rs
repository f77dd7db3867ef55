pub mod api;
pub mod auth;
pub mod fetch;
pub mod figura;
