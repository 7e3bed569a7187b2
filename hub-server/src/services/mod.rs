//! Server services

pub mod http;

pub use http::{HttpService, build_app};
