//! # myhome-adapter-http-reqwest
//!
//! HTTP adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the gateway port traits defined in `myhome-app::ports::gateway`
//! - Apply the backend's response conventions: an `error` key or
//!   `success: false` is a rejection, JSON wrapped in a string is decoded
//!   twice, an empty body is `null`
//! - Keep transport failures apart from rejections when converting into
//!   [`MyHomeError`](myhome_domain::error::MyHomeError)
//!
//! ## Dependency rule
//! Depends on `myhome-app` (for port traits) and `myhome-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod broker;
mod client;
mod config;
mod console;
mod device;
mod error;
mod location;
mod response;
mod scene;
mod skills;

#[cfg(test)]
mod testing;

pub use client::HttpGateway;
pub use config::HttpConfig;
pub use error::HttpError;
