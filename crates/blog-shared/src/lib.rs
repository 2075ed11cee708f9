//! # Blog Shared
//!
//! Wire types of the blog posts API, shared between the server and its clients.
//! Kept free of server crates so it can be compiled for WASM clients too.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, InvalidParam};
