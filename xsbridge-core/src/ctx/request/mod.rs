mod assembler;
mod cookies;
mod entity;
mod error;
mod host_request;
mod method;
pub mod normalization;
mod normalized_request;
mod request_id;

pub use assembler::*;
pub use cookies::*;
pub use entity::*;
pub use error::*;
pub use host_request::*;
pub use method::*;
pub use normalized_request::*;
pub use request_id::*;
