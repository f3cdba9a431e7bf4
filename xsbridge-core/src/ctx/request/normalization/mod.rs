mod body;
mod form_data;
mod headers;
mod multipart;
mod path;
#[cfg(test)]
mod tests;
mod types;

pub use body::*;
pub use form_data::*;
pub use headers::*;
pub use multipart::*;
pub use path::*;
pub use types::*;
