pub mod config;
pub mod ctx;
pub mod jobs;
pub mod locale;
pub mod logging;
pub mod odata;
