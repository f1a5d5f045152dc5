pub mod application;
pub mod domain;
pub mod infrastructure;

mod app_context;
mod config;

pub use app_context::ClientContext;
pub use config::ClientConfig;

#[cfg(test)]
mod test_support;
