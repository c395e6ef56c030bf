pub mod config;
pub mod logging;
pub mod proxy;
pub mod server;

pub use config::DevServerConfig;
pub use server::{build_app, AppState};
