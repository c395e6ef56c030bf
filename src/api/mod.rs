pub mod client;
pub mod error;
pub mod fetch;
pub mod health;
pub mod rag;

pub use client::{ApiClient, RequestOptions, Transport};
pub use error::ApiError;
pub use fetch::FetchTransport;
pub use health::{HealthStatus, HEALTH_PATH};
pub use rag::{ask_question, AskResponse, Source};
