// vyos-api: Async Rust client for the VyOS HTTP configuration API

pub mod client;
mod endpoints;
pub mod error;
pub mod operation;
pub mod path;
pub mod payload;
pub mod response;
pub mod transport;

pub use client::VyosClient;
pub use error::Error;
pub use operation::{Command, Op};
pub use path::{ConfigPath, PathElement};
pub use payload::{Attachments, OperationData, OperationRequest, Payload, RequestEcho};
pub use response::{ApiResponse, ResponseError};
pub use transport::{ConnectionConfig, DEFAULT_PORT, DEFAULT_TIMEOUT, Scheme, TlsMode};
