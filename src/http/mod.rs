pub mod client;
pub mod request;
pub mod response;
pub mod types;

pub use client::Client;
pub use request::Request;
pub use response::Response;
pub use types::{Method, Status, Url};
