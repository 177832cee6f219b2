pub mod client;
pub mod models;
pub mod response;
pub mod streaming;

pub use client::send_chat_request;
pub use models::RequestBody;
pub use streaming::process_streaming_response;
