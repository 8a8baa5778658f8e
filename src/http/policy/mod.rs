//! Built-in pipeline policies.

pub mod date;
pub mod request_id;
pub mod user_agent;

pub use date::{AddDatePolicy, RFC1123_FORMAT, format_rfc1123};
pub use request_id::{CLIENT_REQUEST_ID_HEADER, RequestIdPolicy};
pub use user_agent::{UserAgentPolicy, default_user_agent};
