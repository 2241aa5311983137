pub mod realtime_http;
pub mod session_http;
