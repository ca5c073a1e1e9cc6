//! API middleware.

mod logging;
mod session_gate;

pub use logging::{log_response, make_request_span};
pub use session_gate::session_gate;
