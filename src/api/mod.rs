pub mod csrf;

pub use csrf::{handle_issue_token, handle_verify_token, TokenResponse, VerifyRequest, VerifyResponse};
pub use csrf::{__path_handle_issue_token, __path_handle_verify_token};
