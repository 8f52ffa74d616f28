pub mod csrf;
pub mod headers;

pub use csrf::{CsrfSigner, NONCE_HEX_LEN, NONCE_LEN, TOKEN_TTL_MS};
pub use headers::{apply_security_headers, SECURITY_HEADERS};
