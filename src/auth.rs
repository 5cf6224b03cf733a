//! Session-domain primitives: redacted bearer secrets, offline JWT claims, and the
//! process-wide authentication watch.

pub mod claims;
pub mod secret;
pub mod session;

pub use claims::*;
pub use secret::*;
pub use session::*;
