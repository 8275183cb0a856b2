pub mod accounts;
pub mod authenticator;
pub mod errors;
pub mod password;
pub mod session;

pub use accounts::*;
pub use authenticator::*;
pub use errors::*;
pub use password::*;
pub use session::*;
