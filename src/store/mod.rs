pub mod credentials;
pub mod file;

pub use credentials::*;
pub use file::*;
