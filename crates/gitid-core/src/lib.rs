mod error;
pub mod path;
pub mod remote;

pub use error::{Error, Result};
pub use path::*;
pub use remote::parse_remote_url;
