mod audit;
mod identity;
mod remote;
mod rule;

pub use audit::*;
pub use identity::*;
pub use remote::*;
pub use rule::*;
