mod error;
mod handler;
mod policy;
mod router;

pub use error::recover_error;
pub use policy::{Access, Caller, Decision, PolicyTable};
pub use router::routes;
