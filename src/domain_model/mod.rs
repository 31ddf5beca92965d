mod session;
mod user;
mod verdura;

pub use session::*;
pub use user::*;
pub use verdura::*;
