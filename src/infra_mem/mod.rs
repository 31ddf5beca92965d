mod session_store_mem;
mod user_repo_mem;
mod verdura_repo_mem;

pub use session_store_mem::*;
pub use user_repo_mem::*;
pub use verdura_repo_mem::*;
