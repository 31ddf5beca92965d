mod user_repo_mysql;
mod verdura_repo_mysql;

pub use user_repo_mysql::*;
pub use verdura_repo_mysql::*;
