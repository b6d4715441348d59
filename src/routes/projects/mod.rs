mod create_role;
mod get_project;
mod get_project_list;
mod get_roles;
mod new_project;

pub use create_role::*;
pub use get_project::*;
pub use get_project_list::*;
pub use get_roles::*;
pub use new_project::*;
