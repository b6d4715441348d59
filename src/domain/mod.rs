mod application;
mod data_stores;
mod error;
mod grouping;
mod ids;
mod notification;
mod profile;
mod project;
mod project_title;
mod role;
mod role_category;
mod role_status;
mod role_title;
pub mod search;

pub use application::*;
pub use data_stores::*;
pub use error::*;
pub use grouping::*;
pub use ids::*;
pub use notification::*;
pub use profile::*;
pub use project::*;
pub use project_title::*;
pub use role::*;
pub use role_category::*;
pub use role_status::*;
pub use role_title::*;
