mod hashmap_banned_token_store;
mod hashmap_profile_store;
mod hashmap_project_store;
mod postgres_profile_store;
mod postgres_project_store;
mod redis_banned_token_store;

pub use hashmap_banned_token_store::*;
pub use hashmap_profile_store::*;
pub use hashmap_project_store::*;
pub use postgres_profile_store::*;
pub use postgres_project_store::*;
pub use redis_banned_token_store::*;
