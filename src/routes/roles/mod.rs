mod applications;
mod assignment;
mod lifecycle;
mod search_candidates;
mod update_details;

pub use applications::*;
pub use assignment::*;
pub use lifecycle::*;
pub use search_candidates::*;
pub use update_details::*;
