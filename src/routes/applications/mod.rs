mod decide;
mod get_my_applications;
mod withdraw;

pub use decide::*;
pub use get_my_applications::*;
pub use withdraw::*;
