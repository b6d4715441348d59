mod logout;
mod session;
mod verify_token;

pub use logout::*;
pub use session::*;
pub use verify_token::*;
