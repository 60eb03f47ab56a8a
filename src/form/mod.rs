pub mod bindings;
pub mod session;
pub mod views;

pub use bindings::*;
pub use session::*;
pub use views::*;
