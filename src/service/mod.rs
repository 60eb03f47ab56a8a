pub mod rest;
pub mod routing;
pub mod traits;

pub use rest::*;
pub use routing::*;
pub use traits::*;
