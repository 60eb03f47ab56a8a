pub mod identity;
pub mod links;
pub mod reconcile;
pub mod validate;

pub use identity::*;
pub use links::*;
pub use reconcile::*;
pub use validate::*;
