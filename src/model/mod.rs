pub mod activity;
pub mod client;
pub mod common;
pub mod daily_load;
pub mod deliverable;
pub mod enums;
pub mod estimation;
pub mod maintenance;
pub mod project;
pub mod resource;

pub use activity::*;
pub use client::*;
pub use common::*;
pub use daily_load::*;
pub use deliverable::*;
pub use enums::*;
pub use estimation::*;
pub use maintenance::*;
pub use project::*;
pub use resource::*;
