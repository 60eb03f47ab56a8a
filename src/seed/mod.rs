pub mod data;
pub mod samples;

pub use data::load_seed_data;
