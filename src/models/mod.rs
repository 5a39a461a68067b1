pub mod record;
pub mod repo;

pub use record::*;
pub use repo::*;
