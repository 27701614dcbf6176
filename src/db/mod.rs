pub mod migrate;
pub mod pool;
pub mod queries;

pub use migrate::{migrate_apply, migrate_fresh};
pub use pool::create_pool;
