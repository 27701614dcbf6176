pub mod accurate;
pub mod local;
pub mod signature;

pub use accurate::AccurateClient;
pub use local::LocalApiClient;
pub use signature::{current_timestamp, sign_timestamp, SignedHeaders};
