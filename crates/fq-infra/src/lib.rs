pub mod connectivity;
pub mod fs;
pub mod ids;
pub mod store;
pub mod time;

pub use connectivity::WatchConnectivity;
pub use ids::{select_id_generator, TimestampIdGenerator, UuidIdGenerator};
pub use store::{FileStore, InMemoryStore};
pub use time::SystemClock;
