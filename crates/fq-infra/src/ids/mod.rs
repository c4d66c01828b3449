//! Entry identifier strategies.
//!
//! The strategy is picked once by [`select_id_generator`] and injected into
//! every queue; it is never re-decided per call.

mod timestamp_generator;
mod uuid_generator;

use std::sync::Arc;

use fq_core::config::IdStrategy;
use fq_core::ports::{ClockPort, IdGeneratorPort};
use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::{info, warn};

pub use timestamp_generator::TimestampIdGenerator;
pub use uuid_generator::UuidIdGenerator;

pub fn select_id_generator(
    strategy: IdStrategy,
    clock: Arc<dyn ClockPort>,
) -> Arc<dyn IdGeneratorPort> {
    match strategy {
        IdStrategy::Uuid => Arc::new(UuidIdGenerator),
        IdStrategy::Timestamp => Arc::new(TimestampIdGenerator::new(clock)),
        IdStrategy::Auto if os_random_available() => {
            info!("Using random UUID entry ids");
            Arc::new(UuidIdGenerator)
        }
        IdStrategy::Auto => {
            warn!("OS random source unavailable, falling back to timestamp entry ids");
            Arc::new(TimestampIdGenerator::new(clock))
        }
    }
}

fn os_random_available() -> bool {
    let mut probe = [0u8; 16];
    OsRng.try_fill_bytes(&mut probe).is_ok()
}
