use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use fq_core::ids::EntryId;
use fq_core::ports::{ClockPort, IdGeneratorPort};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Fallback ids of the form `<epoch_ms>_<6 base36 chars>`.
///
/// Seeded without touching the OS random source, so it keeps working where
/// [`UuidIdGenerator`](super::UuidIdGenerator) cannot.
pub struct TimestampIdGenerator {
    clock: Arc<dyn ClockPort>,
    rng: Mutex<SmallRng>,
}

impl TimestampIdGenerator {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let seed = nanos ^ (u64::from(std::process::id()) << 32);
        Self::with_seed(clock, seed)
    }

    pub fn with_seed(clock: Arc<dyn ClockPort>, seed: u64) -> Self {
        Self {
            clock,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    fn suffix(&self) -> String {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect()
    }
}

impl IdGeneratorPort for TimestampIdGenerator {
    fn next_id(&self) -> EntryId {
        EntryId::from(format!("{}_{}", self.clock.now_ms(), self.suffix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FrozenClock;

    impl ClockPort for FrozenClock {
        fn now_ms(&self) -> i64 {
            1_700_000_000_000
        }
    }

    #[test]
    fn ids_carry_timestamp_and_base36_suffix() {
        let generator = TimestampIdGenerator::with_seed(Arc::new(FrozenClock), 7);
        let id = generator.next_id();

        let (stamp, suffix) = id.as_str().split_once('_').unwrap();
        assert_eq!(stamp, "1700000000000");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn ids_differ_within_the_same_millisecond() {
        let generator = TimestampIdGenerator::with_seed(Arc::new(FrozenClock), 42);
        let ids: HashSet<_> = (0..200).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 200);
    }
}
