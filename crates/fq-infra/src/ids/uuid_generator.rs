use fq_core::ids::EntryId;
use fq_core::ports::IdGeneratorPort;
use uuid::Uuid;

/// Random (v4) UUID ids: 122 random bits each.
pub struct UuidIdGenerator;

impl IdGeneratorPort for UuidIdGenerator {
    fn next_id(&self) -> EntryId {
        EntryId::from(Uuid::new_v4().to_string())
    }
}
