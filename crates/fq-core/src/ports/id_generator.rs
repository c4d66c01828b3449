use crate::ids::EntryId;

/// Source of fresh entry identifiers.
///
/// The concrete strategy is chosen once at startup and injected; callers never
/// decide per call which generator to use.
pub trait IdGeneratorPort: Send + Sync {
    fn next_id(&self) -> EntryId;
}

#[cfg(test)]
mockall::mock! {
    pub IdGenerator {}

    impl IdGeneratorPort for IdGenerator {
        fn next_id(&self) -> EntryId;
    }
}
