use thiserror::Error;

use super::CodecError;
use crate::ids::EntryId;
use crate::ports::StoreError;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("id generator kept returning queued id {0}")]
    IdCollision(EntryId),
}
