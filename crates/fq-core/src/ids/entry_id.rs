use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Opaque identifier of a queued entry.
///
/// Assigned once at enqueue time and used as the only key for removal.
/// 队列条目的唯一标识，入队时生成，之后不再改变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl_id!(EntryId);
