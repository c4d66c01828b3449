//! # Sync Dependencies / 同步依赖
//!
//! Dependency grouping for [`SyncCoordinator`](crate::SyncCoordinator)
//! construction.
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use fq_core::ports::RemoteSubmitPort;
use fq_core::{ImageUploadQueue, MutationQueue, PendingAction, PendingImageUpload};

use crate::usecases::DrainOptions;

/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
pub struct SyncDeps {
    // Queues / 队列
    pub action_queue: Arc<MutationQueue>,
    pub image_queue: Arc<ImageUploadQueue>,

    // Remote API / 远端接口
    pub action_remote: Arc<dyn RemoteSubmitPort<PendingAction>>,
    pub image_remote: Arc<dyn RemoteSubmitPort<PendingImageUpload>>,

    // Drain policy / 排空策略
    pub options: DrainOptions,
}
