use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the fieldqueue application data root directory.
///
/// 获取 fieldqueue 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/fieldqueue
/// - Windows: %LOCALAPPDATA%\fieldqueue
/// - Linux: $XDG_DATA_HOME/fieldqueue or ~/.local/share/fieldqueue
///
/// # Behavior / 行为
/// - This function does not automatically create directories.
/// - The caller decides when to create the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("fieldqueue"))
}

/// 根据平台获取基础数据目录
fn get_platform_data_dir() -> Result<PathBuf> {
    // 优先使用 XDG_DATA_HOME
    #[cfg(target_os = "linux")]
    if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg_data_home));
    }

    dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Unable to get local data directory"))
}
