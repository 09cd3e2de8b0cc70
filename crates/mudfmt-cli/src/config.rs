//! 設定檔路徑與載入
//!
//! 預設位置為 `<config_dir>/mudfmt/config.json`

use std::path::{Path, PathBuf};

use mudfmt::{ConfigError, FormatterConfig};
use tracing::{debug, info};

/// 取得設定目錄
pub fn config_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("mudfmt")
    } else {
        PathBuf::from(".")
    }
}

/// 預設設定檔路徑
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// 載入設定，檔案不存在時使用預設值
///
/// 檔案存在但格式錯誤時回傳錯誤，不會默默改用預設值
pub fn load_or_default(path: &Path) -> Result<FormatterConfig, ConfigError> {
    if !path.exists() {
        debug!("設定檔不存在，使用預設值: {}", path.display());
        return Ok(FormatterConfig::default());
    }
    FormatterConfig::load(path)
}

/// 寫入預設設定檔
pub fn write_default(path: &Path) -> Result<(), ConfigError> {
    FormatterConfig::default().save(path)?;
    info!("已建立設定檔: {}", path.display());
    Ok(())
}
