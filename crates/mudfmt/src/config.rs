//! 格式化設定
//!
//! 以 JSON 儲存：
//! - `lines`: `%l1`..`%l4` 使用的分隔線
//! - `poses`: say / pose / semipose / emit 的在地化範本

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::formatter::FormatError;
use crate::locale::{default_templates, TemplateLocalizer};
use crate::subs::LineSource;

/// 設定檔錯誤
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO 錯誤: {0}")]
    Io(#[from] io::Error),

    #[error("設定檔格式錯誤: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `%l1`..`%l4` 的設定行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(default = "default_line1")]
    pub line1: String,
    #[serde(default = "default_line2")]
    pub line2: String,
    #[serde(default = "default_line3")]
    pub line3: String,
    #[serde(default = "default_line4")]
    pub line4: String,
}

fn default_line1() -> String {
    format!("%xh{}%xn", "-".repeat(78))
}

fn default_line2() -> String {
    format!("%xh{}%xn", "=".repeat(78))
}

fn default_line3() -> String {
    format!("%x!{}%xn", "-".repeat(78))
}

fn default_line4() -> String {
    format!("%x!{}%xn", "~".repeat(78))
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            line1: default_line1(),
            line2: default_line2(),
            line3: default_line3(),
            line4: default_line4(),
        }
    }
}

impl LineConfig {
    /// 依編號取得設定行，編號不在 1..4 時回傳 None
    pub fn get(&self, id: &str) -> Option<&str> {
        let line = match id {
            "1" => &self.line1,
            "2" => &self.line2,
            "3" => &self.line3,
            "4" => &self.line4,
            _ => return None,
        };
        Some(line.as_str())
    }
}

impl LineSource for LineConfig {
    fn line(&self, id: &str) -> Result<String, FormatError> {
        self.get(id)
            .map(str::to_string)
            .ok_or_else(|| FormatError::MissingLine(id.to_string()))
    }
}

/// 格式化設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// 分隔線
    #[serde(default)]
    pub lines: LineConfig,
    /// 動作範本（鍵值為 `object.say` 等）
    #[serde(default = "default_templates")]
    pub poses: HashMap<String, String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            lines: LineConfig::default(),
            poses: default_templates(),
        }
    }
}

impl FormatterConfig {
    /// 從 JSON 字串解析
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// 從檔案載入
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("載入格式化設定: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 儲存到檔案
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // 確保目錄存在
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("已儲存格式化設定: {}", path.display());
        Ok(())
    }

    /// 以設定的範本建立在地化函式
    ///
    /// 設定檔只覆寫部分範本時，其餘沿用預設值
    pub fn localizer(&self) -> TemplateLocalizer {
        let mut templates = default_templates();
        templates.extend(self.poses.clone());
        TemplateLocalizer::new(templates)
    }
}
