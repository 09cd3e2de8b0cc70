//! MUD 輸出格式化函式庫
//!
//! 將伺服器端撰寫的標記文字轉為客戶端可直接顯示的字串：
//! - `scanner`: 顏色碼與反斜線跳脫掃描
//! - `ansi`: 顏色碼轉換為 ANSI 控制序列
//! - `subs`: `%r`、`%t`、`%l1` 等巨集替換
//! - `color`: 依時間區段選擇顏色
//! - `pose`: say / pose / semipose / emit 解析
//! - `locale`: 範本式在地化
//! - `formatter`: 客戶端輸出（重置碼與結尾換行）
//! - `config`: JSON 設定檔

pub mod ansi;
pub mod color;
pub mod config;
pub mod formatter;
pub mod locale;
pub mod pose;
pub mod scanner;
pub mod subs;

pub use ansi::{strip_ansi, to_ansi, RESET};
pub use color::{random_color, Clock, FixedClock, SystemClock};
pub use config::{ConfigError, FormatterConfig, LineConfig};
pub use formatter::{FormatError, Formatter};
pub use locale::TemplateLocalizer;
pub use pose::{classify_pose, parse_pose, MessageLocalizer, PoseKind};
pub use scanner::{unescape, MarkupScanner, Segment};
pub use subs::{perform_subs, LineSource};
