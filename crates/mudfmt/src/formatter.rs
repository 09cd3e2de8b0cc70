//! 客戶端輸出格式化
//!
//! 串接巨集替換、顏色碼轉換，最後補上重置碼與結尾換行

use thiserror::Error;
use tracing::trace;

use crate::ansi::{to_ansi, RESET};
use crate::color::{self, Clock, SystemClock};
use crate::pose::{self, MessageLocalizer};
use crate::scanner::unescape;
use crate::subs::{self, LineSource};

/// 格式化錯誤（來自外部協作者）
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("未設定的設定行: {0}")]
    MissingLine(String),

    #[error("找不到在地化範本: {0}")]
    MissingTranslation(String),
}

/// 格式化器
///
/// 持有設定行來源與時鐘，本身沒有可變狀態
#[derive(Debug, Clone)]
pub struct Formatter<L, C = SystemClock> {
    lines: L,
    clock: C,
}

impl<L: LineSource> Formatter<L> {
    /// 使用系統時鐘建立
    pub fn new(lines: L) -> Self {
        Self::with_clock(lines, SystemClock)
    }
}

impl<L: LineSource, C: Clock> Formatter<L, C> {
    /// 指定時鐘建立
    pub fn with_clock(lines: L, clock: C) -> Self {
        Self { lines, clock }
    }

    /// 展開巨集（不轉換顏色碼）
    pub fn perform_subs(&self, msg: &str) -> Result<String, FormatError> {
        subs::perform_subs(msg, &self.lines, &self.clock)
    }

    /// 依目前時間選擇顏色代碼
    pub fn random_color(&self) -> char {
        color::random_color(&self.clock)
    }

    /// 轉換顏色碼
    pub fn to_ansi(&self, msg: &str) -> String {
        to_ansi(msg)
    }

    /// 解析動作字串
    pub fn parse_pose(
        &self,
        localizer: &dyn MessageLocalizer,
        actor: &str,
        text: &str,
    ) -> Result<String, FormatError> {
        pose::parse_pose(localizer, actor, text)
    }

    /// 產生送往客戶端的最終字串
    ///
    /// 輸出一定是 `<內文><重置碼>\n`，原本結尾已有換行則不會重複
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    /// use mudfmt::Formatter;
    ///
    /// let formatter = Formatter::new(HashMap::<String, String>::new());
    /// let output = formatter.format_client_output("msg\n").unwrap();
    /// assert_eq!(output, "msg\x1b[0m\n");
    /// ```
    pub fn format_client_output(&self, msg: &str) -> Result<String, FormatError> {
        let expanded = self.perform_subs(msg)?;
        let translated = to_ansi(&expanded);
        let body = unescape(&translated);

        let mut output = strip_trailing_linebreak(&body).to_string();
        output.push_str(RESET);
        output.push('\n');

        trace!("格式化輸出 {} -> {} bytes", msg.len(), output.len());
        Ok(output)
    }
}

/// 移除一個結尾換行（`\r\n` 或 `\n`）
fn strip_trailing_linebreak(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::FixedClock;
    use crate::locale::TemplateLocalizer;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    const CYAN: &str = "\x1b[36m";
    const BLUE: &str = "\x1b[34m";

    fn formatter() -> Formatter<HashMap<String, String>, FixedClock> {
        let mut lines = HashMap::new();
        for id in ["1", "2", "3", "4"] {
            lines.insert(id.to_string(), String::new());
        }
        let clock = FixedClock(Utc.with_ymd_and_hms(2007, 11, 1, 15, 25, 20).unwrap());
        Formatter::with_clock(lines, clock)
    }

    fn format(msg: &str) -> String {
        formatter().format_client_output(msg).unwrap()
    }

    #[test]
    fn test_adds_reset_and_linebreak() {
        assert_eq!(format("msg"), format!("msg{}\n", RESET));
    }

    #[test]
    fn test_no_duplicate_linebreak() {
        assert_eq!(format("msg\n"), format!("msg{}\n", RESET));
        assert_eq!(format("msg\r\n"), format!("msg{}\n", RESET));
    }

    #[test]
    fn test_only_one_linebreak_stripped() {
        assert_eq!(format("msg\n\n"), format!("msg\n{}\n", RESET));
    }

    #[test]
    fn test_linebreak_macro_at_end() {
        assert_eq!(format("msg%r"), format!("msg{}\n", RESET));
    }

    #[test]
    fn test_expands_ansi() {
        assert_eq!(
            format("my %xcansi%xn message\n"),
            format!("my {}ansi{} message{}\n", CYAN, RESET, RESET)
        );
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(format("A\\%c"), format!("A%c{}\n", RESET));
        assert_eq!(format("A\\%xcB"), format!("A%xcB{}\n", RESET));
    }

    #[test]
    fn test_random_color_is_translated() {
        assert_eq!(formatter().perform_subs("A%x!B").unwrap(), "A%xbB");
        assert_eq!(format("A%x!B"), format!("A{}B{}\n", BLUE, RESET));
    }

    #[test]
    fn test_random_color_delegates_to_clock() {
        assert_eq!(formatter().random_color(), 'b');
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(format(""), format!("{}\n", RESET));
    }

    #[test]
    fn test_config_line_colors() {
        let mut lines = HashMap::new();
        lines.insert("1".to_string(), "%xc---%xn".to_string());
        let formatter = Formatter::new(lines);
        assert_eq!(
            formatter.format_client_output("%l1").unwrap(),
            format!("{}---{}{}\n", CYAN, RESET, RESET)
        );
    }

    #[test]
    fn test_missing_line_propagates() {
        let formatter = Formatter::new(HashMap::<String, String>::new());
        assert!(matches!(
            formatter.format_client_output("%l3"),
            Err(FormatError::MissingLine(_))
        ));
    }

    #[test]
    fn test_ends_with_single_reset_linebreak() {
        for msg in ["a", "a\n", "%xra%r", "a\\%", "多位元組"] {
            let output = format(msg);
            let suffix = format!("{}\n", RESET);
            assert!(output.ends_with(&suffix), "msg: {:?}", msg);
            assert!(!output[..output.len() - suffix.len()].ends_with('\n'), "msg: {:?}", msg);
        }
    }

    #[test]
    fn test_pose_then_format() {
        let formatter = formatter();
        let localizer = TemplateLocalizer::default();
        let pose = formatter.parse_pose(&localizer, "Bob", ":waves %xchello%xn").unwrap();
        assert_eq!(pose, "Bob waves %xchello%xn");
        assert_eq!(
            formatter.format_client_output(&pose).unwrap(),
            format!("Bob waves {}hello{}{}\n", CYAN, RESET, RESET)
        );
    }
}
