//! 巨集替換模組
//!
//! 展開 `%r`、`%t`、`%~`、`%l1`..`%l4` 與 `%x!`。
//! 這一層不處理反斜線跳脫，跳脫只對顏色碼有效。

use std::collections::HashMap;

use tracing::trace;

use crate::color::{random_color, Clock};
use crate::formatter::FormatError;

/// `%t` 展開的空白數
const TAB_WIDTH: usize = 5;

/// `%~` 展開的標記字元
pub const TILDE_MARKER: char = '\u{2682}';

/// 設定行來源（`%l1`..`%l4`）
pub trait LineSource {
    /// 取得編號 `"1"`..`"4"` 的設定行
    fn line(&self, id: &str) -> Result<String, FormatError>;
}

impl LineSource for HashMap<String, String> {
    fn line(&self, id: &str) -> Result<String, FormatError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| FormatError::MissingLine(id.to_string()))
    }
}

/// 將 `%x!` 換成 `%x` 加上目前的顏色代碼
fn expand_random_color(text: &str, clock: &dyn Clock) -> String {
    if !text.contains("%x!") {
        return text.to_string();
    }
    text.replace("%x!", &format!("%x{}", random_color(clock)))
}

/// 單次由左至右展開所有巨集
///
/// `%x!` 只會換成 `%x` 加上顏色代碼，留給後續的顏色轉換處理。
/// 設定行插入後只會再展開其中的 `%x!`，其他巨集不會重新掃描
pub fn perform_subs(
    input: &str,
    lines: &dyn LineSource,
    clock: &dyn Clock,
) -> Result<String, FormatError> {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            result.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('r') | Some('R') => {
                chars.next();
                result.push('\n');
            }
            Some('t') | Some('T') => {
                chars.next();
                result.extend(std::iter::repeat(' ').take(TAB_WIDTH));
            }
            Some('~') => {
                chars.next();
                result.push(TILDE_MARKER);
            }
            Some('l') => {
                // 只接受 %l1..%l4，其餘保持原樣
                let mut lookahead = chars.clone();
                lookahead.next();
                match lookahead.next() {
                    Some(id @ '1'..='4') => {
                        chars = lookahead;
                        trace!("展開設定行 %l{}", id);
                        let line = lines.line(&id.to_string())?;
                        result.push_str(&expand_random_color(&line, clock));
                    }
                    _ => result.push('%'),
                }
            }
            Some('x') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.next() == Some('!') {
                    chars = lookahead;
                    result.push_str("%x");
                    result.push(random_color(clock));
                } else {
                    result.push('%');
                }
            }
            _ => result.push('%'),
        }
    }

    Ok(result)
}
