//! ANSI 顏色碼轉換模組
//!
//! 將 `%xr`、`%cG` 之類的標記轉換為終端機控制序列

use std::collections::HashMap;

use crate::scanner::{MarkupScanner, Segment};

/// 重置所有樣式
pub const RESET: &str = "\x1b[0m";

lazy_static::lazy_static! {
    /// 代碼字元 -> 控制序列
    ///
    /// 小寫為前景色，大寫為背景色 (on-color)，`n` 為重置
    static ref ANSI_CODES: HashMap<char, &'static str> = {
        let table: [(char, &'static str); 26] = [
            ('n', RESET),
            ('N', RESET),
            ('h', "\x1b[1m"),
            ('u', "\x1b[4m"),
            ('f', "\x1b[5m"),
            ('i', "\x1b[7m"),
            // 前景色
            ('x', "\x1b[30m"),
            ('r', "\x1b[31m"),
            ('g', "\x1b[32m"),
            ('y', "\x1b[33m"),
            ('b', "\x1b[34m"),
            ('m', "\x1b[35m"),
            ('c', "\x1b[36m"),
            ('w', "\x1b[37m"),
            // 背景色
            ('X', "\x1b[40m"),
            ('R', "\x1b[41m"),
            ('G', "\x1b[42m"),
            ('Y', "\x1b[43m"),
            ('B', "\x1b[44m"),
            ('M', "\x1b[45m"),
            ('C', "\x1b[46m"),
            ('W', "\x1b[47m"),
            // 樣式大寫與小寫相同
            ('H', "\x1b[1m"),
            ('U', "\x1b[4m"),
            ('F', "\x1b[5m"),
            ('I', "\x1b[7m"),
        ];
        table.into_iter().collect()
    };
}

/// 查詢代碼字元對應的控制序列
pub(crate) fn code_sequence(code: char) -> Option<&'static str> {
    ANSI_CODES.get(&code).copied()
}

/// 將顏色標記轉換為 ANSI 控制序列
///
/// 前面有反斜線的標記不會被轉換，跳脫配對原樣保留，
/// 因此對自身輸出再執行一次結果不變。
///
/// # Example
/// ```
/// use mudfmt::ansi::to_ansi;
///
/// assert_eq!(to_ansi("A%xrB%XnC"), "A\x1b[31mB\x1b[0mC");
/// assert_eq!(to_ansi("A\\%xcB"), "A\\%xcB");
/// ```
pub fn to_ansi(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for segment in MarkupScanner::new(input) {
        match segment {
            Segment::Code { code, raw, .. } => {
                result.push_str(code_sequence(code).unwrap_or(raw));
            }
            other => result.push_str(other.raw()),
        }
    }

    result
}

/// 移除 ANSI 轉義碼，只保留純文字
///
/// 給不支援顏色的客戶端使用
pub fn strip_ansi(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            result.push(c);
            continue;
        }

        // 跳過 CSI 序列直至終止符 (0x40-0x7E)
        if chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&ch) {
                    break;
                }
            }
        }
    }

    result
}
