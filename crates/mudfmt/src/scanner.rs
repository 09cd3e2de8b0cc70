//! 標記掃描模組
//!
//! 由左至右切分文字，辨識 `%x?` / `%c?` 顏色碼以及反斜線跳脫

use crate::ansi::code_sequence;

/// 掃描後的文字片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 一般文字
    Text(&'a str),
    /// 跳脫配對：反斜線加上 `%` 或另一個反斜線
    Escaped(&'a str),
    /// 顏色碼 `%` + 選擇字元 (x/X/c/C) + 已知的代碼字元
    Code {
        selector: char,
        code: char,
        raw: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// 片段的原始文字
    pub fn raw(&self) -> &'a str {
        match *self {
            Segment::Text(s) | Segment::Escaped(s) => s,
            Segment::Code { raw, .. } => raw,
        }
    }
}

/// 顏色碼掃描器
///
/// # Example
/// ```
/// use mudfmt::scanner::{MarkupScanner, Segment};
///
/// let segments: Vec<_> = MarkupScanner::new("A%xrB").collect();
/// assert_eq!(segments[0], Segment::Text("A"));
/// assert!(matches!(segments[1], Segment::Code { code: 'r', .. }));
/// ```
#[derive(Debug, Clone)]
pub struct MarkupScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> MarkupScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn take(&mut self, len: usize) -> &'a str {
        let s = &self.input[self.pos..self.pos + len];
        self.pos += len;
        s
    }
}

fn is_selector(c: char) -> bool {
    matches!(c, 'x' | 'X' | 'c' | 'C')
}

impl<'a> Iterator for MarkupScanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        let rest = &input[self.pos..];
        let mut chars = rest.chars();

        let first = chars.next()?;
        match first {
            '\\' => match chars.next() {
                Some('\\') | Some('%') => Some(Segment::Escaped(self.take(2))),
                _ => Some(Segment::Text(self.take(1))),
            },
            '%' => match (chars.next(), chars.next()) {
                (Some(selector), Some(code))
                    if is_selector(selector) && code_sequence(code).is_some() =>
                {
                    let len = 2 + code.len_utf8();
                    Some(Segment::Code {
                        selector,
                        code,
                        raw: self.take(len),
                    })
                }
                // 不完整或未知的碼只吃掉 '%'，後面的字元重新掃描
                _ => Some(Segment::Text(self.take(1))),
            },
            _ => {
                // 一般文字一路讀到下一個 '%' 或 '\\'
                let skip = first.len_utf8();
                let len = rest[skip..]
                    .find(['%', '\\'])
                    .map_or(rest.len(), |i| i + skip);
                Some(Segment::Text(self.take(len)))
            }
        }
    }
}

/// 移除跳脫配對中的反斜線（`\%` -> `%`，`\\` -> `\`）
pub fn unescape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for segment in MarkupScanner::new(input) {
        match segment {
            Segment::Escaped(pair) => result.push_str(&pair[1..]),
            other => result.push_str(other.raw()),
        }
    }
    result
}
