//! 動作 (pose) 解析模組
//!
//! 依第一個字元判斷 say / pose / semipose / emit，交由在地化函式產生輸出

use std::fmt;

use crate::formatter::FormatError;

/// 動作類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseKind {
    /// `"Hello.` -> Bob says, "Hello."
    Say,
    /// `:waves.` -> Bob waves.
    Pose,
    /// `;'s cat.` -> Bob's cat.
    Semipose,
    /// `\Whee` 或無前綴 -> 原文輸出
    Emit,
}

impl PoseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoseKind::Say => "say",
            PoseKind::Pose => "pose",
            PoseKind::Semipose => "semipose",
            PoseKind::Emit => "emit",
        }
    }

    /// 在地化字串的鍵值，例如 `object.say`
    pub fn locale_key(&self) -> String {
        format!("object.{}", self.as_str())
    }
}

impl fmt::Display for PoseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 在地化訊息產生器
pub trait MessageLocalizer {
    fn render(&self, kind: PoseKind, actor: &str, body: &str) -> Result<String, FormatError>;
}

/// 判斷動作類型並取出內文
pub fn classify_pose(text: &str) -> (PoseKind, &str) {
    let kind = match text.chars().next() {
        Some('"') => PoseKind::Say,
        Some(':') => PoseKind::Pose,
        Some(';') => PoseKind::Semipose,
        Some('\\') => PoseKind::Emit,
        _ => return (PoseKind::Emit, text),
    };
    // 前綴都是單一位元組
    (kind, &text[1..])
}

/// 解析動作字串並交給在地化函式輸出
///
/// 這裡不處理顏色碼，需要的話由呼叫端再經過 `format_client_output`
pub fn parse_pose(
    localizer: &dyn MessageLocalizer,
    actor: &str,
    text: &str,
) -> Result<String, FormatError> {
    let (kind, body) = classify_pose(text);
    localizer.render(kind, actor, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// 記錄呼叫參數的在地化函式
    #[derive(Default)]
    struct RecordingLocalizer {
        calls: RefCell<Vec<(PoseKind, String, String)>>,
    }

    impl MessageLocalizer for RecordingLocalizer {
        fn render(&self, kind: PoseKind, actor: &str, body: &str) -> Result<String, FormatError> {
            self.calls
                .borrow_mut()
                .push((kind, actor.to_string(), body.to_string()));
            Ok(format!("<{}>", kind))
        }
    }

    fn parse(text: &str) -> (String, (PoseKind, String, String)) {
        let localizer = RecordingLocalizer::default();
        let output = parse_pose(&localizer, "Bob", text).unwrap();
        let call = localizer.calls.borrow()[0].clone();
        (output, call)
    }

    #[test]
    fn test_say() {
        let (output, call) = parse("\"Hello.");
        assert_eq!(output, "<say>");
        assert_eq!(call, (PoseKind::Say, "Bob".to_string(), "Hello.".to_string()));
    }

    #[test]
    fn test_pose() {
        let (_, call) = parse(":waves.");
        assert_eq!(call, (PoseKind::Pose, "Bob".to_string(), "waves.".to_string()));
    }

    #[test]
    fn test_semipose() {
        let (_, call) = parse(";'s cat.");
        assert_eq!(call, (PoseKind::Semipose, "Bob".to_string(), "'s cat.".to_string()));
    }

    #[test]
    fn test_backslash_emit() {
        let (_, call) = parse("\\Whee");
        assert_eq!(call, (PoseKind::Emit, "Bob".to_string(), "Whee".to_string()));
    }

    #[test]
    fn test_unadorned_emit() {
        let (_, call) = parse("Whee");
        assert_eq!(call, (PoseKind::Emit, "Bob".to_string(), "Whee".to_string()));
    }

    #[test]
    fn test_empty_is_emit() {
        assert_eq!(classify_pose(""), (PoseKind::Emit, ""));
    }

    #[test]
    fn test_multibyte_unadorned() {
        assert_eq!(classify_pose("揮手"), (PoseKind::Emit, "揮手"));
    }

    #[test]
    fn test_markup_not_expanded() {
        let (_, call) = parse(":%xrwaves%xn");
        assert_eq!(call.2, "%xrwaves%xn");
    }

    #[test]
    fn test_localizer_error_propagates() {
        struct Failing;
        impl MessageLocalizer for Failing {
            fn render(&self, kind: PoseKind, _: &str, _: &str) -> Result<String, FormatError> {
                Err(FormatError::MissingTranslation(kind.locale_key()))
            }
        }

        let err = parse_pose(&Failing, "Bob", ":waves").unwrap_err();
        assert!(matches!(err, FormatError::MissingTranslation(ref key) if key == "object.pose"));
    }
}
