//! 範本式在地化
//!
//! 以 `%{name}`、`%{msg}` 插值範本產生 say / pose / semipose / emit 的輸出

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

use crate::formatter::FormatError;
use crate::pose::{MessageLocalizer, PoseKind};

/// 預設英文範本
pub fn default_templates() -> HashMap<String, String> {
    [
        (PoseKind::Say, "%{name} says, \"%{msg}\""),
        (PoseKind::Pose, "%{name} %{msg}"),
        (PoseKind::Semipose, "%{name}%{msg}"),
        (PoseKind::Emit, "%{msg}"),
    ]
    .into_iter()
    .map(|(kind, template)| (kind.locale_key(), template.to_string()))
    .collect()
}

/// 範本插值：`%{name}` 換成角色名稱，`%{msg}` 換成內文
///
/// 不認得的變數保持原樣
pub fn interpolate(template: &str, actor: &str, body: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"%\{(\w+)\}").unwrap());

    re.replace_all(template, |caps: &Captures| match &caps[1] {
        "name" => actor.to_string(),
        "msg" => body.to_string(),
        _ => caps[0].to_string(),
    })
    .into_owned()
}

/// 範本在地化函式
#[derive(Debug, Clone)]
pub struct TemplateLocalizer {
    templates: HashMap<String, String>,
}

impl TemplateLocalizer {
    /// 以自訂範本建立，鍵值為 `object.say` 等
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// 取得範本
    pub fn template(&self, kind: PoseKind) -> Option<&str> {
        self.templates.get(&kind.locale_key()).map(String::as_str)
    }
}

impl Default for TemplateLocalizer {
    fn default() -> Self {
        Self::new(default_templates())
    }
}

impl MessageLocalizer for TemplateLocalizer {
    fn render(&self, kind: PoseKind, actor: &str, body: &str) -> Result<String, FormatError> {
        let Some(template) = self.template(kind) else {
            let key = kind.locale_key();
            warn!("找不到在地化範本: {}", key);
            return Err(FormatError::MissingTranslation(key));
        };
        Ok(interpolate(template, actor, body))
    }
}
