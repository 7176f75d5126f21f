//! 訊息翻譯

use std::collections::HashMap;

/// 翻譯服務：訊息鍵 → 在地化字串
pub trait TranslationService {
    /// 翻譯訊息；參數依序替換 `{0}`, `{1}`, ...
    fn translate(&self, key: &str, args: &[&str]) -> String;
}

/// 記憶體訊息目錄
///
/// 找不到訊息鍵時回傳鍵本身。
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加訊息
    pub fn with_message(mut self, key: &str, template: &str) -> Self {
        self.messages.insert(key.to_string(), template.to_string());
        self
    }
}

impl TranslationService for MessageCatalog {
    fn translate(&self, key: &str, args: &[&str]) -> String {
        let Some(template) = self.messages.get(key) else {
            return key.to_string();
        };

        substitute(template, args)
    }
}

/// 單次掃描範本替換 `{i}`；已替換的參數內容不再被解析
fn substitute(template: &str, args: &[&str]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let arg = after.find('}').and_then(|close| {
            after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(|arg| (arg, close))
        });

        match arg {
            Some((arg, close)) => {
                text.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                text.push('{');
                rest = after;
            }
        }
    }

    text.push_str(rest);
    text
}
