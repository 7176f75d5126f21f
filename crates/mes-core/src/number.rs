//! 單據編號產生器

use std::collections::HashMap;
use std::sync::Mutex;

/// 編號產生器：同一 (plugin, model) 命名空間內編號唯一
pub trait NumberGenerator {
    /// 產生帶前綴的編號，序號補零至指定位數
    fn generate_with_prefix(&self, plugin: &str, model: &str, digits: usize, prefix: &str) -> String;
}

/// 記憶體流水號產生器
///
/// 每個 (plugin, model, prefix) 各自維護一組遞增序號。
#[derive(Debug, Default)]
pub struct SequenceNumberGenerator {
    sequences: Mutex<HashMap<(String, String, String), u64>>,
}

impl SequenceNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumberGenerator for SequenceNumberGenerator {
    fn generate_with_prefix(&self, plugin: &str, model: &str, digits: usize, prefix: &str) -> String {
        let mut sequences = self
            .sequences
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let next = sequences
            .entry((plugin.to_string(), model.to_string(), prefix.to_string()))
            .or_insert(0);
        *next += 1;

        format!("{}{:0width$}", prefix, next, width = digits)
    }
}
