//! 換線標準模型

use serde::{Deserialize, Serialize};

use crate::EntityId;

/// 換線標準：兩個技術之間在某生產線上的換線時間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeoverNorm {
    pub id: Option<EntityId>,

    /// 換線標準編號
    pub number: String,

    /// 來源技術
    pub from_technology_id: EntityId,

    /// 目標技術
    pub to_technology_id: EntityId,

    /// 生產線（為空表示適用所有生產線）
    pub production_line_id: Option<EntityId>,

    /// 換線時間（秒）
    pub duration: Option<i32>,
}

impl ChangeoverNorm {
    /// 創建新的換線標準
    pub fn new(number: String, from_technology_id: EntityId, to_technology_id: EntityId) -> Self {
        Self {
            id: None,
            number,
            from_technology_id,
            to_technology_id,
            production_line_id: None,
            duration: None,
        }
    }

    /// 建構器模式：限定生產線
    pub fn for_production_line(mut self, production_line_id: EntityId) -> Self {
        self.production_line_id = Some(production_line_id);
        self
    }

    /// 建構器模式：設置換線時間（秒）
    pub fn with_duration(mut self, seconds: i32) -> Self {
        self.duration = Some(seconds);
        self
    }

    fn connects(&self, from: EntityId, to: EntityId) -> bool {
        self.from_technology_id == from && self.to_technology_id == to
    }
}

/// 換線標準查詢
pub trait ChangeoverNormResolver {
    /// 找出符合 (來源技術, 目標技術, 生產線) 的換線標準
    fn matching_changeover_norm(
        &self,
        from_technology: Option<EntityId>,
        to_technology: Option<EntityId>,
        production_line: Option<EntityId>,
    ) -> Option<ChangeoverNorm>;
}

/// 記憶體換線標準表
///
/// 優先選擇指定生產線的標準，其次為不限生產線的標準。
#[derive(Debug, Clone, Default)]
pub struct ChangeoverNormTable {
    norms: Vec<ChangeoverNorm>,
}

impl ChangeoverNormTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加換線標準
    pub fn with_norm(mut self, norm: ChangeoverNorm) -> Self {
        self.add(norm);
        self
    }

    /// 添加換線標準
    pub fn add(&mut self, norm: ChangeoverNorm) {
        self.norms.push(norm);
    }
}

impl ChangeoverNormResolver for ChangeoverNormTable {
    fn matching_changeover_norm(
        &self,
        from_technology: Option<EntityId>,
        to_technology: Option<EntityId>,
        production_line: Option<EntityId>,
    ) -> Option<ChangeoverNorm> {
        let (from, to) = (from_technology?, to_technology?);

        let line_specific = production_line.and_then(|line| {
            self.norms
                .iter()
                .find(|norm| norm.connects(from, to) && norm.production_line_id == Some(line))
        });

        line_specific
            .or_else(|| {
                self.norms
                    .iter()
                    .find(|norm| norm.connects(from, to) && norm.production_line_id.is_none())
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ChangeoverNormTable {
        ChangeoverNormTable::new()
            .with_norm(ChangeoverNorm::new("GENERIC".to_string(), 1, 2).with_duration(600))
            .with_norm(
                ChangeoverNorm::new("LINE-9".to_string(), 1, 2)
                    .for_production_line(9)
                    .with_duration(120),
            )
    }

    #[test]
    fn test_line_specific_norm_wins() {
        let norm = table().matching_changeover_norm(Some(1), Some(2), Some(9)).unwrap();
        assert_eq!(norm.number, "LINE-9");
        assert_eq!(norm.duration, Some(120));
    }

    #[test]
    fn test_falls_back_to_generic_norm() {
        let norm = table().matching_changeover_norm(Some(1), Some(2), Some(5)).unwrap();
        assert_eq!(norm.number, "GENERIC");

        let norm = table().matching_changeover_norm(Some(1), Some(2), None).unwrap();
        assert_eq!(norm.number, "GENERIC");
    }

    #[test]
    fn test_direction_matters() {
        assert!(table().matching_changeover_norm(Some(2), Some(1), Some(9)).is_none());
    }

    #[test]
    fn test_missing_technology_has_no_norm() {
        assert!(table().matching_changeover_norm(None, Some(2), Some(9)).is_none());
        assert!(table().matching_changeover_norm(Some(1), None, Some(9)).is_none());
    }
}
