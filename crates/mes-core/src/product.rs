//! 產品、生產線與技術模型

use serde::{Deserialize, Serialize};

use crate::EntityId;

/// 產品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: Option<EntityId>,

    /// 產品編號
    pub number: String,

    /// 產品名稱
    pub name: String,

    /// 計量單位
    pub unit: Option<String>,
}

impl Product {
    /// 創建新的產品
    pub fn new(number: String, name: String) -> Self {
        Self {
            id: None,
            number,
            name,
            unit: None,
        }
    }

    /// 建構器模式：設置計量單位
    pub fn with_unit(mut self, unit: String) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// 生產線
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: Option<EntityId>,
    pub number: String,
    pub name: String,
}

impl ProductionLine {
    pub fn new(number: String, name: String) -> Self {
        Self {
            id: None,
            number,
            name,
        }
    }
}

/// 生產記錄方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeOfProductionRecording {
    /// 基本
    #[serde(rename = "01basic")]
    Basic,
    /// 累計
    #[default]
    #[serde(rename = "02cumulated")]
    Cumulated,
    /// 逐工序
    #[serde(rename = "03forEach")]
    ForEach,
}

/// 生產計數預設值（由技術帶入工單）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionCountingSettings {
    pub register_quantity_in_product: bool,
    pub register_quantity_out_product: bool,
    pub register_production_time: bool,
    pub register_piecework: bool,
    pub just_one: bool,
    pub allow_to_close: bool,
    pub auto_close_order: bool,
    pub type_of_production_recording: TypeOfProductionRecording,
}

impl Default for ProductionCountingSettings {
    fn default() -> Self {
        Self {
            register_quantity_in_product: true,
            register_quantity_out_product: true,
            register_production_time: true,
            register_piecework: false,
            just_one: false,
            allow_to_close: false,
            auto_close_order: false,
            type_of_production_recording: TypeOfProductionRecording::Cumulated,
        }
    }
}

/// 技術（製程路線）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    /// 技術ID
    pub id: Option<EntityId>,

    /// 技術編號
    pub number: String,

    /// 技術名稱
    pub name: String,

    /// 所屬產品
    pub product_id: EntityId,

    /// 是否為產品的預設技術
    pub master: bool,

    /// 技術描述
    pub description: Option<String>,

    /// 指定生產線
    pub production_line_id: Option<EntityId>,

    /// 生產計數預設值
    pub production_counting: ProductionCountingSettings,
}

impl Technology {
    /// 創建新的技術
    pub fn new(number: String, name: String, product_id: EntityId) -> Self {
        Self {
            id: None,
            number,
            name,
            product_id,
            master: false,
            description: None,
            production_line_id: None,
            production_counting: ProductionCountingSettings::default(),
        }
    }

    /// 建構器模式：設為產品預設技術
    pub fn as_master(mut self) -> Self {
        self.master = true;
        self
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// 建構器模式：設置生產線
    pub fn with_production_line(mut self, production_line_id: EntityId) -> Self {
        self.production_line_id = Some(production_line_id);
        self
    }

    /// 建構器模式：設置生產計數預設值
    pub fn with_production_counting(mut self, settings: ProductionCountingSettings) -> Self {
        self.production_counting = settings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technology_builder() {
        let technology = Technology::new("T-BIKE".to_string(), "Bike assembly".to_string(), 1)
            .as_master()
            .with_description("Frame first".to_string())
            .with_production_line(4);

        assert!(technology.master);
        assert_eq!(technology.production_line_id, Some(4));
        assert_eq!(technology.description.as_deref(), Some("Frame first"));
        assert_eq!(
            technology.production_counting.type_of_production_recording,
            TypeOfProductionRecording::Cumulated
        );
    }

    #[test]
    fn test_recording_type_serialization() {
        let json = serde_json::to_string(&TypeOfProductionRecording::ForEach).unwrap();
        assert_eq!(json, "\"03forEach\"");
    }
}
