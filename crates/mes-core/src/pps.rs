//! 每班生產計劃（Production Per Shift）模型

use serde::{Deserialize, Serialize};

use crate::order::OrderState;
use crate::EntityId;

/// 計劃進度類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannedProgressType {
    /// 原始計劃
    #[serde(rename = "01planned")]
    Planned,
    /// 修正計劃
    #[serde(rename = "02corrected")]
    Corrected,
}

impl PlannedProgressType {
    /// 依工單狀態決定：待處理為原始計劃，其餘為修正計劃
    pub fn for_order_state(state: OrderState) -> Self {
        if state.is_pending() {
            Self::Planned
        } else {
            Self::Corrected
        }
    }
}

/// 每班生產計劃
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionPerShift {
    pub id: Option<EntityId>,

    /// 所屬工單
    pub order_id: EntityId,

    /// 計劃進度類型
    pub planned_progress_type: PlannedProgressType,
}

impl ProductionPerShift {
    /// 為工單創建空白的每班生產計劃
    pub fn new(order_id: EntityId, order_state: OrderState) -> Self {
        Self {
            id: None,
            order_id,
            planned_progress_type: PlannedProgressType::for_order_state(order_state),
        }
    }
}
