//! 生產工單模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::ProductionCountingSettings;
use crate::EntityId;

/// 工單狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// 待處理
    #[default]
    #[serde(rename = "01pending")]
    Pending,
    /// 已接受
    #[serde(rename = "02accepted")]
    Accepted,
    /// 進行中
    #[serde(rename = "03inProgress")]
    InProgress,
    /// 已完成
    #[serde(rename = "04completed")]
    Completed,
    /// 已拒絕
    #[serde(rename = "05declined")]
    Declined,
    /// 已中斷
    #[serde(rename = "06interrupted")]
    Interrupted,
    /// 已放棄
    #[serde(rename = "07abandoned")]
    Abandoned,
}

impl OrderState {
    /// 狀態字串值
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "01pending",
            Self::Accepted => "02accepted",
            Self::InProgress => "03inProgress",
            Self::Completed => "04completed",
            Self::Declined => "05declined",
            Self::Interrupted => "06interrupted",
            Self::Abandoned => "07abandoned",
        }
    }

    /// 檢查是否為待處理狀態
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

/// 工單類型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// 使用範本技術
    #[default]
    #[serde(rename = "01withPatternTechnology")]
    WithPatternTechnology,
    /// 使用自有技術
    #[serde(rename = "02withOwnTechnology")]
    WithOwnTechnology,
}

/// 生產工單
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// 工單ID（儲存後指派）
    pub id: Option<EntityId>,

    /// 工單編號
    pub number: String,

    /// 工單名稱
    pub name: String,

    pub company_id: Option<EntityId>,
    pub address_id: Option<EntityId>,

    /// 產品
    pub product_id: EntityId,

    /// 技術
    pub technology_id: Option<EntityId>,

    /// 生產線
    pub production_line_id: Option<EntityId>,

    /// 計劃區間
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,

    /// 交期
    pub deadline: Option<DateTime<Utc>>,

    /// 排程後的開始/結束時間
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,

    /// 是否已同步至外部系統
    pub external_synchronized: bool,

    /// 是否外包
    pub is_subcontracted: bool,

    /// 狀態
    pub state: OrderState,

    /// 來源主訂單
    pub master_order_id: Option<EntityId>,

    /// 工單類型
    pub order_type: OrderType,

    /// 計劃數量
    pub planned_quantity: Decimal,

    /// 描述
    pub description: String,

    pub ignore_missing_components: bool,

    /// 是否已產生每班生產計劃
    pub generate_pps: bool,

    /// 生產計數設定（由技術帶入）
    pub production_counting: Option<ProductionCountingSettings>,
}

impl Order {
    /// 創建新的工單（狀態為待處理）
    pub fn new(number: String, product_id: EntityId, planned_quantity: Decimal) -> Self {
        Self {
            id: None,
            number,
            name: String::new(),
            company_id: None,
            address_id: None,
            product_id,
            technology_id: None,
            production_line_id: None,
            date_from: None,
            date_to: None,
            deadline: None,
            start_date: None,
            finish_date: None,
            external_synchronized: true,
            is_subcontracted: false,
            state: OrderState::Pending,
            master_order_id: None,
            order_type: OrderType::WithPatternTechnology,
            planned_quantity,
            description: String::new(),
            ignore_missing_components: false,
            generate_pps: false,
            production_counting: None,
        }
    }

    /// 建構器模式：設置狀態
    pub fn with_state(mut self, state: OrderState) -> Self {
        self.state = state;
        self
    }

    /// 建構器模式：設置生產線
    pub fn with_production_line(mut self, production_line_id: EntityId) -> Self {
        self.production_line_id = Some(production_line_id);
        self
    }

    /// 建構器模式：設置技術
    pub fn with_technology(mut self, technology_id: EntityId) -> Self {
        self.technology_id = Some(technology_id);
        self
    }

    /// 建構器模式：設置排程區間
    pub fn with_schedule(mut self, start: DateTime<Utc>, finish: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.finish_date = Some(finish);
        self
    }
}
