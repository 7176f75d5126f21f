//! 主訂單模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::DataStore;
use crate::EntityId;

/// 主訂單（客戶訂單，涵蓋多個產品）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterOrder {
    /// 主訂單ID
    pub id: Option<EntityId>,

    /// 主訂單編號（工單編號前綴）
    pub number: String,

    /// 描述
    pub description: Option<String>,

    /// 客戶
    pub company_id: Option<EntityId>,

    /// 交貨地址
    pub address_id: Option<EntityId>,

    /// 交期
    pub deadline: Option<DateTime<Utc>>,

    /// 計劃開始
    pub start_date: Option<DateTime<Utc>>,

    /// 計劃結束
    pub finish_date: Option<DateTime<Utc>>,
}

impl MasterOrder {
    /// 創建新的主訂單
    pub fn new(number: String) -> Self {
        Self {
            id: None,
            number,
            description: None,
            company_id: None,
            address_id: None,
            deadline: None,
            start_date: None,
            finish_date: None,
        }
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// 建構器模式：設置客戶與地址
    pub fn with_company(mut self, company_id: EntityId, address_id: Option<EntityId>) -> Self {
        self.company_id = Some(company_id);
        self.address_id = address_id;
        self
    }

    /// 建構器模式：設置交期
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 建構器模式：設置計劃區間
    pub fn with_window(mut self, start: DateTime<Utc>, finish: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.finish_date = Some(finish);
        self
    }
}

/// 主訂單產品（主訂單中的一個產品明細）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterOrderProduct {
    pub id: Option<EntityId>,

    /// 所屬主訂單
    pub master_order_id: EntityId,

    /// 產品
    pub product_id: EntityId,

    /// 明確指定的技術（未指定時使用產品預設技術）
    pub technology_id: Option<EntityId>,

    /// 需求數量
    pub master_order_quantity: Decimal,

    /// 已下工單累計數量
    pub cumulated_order_quantity: Option<Decimal>,
}

impl MasterOrderProduct {
    /// 創建新的主訂單產品
    pub fn new(master_order_id: EntityId, product_id: EntityId, master_order_quantity: Decimal) -> Self {
        Self {
            id: None,
            master_order_id,
            product_id,
            technology_id: None,
            master_order_quantity,
            cumulated_order_quantity: None,
        }
    }

    /// 建構器模式：設置技術
    pub fn with_technology(mut self, technology_id: EntityId) -> Self {
        self.technology_id = Some(technology_id);
        self
    }

    /// 建構器模式：設置累計數量
    pub fn with_cumulated_quantity(mut self, quantity: Decimal) -> Self {
        self.cumulated_order_quantity = Some(quantity);
        self
    }
}

/// 主訂單產品彙總列（列表檢視用的衍生紀錄）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterOrderPosition {
    pub id: EntityId,
    pub master_order_product_id: EntityId,
    pub master_order_id: EntityId,
    pub master_order_number: String,
    pub product_id: EntityId,
    pub product_number: String,
    pub technology_id: Option<EntityId>,
    pub master_order_quantity: Decimal,
    pub cumulated_master_order_quantity: Option<Decimal>,
}

/// 可轉為主訂單產品的紀錄
///
/// 衍生檢視透過 [`master_model_entity`](Self::master_model_entity) 回傳其主紀錄；
/// 原始紀錄不具備此能力，直接使用 [`as_master_order_product`](Self::as_master_order_product)。
pub trait MasterOrderProductSource {
    /// 衍生紀錄所對應的主紀錄
    fn master_model_entity<S: DataStore + ?Sized>(&self, _store: &S) -> Option<MasterOrderProduct> {
        None
    }

    /// 紀錄本身的主訂單產品表示
    fn as_master_order_product(&self) -> MasterOrderProduct;
}

impl MasterOrderProductSource for MasterOrderProduct {
    fn as_master_order_product(&self) -> MasterOrderProduct {
        self.clone()
    }
}

impl MasterOrderProductSource for MasterOrderPosition {
    fn master_model_entity<S: DataStore + ?Sized>(&self, store: &S) -> Option<MasterOrderProduct> {
        store.master_order_product(self.master_order_product_id).ok()
    }

    fn as_master_order_product(&self) -> MasterOrderProduct {
        MasterOrderProduct {
            id: Some(self.master_order_product_id),
            master_order_id: self.master_order_id,
            product_id: self.product_id,
            technology_id: self.technology_id,
            master_order_quantity: self.master_order_quantity,
            cumulated_order_quantity: self.cumulated_master_order_quantity,
        }
    }
}
