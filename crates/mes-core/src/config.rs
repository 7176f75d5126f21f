//! 全域參數模型

use serde::{Deserialize, Serialize};

use crate::{EntityId, MesError};

/// 系統全域參數（對應參數表的單一紀錄）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameters {
    /// 產生工單時是否自動建立每班生產計劃（PPS）
    pub pps_is_automatic: bool,

    /// 忽略缺料元件
    pub ignore_missing_components: bool,

    /// 工單描述是否附加技術描述
    pub fill_order_description_based_on_technology_description: bool,

    /// 預設生產線（技術未指定生產線時使用）
    pub default_production_line: Option<EntityId>,
}

impl Parameters {
    /// 創建預設參數
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置 PPS 自動產生
    pub fn with_pps_is_automatic(mut self, automatic: bool) -> Self {
        self.pps_is_automatic = automatic;
        self
    }

    /// 建構器模式：設置忽略缺料元件
    pub fn with_ignore_missing_components(mut self, ignore: bool) -> Self {
        self.ignore_missing_components = ignore;
        self
    }

    /// 建構器模式：設置描述是否帶入技術描述
    pub fn with_fill_description_from_technology(mut self, fill: bool) -> Self {
        self.fill_order_description_based_on_technology_description = fill;
        self
    }

    /// 建構器模式：設置預設生產線
    pub fn with_default_production_line(mut self, production_line_id: EntityId) -> Self {
        self.default_production_line = Some(production_line_id);
        self
    }

    /// 從 JSON 載入參數
    ///
    /// # 範例
    /// ```
    /// # use mes_core::Parameters;
    /// let params = Parameters::from_json(r#"{"ppsIsAutomatic": true}"#).unwrap();
    /// assert!(params.pps_is_automatic);
    /// assert!(!params.ignore_missing_components);
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| MesError::InvalidConfig(e.to_string()))
    }
}

/// 全域參數來源
pub trait ParameterSource {
    /// 讀取目前的參數紀錄
    fn parameters(&self) -> Parameters;
}

impl ParameterSource for Parameters {
    fn parameters(&self) -> Parameters {
        self.clone()
    }
}
