//! # MES Core
//!
//! 核心資料模型、外部協作者介面與記憶體實作

pub mod calendar;
pub mod changeover;
pub mod config;
pub mod master_order;
pub mod number;
pub mod order;
pub mod pps;
pub mod product;
pub mod store;
pub mod translation;

// Re-export 主要類型
pub use calendar::{Shift, ShiftCalendar, ShiftsProvider};
pub use changeover::{ChangeoverNorm, ChangeoverNormResolver, ChangeoverNormTable};
pub use config::{ParameterSource, Parameters};
pub use master_order::{MasterOrder, MasterOrderPosition, MasterOrderProduct, MasterOrderProductSource};
pub use number::{NumberGenerator, SequenceNumberGenerator};
pub use order::{Order, OrderState, OrderType};
pub use pps::{PlannedProgressType, ProductionPerShift};
pub use product::{
    Product, ProductionCountingSettings, ProductionLine, Technology, TypeOfProductionRecording,
};
pub use store::{DataStore, MemoryStore, Saved};
pub use translation::{MessageCatalog, TranslationService};

/// 資料庫主鍵（由儲存層指派，單調遞增）
pub type EntityId = u64;

/// MES 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MesError {
    #[error("找不到紀錄: {model} id={id}")]
    NotFound { model: &'static str, id: EntityId },

    #[error("紀錄驗證失敗: {model} ({})", .errors.join("; "))]
    InvalidEntity {
        model: &'static str,
        errors: Vec<String>,
    },

    #[error("缺少必要欄位: {0}")]
    MissingField(&'static str),

    #[error("無效的參數設定: {0}")]
    InvalidConfig(String),

    #[error("日期超出可表示範圍: {model} {number}")]
    DateOutOfRange { model: &'static str, number: String },
}

pub type Result<T> = std::result::Result<T, MesError>;
