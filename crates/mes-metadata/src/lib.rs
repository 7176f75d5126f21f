//! # MES Metadata
//!
//! 實體結構描述與畫面定義登錄

pub mod data_definition;
pub mod field_types;
pub mod view_definition;

// Re-export 主要類型
pub use data_definition::{
    ColumnDefinition, DataDefinition, DataDefinitionService, FieldDefinition, GridDefinition,
    StaticDataDefinitionService,
};
pub use field_types::{FieldType, FieldTypes, FieldValue};
pub use view_definition::{
    ComponentDefinition, JsonViewDefinitionParser, ViewDefinition, ViewDefinitionParser,
    ViewDefinitionRegistry,
};

/// 中繼資料錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("尚未支援的操作: {0}")]
    Unsupported(&'static str),

    #[error("畫面定義解析失敗 ({view}): {message}")]
    Parse { view: String, message: String },

    #[error("未知的欄位類型: {0}")]
    UnknownFieldType(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
