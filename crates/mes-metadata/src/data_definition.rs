//! 實體結構描述

use std::sync::Arc;

use crate::field_types::{FieldType, FieldTypes};
use crate::{MetadataError, Result};

/// 欄位定義
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: Arc<dyn FieldType>,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: Arc<dyn FieldType>) -> Self {
        Self {
            name: name.to_string(),
            field_type,
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, FieldTypes::string_type())
    }
}

/// 表格欄
#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl ColumnDefinition {
    /// 單一欄位的表格欄
    pub fn for_field(name: &str, field: &FieldDefinition) -> Self {
        Self {
            name: name.to_string(),
            fields: vec![field.clone()],
        }
    }
}

/// 表格定義
#[derive(Debug, Clone)]
pub struct GridDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

/// 實體結構描述
#[derive(Debug, Clone)]
pub struct DataDefinition {
    /// 實體名稱（`plugin.Model`）
    pub entity_name: String,

    /// 對應的型別名稱
    pub fully_qualified_class_name: Option<String>,

    pub fields: Vec<FieldDefinition>,

    pub grids: Vec<GridDefinition>,
}

impl DataDefinition {
    pub fn new(entity_name: &str) -> Self {
        Self {
            entity_name: entity_name.to_string(),
            fully_qualified_class_name: None,
            fields: Vec::new(),
            grids: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn grid(&self, name: &str) -> Option<&GridDefinition> {
        self.grids.iter().find(|g| g.name == name)
    }
}

/// 實體結構描述服務
pub trait DataDefinitionService {
    fn get(&self, entity_name: &str) -> Result<DataDefinition>;

    fn save(&self, data_definition: DataDefinition) -> Result<()>;

    fn delete(&self, entity_name: &str) -> Result<()>;

    fn list(&self) -> Result<Vec<DataDefinition>>;
}

/// 固定結構描述服務
///
/// `get` 一律回傳產品結構；其餘操作尚未支援。
#[derive(Debug, Default)]
pub struct StaticDataDefinitionService;

const PRODUCT_FIELDS: [&str; 6] = ["number", "type", "typeOfMaterial", "ean", "category", "unit"];

impl StaticDataDefinitionService {
    pub fn new() -> Self {
        Self
    }

    fn product_definition() -> DataDefinition {
        let fields: Vec<FieldDefinition> = PRODUCT_FIELDS
            .iter()
            .map(|name| FieldDefinition::string(name))
            .collect();
        let columns = fields
            .iter()
            .map(|field| ColumnDefinition::for_field(&field.name, field))
            .collect();

        DataDefinition {
            entity_name: "products.Product".to_string(),
            fully_qualified_class_name: Some("mes_core::Product".to_string()),
            fields,
            grids: vec![GridDefinition {
                name: "Products".to_string(),
                columns,
            }],
        }
    }
}

impl DataDefinitionService for StaticDataDefinitionService {
    fn get(&self, entity_name: &str) -> Result<DataDefinition> {
        tracing::debug!("取得結構描述 {}（固定回傳產品結構）", entity_name);
        Ok(Self::product_definition())
    }

    fn save(&self, data_definition: DataDefinition) -> Result<()> {
        tracing::warn!("不支援儲存結構描述 {}", data_definition.entity_name);
        Err(MetadataError::Unsupported("save"))
    }

    fn delete(&self, entity_name: &str) -> Result<()> {
        tracing::warn!("不支援刪除結構描述 {}", entity_name);
        Err(MetadataError::Unsupported("delete"))
    }

    fn list(&self) -> Result<Vec<DataDefinition>> {
        Err(MetadataError::Unsupported("list"))
    }
}
