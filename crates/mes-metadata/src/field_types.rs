//! 欄位類型

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::MetadataError;

/// 欄位值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
    Date(DateTime<Utc>),
}

/// 欄位類型：描述欄位在表格中的能力與可接受的值
pub trait FieldType: fmt::Debug + Send + Sync {
    /// 類型名稱
    fn name(&self) -> &'static str;

    fn is_searchable(&self) -> bool;

    fn is_orderable(&self) -> bool;

    fn is_aggregable(&self) -> bool;

    /// 值是否符合此類型（空值一律接受）
    fn is_valid_type(&self, value: &FieldValue) -> bool;
}

#[derive(Debug)]
struct StringFieldType;

impl FieldType for StringFieldType {
    fn name(&self) -> &'static str {
        "string"
    }

    fn is_searchable(&self) -> bool {
        true
    }

    fn is_orderable(&self) -> bool {
        true
    }

    fn is_aggregable(&self) -> bool {
        false
    }

    fn is_valid_type(&self, value: &FieldValue) -> bool {
        matches!(value, FieldValue::Null | FieldValue::Text(_))
    }
}

/// 32 位元整數
#[derive(Debug)]
struct IntFieldType;

impl FieldType for IntFieldType {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn is_searchable(&self) -> bool {
        true
    }

    fn is_orderable(&self) -> bool {
        true
    }

    fn is_aggregable(&self) -> bool {
        true
    }

    fn is_valid_type(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Integer(v) => i32::try_from(*v).is_ok(),
            _ => false,
        }
    }
}

#[derive(Debug)]
struct DecimalFieldType;

impl FieldType for DecimalFieldType {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn is_searchable(&self) -> bool {
        true
    }

    fn is_orderable(&self) -> bool {
        true
    }

    fn is_aggregable(&self) -> bool {
        true
    }

    fn is_valid_type(&self, value: &FieldValue) -> bool {
        matches!(
            value,
            FieldValue::Null | FieldValue::Decimal(_) | FieldValue::Integer(_)
        )
    }
}

#[derive(Debug)]
struct BooleanFieldType;

impl FieldType for BooleanFieldType {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn is_searchable(&self) -> bool {
        true
    }

    fn is_orderable(&self) -> bool {
        true
    }

    fn is_aggregable(&self) -> bool {
        false
    }

    fn is_valid_type(&self, value: &FieldValue) -> bool {
        matches!(value, FieldValue::Null | FieldValue::Boolean(_))
    }
}

#[derive(Debug)]
struct DateFieldType;

impl FieldType for DateFieldType {
    fn name(&self) -> &'static str {
        "date"
    }

    fn is_searchable(&self) -> bool {
        true
    }

    fn is_orderable(&self) -> bool {
        true
    }

    fn is_aggregable(&self) -> bool {
        false
    }

    fn is_valid_type(&self, value: &FieldValue) -> bool {
        matches!(value, FieldValue::Null | FieldValue::Date(_))
    }
}

/// 內建欄位類型
pub struct FieldTypes;

impl FieldTypes {
    pub fn string_type() -> Arc<dyn FieldType> {
        Arc::new(StringFieldType)
    }

    pub fn integer_type() -> Arc<dyn FieldType> {
        Arc::new(IntFieldType)
    }

    pub fn decimal_type() -> Arc<dyn FieldType> {
        Arc::new(DecimalFieldType)
    }

    pub fn boolean_type() -> Arc<dyn FieldType> {
        Arc::new(BooleanFieldType)
    }

    pub fn date_type() -> Arc<dyn FieldType> {
        Arc::new(DateFieldType)
    }

    /// 依名稱取得欄位類型
    pub fn by_name(name: &str) -> crate::Result<Arc<dyn FieldType>> {
        match name {
            "string" => Ok(Self::string_type()),
            "integer" => Ok(Self::integer_type()),
            "decimal" => Ok(Self::decimal_type()),
            "boolean" => Ok(Self::boolean_type()),
            "date" => Ok(Self::date_type()),
            other => Err(MetadataError::UnknownFieldType(other.to_string())),
        }
    }
}
