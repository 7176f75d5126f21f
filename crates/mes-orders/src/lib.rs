//! # MES Orders
//!
//! 由主訂單產品產生生產工單，並選擇性建立每班生產計劃（PPS）

pub mod builder;
pub mod generator;
pub mod seeder;

// Re-export 主要類型
pub use builder::{planned_quantity, OrderBuilder};
pub use generator::{OrdersGenerator, ORDER_NOT_CREATED, RELATED_RECORD_NOT_FOUND};
pub use seeder::{PpsSeeder, SeedingStage};

use mes_core::TranslationService;
use rust_decimal::Decimal;
use serde::Serialize;

/// 工單所屬模組
pub const ORDERS_PLUGIN: &str = "orders";

/// 工單模型名稱
pub const ORDER_MODEL: &str = "order";

/// 工單產生結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOrderResult {
    /// 成功產生的工單編號
    pub generated_order_numbers: Vec<String>,

    /// 未能產生工單的產品
    pub product_errors: Vec<MasterOrderProductErrorContainer>,

    /// 工單已產生但 PPS 建立失敗
    pub orders_without_pps: Vec<String>,
}

impl GenerationOrderResult {
    /// 創建空的產生結果
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_generated_order_number(&mut self, number: String) {
        self.generated_order_numbers.push(number);
    }

    pub fn add_not_generated_product_error(&mut self, error: MasterOrderProductErrorContainer) {
        self.product_errors.push(error);
    }

    pub fn add_order_without_pps(&mut self, number: String) {
        self.orders_without_pps.push(number);
    }

    /// 已處理的主訂單產品數（成功 + 失敗）
    pub fn processed_count(&self) -> usize {
        self.generated_order_numbers.len() + self.product_errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.product_errors.is_empty() || !self.orders_without_pps.is_empty()
    }

    /// 產生給使用者的在地化訊息
    pub fn messages(&self, translations: &dyn TranslationService) -> Vec<GenerationMessage> {
        let mut messages = Vec::new();

        if self.generated_order_numbers.is_empty() && self.product_errors.is_empty() {
            messages.push(GenerationMessage::info(
                translations.translate("masterOrders.masterOrder.generationOrder.nothingToGenerate", &[]),
            ));
            return messages;
        }

        if !self.generated_order_numbers.is_empty() {
            let numbers = self.generated_order_numbers.join(", ");
            messages.push(GenerationMessage::info(translations.translate(
                "masterOrders.masterOrder.generationOrder.generatedOrderNumbers",
                &[&numbers],
            )));
        }

        for error in &self.product_errors {
            let quantity = error.quantity.map(|q| q.normalize().to_string()).unwrap_or_default();
            let details = error
                .error_messages
                .iter()
                .map(|key| translations.translate(key, &[]))
                .collect::<Vec<_>>()
                .join("; ");
            messages.push(GenerationMessage::error(translations.translate(
                "masterOrders.masterOrder.generationOrder.productError",
                &[&error.product, &error.master_order, &quantity, &details],
            )));
        }

        if !self.orders_without_pps.is_empty() {
            let numbers = self.orders_without_pps.join(", ");
            messages.push(GenerationMessage::warning(translations.translate(
                "masterOrders.masterOrder.generationOrder.ordersWithoutPps",
                &[&numbers],
            )));
        }

        messages
    }
}

/// 未產生工單的產品錯誤
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterOrderProductErrorContainer {
    /// 產品編號
    pub product: String,

    /// 主訂單編號
    pub master_order: String,

    /// 嘗試下單的數量
    pub quantity: Option<Decimal>,

    /// 錯誤訊息鍵
    pub error_messages: Vec<String>,
}

/// 結果訊息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationMessage {
    pub severity: MessageSeverity,
    pub text: String,
}

impl GenerationMessage {
    pub fn info(text: String) -> Self {
        Self {
            severity: MessageSeverity::Info,
            text,
        }
    }

    pub fn warning(text: String) -> Self {
        Self {
            severity: MessageSeverity::Warning,
            text,
        }
    }

    pub fn error(text: String) -> Self {
        Self {
            severity: MessageSeverity::Error,
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageSeverity {
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mes_core::MessageCatalog;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new()
            .with_message("masterOrders.masterOrder.generationOrder.nothingToGenerate", "Nothing to generate")
            .with_message("masterOrders.masterOrder.generationOrder.generatedOrderNumbers", "Generated: {0}")
            .with_message(
                "masterOrders.masterOrder.generationOrder.productError",
                "{0} ({1}), qty {2}: {3}",
            )
            .with_message("masterOrders.masterOrder.generationOrder.ordersWithoutPps", "No PPS: {0}")
            .with_message("orders.order.plannedQuantity.error.mustBePositive", "quantity must be positive")
    }

    #[test]
    fn test_empty_result_message() {
        let result = GenerationOrderResult::new();
        let messages = result.messages(&catalog());

        assert_eq!(messages, vec![GenerationMessage::info("Nothing to generate".to_string())]);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_result_messages() {
        let mut result = GenerationOrderResult::new();
        result.add_generated_order_number("MO-1-001".to_string());
        result.add_generated_order_number("MO-1-002".to_string());
        result.add_not_generated_product_error(MasterOrderProductErrorContainer {
            product: "BIKE".to_string(),
            master_order: "MO-1".to_string(),
            quantity: Some(Decimal::new(-20, 1)),
            error_messages: vec!["orders.order.plannedQuantity.error.mustBePositive".to_string()],
        });
        result.add_order_without_pps("MO-1-002".to_string());

        let messages = result.messages(&catalog());

        assert_eq!(result.processed_count(), 3);
        assert!(result.has_errors());
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text, "Generated: MO-1-001, MO-1-002");
        assert_eq!(messages[1].severity, MessageSeverity::Error);
        assert_eq!(messages[1].text, "BIKE (MO-1), qty -2: quantity must be positive");
        assert_eq!(messages[2], GenerationMessage::warning("No PPS: MO-1-002".to_string()));
    }
}
