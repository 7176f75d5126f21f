//! 工單批次產生

use mes_core::{
    ChangeoverNormResolver, DataStore, MasterOrderProduct, MasterOrderProductSource, MesError,
    NumberGenerator, ParameterSource, ShiftsProvider,
};
use uuid::Uuid;

use crate::builder::{planned_quantity, OrderBuilder};
use crate::seeder::PpsSeeder;
use crate::{GenerationOrderResult, MasterOrderProductErrorContainer};

/// 相關紀錄（主訂單、產品、技術）不存在
pub const RELATED_RECORD_NOT_FOUND: &str = "masterOrders.masterOrder.generationOrder.relatedRecordNotFound";

/// 工單無法建立或儲存
pub const ORDER_NOT_CREATED: &str = "masterOrders.masterOrder.generationOrder.orderNotCreated";

/// 由主訂單產品批次產生工單
///
/// 每個主訂單產品恰好產生一筆成功或一筆錯誤；單筆失敗不會中斷批次。
pub struct OrdersGenerator<'a> {
    parameters: &'a dyn ParameterSource,
    builder: OrderBuilder<'a>,
    seeder: PpsSeeder<'a>,
}

impl<'a> OrdersGenerator<'a> {
    pub fn new(
        parameters: &'a dyn ParameterSource,
        numbers: &'a dyn NumberGenerator,
        changeovers: &'a dyn ChangeoverNormResolver,
        shifts: &'a dyn ShiftsProvider,
    ) -> Self {
        Self {
            parameters,
            builder: OrderBuilder::new(parameters, numbers),
            seeder: PpsSeeder::new(changeovers, shifts),
        }
    }

    /// 產生工單
    ///
    /// `generate_pps` 與全域參數 `pps_is_automatic` 同時成立時才建立 PPS。
    pub fn generate_orders<S, P>(&self, store: &mut S, items: &[P], generate_pps: bool) -> GenerationOrderResult
    where
        S: DataStore,
        P: MasterOrderProductSource,
    {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("generate_orders", %run_id);
        let _guard = span.enter();

        let automatic_pps = self.parameters.parameters().pps_is_automatic;
        let seed_pps = generate_pps && automatic_pps;
        tracing::info!(
            "開始產生工單：主訂單產品 {} 筆，PPS {}",
            items.len(),
            if seed_pps { "啟用" } else { "停用" }
        );

        let mut result = GenerationOrderResult::new();
        for item in items {
            let master_order_product = item
                .master_model_entity(&*store)
                .unwrap_or_else(|| item.as_master_order_product());
            self.generate_order(store, &master_order_product, seed_pps, &mut result);
        }

        tracing::info!(
            "工單產生完成：成功 {} 筆，失敗 {} 筆，無 PPS {} 筆",
            result.generated_order_numbers.len(),
            result.product_errors.len(),
            result.orders_without_pps.len()
        );

        result
    }

    fn generate_order<S: DataStore>(
        &self,
        store: &mut S,
        master_order_product: &MasterOrderProduct,
        seed_pps: bool,
        result: &mut GenerationOrderResult,
    ) {
        let saved = self
            .builder
            .create_order(&*store, master_order_product)
            .and_then(|order| store.save_order(order));

        let order = match saved {
            Ok(saved) if saved.is_valid() => saved.entity,
            Ok(saved) => {
                let error = Self::error_container(
                    &*store,
                    master_order_product,
                    Some(saved.entity.planned_quantity),
                    saved.global_errors,
                );
                tracing::warn!(
                    "產品 {}（主訂單 {}）工單驗證失敗: {:?}",
                    error.product,
                    error.master_order,
                    error.error_messages
                );
                result.add_not_generated_product_error(error);
                return;
            }
            Err(e) => {
                let error = Self::error_container(
                    &*store,
                    master_order_product,
                    Some(planned_quantity(
                        master_order_product.master_order_quantity,
                        master_order_product.cumulated_order_quantity,
                    )),
                    vec![error_message_key(&e).to_string()],
                );
                tracing::warn!(
                    "產品 {}（主訂單 {}）無法建立工單: {}",
                    error.product,
                    error.master_order,
                    e
                );
                result.add_not_generated_product_error(error);
                return;
            }
        };

        tracing::info!("已產生工單 {}", order.number);
        result.add_generated_order_number(order.number.clone());

        if seed_pps {
            if let Err(e) = self.seeder.seed(store, &order) {
                tracing::warn!("工單 {} PPS 建立失敗: {}", order.number, e);
                result.add_order_without_pps(order.number);
            }
        }
    }

    /// 錯誤內容以編號呈現；相關紀錄不存在時退回ID
    fn error_container<S: DataStore>(
        store: &S,
        master_order_product: &MasterOrderProduct,
        quantity: Option<rust_decimal::Decimal>,
        error_messages: Vec<String>,
    ) -> MasterOrderProductErrorContainer {
        let product = store
            .product(master_order_product.product_id)
            .map(|p| p.number)
            .unwrap_or_else(|_| master_order_product.product_id.to_string());
        let master_order = store
            .master_order(master_order_product.master_order_id)
            .map(|m| m.number)
            .unwrap_or_else(|_| master_order_product.master_order_id.to_string());

        MasterOrderProductErrorContainer {
            product,
            master_order,
            quantity,
            error_messages,
        }
    }
}

/// 建立失敗的訊息鍵，與儲存層驗證錯誤同為可翻譯的鍵
fn error_message_key(error: &MesError) -> &'static str {
    match error {
        MesError::NotFound { .. } => RELATED_RECORD_NOT_FOUND,
        _ => ORDER_NOT_CREATED,
    }
}
