//! 工單建構：主訂單產品 → 生產工單

use mes_core::{
    DataStore, EntityId, MasterOrder, MasterOrderProduct, NumberGenerator, Order, OrderState,
    OrderType, ParameterSource, Parameters, Product, Technology,
};
use rust_decimal::Decimal;

use crate::{ORDERS_PLUGIN, ORDER_MODEL};

/// 工單編號序號位數
const ORDER_NUMBER_DIGITS: usize = 3;

/// 計劃數量 = 需求數量 - 累計數量（累計為空視為 0）
pub fn planned_quantity(master_order_quantity: Decimal, cumulated_order_quantity: Option<Decimal>) -> Decimal {
    master_order_quantity - cumulated_order_quantity.unwrap_or(Decimal::ZERO)
}

/// 工單建構器
pub struct OrderBuilder<'a> {
    parameters: &'a dyn ParameterSource,
    numbers: &'a dyn NumberGenerator,
}

impl<'a> OrderBuilder<'a> {
    pub fn new(parameters: &'a dyn ParameterSource, numbers: &'a dyn NumberGenerator) -> Self {
        Self { parameters, numbers }
    }

    /// 由主訂單產品建立尚未儲存的工單
    ///
    /// 相關紀錄（主訂單、產品、明確指定的技術）不存在時回傳錯誤；
    /// 工單本身的有效性由儲存層驗證決定。
    pub fn create_order<S: DataStore + ?Sized>(
        &self,
        store: &S,
        master_order_product: &MasterOrderProduct,
    ) -> mes_core::Result<Order> {
        let parameters = self.parameters.parameters();
        let master_order = store.master_order(master_order_product.master_order_id)?;
        let product = store.product(master_order_product.product_id)?;
        let technology = Self::technology_for(store, master_order_product)?;

        let mut order = Order::new(
            self.generate_order_number(&master_order),
            master_order_product.product_id,
            planned_quantity(
                master_order_product.master_order_quantity,
                master_order_product.cumulated_order_quantity,
            ),
        );

        order.name = order_name(&product, technology.as_ref());
        order.company_id = master_order.company_id;
        order.address_id = master_order.address_id;
        order.technology_id = technology.as_ref().and_then(|t| t.id);
        order.production_line_id = production_line_for(technology.as_ref(), &parameters);
        order.date_from = master_order.start_date;
        order.date_to = master_order.finish_date;
        order.deadline = master_order.deadline;
        order.external_synchronized = true;
        order.is_subcontracted = false;
        order.state = OrderState::Pending;
        order.master_order_id = master_order.id;
        order.order_type = OrderType::WithPatternTechnology;
        order.ignore_missing_components = parameters.ignore_missing_components;
        order.description = order_description(
            &master_order,
            technology.as_ref(),
            parameters.fill_order_description_based_on_technology_description,
        );
        order.production_counting = technology.as_ref().map(|t| t.production_counting.clone());

        tracing::debug!(
            "建立工單 {}：產品 {}，數量 {}，生產線 {:?}",
            order.number,
            product.number,
            order.planned_quantity,
            order.production_line_id
        );

        Ok(order)
    }

    /// 明確指定的技術，否則為產品預設技術
    fn technology_for<S: DataStore + ?Sized>(
        store: &S,
        master_order_product: &MasterOrderProduct,
    ) -> mes_core::Result<Option<Technology>> {
        match master_order_product.technology_id {
            Some(id) => store.technology(id).map(Some),
            None => Ok(store.default_technology(master_order_product.product_id)),
        }
    }

    fn generate_order_number(&self, master_order: &MasterOrder) -> String {
        self.numbers.generate_with_prefix(
            ORDERS_PLUGIN,
            ORDER_MODEL,
            ORDER_NUMBER_DIGITS,
            &format!("{}-", master_order.number),
        )
    }
}

/// 技術指定的生產線，否則為系統預設生產線
pub fn production_line_for(technology: Option<&Technology>, parameters: &Parameters) -> Option<EntityId> {
    technology
        .and_then(|t| t.production_line_id)
        .or(parameters.default_production_line)
}

/// 工單預設名稱：`產品編號 - 產品名稱 (技術編號)`
pub fn order_name(product: &Product, technology: Option<&Technology>) -> String {
    match technology {
        Some(technology) => format!("{} - {} ({})", product.number, product.name, technology.number),
        None => format!("{} - {}", product.number, product.name),
    }
}

/// 工單描述：主訂單描述，視參數換行附加技術描述
pub fn order_description(
    master_order: &MasterOrder,
    technology: Option<&Technology>,
    fill_from_technology: bool,
) -> String {
    let mut description = master_order
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if fill_from_technology {
        let technology_description = technology
            .and_then(|t| t.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty());

        if let Some(technology_description) = technology_description {
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(technology_description);
        }
    }

    description
}
