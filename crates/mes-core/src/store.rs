//! 實體儲存介面與記憶體實作

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::master_order::{MasterOrder, MasterOrderProduct};
use crate::order::Order;
use crate::pps::ProductionPerShift;
use crate::product::{Product, ProductionLine, Technology};
use crate::{EntityId, MesError, Result};

/// 儲存結果：驗證失敗時帶有全域錯誤訊息，紀錄不會寫入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub entity: T,
    pub global_errors: Vec<String>,
}

impl<T> Saved<T> {
    pub fn valid(entity: T) -> Self {
        Self {
            entity,
            global_errors: Vec::new(),
        }
    }

    pub fn invalid(entity: T, global_errors: Vec<String>) -> Self {
        Self {
            entity,
            global_errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.global_errors.is_empty()
    }

    /// 驗證失敗轉為 [`MesError::InvalidEntity`]
    pub fn into_result(self, model: &'static str) -> Result<T> {
        if self.is_valid() {
            Ok(self.entity)
        } else {
            Err(MesError::InvalidEntity {
                model,
                errors: self.global_errors,
            })
        }
    }
}

/// 實體儲存
///
/// 讀取不存在的紀錄回傳 [`MesError::NotFound`]；寫入時依儲存層驗證規則檢查，
/// 驗證失敗以 [`Saved`] 回傳而非錯誤。
pub trait DataStore {
    fn master_order(&self, id: EntityId) -> Result<MasterOrder>;

    fn master_order_product(&self, id: EntityId) -> Result<MasterOrderProduct>;

    fn product(&self, id: EntityId) -> Result<Product>;

    fn technology(&self, id: EntityId) -> Result<Technology>;

    /// 產品的預設技術
    fn default_technology(&self, product_id: EntityId) -> Option<Technology>;

    fn order(&self, id: EntityId) -> Result<Order>;

    /// 新增或更新工單（未指派ID者為新增）
    fn save_order(&mut self, order: Order) -> Result<Saved<Order>>;

    /// 同一生產線上開始時間最晚的其他工單（同時間取ID最大者）
    fn find_previous_order(&self, production_line_id: EntityId, excluding: Option<EntityId>) -> Option<Order>;

    fn find_production_per_shift(&self, order_id: EntityId) -> Option<ProductionPerShift>;

    fn save_production_per_shift(&mut self, pps: ProductionPerShift) -> Result<Saved<ProductionPerShift>>;

    /// 在獨立交易範圍內執行；閉包回傳錯誤時僅回滾該範圍內的變更
    fn in_new_transaction<R, F>(&mut self, f: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>;
}

/// 工單驗證規則：回傳錯誤訊息，通過則為 `None`
pub type OrderValidator = Box<dyn Fn(&Order) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, Default)]
struct Tables {
    last_id: EntityId,
    products: BTreeMap<EntityId, Product>,
    production_lines: BTreeMap<EntityId, ProductionLine>,
    technologies: BTreeMap<EntityId, Technology>,
    master_orders: BTreeMap<EntityId, MasterOrder>,
    master_order_products: BTreeMap<EntityId, MasterOrderProduct>,
    orders: BTreeMap<EntityId, Order>,
    production_per_shifts: BTreeMap<EntityId, ProductionPerShift>,
}

impl Tables {
    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        self.last_id
    }
}

/// 記憶體實體儲存
///
/// 交易以快照實作：[`DataStore::in_new_transaction`] 失敗時還原進入前的狀態。
#[derive(Default)]
pub struct MemoryStore {
    tables: Tables,
    order_validators: Vec<OrderValidator>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加工單驗證規則
    pub fn with_order_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Order) -> Option<String> + Send + Sync + 'static,
    {
        self.order_validators.push(Box::new(validator));
        self
    }

    pub fn insert_product(&mut self, mut product: Product) -> Product {
        let id = self.tables.next_id();
        product.id = Some(id);
        self.tables.products.insert(id, product.clone());
        product
    }

    pub fn insert_production_line(&mut self, mut line: ProductionLine) -> ProductionLine {
        let id = self.tables.next_id();
        line.id = Some(id);
        self.tables.production_lines.insert(id, line.clone());
        line
    }

    pub fn insert_technology(&mut self, mut technology: Technology) -> Technology {
        let id = self.tables.next_id();
        technology.id = Some(id);
        self.tables.technologies.insert(id, technology.clone());
        technology
    }

    pub fn insert_master_order(&mut self, mut master_order: MasterOrder) -> MasterOrder {
        let id = self.tables.next_id();
        master_order.id = Some(id);
        self.tables.master_orders.insert(id, master_order.clone());
        master_order
    }

    pub fn insert_master_order_product(&mut self, mut mop: MasterOrderProduct) -> MasterOrderProduct {
        let id = self.tables.next_id();
        mop.id = Some(id);
        self.tables.master_order_products.insert(id, mop.clone());
        mop
    }

    /// 所有工單（依ID排序）
    pub fn orders(&self) -> Vec<Order> {
        self.tables.orders.values().cloned().collect()
    }

    pub fn find_order_by_number(&self, number: &str) -> Option<Order> {
        self.tables.orders.values().find(|o| o.number == number).cloned()
    }

    /// 所有每班生產計劃（依ID排序）
    pub fn production_per_shifts(&self) -> Vec<ProductionPerShift> {
        self.tables.production_per_shifts.values().cloned().collect()
    }

    fn validate_order(&self, order: &Order) -> Vec<String> {
        let mut errors = Vec::new();

        if order.number.trim().is_empty() {
            errors.push("orders.order.number.error.required".to_string());
        } else if self
            .tables
            .orders
            .values()
            .any(|other| other.number == order.number && other.id != order.id)
        {
            errors.push("orders.order.number.error.duplicated".to_string());
        }

        if !self.tables.products.contains_key(&order.product_id) {
            errors.push("orders.order.product.error.notFound".to_string());
        }

        if let Some(line_id) = order.production_line_id {
            if !self.tables.production_lines.contains_key(&line_id) {
                errors.push("orders.order.productionLine.error.notFound".to_string());
            }
        }

        if order.planned_quantity <= Decimal::ZERO {
            errors.push("orders.order.plannedQuantity.error.mustBePositive".to_string());
        }

        if let (Some(start), Some(finish)) = (order.start_date, order.finish_date) {
            if finish < start {
                errors.push("orders.order.dates.error.finishBeforeStart".to_string());
            }
        }

        errors.extend(self.order_validators.iter().filter_map(|validate| validate(order)));
        errors
    }
}

fn find<T: Clone>(table: &BTreeMap<EntityId, T>, model: &'static str, id: EntityId) -> Result<T> {
    table
        .get(&id)
        .cloned()
        .ok_or(MesError::NotFound { model, id })
}

impl DataStore for MemoryStore {
    fn master_order(&self, id: EntityId) -> Result<MasterOrder> {
        find(&self.tables.master_orders, "masterOrder", id)
    }

    fn master_order_product(&self, id: EntityId) -> Result<MasterOrderProduct> {
        find(&self.tables.master_order_products, "masterOrderProduct", id)
    }

    fn product(&self, id: EntityId) -> Result<Product> {
        find(&self.tables.products, "product", id)
    }

    fn technology(&self, id: EntityId) -> Result<Technology> {
        find(&self.tables.technologies, "technology", id)
    }

    fn default_technology(&self, product_id: EntityId) -> Option<Technology> {
        self.tables
            .technologies
            .values()
            .find(|t| t.product_id == product_id && t.master)
            .cloned()
    }

    fn order(&self, id: EntityId) -> Result<Order> {
        find(&self.tables.orders, "order", id)
    }

    fn save_order(&mut self, mut order: Order) -> Result<Saved<Order>> {
        if let Some(id) = order.id {
            if !self.tables.orders.contains_key(&id) {
                return Err(MesError::NotFound { model: "order", id });
            }
        }

        let errors = self.validate_order(&order);
        if !errors.is_empty() {
            tracing::debug!("工單 {} 驗證失敗: {:?}", order.number, errors);
            return Ok(Saved::invalid(order, errors));
        }

        let id = match order.id {
            Some(id) => id,
            None => self.tables.next_id(),
        };
        order.id = Some(id);
        self.tables.orders.insert(id, order.clone());

        Ok(Saved::valid(order))
    }

    fn find_previous_order(&self, production_line_id: EntityId, excluding: Option<EntityId>) -> Option<Order> {
        self.tables
            .orders
            .iter()
            .filter(|(id, order)| {
                order.production_line_id == Some(production_line_id)
                    && order.start_date.is_some()
                    && Some(**id) != excluding
            })
            .max_by_key(|(id, order)| (order.start_date, **id))
            .map(|(_, order)| order.clone())
    }

    fn find_production_per_shift(&self, order_id: EntityId) -> Option<ProductionPerShift> {
        self.tables
            .production_per_shifts
            .values()
            .find(|pps| pps.order_id == order_id)
            .cloned()
    }

    fn save_production_per_shift(&mut self, mut pps: ProductionPerShift) -> Result<Saved<ProductionPerShift>> {
        if !self.tables.orders.contains_key(&pps.order_id) {
            return Ok(Saved::invalid(
                pps,
                vec!["productionPerShift.productionPerShift.order.error.notFound".to_string()],
            ));
        }

        let id = match pps.id {
            Some(id) => id,
            None => self.tables.next_id(),
        };
        pps.id = Some(id);
        self.tables.production_per_shifts.insert(id, pps.clone());

        Ok(Saved::valid(pps))
    }

    fn in_new_transaction<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        let snapshot = self.tables.clone();

        match f(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!("交易回滾: {}", e);
                self.tables = snapshot;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderState;
    use chrono::{Duration, TimeZone, Utc};

    fn store_with_product() -> (MemoryStore, EntityId) {
        let mut store = MemoryStore::new();
        let product = store.insert_product(Product::new("BIKE".to_string(), "Bike".to_string()));
        (store, product.id.unwrap())
    }

    #[test]
    fn test_save_assigns_id() {
        let (mut store, product_id) = store_with_product();

        let saved = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::from(5)))
            .unwrap();

        assert!(saved.is_valid());
        let id = saved.entity.id.unwrap();
        assert_eq!(store.order(id).unwrap().number, "O-1");
    }

    #[test]
    fn test_invalid_order_is_not_persisted() {
        let (mut store, product_id) = store_with_product();

        let saved = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ZERO))
            .unwrap();

        assert!(!saved.is_valid());
        assert_eq!(
            saved.global_errors,
            vec!["orders.order.plannedQuantity.error.mustBePositive".to_string()]
        );
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_duplicated_number() {
        let (mut store, product_id) = store_with_product();

        store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE))
            .unwrap();
        let saved = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE))
            .unwrap();

        assert!(!saved.is_valid());
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_custom_validator() {
        let (store, product_id) = store_with_product();
        let mut store = store.with_order_validator(|order| {
            (order.state != OrderState::Pending).then(|| "custom.error".to_string())
        });

        let saved = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE).with_state(OrderState::Accepted))
            .unwrap();

        assert_eq!(saved.global_errors, vec!["custom.error".to_string()]);
        assert!(matches!(
            saved.into_result("order"),
            Err(MesError::InvalidEntity { model: "order", .. })
        ));
    }

    #[test]
    fn test_previous_order_tie_break_on_id() {
        let (mut store, product_id) = store_with_product();
        let line = store
            .insert_production_line(ProductionLine::new("L1".to_string(), "Line 1".to_string()))
            .id
            .unwrap();
        let other_line = store
            .insert_production_line(ProductionLine::new("L2".to_string(), "Line 2".to_string()))
            .id
            .unwrap();
        let start = Utc.with_ymd_and_hms(2025, 10, 6, 6, 0, 0).unwrap();
        let finish = start + Duration::hours(8);

        let first = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE)
                .with_production_line(line)
                .with_schedule(start, finish))
            .unwrap()
            .entity;
        let second = store
            .save_order(Order::new("O-2".to_string(), product_id, Decimal::ONE)
                .with_production_line(line)
                .with_schedule(start, finish))
            .unwrap()
            .entity;
        // 其他生產線與未排程工單不列入
        store
            .save_order(Order::new("O-3".to_string(), product_id, Decimal::ONE)
                .with_production_line(other_line)
                .with_schedule(start + Duration::days(1), finish + Duration::days(1)))
            .unwrap();
        store
            .save_order(Order::new("O-4".to_string(), product_id, Decimal::ONE).with_production_line(line))
            .unwrap();

        let previous = store.find_previous_order(line, None).unwrap();
        assert_eq!(previous.id, second.id);

        let previous = store.find_previous_order(line, second.id).unwrap();
        assert_eq!(previous.id, first.id);

        assert!(store.find_previous_order(99, None).is_none());
    }

    #[test]
    fn test_transaction_rollback() {
        let (mut store, product_id) = store_with_product();
        let order = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE))
            .unwrap()
            .entity;
        let order_id = order.id.unwrap();

        let result: Result<()> = store.in_new_transaction(|tx| {
            tx.save_production_per_shift(ProductionPerShift::new(order_id, OrderState::Pending))?;
            Err(MesError::MissingField("boom"))
        });

        assert!(result.is_err());
        assert!(store.find_production_per_shift(order_id).is_none());
        assert!(store.order(order_id).is_ok());
    }

    #[test]
    fn test_transaction_commit() {
        let (mut store, product_id) = store_with_product();
        let order_id = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE))
            .unwrap()
            .entity
            .id
            .unwrap();

        store
            .in_new_transaction(|tx| {
                tx.save_production_per_shift(ProductionPerShift::new(order_id, OrderState::Pending))
            })
            .unwrap();

        assert!(store.find_production_per_shift(order_id).is_some());
    }

    #[test]
    fn test_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.product(42),
            Err(MesError::NotFound { model: "product", id: 42 })
        ));
    }

    #[test]
    fn test_unknown_production_line_is_rejected() {
        let (mut store, product_id) = store_with_product();

        let saved = store
            .save_order(Order::new("O-1".to_string(), product_id, Decimal::ONE).with_production_line(404))
            .unwrap();

        assert_eq!(
            saved.global_errors,
            vec!["orders.order.productionLine.error.notFound".to_string()]
        );
        assert!(store.orders().is_empty());
    }
}
