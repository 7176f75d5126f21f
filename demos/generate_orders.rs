//! 主訂單產生工單示例

use anyhow::Context;
use chrono::NaiveTime;
use mes_core::{
    ChangeoverNorm, ChangeoverNormTable, MasterOrder, MasterOrderProduct, MemoryStore, MessageCatalog,
    Parameters, Product, ProductionLine, SequenceNumberGenerator, Shift, ShiftCalendar, Technology,
};
use mes_orders::OrdersGenerator;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    mes::logging::init();

    println!("=== 主訂單產生工單示例 ===\n");

    let parameters = Parameters::from_json(r#"{"ppsIsAutomatic": true, "fillOrderDescriptionBasedOnTechnologyDescription": true}"#)
        .context("讀取參數失敗")?;

    // 基礎資料
    let mut store = MemoryStore::new();
    let line = store.insert_production_line(ProductionLine::new("L1".to_string(), "組裝線".to_string()));
    let line_id = line.id.context("生產線未指派ID")?;

    let bike = store.insert_product(Product::new("BIKE-001".to_string(), "自行車".to_string()).with_unit("pcs".to_string()));
    let bike_id = bike.id.context("產品未指派ID")?;
    let frame = store.insert_technology(
        Technology::new("T-BIKE".to_string(), "整車組裝".to_string(), bike_id)
            .as_master()
            .with_description("依標準作業書組裝".to_string())
            .with_production_line(line_id),
    );
    let paint = store.insert_technology(
        Technology::new("T-PAINT".to_string(), "烤漆".to_string(), bike_id).with_production_line(line_id),
    );

    let master_order = store.insert_master_order(
        MasterOrder::new("MO-2025-001".to_string()).with_description("春季批次".to_string()),
    );
    let master_order_id = master_order.id.context("主訂單未指派ID")?;

    let items = vec![
        store.insert_master_order_product(
            MasterOrderProduct::new(master_order_id, bike_id, Decimal::from(100))
                .with_cumulated_quantity(Decimal::from(40)),
        ),
        store.insert_master_order_product(
            MasterOrderProduct::new(master_order_id, bike_id, Decimal::from(20))
                .with_technology(paint.id.context("技術未指派ID")?),
        ),
    ];

    // 外部協作者
    let numbers = SequenceNumberGenerator::new();
    let changeovers = ChangeoverNormTable::new().with_norm(
        ChangeoverNorm::new(
            "CH-001".to_string(),
            frame.id.context("技術未指派ID")?,
            paint.id.context("技術未指派ID")?,
        )
        .with_duration(1800),
    );
    let day_shift = Shift::new(
        "早班".to_string(),
        NaiveTime::from_hms_opt(6, 0, 0).context("班別時間無效")?,
        NaiveTime::from_hms_opt(14, 0, 0).context("班別時間無效")?,
    );
    let shifts = ShiftCalendar::new("DEFAULT".to_string()).with_shift(day_shift);

    let generator = OrdersGenerator::new(&parameters, &numbers, &changeovers, &shifts);
    let result = generator.generate_orders(&mut store, &items, true);

    println!("工單:");
    for number in &result.generated_order_numbers {
        if let Some(order) = store.find_order_by_number(number) {
            println!(
                "  - {} | {} | 數量 {} | 開始 {:?}",
                order.number, order.name, order.planned_quantity, order.start_date
            );
        }
    }

    let catalog = MessageCatalog::new()
        .with_message("masterOrders.masterOrder.generationOrder.generatedOrderNumbers", "已產生工單: {0}")
        .with_message("masterOrders.masterOrder.generationOrder.ordersWithoutPps", "以下工單未建立 PPS: {0}");

    println!("\n訊息:");
    for message in result.messages(&catalog) {
        println!("  [{:?}] {}", message.severity, message.text);
    }

    Ok(())
}
