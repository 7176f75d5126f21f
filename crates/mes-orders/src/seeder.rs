//! 每班生產計劃（PPS）初始化與開始時間推算

use chrono::{DateTime, Duration, Utc};
use mes_core::{
    ChangeoverNormResolver, DataStore, MesError, Order, ProductionPerShift, ShiftsProvider,
};

/// 單一工單的 PPS 初始化階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingStage {
    /// 尚待推算開始時間
    NeedsStartDate,
    /// 開始時間已確定
    DateResolved,
    /// PPS 已建立並回寫工單
    Seeded,
}

/// PPS 初始化器
pub struct PpsSeeder<'a> {
    changeovers: &'a dyn ChangeoverNormResolver,
    shifts: &'a dyn ShiftsProvider,
}

impl<'a> PpsSeeder<'a> {
    pub fn new(changeovers: &'a dyn ChangeoverNormResolver, shifts: &'a dyn ShiftsProvider) -> Self {
        Self { changeovers, shifts }
    }

    /// 在獨立交易中為已儲存的工單建立 PPS，並回寫開始/結束時間
    ///
    /// 回寫驗證失敗時回傳 [`MesError::InvalidEntity`]，僅回滾本交易；
    /// 先前已提交的工單不受影響。
    pub fn seed<S: DataStore>(&self, store: &mut S, order: &Order) -> mes_core::Result<Order> {
        store.in_new_transaction(|tx| self.try_generate_pps(tx, order.clone()))
    }

    fn try_generate_pps<S: DataStore>(&self, store: &mut S, mut order: Order) -> mes_core::Result<Order> {
        let mut stage = SeedingStage::NeedsStartDate;
        tracing::debug!("工單 {} PPS 階段: {:?}", order.number, stage);

        let start_date = self.find_start_date(store, &order)?;
        stage = SeedingStage::DateResolved;
        tracing::debug!("工單 {} PPS 階段: {:?}，開始時間 {}", order.number, stage, start_date);

        self.generate_empty_pps(store, &order)?;

        order.generate_pps = true;
        order.start_date = Some(start_date);
        order.finish_date = Some(
            start_date
                .checked_add_signed(Duration::days(1))
                .ok_or_else(|| date_out_of_range(&order))?,
        );

        let stored = store.save_order(order)?.into_result("order")?;
        stage = SeedingStage::Seeded;
        tracing::debug!("工單 {} PPS 階段: {:?}", stored.number, stage);

        Ok(stored)
    }

    /// 推算工單開始時間
    ///
    /// 1. 工單已有開始時間則沿用
    /// 2. 否則取同一生產線上最近開始的工單，於其結束後最近的工作時刻加上換線時間
    /// 3. 找不到前一工單或工作時刻時為現在
    ///
    /// 加上換線時間後超出日期範圍時回傳 [`MesError::DateOutOfRange`]。
    pub fn find_start_date<S: DataStore + ?Sized>(
        &self,
        store: &S,
        order: &Order,
    ) -> mes_core::Result<DateTime<Utc>> {
        if let Some(start_date) = order.start_date {
            return Ok(start_date);
        }

        let previous = order
            .production_line_id
            .and_then(|line| store.find_previous_order(line, order.id));

        if let Some(previous) = previous {
            let changeover = Duration::milliseconds(self.changeover_duration_millis(&previous, order));
            let nearest = previous
                .finish_date
                .and_then(|finish| self.shifts.nearest_working_date(finish));

            if let Some(nearest) = nearest {
                tracing::debug!(
                    "工單 {} 接續 {}：最近工作時刻 {}，換線 {} ms",
                    order.number,
                    previous.number,
                    nearest,
                    changeover.num_milliseconds()
                );
                return nearest
                    .checked_add_signed(changeover)
                    .ok_or_else(|| date_out_of_range(order));
            }
        }

        Ok(Utc::now())
    }

    /// 前後工單之間的換線時間（毫秒）；無符合標準或標準未設定時間時為 0
    pub fn changeover_duration_millis(&self, previous: &Order, next: &Order) -> i64 {
        self.changeovers
            .matching_changeover_norm(
                previous.technology_id,
                next.technology_id,
                next.production_line_id,
            )
            .and_then(|norm| norm.duration)
            .map(|seconds| i64::from(seconds) * 1000)
            .unwrap_or(0)
    }

    /// 為工單建立空白 PPS；已存在時不重複建立並回傳 `None`
    pub fn generate_empty_pps<S: DataStore + ?Sized>(
        &self,
        store: &mut S,
        order: &Order,
    ) -> mes_core::Result<Option<ProductionPerShift>> {
        let order_id = order.id.ok_or(MesError::MissingField("order.id"))?;

        if store.find_production_per_shift(order_id).is_some() {
            tracing::debug!("工單 {} 已有 PPS，略過", order.number);
            return Ok(None);
        }

        let pps = store
            .save_production_per_shift(ProductionPerShift::new(order_id, order.state))?
            .into_result("productionPerShift")?;
        tracing::debug!(
            "工單 {}（{}）建立 PPS: {:?}",
            order.number,
            order.state.as_str(),
            pps.planned_progress_type
        );

        Ok(Some(pps))
    }
}

fn date_out_of_range(order: &Order) -> MesError {
    MesError::DateOutOfRange {
        model: "order",
        number: order.number.clone(),
    }
}
