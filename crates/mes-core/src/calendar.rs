//! 班別日曆模型

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// 向後搜尋工作時段的最大天數
const SEARCH_HORIZON_DAYS: i64 = 366;

/// 班別提供者：給定參考時間，回傳最近的工作時刻
pub trait ShiftsProvider {
    /// 取得參考時間當下或之後最近的工作時刻
    fn nearest_working_date(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// 班別（每日工作時段）
///
/// 結束時間不晚於開始時間時視為跨夜班。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Shift {
    pub fn new(name: String, start: NaiveTime, end: NaiveTime) -> Self {
        Self { name, start, end }
    }

    /// 該班別在指定日期開始時的工作區間
    fn interval_on(&self, date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = date.and_time(self.start).and_utc();
        let end_date = if self.end > self.start {
            date
        } else {
            date.succ_opt()?
        };
        let end = end_date.and_time(self.end).and_utc();
        Some((start, end))
    }
}

/// 班別日曆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCalendar {
    /// 工作日（週一到週日，true表示工作日）
    /// 索引 0 = 週一, 1 = 週二, ..., 6 = 週日
    pub working_days: [bool; 7],

    /// 節假日列表
    pub holidays: Vec<NaiveDate>,

    /// 班別
    pub shifts: Vec<Shift>,

    /// 日曆ID
    pub calendar_id: String,
}

impl ShiftCalendar {
    /// 創建新的班別日曆（預設週一到週五，無班別）
    pub fn new(calendar_id: String) -> Self {
        Self {
            working_days: [true, true, true, true, true, false, false],
            holidays: Vec::new(),
            shifts: Vec::new(),
            calendar_id,
        }
    }

    /// 創建 24/7 日曆（全天候單一班別）
    pub fn new_24_7(calendar_id: String) -> Self {
        Self {
            working_days: [true; 7],
            holidays: Vec::new(),
            shifts: vec![Shift::new("24h".to_string(), NaiveTime::MIN, NaiveTime::MIN)],
            calendar_id,
        }
    }

    /// 建構器模式：設置工作日
    pub fn with_working_days(mut self, working_days: [bool; 7]) -> Self {
        self.working_days = working_days;
        self
    }

    /// 建構器模式：添加班別
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// 建構器模式：添加節假日
    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self
    }

    /// 添加節假日
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if !self.holidays.contains(&date) {
            self.holidays.push(date);
            self.holidays.sort();
        }
    }

    /// 檢查是否為工作日
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.holidays.contains(&date) {
            return false;
        }

        let weekday_index = date.weekday().num_days_from_monday() as usize;
        self.working_days[weekday_index]
    }
}

impl ShiftsProvider for ShiftCalendar {
    fn nearest_working_date(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.shifts.is_empty() {
            return None;
        }

        // 從前一天開始，涵蓋尚未結束的跨夜班
        let first_day = from.date_naive().checked_sub_signed(Duration::days(1))?;

        for offset in 0..=SEARCH_HORIZON_DAYS + 1 {
            // 超出可表示的日期範圍即停止搜尋
            let date = first_day.checked_add_signed(Duration::days(offset))?;
            if !self.is_working_day(date) {
                continue;
            }

            // 後一天的班別必定晚於當天任一班別開始，找到即為最近
            let nearest = self
                .shifts
                .iter()
                .filter_map(|shift| shift.interval_on(date))
                .filter(|(_, end)| from < *end)
                .map(|(start, _)| start.max(from))
                .min();

            if nearest.is_some() {
                return nearest;
            }
        }

        tracing::debug!(
            "日曆 {} 在 {} 之後 {} 天內沒有工作時段",
            self.calendar_id,
            from,
            SEARCH_HORIZON_DAYS
        );
        None
    }
}

impl Default for ShiftCalendar {
    fn default() -> Self {
        Self::new("DEFAULT".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn day_shift_calendar() -> ShiftCalendar {
        ShiftCalendar::new("TEST".to_string())
            .with_shift(Shift::new("I".to_string(), time(6), time(14)))
            .with_shift(Shift::new("II".to_string(), time(14), time(22)))
    }

    #[test]
    fn test_inside_shift_returns_same_instant() {
        let calendar = day_shift_calendar();

        // 2025-10-06 是週一
        let from = Utc.with_ymd_and_hms(2025, 10, 6, 10, 30, 0).unwrap();
        assert_eq!(calendar.nearest_working_date(from), Some(from));
    }

    #[test]
    fn test_after_last_shift_moves_to_next_day() {
        let calendar = day_shift_calendar();

        let from = Utc.with_ymd_and_hms(2025, 10, 6, 23, 0, 0).unwrap();
        assert_eq!(
            calendar.nearest_working_date(from),
            Some(Utc.with_ymd_and_hms(2025, 10, 7, 6, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_weekend_is_skipped() {
        let calendar = day_shift_calendar();

        // 週五晚上 → 下週一早班
        let from = Utc.with_ymd_and_hms(2025, 10, 10, 22, 0, 0).unwrap();
        assert_eq!(
            calendar.nearest_working_date(from),
            Some(Utc.with_ymd_and_hms(2025, 10, 13, 6, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_holiday_is_skipped() {
        let mut calendar = day_shift_calendar();
        calendar.add_holiday(NaiveDate::from_ymd_opt(2025, 10, 7).unwrap());

        let from = Utc.with_ymd_and_hms(2025, 10, 6, 23, 0, 0).unwrap();
        assert_eq!(
            calendar.nearest_working_date(from),
            Some(Utc.with_ymd_and_hms(2025, 10, 8, 6, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_night_shift_from_previous_day() {
        let calendar = ShiftCalendar::new("NIGHT".to_string())
            .with_working_days([true; 7])
            .with_shift(Shift::new("III".to_string(), time(22), time(6)));

        // 週二 03:00 仍屬於週一開始的夜班
        let from = Utc.with_ymd_and_hms(2025, 10, 7, 3, 0, 0).unwrap();
        assert_eq!(calendar.nearest_working_date(from), Some(from));

        let from = Utc.with_ymd_and_hms(2025, 10, 7, 7, 0, 0).unwrap();
        assert_eq!(
            calendar.nearest_working_date(from),
            Some(Utc.with_ymd_and_hms(2025, 10, 7, 22, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_no_shifts_has_no_working_date() {
        let calendar = ShiftCalendar::default();
        let from = Utc.with_ymd_and_hms(2025, 10, 6, 10, 0, 0).unwrap();

        assert_eq!(calendar.nearest_working_date(from), None);
    }

    #[test]
    fn test_no_working_days_has_no_working_date() {
        let calendar = day_shift_calendar().with_working_days([false; 7]);
        let from = Utc.with_ymd_and_hms(2025, 10, 6, 10, 0, 0).unwrap();

        assert_eq!(calendar.nearest_working_date(from), None);
    }

    #[test]
    fn test_24_7_calendar() {
        let calendar = ShiftCalendar::new_24_7("24/7".to_string());

        let sunday = Utc.with_ymd_and_hms(2025, 10, 12, 3, 15, 0).unwrap();
        assert!(calendar.is_working_day(sunday.date_naive()));
        assert_eq!(calendar.nearest_working_date(sunday), Some(sunday));
    }

    #[test]
    fn test_search_stops_at_date_range_limits() {
        let calendar = ShiftCalendar::new_24_7("24/7".to_string());

        assert_eq!(calendar.nearest_working_date(DateTime::<Utc>::MAX_UTC), None);
        assert_eq!(calendar.nearest_working_date(DateTime::<Utc>::MIN_UTC), None);

        // 最後一個完整日仍可取得工作時刻
        let last_full_day = DateTime::<Utc>::MAX_UTC
            .date_naive()
            .pred_opt()
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(calendar.nearest_working_date(last_full_day), Some(last_full_day));
    }
}
