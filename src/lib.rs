//! # MES
//!
//! 製造執行系統：主訂單轉工單、PPS 建立與中繼資料登錄

pub mod logging;

pub use mes_core;
pub use mes_metadata;
pub use mes_orders;

pub use mes_core::{MesError, Result};
pub use mes_metadata::MetadataError;
pub use mes_orders::{GenerationOrderResult, OrdersGenerator};
