//! Pure time-series helpers used by the orchestrator.
//!
//! - `change`: period-over-period percent changes
//! - `fill`: pad sparse daily snapshots into a contiguous series
//! - `candles`: turn hourly price samples into open/close candles
//! - `window`: lookback timestamps derived from "now"
pub mod candles;
pub mod change;
pub mod fill;
pub mod window;
