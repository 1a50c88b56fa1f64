pub mod chart;
pub(crate) mod macros;
pub mod pairs;
pub mod rates;
pub mod transactions;

pub mod util;
