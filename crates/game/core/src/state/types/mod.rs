pub mod common;
pub mod unit;

// Re-export identifier and side types
pub use common::{PlayerId, Side, UnitId, UnitTypeId};

// Re-export unit attribute types
pub use unit::{AaStats, Unit, UnitFlags, UnitStats};
