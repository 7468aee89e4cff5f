#[macro_use]
pub mod macros;

pub mod distance;
pub mod energy;
pub mod power;
pub mod rate;
