pub mod bundle;
pub mod constants;
pub mod engine;
pub mod reading;
pub mod settings;
pub mod texts;
