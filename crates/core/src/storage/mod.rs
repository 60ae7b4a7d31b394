pub mod format;
pub mod gateway;
pub mod manager;
pub mod memory;
pub mod traits;
