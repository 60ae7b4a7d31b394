pub mod analytics;
pub mod category;
pub mod event;
pub mod form;
pub mod query;
pub mod series;
pub mod settings;
pub mod transaction;
