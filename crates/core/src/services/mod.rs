pub mod analytics_service;
pub mod category_service;
pub mod deletion_resolver;
pub mod notifier;
pub mod series_encoder;
pub mod series_generator;
pub mod series_identifier;
pub mod transaction_service;
