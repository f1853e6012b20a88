pub mod order_gateway;
pub use order_gateway::{OrderDataGateway, PgOrderGateway};
