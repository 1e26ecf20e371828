//! Persistence entities read by the document renderers.

pub mod address;
pub mod configuration;
pub mod currency;
pub mod supply_order;
pub mod supply_order_detail;
pub mod warehouse;

pub use address::Model as Address;
pub use currency::Model as Currency;
pub use supply_order::Model as SupplyOrder;
pub use supply_order_detail::Model as SupplyOrderDetail;
pub use warehouse::Model as Warehouse;
