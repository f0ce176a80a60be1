pub mod ingredient;
pub mod ingredient_supplier;
pub mod order;
pub mod order_item;
pub mod procurement;
pub mod procurement_ingredient;
pub mod restaurant;
pub mod supplier;
pub mod unit;

pub use ingredient::Tags;
pub use order::OrderStatus;
pub use procurement::ProcurementStatus;
pub use unit::UnitType;
