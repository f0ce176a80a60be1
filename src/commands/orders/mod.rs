pub mod create_order_command;
pub mod delete_order_command;
pub mod update_order_status_command;

pub use create_order_command::{CreateLineItem, CreateOrderCommand};
pub use delete_order_command::DeleteOrderCommand;
pub use update_order_status_command::UpdateOrderStatusCommand;
