pub mod create_procurement_command;
pub mod delete_procurement_command;
pub mod update_procurement_status_command;

pub use create_procurement_command::CreateProcurementCommand;
pub use delete_procurement_command::DeleteProcurementCommand;
pub use update_procurement_status_command::UpdateProcurementStatusCommand;
