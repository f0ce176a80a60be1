pub mod register_unit_command;

pub use register_unit_command::RegisterUnitCommand;
