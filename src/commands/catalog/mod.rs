pub mod create_ingredient_command;
pub mod create_supplier_command;

pub use create_ingredient_command::{CreateIngredientCommand, IngredientOfferInput};
pub use create_supplier_command::CreateSupplierCommand;
