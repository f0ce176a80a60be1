#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_ingredient_tables::Migration),
            Box::new(m20240101_000003_create_order_tables::Migration),
            Box::new(m20240101_000004_create_procurement_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Restaurants::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Restaurants::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Restaurants::Name).string().not_null())
                        .col(ColumnDef::new(Restaurants::Info).text())
                        .col(
                            ColumnDef::new(Restaurants::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Restaurants::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Restaurants::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Restaurants::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Restaurants::DeletedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::Category).string().not_null())
                        .col(ColumnDef::new(Suppliers::Email).string())
                        .col(ColumnDef::new(Suppliers::Phone).string())
                        .col(ColumnDef::new(Suppliers::Address).string())
                        .col(ColumnDef::new(Suppliers::Notes).text())
                        .col(
                            ColumnDef::new(Suppliers::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::DeletedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Units::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Units::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Units::Name).string().not_null())
                        .col(ColumnDef::new(Units::Symbol).string().not_null())
                        .col(ColumnDef::new(Units::UnitType).string().not_null())
                        .col(ColumnDef::new(Units::BaseUnitId).uuid())
                        .col(ColumnDef::new(Units::Multiplier).double().not_null())
                        .col(
                            ColumnDef::new(Units::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Units::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Units::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Units::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Units::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Units::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_units_base_unit")
                                .from(Units::Table, Units::BaseUnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_units_unit_type")
                        .table(Units::Table)
                        .col(Units::UnitType)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Units::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Restaurants::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Restaurants {
        Table,
        Id,
        Name,
        Info,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Suppliers {
        Table,
        Id,
        Name,
        Category,
        Email,
        Phone,
        Address,
        Notes,
        Active,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Units {
        Table,
        Id,
        Name,
        Symbol,
        UnitType,
        BaseUnitId,
        Multiplier,
        Active,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }
}

mod m20240101_000002_create_ingredient_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::{Suppliers, Units};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_ingredient_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Ingredients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Ingredients::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Ingredients::Name).string().not_null())
                        .col(ColumnDef::new(Ingredients::Description).text())
                        .col(ColumnDef::new(Ingredients::Tags).json().not_null())
                        .col(ColumnDef::new(Ingredients::ParLevel).double().not_null())
                        .col(ColumnDef::new(Ingredients::Quantity).double().not_null())
                        .col(
                            ColumnDef::new(Ingredients::CanonicalUnitId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Ingredients::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Ingredients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Ingredients::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Ingredients::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Ingredients::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Ingredients::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ingredients_canonical_unit")
                                .from(Ingredients::Table, Ingredients::CanonicalUnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(IngredientSuppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IngredientSuppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::SupplierId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::UnitCost)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::Currency)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::PackSize)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::PackQuantity)
                                .double()
                                .not_null(),
                        )
                        .col(ColumnDef::new(IngredientSuppliers::PackUnitId).uuid())
                        .col(
                            ColumnDef::new(IngredientSuppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientSuppliers::DeletedAt)
                                .timestamp_with_time_zone(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ingredient_suppliers_ingredient")
                                .from(
                                    IngredientSuppliers::Table,
                                    IngredientSuppliers::IngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ingredient_suppliers_supplier")
                                .from(IngredientSuppliers::Table, IngredientSuppliers::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ingredient_suppliers_pack_unit")
                                .from(IngredientSuppliers::Table, IngredientSuppliers::PackUnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_ingredient_suppliers_ingredient_id")
                        .table(IngredientSuppliers::Table)
                        .col(IngredientSuppliers::IngredientId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_ingredient_suppliers_supplier_id")
                        .table(IngredientSuppliers::Table)
                        .col(IngredientSuppliers::SupplierId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IngredientSuppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Ingredients::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Ingredients {
        Table,
        Id,
        Name,
        Description,
        Tags,
        ParLevel,
        Quantity,
        CanonicalUnitId,
        Active,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum IngredientSuppliers {
        Table,
        Id,
        IngredientId,
        SupplierId,
        UnitCost,
        Currency,
        PackSize,
        PackQuantity,
        PackUnitId,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }
}

mod m20240101_000003_create_order_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::{Restaurants, Suppliers, Units};
    use super::m20240101_000002_create_ingredient_tables::Ingredients;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::RestaurantId).uuid().not_null())
                        .col(ColumnDef::new(Orders::SupplierId).uuid().not_null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_restaurant")
                                .from(Orders::Table, Orders::RestaurantId)
                                .to(Restaurants::Table, Restaurants::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_supplier")
                                .from(Orders::Table, Orders::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_supplier_id")
                        .table(Orders::Table)
                        .col(Orders::SupplierId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::IngredientId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::UnitId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::Quantity).double().not_null())
                        .col(ColumnDef::new(OrderItems::UnitCost).double().not_null())
                        .col(ColumnDef::new(OrderItems::Currency).string().not_null())
                        .col(
                            ColumnDef::new(OrderItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderItems::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderItems::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_ingredient")
                                .from(OrderItems::Table, OrderItems::IngredientId)
                                .to(Ingredients::Table, Ingredients::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_unit")
                                .from(OrderItems::Table, OrderItems::UnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Orders {
        Table,
        Id,
        RestaurantId,
        SupplierId,
        Status,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderItems {
        Table,
        Id,
        OrderId,
        IngredientId,
        UnitId,
        Quantity,
        UnitCost,
        Currency,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }
}

mod m20240101_000004_create_procurement_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::{Restaurants, Suppliers, Units};
    use super::m20240101_000002_create_ingredient_tables::Ingredients;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_procurement_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Procurements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Procurements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Procurements::RestaurantId).uuid().not_null())
                        .col(ColumnDef::new(Procurements::SupplierId).uuid().not_null())
                        .col(ColumnDef::new(Procurements::Status).string().not_null())
                        .col(ColumnDef::new(Procurements::Note).text())
                        .col(
                            ColumnDef::new(Procurements::ExpectedDate)
                                .timestamp_with_time_zone(),
                        )
                        .col(
                            ColumnDef::new(Procurements::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurements::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurements::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurements::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Procurements::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_procurements_restaurant")
                                .from(Procurements::Table, Procurements::RestaurantId)
                                .to(Restaurants::Table, Restaurants::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_procurements_supplier")
                                .from(Procurements::Table, Procurements::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_procurements_supplier_id")
                        .table(Procurements::Table)
                        .col(Procurements::SupplierId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProcurementIngredients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProcurementIngredients::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::ProcurementId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::UnitId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::Quantity)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::UnitCost)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::Currency)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::IsAvailable)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::CreatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::UpdatedAtUtc)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcurementIngredients::DeletedAt)
                                .timestamp_with_time_zone(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_procurement_ingredients_procurement")
                                .from(
                                    ProcurementIngredients::Table,
                                    ProcurementIngredients::ProcurementId,
                                )
                                .to(Procurements::Table, Procurements::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_procurement_ingredients_ingredient")
                                .from(
                                    ProcurementIngredients::Table,
                                    ProcurementIngredients::IngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_procurement_ingredients_unit")
                                .from(
                                    ProcurementIngredients::Table,
                                    ProcurementIngredients::UnitId,
                                )
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_procurement_ingredients_procurement_id")
                        .table(ProcurementIngredients::Table)
                        .col(ProcurementIngredients::ProcurementId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProcurementIngredients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Procurements::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Procurements {
        Table,
        Id,
        RestaurantId,
        SupplierId,
        Status,
        Note,
        ExpectedDate,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ProcurementIngredients {
        Table,
        Id,
        ProcurementId,
        IngredientId,
        UnitId,
        Quantity,
        UnitCost,
        Currency,
        IsAvailable,
        CreatedAt,
        CreatedAtUtc,
        UpdatedAt,
        UpdatedAtUtc,
        DeletedAt,
    }
}
