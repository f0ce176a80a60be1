mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use common::{register_unit, seed_supplier, seed_weight_units, setup, TestContext};
use larder_api::{
    commands::{
        catalog::{CreateIngredientCommand, CreateSupplierCommand, IngredientOfferInput},
        Command,
    },
    models::{ingredient, ingredient_supplier, supplier, UnitType},
    services::{AppServices, CatalogService},
    ServiceError,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

fn catalog(ctx: &TestContext) -> CatalogService {
    CatalogService::new(ctx.db.clone(), ctx.events.clone())
}

#[tokio::test]
async fn supplier_requires_a_name_and_valid_email() {
    let ctx = setup().await;
    let service = catalog(&ctx);

    let err = service
        .create_supplier(CreateSupplierCommand {
            name: String::new(),
            category: "produce".to_string(),
            email: None,
            phone: None,
            address: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = service
        .create_supplier(CreateSupplierCommand {
            name: "Mill & Co".to_string(),
            category: "produce".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
            address: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn suppliers_are_listed_active_only_and_by_name() {
    let ctx = setup().await;
    let service = catalog(&ctx);

    let zebra = seed_supplier(&ctx, "Zebra Produce").await;
    seed_supplier(&ctx, "Alpine Dairy").await;

    supplier::Entity::update_many()
        .set(supplier::ActiveModel {
            active: Set(false),
            ..Default::default()
        })
        .filter(supplier::Column::Id.eq(zebra.id))
        .exec(ctx.db.as_ref())
        .await
        .unwrap();

    let listed = service.list_suppliers().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Alpine Dairy");
}

#[tokio::test]
async fn ingredient_and_offers_are_written_atomically() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, _g) = seed_weight_units(&ctx).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;

    let err = service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec!["baking".to_string()],
            par_level: 10.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![
                IngredientOfferInput {
                    supplier_id: mill.id,
                    unit_cost: 10.0,
                    currency: "USD".to_string(),
                    pack_size: "5 kg bag".to_string(),
                    pack_quantity: 5.0,
                    pack_unit_id: None,
                },
                IngredientOfferInput {
                    supplier_id: Uuid::new_v4(),
                    unit_cost: 8.0,
                    currency: "USD".to_string(),
                    pack_size: "5 kg bag".to_string(),
                    pack_quantity: 5.0,
                    pack_unit_id: None,
                },
            ],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let ingredients = ingredient::Entity::find()
        .count(ctx.db.as_ref())
        .await
        .unwrap();
    let offers = ingredient_supplier::Entity::find()
        .count(ctx.db.as_ref())
        .await
        .unwrap();
    assert_eq!(ingredients, 0);
    assert_eq!(offers, 0);
}

#[tokio::test]
async fn offer_pack_unit_must_match_the_canonical_dimension() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, _g) = seed_weight_units(&ctx).await;
    let litre = register_unit(&ctx, "Litre", "L", UnitType::Volume, None, 1.0).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;

    let err = service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![IngredientOfferInput {
                supplier_id: mill.id,
                unit_cost: 10.0,
                currency: "USD".to_string(),
                pack_size: "5 L jug".to_string(),
                pack_quantity: 5.0,
                pack_unit_id: Some(litre.id),
            }],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::IncompatibleUnitType { .. });

    let ingredients = ingredient::Entity::find()
        .count(ctx.db.as_ref())
        .await
        .unwrap();
    assert_eq!(ingredients, 0);
}

#[tokio::test]
async fn offer_pack_quantity_must_be_positive() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, _g) = seed_weight_units(&ctx).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;

    let err = service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![IngredientOfferInput {
                supplier_id: mill.id,
                unit_cost: 10.0,
                currency: "USD".to_string(),
                pack_size: "empty bag".to_string(),
                pack_quantity: 0.0,
                pack_unit_id: None,
            }],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn ingredients_list_with_offers_ordered_by_pack_cost() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, _g) = seed_weight_units(&ctx).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;
    let alpine = seed_supplier(&ctx, "Alpine Dairy").await;

    service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![
                IngredientOfferInput {
                    supplier_id: mill.id,
                    unit_cost: 12.0,
                    currency: "USD".to_string(),
                    pack_size: "5 kg bag".to_string(),
                    pack_quantity: 5.0,
                    pack_unit_id: None,
                },
                IngredientOfferInput {
                    supplier_id: alpine.id,
                    unit_cost: 9.0,
                    currency: "USD".to_string(),
                    pack_size: "5 kg bag".to_string(),
                    pack_quantity: 5.0,
                    pack_unit_id: None,
                },
            ],
        })
        .await
        .unwrap();
    service
        .create_ingredient(CreateIngredientCommand {
            name: "Butter".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![],
        })
        .await
        .unwrap();

    let listed = service.list_ingredients_with_offers().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].ingredient.name, "Butter");
    assert_eq!(listed[1].ingredient.name, "Flour");
    let offers = &listed[1].offers;
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].supplier_name, "Alpine Dairy");
    assert_eq!(offers[1].supplier_name, "Mill & Co");
}

#[tokio::test]
async fn comparison_normalizes_offers_to_the_canonical_unit() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, g) = seed_weight_units(&ctx).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;
    let alpine = seed_supplier(&ctx, "Alpine Dairy").await;

    // Mill sells a 5 kg bag for 10.00; Alpine a 10000 g sack for 15.00.
    // Normalized: Mill 2.00/kg, Alpine 1.50/kg.
    let created = service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![
                IngredientOfferInput {
                    supplier_id: mill.id,
                    unit_cost: 10.0,
                    currency: "USD".to_string(),
                    pack_size: "5 kg bag".to_string(),
                    pack_quantity: 5.0,
                    pack_unit_id: None,
                },
                IngredientOfferInput {
                    supplier_id: alpine.id,
                    unit_cost: 15.0,
                    currency: "USD".to_string(),
                    pack_size: "10000 g sack".to_string(),
                    pack_quantity: 10000.0,
                    pack_unit_id: Some(g.id),
                },
            ],
        })
        .await
        .unwrap();

    let rows = service
        .supplier_comparison(created.ingredient.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].supplier_name, "Alpine Dairy");
    assert!((rows[0].normalized_unit_cost - 1.5).abs() < 1e-9);
    assert_eq!(rows[1].supplier_name, "Mill & Co");
    assert!((rows[1].normalized_unit_cost - 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn comparison_uses_the_latest_offer_per_supplier() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, _g) = seed_weight_units(&ctx).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;

    let created = service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![IngredientOfferInput {
                supplier_id: mill.id,
                unit_cost: 10.0,
                currency: "USD".to_string(),
                pack_size: "5 kg bag".to_string(),
                pack_quantity: 5.0,
                pack_unit_id: None,
            }],
        })
        .await
        .unwrap();

    // A newer quote from the same supplier supersedes the old one; the
    // old row stays as price history.
    let later = Utc::now() + Duration::seconds(5);
    ingredient_supplier::ActiveModel {
        id: Set(Uuid::new_v4()),
        ingredient_id: Set(created.ingredient.id),
        supplier_id: Set(mill.id),
        unit_cost: Set(8.0),
        currency: Set("USD".to_string()),
        pack_size: Set("5 kg bag".to_string()),
        pack_quantity: Set(5.0),
        pack_unit_id: Set(None),
        created_at: Set(later),
        created_at_utc: Set(later),
        updated_at: Set(later),
        updated_at_utc: Set(later),
        deleted_at: Set(None),
    }
    .insert(ctx.db.as_ref())
    .await
    .unwrap();

    let rows = service
        .supplier_comparison(created.ingredient.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].unit_cost - 8.0).abs() < 1e-9);
    assert!((rows[0].normalized_unit_cost - 1.6).abs() < 1e-9);
}

#[tokio::test]
async fn comparison_skips_inactive_suppliers() {
    let ctx = setup().await;
    let service = catalog(&ctx);
    let (kg, _g) = seed_weight_units(&ctx).await;
    let mill = seed_supplier(&ctx, "Mill & Co").await;

    let created = service
        .create_ingredient(CreateIngredientCommand {
            name: "Flour".to_string(),
            description: None,
            tags: vec![],
            par_level: 0.0,
            quantity: 0.0,
            canonical_unit_id: kg.id,
            offers: vec![IngredientOfferInput {
                supplier_id: mill.id,
                unit_cost: 10.0,
                currency: "USD".to_string(),
                pack_size: "5 kg bag".to_string(),
                pack_quantity: 5.0,
                pack_unit_id: None,
            }],
        })
        .await
        .unwrap();

    supplier::Entity::update_many()
        .set(supplier::ActiveModel {
            active: Set(false),
            ..Default::default()
        })
        .filter(supplier::Column::Id.eq(mill.id))
        .exec(ctx.db.as_ref())
        .await
        .unwrap();

    let rows = service
        .supplier_comparison(created.ingredient.id)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn comparison_of_unknown_ingredient_is_not_found() {
    let ctx = setup().await;
    let service = catalog(&ctx);

    let err = service.supplier_comparison(Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn app_services_wire_all_components_to_one_pool() {
    let ctx = setup().await;
    let services = AppServices::new(ctx.db.clone(), ctx.events.clone());

    let kg = services
        .units
        .register_unit(larder_api::commands::units::RegisterUnitCommand {
            name: "Kilogram".to_string(),
            symbol: "kg".to_string(),
            unit_type: UnitType::Weight,
            base_unit_id: None,
            multiplier: 1.0,
        })
        .await
        .unwrap();

    let fetched = services.units.get_unit(kg.id).await.unwrap();
    assert_eq!(fetched.symbol, "kg");
    assert!(services.catalog.list_suppliers().await.unwrap().is_empty());
    assert!(services.orders.list_orders().await.unwrap().is_empty());
    assert!(services
        .procurements
        .list_procurements()
        .await
        .unwrap()
        .is_empty());
}
