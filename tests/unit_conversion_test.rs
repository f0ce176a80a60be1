mod common;

use assert_matches::assert_matches;
use common::{register_unit, seed_weight_units, setup};
use larder_api::{
    commands::{units::RegisterUnitCommand, Command},
    models::{unit, UnitType},
    services::units::{convert_quantity, UnitService},
    ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

#[tokio::test]
async fn converts_between_units_of_the_same_type() {
    let ctx = setup().await;
    let (kg, g) = seed_weight_units(&ctx).await;

    let in_kg = convert_quantity(ctx.db.as_ref(), 1500.0, g.id, kg.id)
        .await
        .unwrap();
    assert!((in_kg - 1.5).abs() < 1e-9);

    let in_g = convert_quantity(ctx.db.as_ref(), 2.0, kg.id, g.id)
        .await
        .unwrap();
    assert!((in_g - 2000.0).abs() < 1e-9);
}

#[tokio::test]
async fn converts_across_a_multi_hop_base_chain() {
    let ctx = setup().await;
    let (kg, g) = seed_weight_units(&ctx).await;
    let mg = register_unit(&ctx, "Milligram", "mg", UnitType::Weight, Some(g.id), 0.001).await;

    let in_kg = convert_quantity(ctx.db.as_ref(), 2_000_000.0, mg.id, kg.id)
        .await
        .unwrap();
    assert!((in_kg - 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn round_trip_conversion_is_stable_within_tolerance() {
    let ctx = setup().await;
    let (kg, g) = seed_weight_units(&ctx).await;

    let there = convert_quantity(ctx.db.as_ref(), 1234.5, g.id, kg.id)
        .await
        .unwrap();
    let back = convert_quantity(ctx.db.as_ref(), there, kg.id, g.id)
        .await
        .unwrap();
    assert!((back - 1234.5).abs() < 1e-9);
}

#[tokio::test]
async fn rejects_conversion_between_unit_types() {
    let ctx = setup().await;
    let (kg, _g) = seed_weight_units(&ctx).await;
    let litre = register_unit(&ctx, "Litre", "L", UnitType::Volume, None, 1.0).await;

    let err = convert_quantity(ctx.db.as_ref(), 1.0, kg.id, litre.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::IncompatibleUnitType { .. });
}

#[tokio::test]
async fn rejects_base_unit_of_a_different_type() {
    let ctx = setup().await;
    let litre = register_unit(&ctx, "Litre", "L", UnitType::Volume, None, 1.0).await;

    let err = RegisterUnitCommand {
        name: "Gram".to_string(),
        symbol: "g".to_string(),
        unit_type: UnitType::Weight,
        base_unit_id: Some(litre.id),
        multiplier: 0.001,
    }
    .execute(ctx.db.clone(), ctx.events.clone())
    .await
    .unwrap_err();
    assert_matches!(err, ServiceError::InvalidBaseUnit(_));
}

#[tokio::test]
async fn rejects_unknown_base_unit() {
    let ctx = setup().await;

    let err = RegisterUnitCommand {
        name: "Gram".to_string(),
        symbol: "g".to_string(),
        unit_type: UnitType::Weight,
        base_unit_id: Some(uuid::Uuid::new_v4()),
        multiplier: 0.001,
    }
    .execute(ctx.db.clone(), ctx.events.clone())
    .await
    .unwrap_err();
    assert_matches!(err, ServiceError::InvalidBaseUnit(_));
}

#[tokio::test]
async fn rejects_non_positive_multiplier_for_derived_unit() {
    let ctx = setup().await;
    let (kg, _g) = seed_weight_units(&ctx).await;

    let err = RegisterUnitCommand {
        name: "Broken".to_string(),
        symbol: "x".to_string(),
        unit_type: UnitType::Weight,
        base_unit_id: Some(kg.id),
        multiplier: 0.0,
    }
    .execute(ctx.db.clone(), ctx.events.clone())
    .await
    .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn base_unit_multiplier_is_stored_as_one() {
    let ctx = setup().await;
    let kg = register_unit(&ctx, "Kilogram", "kg", UnitType::Weight, None, 42.0).await;
    assert_eq!(kg.multiplier, 1.0);
    assert_eq!(kg.base_unit_id, None);
}

#[tokio::test]
async fn detects_a_cycle_in_the_base_chain() {
    let ctx = setup().await;
    let (kg, g) = seed_weight_units(&ctx).await;

    // Point the base unit back at its derived unit. Registration forbids
    // this shape, so write the row directly.
    unit::Entity::update_many()
        .set(unit::ActiveModel {
            base_unit_id: Set(Some(g.id)),
            ..Default::default()
        })
        .filter(unit::Column::Id.eq(kg.id))
        .exec(ctx.db.as_ref())
        .await
        .unwrap();

    let err = convert_quantity(ctx.db.as_ref(), 1.0, g.id, kg.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ConversionCycle(_));
}

#[tokio::test]
async fn soft_deleted_units_are_hidden_from_lookups() {
    let ctx = setup().await;
    let (kg, g) = seed_weight_units(&ctx).await;

    unit::Entity::update_many()
        .set(unit::ActiveModel {
            deleted_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        })
        .filter(unit::Column::Id.eq(g.id))
        .exec(ctx.db.as_ref())
        .await
        .unwrap();

    let service = UnitService::new(ctx.db.clone(), ctx.events.clone());
    let err = service.get_unit(g.id).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let listed = service.list_units().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kg.id);
}
