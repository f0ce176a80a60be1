mod common;

use assert_matches::assert_matches;
use common::{seed_restaurant, seed_supplier, seed_weight_units, setup, TestContext};
use larder_api::{
    commands::{
        catalog::CreateIngredientCommand,
        orders::{CreateLineItem, CreateOrderCommand},
        Command,
    },
    models::{ingredient, order, order_item, supplier, OrderStatus},
    services::OrderService,
    ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

async fn seed_ingredient(ctx: &TestContext, name: &str, canonical_unit_id: Uuid) -> ingredient::Model {
    CreateIngredientCommand {
        name: name.to_string(),
        description: None,
        tags: vec![],
        par_level: 0.0,
        quantity: 0.0,
        canonical_unit_id,
        offers: vec![],
    }
    .execute(ctx.db.clone(), ctx.events.clone())
    .await
    .expect("seed ingredient")
    .ingredient
}

async fn count_orders(ctx: &TestContext) -> u64 {
    order::Entity::find().count(ctx.db.as_ref()).await.unwrap()
}

async fn count_order_items(ctx: &TestContext) -> u64 {
    order_item::Entity::find()
        .count(ctx.db.as_ref())
        .await
        .unwrap()
}

#[tokio::test]
async fn creates_order_with_items_and_computes_totals() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier = seed_supplier(&ctx, "Mill & Co").await;
    let (kg, g) = seed_weight_units(&ctx).await;
    let flour = seed_ingredient(&ctx, "Flour", kg.id).await;

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let view = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![CreateLineItem {
                ingredient_id: flour.id,
                unit_id: g.id,
                quantity: 500.0,
                unit_cost: 0.002,
                currency: "USD".to_string(),
            }],
        })
        .await
        .unwrap();

    assert_eq!(view.order.status, OrderStatus::Pending);
    assert_eq!(view.supplier_name, "Mill & Co");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].ingredient_name, "Flour");
    assert_eq!(view.items[0].unit_symbol, "g");

    let totals = service.order_totals(view.order.id).await.unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].currency, "USD");
    assert!((totals[0].total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn totals_are_kept_per_currency() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier = seed_supplier(&ctx, "Mill & Co").await;
    let (kg, g) = seed_weight_units(&ctx).await;
    let flour = seed_ingredient(&ctx, "Flour", kg.id).await;
    let salt = seed_ingredient(&ctx, "Salt", kg.id).await;

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let view = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![
                CreateLineItem {
                    ingredient_id: flour.id,
                    unit_id: g.id,
                    quantity: 500.0,
                    unit_cost: 0.002,
                    currency: "USD".to_string(),
                },
                CreateLineItem {
                    ingredient_id: salt.id,
                    unit_id: kg.id,
                    quantity: 2.0,
                    unit_cost: 3.0,
                    currency: "EUR".to_string(),
                },
            ],
        })
        .await
        .unwrap();

    let totals = service.order_totals(view.order.id).await.unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].currency, "EUR");
    assert!((totals[0].total - 6.0).abs() < 1e-9);
    assert_eq!(totals[1].currency, "USD");
    assert!((totals[1].total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_ingredient_rolls_back_the_whole_order() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier = seed_supplier(&ctx, "Mill & Co").await;
    let (kg, g) = seed_weight_units(&ctx).await;
    let flour = seed_ingredient(&ctx, "Flour", kg.id).await;

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let err = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![
                CreateLineItem {
                    ingredient_id: flour.id,
                    unit_id: g.id,
                    quantity: 500.0,
                    unit_cost: 0.002,
                    currency: "USD".to_string(),
                },
                CreateLineItem {
                    ingredient_id: Uuid::new_v4(),
                    unit_id: g.id,
                    quantity: 100.0,
                    unit_cost: 0.01,
                    currency: "USD".to_string(),
                },
            ],
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::NotFound(_));
    assert_eq!(count_orders(&ctx).await, 0);
    assert_eq!(count_order_items(&ctx).await, 0);
}

#[tokio::test]
async fn non_positive_quantity_is_rejected_before_any_write() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier = seed_supplier(&ctx, "Mill & Co").await;
    let (kg, g) = seed_weight_units(&ctx).await;
    let flour = seed_ingredient(&ctx, "Flour", kg.id).await;

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let err = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![
                CreateLineItem {
                    ingredient_id: flour.id,
                    unit_id: g.id,
                    quantity: 500.0,
                    unit_cost: 0.002,
                    currency: "USD".to_string(),
                },
                CreateLineItem {
                    ingredient_id: flour.id,
                    unit_id: g.id,
                    quantity: 0.0,
                    unit_cost: 0.002,
                    currency: "USD".to_string(),
                },
            ],
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::ValidationError(_));
    assert_eq!(count_orders(&ctx).await, 0);
    assert_eq!(count_order_items(&ctx).await, 0);
}

#[tokio::test]
async fn empty_item_list_is_rejected() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier = seed_supplier(&ctx, "Mill & Co").await;

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let err = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn item_unit_must_be_convertible_to_canonical_unit() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier = seed_supplier(&ctx, "Mill & Co").await;
    let (kg, _g) = seed_weight_units(&ctx).await;
    let litre = common::register_unit(
        &ctx,
        "Litre",
        "L",
        larder_api::models::UnitType::Volume,
        None,
        1.0,
    )
    .await;
    let flour = seed_ingredient(&ctx, "Flour", kg.id).await;

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let err = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![CreateLineItem {
                ingredient_id: flour.id,
                unit_id: litre.id,
                quantity: 1.0,
                unit_cost: 1.0,
                currency: "USD".to_string(),
            }],
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::IncompatibleUnitType { .. });
    assert_eq!(count_orders(&ctx).await, 0);
    assert_eq!(count_order_items(&ctx).await, 0);
}

#[tokio::test]
async fn inactive_supplier_cannot_receive_orders() {
    let ctx = setup().await;
    let restaurant = seed_restaurant(&ctx, "Trattoria").await;
    let supplier_model = seed_supplier(&ctx, "Mill & Co").await;
    let (kg, g) = seed_weight_units(&ctx).await;
    let flour = seed_ingredient(&ctx, "Flour", kg.id).await;

    supplier::Entity::update_many()
        .set(supplier::ActiveModel {
            active: Set(false),
            ..Default::default()
        })
        .filter(supplier::Column::Id.eq(supplier_model.id))
        .exec(ctx.db.as_ref())
        .await
        .unwrap();

    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let err = service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier_model.id,
            items: vec![CreateLineItem {
                ingredient_id: flour.id,
                unit_id: g.id,
                quantity: 1.0,
                unit_cost: 1.0,
                currency: "USD".to_string(),
            }],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
    assert_eq!(count_orders(&ctx).await, 0);
}

async fn seed_order(ctx: &TestContext, service: &OrderService) -> Uuid {
    let restaurant = seed_restaurant(ctx, "Trattoria").await;
    let supplier = seed_supplier(ctx, "Mill & Co").await;
    let (kg, g) = seed_weight_units(ctx).await;
    let flour = seed_ingredient(ctx, "Flour", kg.id).await;

    service
        .create_order(CreateOrderCommand {
            restaurant_id: restaurant.id,
            supplier_id: supplier.id,
            items: vec![CreateLineItem {
                ingredient_id: flour.id,
                unit_id: g.id,
                quantity: 500.0,
                unit_cost: 0.002,
                currency: "USD".to_string(),
            }],
        })
        .await
        .unwrap()
        .order
        .id
}

#[tokio::test]
async fn order_walks_the_full_status_state_machine() {
    let ctx = setup().await;
    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let order_id = seed_order(&ctx, &service).await;

    for status in [
        OrderStatus::Approved,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        let updated = service
            .update_order_status(order_id, status.clone())
            .await
            .unwrap();
        assert_eq!(updated.status, status);
    }

    // Delivered is terminal.
    let err = service
        .update_order_status(order_id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidTransition { .. });
}

#[tokio::test]
async fn order_cannot_skip_states() {
    let ctx = setup().await;
    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let order_id = seed_order(&ctx, &service).await;

    let err = service
        .update_order_status(order_id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidTransition { .. });

    // The failed attempt must not have changed the stored status.
    let view = service.get_order(order_id).await.unwrap();
    assert_eq!(view.order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn rejected_order_is_terminal() {
    let ctx = setup().await;
    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let order_id = seed_order(&ctx, &service).await;

    service
        .update_order_status(order_id, OrderStatus::Rejected)
        .await
        .unwrap();
    let err = service
        .update_order_status(order_id, OrderStatus::Approved)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidTransition { .. });
}

#[tokio::test]
async fn soft_deleted_order_disappears_from_reads() {
    let ctx = setup().await;
    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let order_id = seed_order(&ctx, &service).await;

    service.delete_order(order_id).await.unwrap();

    let err = service.get_order(order_id).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
    assert!(service.list_orders().await.unwrap().is_empty());

    // The row itself stays for audit.
    let raw = order::Entity::find_by_id(order_id)
        .one(ctx.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert!(raw.deleted_at.is_some());

    // A second delete finds nothing.
    let err = service.delete_order(order_id).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn deleted_order_cannot_change_status() {
    let ctx = setup().await;
    let service = OrderService::new(ctx.db.clone(), ctx.events.clone());
    let order_id = seed_order(&ctx, &service).await;

    service.delete_order(order_id).await.unwrap();
    let err = service
        .update_order_status(order_id, OrderStatus::Approved)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}
