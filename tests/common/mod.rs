//! Shared harness for integration tests: an in-memory sqlite database
//! with migrations applied, a drained event channel, and seed helpers.
#![allow(dead_code)]

use chrono::Utc;
use larder_api::{
    commands::{catalog::CreateSupplierCommand, units::RegisterUnitCommand, Command},
    db::{establish_connection, run_migrations, DbPool},
    events::{event_channel, process_events, EventSender},
    models::{restaurant, supplier, unit, UnitType},
};
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

pub struct TestContext {
    pub db: Arc<DbPool>,
    pub events: Arc<EventSender>,
}

/// Fresh in-memory database with migrations applied and a background
/// task draining the event channel.
pub async fn setup() -> TestContext {
    let db = establish_connection("sqlite::memory:")
        .await
        .expect("sqlite connection");
    run_migrations(&db).await.expect("migrations");

    let (sender, receiver) = event_channel(64);
    tokio::spawn(process_events(receiver));

    TestContext {
        db: Arc::new(db),
        events: Arc::new(sender),
    }
}

/// Inserts a restaurant row directly; restaurants are managed outside
/// the supply-chain core.
pub async fn seed_restaurant(ctx: &TestContext, name: &str) -> restaurant::Model {
    let now = Utc::now();
    restaurant::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        info: Set(None),
        created_at: Set(now),
        created_at_utc: Set(now),
        updated_at: Set(now),
        updated_at_utc: Set(now),
        deleted_at: Set(None),
    }
    .insert(ctx.db.as_ref())
    .await
    .expect("seed restaurant")
}

pub async fn seed_supplier(ctx: &TestContext, name: &str) -> supplier::Model {
    CreateSupplierCommand {
        name: name.to_string(),
        category: "produce".to_string(),
        email: None,
        phone: None,
        address: None,
        notes: None,
    }
    .execute(ctx.db.clone(), ctx.events.clone())
    .await
    .expect("seed supplier")
}

pub async fn register_unit(
    ctx: &TestContext,
    name: &str,
    symbol: &str,
    unit_type: UnitType,
    base_unit_id: Option<Uuid>,
    multiplier: f64,
) -> unit::Model {
    RegisterUnitCommand {
        name: name.to_string(),
        symbol: symbol.to_string(),
        unit_type,
        base_unit_id,
        multiplier,
    }
    .execute(ctx.db.clone(), ctx.events.clone())
    .await
    .expect("register unit")
}

/// Registers the kilogram/gram pair used across the weight tests:
/// kg is the base, 1 g = 0.001 kg.
pub async fn seed_weight_units(ctx: &TestContext) -> (unit::Model, unit::Model) {
    let kg = register_unit(ctx, "Kilogram", "kg", UnitType::Weight, None, 1.0).await;
    let g = register_unit(ctx, "Gram", "g", UnitType::Weight, Some(kg.id), 0.001).await;
    (kg, g)
}
