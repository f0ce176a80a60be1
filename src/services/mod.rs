use crate::{db::DbPool, events::EventSender};
use std::sync::Arc;

pub mod catalog;
pub mod orders;
pub mod procurement;
pub mod units;

pub use catalog::CatalogService;
pub use orders::OrderService;
pub use procurement::ProcurementService;
pub use units::UnitService;

/// All application services wired to one pool and one event channel.
#[derive(Clone)]
pub struct AppServices {
    pub units: UnitService,
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub procurements: ProcurementService,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            units: UnitService::new(db_pool.clone(), event_sender.clone()),
            catalog: CatalogService::new(db_pool.clone(), event_sender.clone()),
            orders: OrderService::new(db_pool.clone(), event_sender.clone()),
            procurements: ProcurementService::new(db_pool, event_sender),
        }
    }
}
