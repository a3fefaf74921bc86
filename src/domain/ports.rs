use super::order::Order;
use crate::error::Result;
use async_trait::async_trait;

/// Backing storage for the order collection.
///
/// Implementations hold the whole collection in storage order (oldest first) and
/// replace it wholesale on `save`. Callers never touch an implementation directly;
/// all access goes through `OrderService`, which serializes writers.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Order>>;
    async fn save(&self, orders: &[Order]) -> Result<()>;
}

pub type OrderRepositoryBox = Box<dyn OrderRepository>;
pub type OrderRepositoryFactory = Box<dyn Fn() -> OrderRepositoryBox + Send + Sync>;
