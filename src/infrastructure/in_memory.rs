use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order collection.
///
/// Uses `Arc<RwLock<Vec<Order>>>` so clones share the same orders.
/// Ideal for testing or a till that does not need history across restarts.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `orders`, kept in the given order.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn load(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }

    async fn save(&self, orders: &[Order]) -> Result<()> {
        let mut stored = self.orders.write().await;
        *stored = orders.to_vec();
        Ok(())
    }
}
