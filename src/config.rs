use crate::application::order_service::{DEFAULT_BASE_ORDER_NUMBER, OrderService};
use crate::application::payment::PaymentRequestBuilder;
use crate::domain::payment::Payee;
use crate::error::{PosError, Result};
use crate::infrastructure::json_file::JsonFileOrderRepository;
use std::path::PathBuf;

pub const DEFAULT_ORDERS_FILE: &str = "orders.json";
pub const DEFAULT_PAYEE_VPA: &str = "merchant@upi";
pub const DEFAULT_PAYEE_NAME: &str = "Food Stall";

/// Runtime settings for a till.
#[derive(Debug, Clone, PartialEq)]
pub struct PosConfig {
    /// Location of the persisted order collection.
    pub orders_file: PathBuf,
    /// Number assigned to the first order of an empty store.
    pub base_order_number: u64,
    /// Merchant that payment requests are addressed to.
    pub payee: Payee,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            orders_file: PathBuf::from(DEFAULT_ORDERS_FILE),
            base_order_number: DEFAULT_BASE_ORDER_NUMBER,
            payee: Payee {
                vpa: DEFAULT_PAYEE_VPA.to_string(),
                name: DEFAULT_PAYEE_NAME.to_string(),
            },
        }
    }
}

impl PosConfig {
    pub fn validate(&self) -> Result<()> {
        if self.base_order_number == 0 {
            return Err(PosError::ValidationError(
                "Base order number must be positive".to_string(),
            ));
        }
        self.payee.validate()
    }

    pub fn repository(&self) -> JsonFileOrderRepository {
        JsonFileOrderRepository::open(&self.orders_file)
    }

    /// Builds the order store over the configured file.
    pub fn order_service(&self) -> OrderService {
        OrderService::with_base_order_number(Box::new(self.repository()), self.base_order_number)
    }

    pub fn payment_builder(&self) -> PaymentRequestBuilder {
        PaymentRequestBuilder::new(self.payee.clone())
    }
}
