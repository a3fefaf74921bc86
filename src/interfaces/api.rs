//! Boundary operations and their response shapes, ready to be wired to any
//! transport. Responses serialize to the JSON documents the till front-end reads.

use crate::application::order_service::OrderService;
use crate::application::payment::PaymentRequestBuilder;
use crate::domain::order::{NewOrder, Order};
use crate::domain::payment::PaymentRequest;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderSaved {
    pub message: String,
    pub order_number: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Confirmation {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentQr {
    /// Base64 PNG without prefix.
    pub qr_image: String,
    /// Data URI for direct use in an `<img>`.
    pub qr_url: String,
    pub order_number: u64,
}

/// Input of the QR endpoint. A missing order number means "the next one".
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentQrRequest {
    pub total: Decimal,
    #[serde(rename = "orderNumber", default)]
    pub order_number: Option<u64>,
}

pub async fn submit_order(service: &OrderService, new_order: NewOrder) -> Result<OrderSaved> {
    let order = service.record(new_order).await?;
    Ok(OrderSaved {
        message: "Order saved".to_string(),
        order_number: order.order_number,
    })
}

/// Full history, newest first as the history table shows it.
pub async fn fetch_orders(service: &OrderService) -> Result<Vec<Order>> {
    service.list_orders(true).await
}

impl From<PaymentRequest> for PaymentQr {
    fn from(payment: PaymentRequest) -> Self {
        Self {
            qr_image: payment.png_base64,
            qr_url: payment.data_uri,
            order_number: payment.order_number,
        }
    }
}

/// Builds the payment request, numbering it after the last stored order when the
/// caller did not say which order it is for.
pub async fn payment_request_for(
    service: &OrderService,
    builder: &PaymentRequestBuilder,
    request: PaymentQrRequest,
) -> Result<PaymentRequest> {
    let order_number = match request.order_number {
        Some(order_number) => order_number,
        None => service.next_order_number().await?,
    };
    builder.build(order_number, request.total)
}

pub async fn generate_payment_qr(
    service: &OrderService,
    builder: &PaymentRequestBuilder,
    request: PaymentQrRequest,
) -> Result<PaymentQr> {
    Ok(payment_request_for(service, builder, request).await?.into())
}

pub async fn clear_history(service: &OrderService) -> Result<Confirmation> {
    service.clear_orders().await?;
    Ok(Confirmation {
        message: "Order history cleared!".to_string(),
    })
}
