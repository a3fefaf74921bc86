//! Application layer: the operations a transport calls.
//!
//! `OrderService` is the order store and the only path to the persisted
//! collection; `build_payment_request` turns an order number and total into a
//! scannable UPI payment request. The two are independent and the caller
//! sequences them.

pub mod order_service;
pub mod payment;
