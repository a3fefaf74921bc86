//! Domain types: orders, payment links, and the storage port.

pub mod order;
pub mod payment;
pub mod ports;
