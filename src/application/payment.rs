use crate::domain::payment::{Amount, Payee, PaymentRequest, UpiLink};
use crate::error::Result;
use crate::infrastructure::qr;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::Decimal;
use tracing::debug;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Builds the UPI link for `order_number` / `total_amount` and renders it as a QR PNG.
///
/// Pure: nothing is stored, and the same inputs always produce the same link.
pub fn build_payment_request(
    order_number: u64,
    total_amount: Decimal,
    payee_identifier: &str,
    payee_name: &str,
) -> Result<PaymentRequest> {
    let payee = Payee::new(payee_identifier, payee_name)?;
    PaymentRequestBuilder::new(payee).build(order_number, total_amount)
}

/// Payment request factory bound to one merchant.
#[derive(Debug, Clone)]
pub struct PaymentRequestBuilder {
    payee: Payee,
}

impl PaymentRequestBuilder {
    pub fn new(payee: Payee) -> Self {
        Self { payee }
    }

    pub fn payee(&self) -> &Payee {
        &self.payee
    }

    pub fn build(&self, order_number: u64, total_amount: Decimal) -> Result<PaymentRequest> {
        let amount = Amount::new(total_amount)?;
        let uri = UpiLink::new(self.payee.clone(), amount, order_number).to_uri();
        let png = qr::render_png(&uri)?;
        let png_base64 = STANDARD.encode(&png);
        let data_uri = format!("{PNG_DATA_URI_PREFIX}{png_base64}");

        debug!(order_number, %amount, bytes = png.len(), "Built payment request");
        Ok(PaymentRequest {
            order_number,
            uri,
            png,
            png_base64,
            data_uri,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_payment_request_link() {
        let request =
            build_payment_request(1042, dec!(250.00), "cafe@okhdfcbank", "Corner Cafe").unwrap();

        assert_eq!(request.order_number, 1042);
        assert!(request.uri.starts_with("upi://pay?"));
        assert!(request.uri.contains("pa=cafe@okhdfcbank"));
        assert!(request.uri.contains("pn=Corner%20Cafe"));
        assert!(request.uri.contains("am=250.00"));
        assert!(request.uri.contains("cu=INR"));
        assert!(request.uri.contains("tn=Order%201042%20for%20Rs%20250.00"));
    }

    #[test]
    fn test_build_payment_request_encodings_agree() {
        let request = build_payment_request(7, dec!(35), "cafe@upi", "Cafe").unwrap();

        assert_eq!(STANDARD.decode(&request.png_base64).unwrap(), request.png);
        assert_eq!(
            request.data_uri,
            format!("data:image/png;base64,{}", request.png_base64)
        );
    }

    #[test]
    fn test_build_payment_request_is_deterministic() {
        let builder = PaymentRequestBuilder::new(Payee::new("cafe@upi", "Cafe").unwrap());
        let first = builder.build(1001, dec!(99.90)).unwrap();
        let second = builder.build(1001, dec!(99.90)).unwrap();
        assert_eq!(first.uri, second.uri);
    }

    #[test]
    fn test_build_payment_request_rejects_bad_input() {
        assert!(matches!(
            build_payment_request(1001, dec!(0), "cafe@upi", "Cafe"),
            Err(PosError::ValidationError(_))
        ));
        assert!(matches!(
            build_payment_request(1001, dec!(10), "not-a-vpa", "Cafe"),
            Err(PosError::ValidationError(_))
        ));
        assert!(matches!(
            build_payment_request(1001, dec!(10), "cafe@upi", ""),
            Err(PosError::ValidationError(_))
        ));
    }
}
