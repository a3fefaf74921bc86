use crate::error::{PosError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency code fixed by the UPI deep-link convention.
pub const CURRENCY: &str = "INR";

/// Everything except RFC 3986 unreserved characters and `@` (kept readable in VPAs).
const UPI_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@');

/// A positive amount a buyer is asked to pay.
///
/// The decimal scale is preserved, so `250.00` is rendered as `250.00` in the link.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PosError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PosError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The merchant receiving the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    /// UPI virtual payment address, `handle@provider`.
    pub vpa: String,
    /// Display name shown by the buyer's payment app.
    pub name: String,
}

impl Payee {
    pub fn new(vpa: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let payee = Self {
            vpa: vpa.into(),
            name: name.into(),
        };
        payee.validate()?;
        Ok(payee)
    }

    pub fn validate(&self) -> Result<()> {
        let valid_vpa = match self.vpa.split_once('@') {
            Some((handle, provider)) => {
                !handle.is_empty()
                    && !provider.is_empty()
                    && !provider.contains('@')
                    && !self.vpa.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid_vpa {
            return Err(PosError::ValidationError(format!(
                "Invalid payee address {:?}, expected handle@provider",
                self.vpa
            )));
        }
        if self.name.trim().is_empty() {
            return Err(PosError::ValidationError(
                "Payee name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A `upi://pay` deep link for a single order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpiLink {
    pub payee: Payee,
    pub amount: Amount,
    pub order_number: u64,
}

impl UpiLink {
    pub fn new(payee: Payee, amount: Amount, order_number: u64) -> Self {
        Self {
            payee,
            amount,
            order_number,
        }
    }

    /// Human-readable transaction note shown in the payment app.
    pub fn note(&self) -> String {
        format!("Order {} for Rs {}", self.order_number, self.amount)
    }

    /// Renders the link. Key order is fixed by the payment apps and must not change.
    ///
    /// `pa` and `pn` are percent-encoded along with `tn`, so a payee name shows up
    /// encoded (`Huzefa's Cafe` becomes `Huzefa%27s%20Cafe`) rather than verbatim.
    /// Payment apps decode all three; an unencoded `&` in a name would split the query.
    pub fn to_uri(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu={}&tn={}",
            utf8_percent_encode(&self.payee.vpa, UPI_VALUE),
            utf8_percent_encode(&self.payee.name, UPI_VALUE),
            self.amount,
            CURRENCY,
            utf8_percent_encode(&self.note(), UPI_VALUE),
        )
    }
}

impl fmt::Display for UpiLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

/// A freshly built payment request: the link plus its QR rendering. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub order_number: u64,
    pub uri: String,
    pub png: Vec<u8>,
    /// Base64 of `png`, without any prefix.
    pub png_base64: String,
    /// `data:image/png;base64,...`, ready to drop into an `<img src>`.
    pub data_uri: String,
}
