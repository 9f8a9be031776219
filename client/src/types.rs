//! Wire types exchanged with the inventory backend

use serde::{Deserialize, Deserializer, Serialize};

/// Username attributed to adjustments when the caller does not name one
pub const DEFAULT_USERNAME: &str = "system";

/// Reserved/allocated quantity of a SKU against one order
///
/// Identity is `(order_id, sku)`; duplicates are tolerated. Decoding is
/// lenient: missing or `null` fields become empty/zero and identifiers may
/// arrive as JSON numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Order the quantities are held against
    #[serde(default, deserialize_with = "lenient::text")]
    pub order_id: String,
    /// Stock-keeping unit
    #[serde(default, deserialize_with = "lenient::text")]
    pub sku: String,
    /// Product category
    #[serde(default, deserialize_with = "lenient::text")]
    pub category_id: String,
    /// Quantity reserved for the order
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub order_reserved_qty: u64,
    /// Quantity allocated to fulfillment
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub order_allocated_qty: u64,
}

impl InventoryItem {
    /// Creates an item with zero quantities
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        sku: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            sku: sku.into(),
            category_id: category_id.into(),
            order_reserved_qty: 0,
            order_allocated_qty: 0,
        }
    }

    /// Sets the reserved and allocated quantities
    #[must_use]
    pub const fn with_quantities(mut self, reserved: u64, allocated: u64) -> Self {
        self.order_reserved_qty = reserved;
        self.order_allocated_qty = allocated;
        self
    }
}

/// Partial update body for `PUT /inventory/{sku}`
///
/// Only the fields that are set are serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    /// New order id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// SKU; the client always overwrites this with the path SKU
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// New category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// New reserved quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reserved_qty: Option<u64>,
    /// New allocated quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_allocated_qty: Option<u64>,
}

impl InventoryPatch {
    /// Whether no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order_id.is_none()
            && self.sku.is_none()
            && self.category_id.is_none()
            && self.order_reserved_qty.is_none()
            && self.order_allocated_qty.is_none()
    }
}

/// Body of `PUT /inventory/{sku}/adjust`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct AdjustRequest<'a> {
    pub quantity: i64,
    pub username: &'a str,
}

/// Body of `POST /inventory/{sku}/reserve`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReserveRequest<'a> {
    pub quantity: u32,
    pub order_id: &'a str,
}

mod lenient {
    use super::{Deserialize, Deserializer};
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    /// Accepts a string, number or `null`
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            None => String::new(),
            Some(Scalar::Text(text)) => text,
            Some(Scalar::Unsigned(n)) => n.to_string(),
            Some(Scalar::Signed(n)) => n.to_string(),
            Some(Scalar::Float(n)) => n.to_string(),
            Some(Scalar::Flag(flag)) => flag.to_string(),
        })
    }

    /// Accepts a non-negative whole number, its decimal string form, or `null`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
    pub fn quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Scalar>::deserialize(deserializer)? {
            None => Ok(0),
            Some(Scalar::Unsigned(n)) => Ok(n),
            Some(Scalar::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(0);
                }
                text.parse()
                    .map_err(|_| Error::custom(format!("invalid quantity `{text}`")))
            },
            Some(Scalar::Float(n)) if n >= 0.0 && n.trunc() == n && n <= u64::MAX as f64 => {
                Ok(n as u64)
            },
            Some(Scalar::Signed(n)) => Err(Error::custom(format!("negative quantity {n}"))),
            Some(Scalar::Float(n)) => Err(Error::custom(format!("invalid quantity {n}"))),
            Some(Scalar::Flag(flag)) => Err(Error::custom(format!("invalid quantity {flag}"))),
        }
    }
}
