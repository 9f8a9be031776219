//! Form validation and input sanitizing
//!
//! Everything here is pure. Validation failures are resolved locally by the
//! form and never reach the network.

use crate::constants::ActionKind;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<script\b.*?</script>"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static PHONE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\+?[\d\s\-()]+$"));

#[allow(clippy::expect_used)] // literal patterns
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded pattern should always compile")
}

/// Field-level validation failure
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank SKU
    #[error("SKU is required")]
    SkuRequired,
    /// Absent, empty or zero quantity
    #[error("Quantity is required")]
    QuantityRequired,
    /// Quantity that is not a positive number
    #[error("Quantity must be positive")]
    QuantityNotPositive,
    /// Empty product id
    #[error("Product ID is required")]
    ProductIdRequired,
    /// Empty category id
    #[error("Category ID is required")]
    CategoryIdRequired,
    /// Blank location
    #[error("Location is required")]
    LocationRequired,
    /// Blank order id on an action that needs one
    #[error("Order ID is required for this action")]
    OrderIdRequired,
}

/// Form field a [`ValidationError`] is reported against
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// `sku`
    Sku,
    /// `productId`
    ProductId,
    /// `categoryId`
    CategoryId,
    /// `location`
    Location,
    /// `quantity`
    Quantity,
    /// `orderId`
    OrderId,
}

impl Field {
    /// Key used in the field→message map
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sku => "sku",
            Self::ProductId => "productId",
            Self::CategoryId => "categoryId",
            Self::Location => "location",
            Self::Quantity => "quantity",
            Self::OrderId => "orderId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity as typed into a form, before interpretation
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RawQuantity {
    /// Nothing entered
    #[default]
    Absent,
    /// Free text, parsed as a number
    Text(String),
    /// Already numeric
    Number(f64),
}

impl RawQuantity {
    /// Numeric value, if the input reads as a number
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Absent => None,
            Self::Number(n) => Some(*n),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse().ok()
                }
            },
        }
    }

    /// Absent, empty text, zero and NaN count as "not entered"
    fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }
}

impl From<&str> for RawQuantity {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawQuantity {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for RawQuantity {
    #[allow(clippy::cast_precision_loss)] // form quantities are far below 2^53
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<f64> for RawQuantity {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<Self>> From<Option<T>> for RawQuantity {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Field→error map produced by form validation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValidation {
    errors: BTreeMap<Field, ValidationError>,
}

impl FormValidation {
    /// A result with exactly one failed field
    #[must_use]
    pub fn single(field: Field, error: ValidationError) -> Self {
        let mut validation = Self::default();
        validation.errors.insert(field, error);
        validation
    }

    fn check(&mut self, field: Field, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.errors.insert(field, error);
        }
    }

    /// Valid iff no field failed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error reported for `field`
    #[must_use]
    pub fn error(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    /// Failed fields with their errors, in field order
    pub fn errors(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    /// `Ok` when valid, otherwise the failures
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormValidation {}

/// Fields of the add-inventory form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddInventoryForm {
    /// SKU
    pub sku: String,
    /// Product id, one of [`crate::constants::PRODUCT_IDS`]
    pub product_id: String,
    /// Category id, one of [`crate::constants::CATEGORY_IDS`]
    pub category_id: String,
    /// Storage location
    pub location: String,
    /// Quantity as entered
    pub quantity: RawQuantity,
}

/// Fields of an inventory action submission
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryActionForm {
    /// Operation being submitted
    pub action: ActionKind,
    /// SKU
    pub sku: String,
    /// Quantity as entered
    pub quantity: RawQuantity,
    /// Order id, required for reserve and allocate
    pub order_id: Option<String>,
}

/// A SKU is valid unless blank
///
/// # Errors
///
/// [`ValidationError::SkuRequired`] for an empty or whitespace-only SKU.
pub fn validate_sku(sku: &str) -> Result<(), ValidationError> {
    if sku.trim().is_empty() {
        return Err(ValidationError::SkuRequired);
    }
    Ok(())
}

/// A quantity is valid when it reads as a number strictly above zero
///
/// # Errors
///
/// - [`ValidationError::QuantityRequired`]: absent, empty, zero or NaN
/// - [`ValidationError::QuantityNotPositive`]: anything else that is not a positive number
pub fn validate_quantity(quantity: &RawQuantity) -> Result<(), ValidationError> {
    if quantity.is_blank() {
        return Err(ValidationError::QuantityRequired);
    }
    match quantity.value() {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(ValidationError::QuantityNotPositive),
    }
}

/// Validate every field of the add-inventory form
#[must_use]
pub fn validate_add_inventory_form(form: &AddInventoryForm) -> FormValidation {
    let mut validation = FormValidation::default();
    validation.check(Field::Sku, validate_sku(&form.sku));
    validation.check(
        Field::ProductId,
        required(&form.product_id, ValidationError::ProductIdRequired),
    );
    validation.check(
        Field::CategoryId,
        required(&form.category_id, ValidationError::CategoryIdRequired),
    );
    validation.check(
        Field::Location,
        required(form.location.trim(), ValidationError::LocationRequired),
    );
    validation.check(Field::Quantity, validate_quantity(&form.quantity));
    validation
}

/// Validate an inventory action submission
///
/// SKU and quantity are always checked. A non-blank order id is required
/// only for reserve and allocate.
#[must_use]
pub fn validate_inventory_action_form(form: &InventoryActionForm) -> FormValidation {
    let mut validation = FormValidation::default();
    validation.check(Field::Sku, validate_sku(&form.sku));
    validation.check(Field::Quantity, validate_quantity(&form.quantity));

    if form.action.requires_order_id() {
        let order_id = form.order_id.as_deref().unwrap_or_default();
        validation.check(
            Field::OrderId,
            required(order_id.trim(), ValidationError::OrderIdRequired),
        );
    }
    validation
}

const fn required(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.is_empty() { Err(error) } else { Ok(()) }
}

/// Trim and strip `<script>...</script>` blocks
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    SCRIPT_BLOCK.replace_all(input.trim(), "").into_owned()
}

/// Sanitize string values; every other value passes through unchanged
#[must_use]
pub fn sanitize_input(input: Value) -> Value {
    match input {
        Value::String(text) => Value::String(sanitize_text(&text)),
        other => other,
    }
}

/// `local@domain.tld` with no whitespace
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Digits, spaces, dashes and parentheses with an optional leading `+`,
/// carrying at least ten digits
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= 10
}
