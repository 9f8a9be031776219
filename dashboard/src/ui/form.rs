//! Reserve/allocate action form

use crate::constants::{ALLOCATE_PLACEHOLDER_QUANTITY, ALLOCATE_PLACEHOLDER_SKU, ActionKind};
use crate::types::{
    AllocateChoice, AllocateInventoryPayload, InventoryAction, ReserveInventoryPayload,
};
use crate::validation::{
    Field, FormValidation, InventoryActionForm, RawQuantity, ValidationError, sanitize_text,
    validate_inventory_action_form,
};
use std::fmt::Write;

/// Which form is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormAction {
    /// Reserve stock: order, SKU, category, quantity
    #[default]
    Reserve,
    /// Allocate for an order: order and yes/no
    Allocate,
}

/// State of the action form
///
/// Fields hold raw input. [`ActionForm::submission`] validates and converts
/// them; nothing invalid is ever turned into an action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionForm {
    /// Selected form
    pub action: FormAction,
    /// Order id
    pub order_id: String,
    /// SKU (reserve only)
    pub sku: String,
    /// Category id (reserve only)
    pub category_id: String,
    /// Quantity as typed (reserve only)
    pub reserved_qty: String,
    /// Allocate answer (allocate only)
    pub allocate_choice: AllocateChoice,
}

impl ActionForm {
    /// A reserve form filled with the given input
    #[must_use]
    pub fn reserve(
        order_id: impl Into<String>,
        sku: impl Into<String>,
        category_id: impl Into<String>,
        reserved_qty: impl Into<String>,
    ) -> Self {
        Self {
            action: FormAction::Reserve,
            order_id: order_id.into(),
            sku: sku.into(),
            category_id: category_id.into(),
            reserved_qty: reserved_qty.into(),
            allocate_choice: AllocateChoice::default(),
        }
    }

    /// An allocate form filled with the given input
    #[must_use]
    pub fn allocate(order_id: impl Into<String>, allocate_choice: AllocateChoice) -> Self {
        Self {
            action: FormAction::Allocate,
            order_id: order_id.into(),
            allocate_choice,
            ..Self::default()
        }
    }

    /// Back to the defaults, as after a successful submission
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the input and build the request action
    ///
    /// Text input is sanitized first. Allocation is validated with the
    /// placeholder SKU and quantity it will actually send.
    ///
    /// # Errors
    ///
    /// Returns the field errors when validation fails.
    pub fn submission(&self) -> Result<InventoryAction, FormValidation> {
        let order_id = sanitize_text(&self.order_id);

        match self.action {
            FormAction::Reserve => {
                let sku = sanitize_text(&self.sku);
                validate_inventory_action_form(&InventoryActionForm {
                    action: ActionKind::Reserve,
                    sku: sku.clone(),
                    quantity: RawQuantity::from(self.reserved_qty.as_str()),
                    order_id: Some(order_id.clone()),
                })
                .into_result()?;

                let quantity = whole_quantity(&self.reserved_qty).ok_or_else(|| {
                    FormValidation::single(Field::Quantity, ValidationError::QuantityNotPositive)
                })?;

                Ok(InventoryAction::ReserveInventory(ReserveInventoryPayload {
                    order_id,
                    sku,
                    category_id: sanitize_text(&self.category_id),
                    quantity,
                }))
            },
            FormAction::Allocate => {
                validate_inventory_action_form(&InventoryActionForm {
                    action: ActionKind::Allocate,
                    sku: ALLOCATE_PLACEHOLDER_SKU.to_string(),
                    quantity: RawQuantity::from(i64::from(ALLOCATE_PLACEHOLDER_QUANTITY)),
                    order_id: Some(order_id.clone()),
                })
                .into_result()?;

                Ok(InventoryAction::AllocateInventory(AllocateInventoryPayload {
                    order_id,
                    allocate_choice: self.allocate_choice,
                }))
            },
        }
    }

    /// Render the form's current input
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.action {
            FormAction::Reserve => {
                let _ = writeln!(out, "Reserve Inventory");
                let _ = writeln!(out, "  Order ID:          {}", self.order_id);
                let _ = writeln!(out, "  SKU:               {}", self.sku);
                let _ = writeln!(out, "  Category ID:       {}", self.category_id);
                let _ = writeln!(out, "  Reserved Quantity: {}", self.reserved_qty);
            },
            FormAction::Allocate => {
                let _ = writeln!(out, "Allocate Inventory");
                let _ = writeln!(out, "  Order ID:            {}", self.order_id);
                let _ = writeln!(out, "  Allocate Inventory?  {}", self.allocate_choice);
            },
        }
        out
    }
}

/// Whole units of a validated quantity; fractions are truncated
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked
fn whole_quantity(raw: &str) -> Option<u32> {
    let value = RawQuantity::from(raw).value()?.trunc();
    (1.0..=f64::from(u32::MAX))
        .contains(&value)
        .then(|| value as u32)
}
