//! Inventory table

use crate::types::InventoryState;
use std::fmt::Write;
use stockroom_client::InventoryItem;

const HEADERS: [&str; 5] = ["Order ID", "SKU", "Category ID", "Reserved Qty", "Allocated Qty"];

/// Table cells for one item, with placeholders for missing values
fn cells(item: &InventoryItem) -> [String; 5] {
    [
        non_empty_or(&item.order_id, "(No Order ID)"),
        non_empty_or(&item.sku, "(No SKU)"),
        non_empty_or(&item.category_id, "0"),
        item.order_reserved_qty.to_string(),
        item.order_allocated_qty.to_string(),
    ]
}

fn non_empty_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Render the "Current Inventory" section
///
/// Rows keep backend order; duplicate `(order_id, sku)` pairs are shown as-is.
#[must_use]
pub fn render_table(state: &InventoryState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Inventory");
    let _ = writeln!(out, "Showing {} inventory items", state.items.len());
    let _ = writeln!(out);

    let rows: Vec<[String; 5]> = state.items.iter().map(cells).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule = widths.map(|width| "-".repeat(width));
    write_row(&mut out, &rule, &widths);

    if rows.is_empty() {
        let _ = writeln!(out, "No inventory data available");
        let hint = if state.loading {
            "Loading data from server..."
        } else {
            "Make sure your backend is running and returning data"
        };
        let _ = writeln!(out, "{hint}");
    }
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, row: &[String; 5], widths: &[usize; 5]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render a single item as labelled lines
#[must_use]
pub fn render_item(item: &InventoryItem) -> String {
    HEADERS
        .iter()
        .zip(cells(item))
        .fold(String::new(), |mut out, (label, value)| {
            let _ = writeln!(out, "{label:<14}{value}");
            out
        })
}
