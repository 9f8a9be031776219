//! Command surface shared by the `stockroom` binary and its shell

use crate::constants::CATEGORY_IDS;
use crate::session::{Session, SessionError};
use crate::types::AllocateChoice;
use crate::ui::{ActionForm, render_item};
use clap::{Parser, Subcommand};
use std::io::Write;
use stockroom_client::{InventoryItem, InventoryPatch};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Inventory commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch and show the current inventory
    List,
    /// Show one SKU
    Show {
        /// SKU to look up
        sku: String,
    },
    /// Reserve stock against an order
    Reserve {
        /// Order to reserve against
        #[arg(long)]
        order: String,
        /// SKU to reserve
        #[arg(long)]
        sku: String,
        /// Category of the SKU
        #[arg(long, value_parser = CATEGORY_IDS)]
        category: String,
        /// Quantity to reserve
        #[arg(long)]
        quantity: String,
    },
    /// Allocate stock for an order
    Allocate {
        /// Order to allocate for
        #[arg(long)]
        order: String,
        /// Whether to allocate (yes/no)
        #[arg(long, default_value = "no")]
        choice: AllocateChoice,
    },
    /// Change a SKU's quantity by a signed delta
    #[command(allow_negative_numbers = true)]
    Adjust {
        /// SKU to adjust
        sku: String,
        /// Signed delta
        quantity: i64,
        /// User the adjustment is attributed to (default: system)
        #[arg(long)]
        username: Option<String>,
    },
    /// Create an inventory row
    Create {
        /// Order id
        #[arg(long)]
        order: String,
        /// SKU
        #[arg(long)]
        sku: String,
        /// Category id
        #[arg(long, value_parser = CATEGORY_IDS)]
        category: String,
        /// Reserved quantity
        #[arg(long, default_value_t = 0)]
        reserved: u64,
        /// Allocated quantity
        #[arg(long, default_value_t = 0)]
        allocated: u64,
    },
    /// Update fields of a SKU
    Update {
        /// SKU to update
        sku: String,
        /// New order id
        #[arg(long)]
        order: Option<String>,
        /// New category id
        #[arg(long, value_parser = CATEGORY_IDS)]
        category: Option<String>,
        /// New reserved quantity
        #[arg(long)]
        reserved: Option<u64>,
        /// New allocated quantity
        #[arg(long)]
        allocated: Option<u64>,
    },
    /// Delete a SKU
    Delete {
        /// SKU to delete
        sku: String,
    },
    /// Release a quantity of a SKU
    Cancel {
        /// SKU to release
        sku: String,
        /// Quantity to release
        quantity: u32,
    },
}

/// Commands accepted by the interactive shell
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Inventory commands
    #[command(flatten)]
    Inventory(Command),
    /// Clear the error region
    Dismiss,
    /// Re-fetch the inventory
    Refresh,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// One shell input line
#[derive(Debug, Parser)]
#[command(name = "stockroom", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    /// Command to run
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Run one inventory command and render the result
///
/// The rendered view is returned even when the command failed, so callers
/// can show the error region or notification.
pub async fn execute(session: &mut Session, command: Command) -> (String, Result<(), SessionError>) {
    let result = match command {
        Command::List => session.refresh().await.map(|_| ()),
        Command::Show { sku } => match session.show(&sku).await {
            Ok(item) => return (render_item(&item), Ok(())),
            Err(error) => Err(error),
        },
        Command::Reserve {
            order,
            sku,
            category,
            quantity,
        } => {
            session.fill_form(ActionForm::reserve(order, sku, category, quantity));
            session.submit_form().await
        },
        Command::Allocate { order, choice } => {
            session.fill_form(ActionForm::allocate(order, choice));
            session.submit_form().await
        },
        Command::Adjust {
            sku,
            quantity,
            username,
        } => session.adjust(&sku, quantity, username).await.map(|_| ()),
        Command::Create {
            order,
            sku,
            category,
            reserved,
            allocated,
        } => session
            .create(InventoryItem::new(order, sku, category).with_quantities(reserved, allocated))
            .await
            .map(|_| ()),
        Command::Update {
            sku,
            order,
            category,
            reserved,
            allocated,
        } => {
            let patch = InventoryPatch {
                order_id: order,
                sku: None,
                category_id: category,
                order_reserved_qty: reserved,
                order_allocated_qty: allocated,
            };
            session.update(&sku, patch).await.map(|_| ())
        },
        Command::Delete { sku } => session.delete(&sku).await,
        Command::Cancel { sku, quantity } => session.cancel(&sku, quantity).await,
    };

    let mut view = session.render().await;
    if let Err(SessionError::Validation(validation)) = &result {
        for (field, error) in validation.errors() {
            view.push_str(&format!("{field}: {error}\n"));
        }
    }
    (view, result)
}

/// Run the interactive shell until `quit` or end of input
///
/// The inventory is fetched once on entry. Errors are rendered and the
/// shell keeps going.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub async fn run_shell<R, W>(session: &mut Session, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(error) = session.refresh().await {
        tracing::warn!(%error, "Initial fetch failed");
    }
    writeln!(output, "{}", session.render().await)?;
    writeln!(output, "Type `help` for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(output, "stockroom> ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(error) => {
                writeln!(output, "{error}")?;
                continue;
            },
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Dismiss => {
                session.dismiss_notification();
                if let Err(error) = session.dismiss_error().await {
                    writeln!(output, "{error}")?;
                }
                writeln!(output, "{}", session.render().await)?;
            },
            ShellCommand::Refresh => {
                if let Err(error) = session.refresh().await {
                    tracing::debug!(%error, "Refresh failed");
                }
                writeln!(output, "{}", session.render().await)?;
            },
            ShellCommand::Inventory(command) => {
                let (view, result) = execute(session, command).await;
                if let Err(error) = result {
                    tracing::debug!(%error, "Shell command failed");
                }
                writeln!(output, "{view}")?;
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<ShellCommand> {
        ShellLine::try_parse_from(line.split_whitespace()).ok().map(|l| l.command)
    }

    #[test]
    fn parses_inventory_commands() {
        assert_eq!(parse("list"), Some(ShellCommand::Inventory(Command::List)));
        assert_eq!(
            parse("reserve --order O1 --sku S1 --category 101 --quantity 3"),
            Some(ShellCommand::Inventory(Command::Reserve {
                order: "O1".to_string(),
                sku: "S1".to_string(),
                category: "101".to_string(),
                quantity: "3".to_string(),
            }))
        );
        assert_eq!(
            parse("allocate --order O1 --choice yes"),
            Some(ShellCommand::Inventory(Command::Allocate {
                order: "O1".to_string(),
                choice: AllocateChoice::Yes,
            }))
        );
        assert_eq!(
            parse("adjust SKU-1 -4"),
            Some(ShellCommand::Inventory(Command::Adjust {
                sku: "SKU-1".to_string(),
                quantity: -4,
                username: None,
            }))
        );
    }

    #[test]
    fn parses_shell_commands() {
        assert_eq!(parse("dismiss"), Some(ShellCommand::Dismiss));
        assert_eq!(parse("refresh"), Some(ShellCommand::Refresh));
        assert_eq!(parse("exit"), Some(ShellCommand::Quit));
    }

    #[test]
    fn rejects_unknown_category_and_command() {
        assert_eq!(parse("reserve --order O --sku S --category 999 --quantity 1"), None);
        assert_eq!(parse("ship SKU-1"), None);
    }

    #[test]
    fn allocate_defaults_to_no() {
        assert_eq!(
            parse("allocate --order O1"),
            Some(ShellCommand::Inventory(Command::Allocate {
                order: "O1".to_string(),
                choice: AllocateChoice::No,
            }))
        );
    }
}
