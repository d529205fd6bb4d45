//! Console command parsing and execution.
//!
//! One command per line, keywords case-insensitive:
//!
//! ```text
//! REGISTER <user> <BUY|SELL> <price> <quantity>
//! CANCEL <order id>
//! SUMMARY
//! EXIT
//! ```

use std::io::{self, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::BoardError;
use crate::orderbook::OrderBoard;
use crate::types::quantity::parse_quantity;
use crate::types::{OrderBookSummary, Price, Side};

pub const REGISTER_USAGE: &str = "REGISTER <user> <BUY|SELL> <price> <quantity>";
pub const CANCEL_USAGE: &str = "CANCEL <order id>";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        user_name: String,
        side: Side,
        price: Price,
        quantity: Decimal,
    },
    /// Signed so that negative input reaches the board and is rejected there
    Cancel { order_id: i64 },
    Summary,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("invalid command {0:?}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, args)) = parts.split_first() else {
            return Err(CommandError::Empty);
        };

        match keyword.to_ascii_uppercase().as_str() {
            "REGISTER" => {
                let [user_name, side, price, quantity] = args else {
                    return Err(CommandError::Usage(REGISTER_USAGE));
                };
                let price = price
                    .parse::<Price>()
                    .map_err(|e| BoardError::invalid(format!("invalid price {price:?}: {e}")))?;
                Ok(Command::Register {
                    user_name: (*user_name).to_string(),
                    side: side.parse::<Side>()?,
                    price,
                    quantity: parse_quantity(quantity)?,
                })
            }
            "CANCEL" => {
                let [order_id] = args else {
                    return Err(CommandError::Usage(CANCEL_USAGE));
                };
                let order_id = order_id.parse::<i64>().map_err(|e| {
                    BoardError::invalid(format!("invalid order id {order_id:?}: {e}"))
                })?;
                Ok(Command::Cancel { order_id })
            }
            "SUMMARY" => Ok(Command::Summary),
            "EXIT" => Ok(Command::Exit),
            _ => Err(CommandError::Unknown((*keyword).to_string())),
        }
    }
}

/// Render a summary as JSON or as the plain text layout
pub fn render_summary(summary: &OrderBookSummary, json: bool) -> String {
    if json {
        serde_json::to_string(summary).unwrap_or_else(|e| format!("<unprintable summary: {e}>"))
    } else {
        summary.to_string()
    }
}

/// Apply a command to the board and write its outcome to `out`.
///
/// Successful mutations are reported by the board's listeners, so only the
/// outcome line is written for them. A failed REGISTER or CANCEL is followed
/// by the current summary. Returns `false` once the session should end.
pub fn execute<W: Write>(
    board: &OrderBoard,
    command: Command,
    out: &mut W,
    json: bool,
) -> io::Result<bool> {
    match command {
        Command::Register {
            user_name,
            side,
            price,
            quantity,
        } => match board.register_order(user_name, side, price, quantity) {
            Ok(id) => writeln!(out, "Registered order {id}")?,
            Err(e) => {
                writeln!(out, "Registration failed: {e}")?;
                writeln!(out, "{}", render_summary(&board.summary(), json))?;
            }
        },
        Command::Cancel { order_id } => {
            if board.cancel_order(order_id) {
                writeln!(out, "Cancelled order {order_id}")?;
            } else {
                writeln!(out, "Could not cancel order {order_id}")?;
                writeln!(out, "{}", render_summary(&board.summary(), json))?;
            }
        }
        Command::Summary => writeln!(out, "{}", render_summary(&board.summary(), json))?,
        Command::Exit => return Ok(false),
    }
    Ok(true)
}
