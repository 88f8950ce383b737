//! # Console Session
//!
//! The interactive loop: menu, prompts, and the purchase state machine.
//!
//! ## Transaction State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Start ──► MenuShown ──┬──► InvalidSelection   ─┐                      │
//! │                        ├──► OutOfStock          │                      │
//! │                        ├──► MalformedPayment    ├──► End               │
//! │                        ├──► InsufficientFunds   │                      │
//! │                        ├──► DispenseFailure     │                      │
//! │                        └──► Success ────────────┘                      │
//! │                                                                         │
//! │  Every non-success outcome ends the transaction; the session loop      │
//! │  ("Would you like to buy another item?") is the only retry.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is generic over its reader and writer so tests can drive it
//! with in-memory buffers.
//!
//! ## Reading Input
//! Lines are read as raw bytes and decoded lossily, so a terminal sending
//! invalid UTF-8 produces a rejected transaction rather than an I/O error.
//! Only the line terminator is stripped: a selection code must match
//! exactly, the payment parser skips surrounding whitespace itself, and the
//! continue answer is trimmed before comparison.

use std::io::{BufRead, Write};

use tracing::{debug, info, info_span};
use uuid::Uuid;
use vending_core::validation::{parse_tendered, validate_tendered_non_negative};
use vending_core::{Amount, Machine, Product, PurchaseError, Receipt};

use crate::config::VendingConfig;
use crate::error::SessionResult;

const SELECTION_PROMPT: &str = "\nEnter the code of the item you want to purchase: ";
const CONTINUE_PROMPT: &str = "Would you like to buy another item? (yes/no): ";

/// How a single pass through the purchase flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Product dispensed.
    Completed(Receipt),
    /// A gate turned the customer away; nothing changed.
    Rejected(PurchaseError),
    /// Input ended before the transaction finished.
    InputClosed,
}

/// One customer at one machine.
pub struct Session<R, W> {
    machine: Machine,
    config: VendingConfig,
    input: R,
    output: W,
    transactions: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(machine: Machine, config: VendingConfig, input: R, output: W) -> Self {
        Session {
            machine,
            config,
            input,
            output,
            transactions: 0,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prints the categorized menu.
    pub fn display_menu(&mut self) -> SessionResult<()> {
        write!(self.output, "{}", self.machine.menu())?;
        Ok(())
    }

    /// Runs one purchase attempt from menu to outcome.
    ///
    /// Events are logged inside a `transaction` span carrying the same id the
    /// receipt gets.
    pub fn run_purchase_transaction(&mut self) -> SessionResult<Transaction> {
        self.transactions += 1;
        let transaction_id = Uuid::new_v4();
        let span = info_span!("transaction", id = %transaction_id);
        let _guard = span.enter();

        self.display_menu()?;

        let Some(code) = self.prompt(SELECTION_PROMPT)? else {
            return Ok(Transaction::InputClosed);
        };
        debug!(%code, "selection entered");

        let price = match self.machine.select(&code).map(Product::price) {
            Ok(price) => price,
            Err(err) => return self.reject(err),
        };

        let Some(amount) = self.prompt(&format!("Please insert {price}: "))? else {
            return Ok(Transaction::InputClosed);
        };
        debug!(%amount, "payment entered");

        let tendered = match self.read_tendered(&amount) {
            Ok(tendered) => tendered,
            Err(err) => return self.reject(err),
        };

        match self.machine.complete_purchase(transaction_id, &code, tendered) {
            Ok(receipt) => {
                self.print_receipt(&receipt)?;
                info!(
                    product = %receipt.product_name,
                    tendered = %receipt.tendered,
                    change = %receipt.change,
                    at = %receipt.completed_at,
                    "sale completed"
                );
                Ok(Transaction::Completed(receipt))
            }
            Err(err) => self.reject(err),
        }
    }

    /// Repeats transactions until the customer declines to continue.
    ///
    /// Only a trimmed, case-insensitive `yes` continues. End of input at any
    /// prompt ends the session the same way a `no` does.
    pub fn run_session(&mut self) -> SessionResult<()> {
        loop {
            writeln!(
                self.output,
                "\nHello!! {}, what do you have in mind?",
                self.config.machine_name
            )?;

            if self.run_purchase_transaction()? == Transaction::InputClosed {
                break;
            }

            match self.prompt(CONTINUE_PROMPT)? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("yes") => continue,
                _ => break,
            }
        }

        writeln!(
            self.output,
            "Thank you for using {}. Goodbye!",
            self.config.machine_name
        )?;
        self.output.flush()?;
        info!(transactions = self.transactions, "session ended");
        Ok(())
    }

    /// Writes a prompt and reads one line without its terminator; `None` at
    /// end of input.
    fn prompt(&mut self, text: &str) -> SessionResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            debug!("input closed");
            return Ok(None);
        }

        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.strip_suffix('\n').unwrap_or(&*decoded);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }

    fn read_tendered(&self, amount: &str) -> Result<Amount, PurchaseError> {
        let tendered = parse_tendered(amount)?;
        if self.config.reject_negative_payments {
            return validate_tendered_non_negative(tendered);
        }
        Ok(tendered)
    }

    fn print_receipt(&mut self, receipt: &Receipt) -> SessionResult<()> {
        writeln!(self.output, "Dispensing {}...", receipt.product_name)?;
        writeln!(
            self.output,
            "Transaction complete. Your change is {}.",
            receipt.change
        )?;
        if let Some(suggestion) = &receipt.suggestion {
            writeln!(self.output, "Suggestion: Why not try {suggestion} as well?")?;
        }
        Ok(())
    }

    fn reject(&mut self, err: PurchaseError) -> SessionResult<Transaction> {
        info!(kind = err.kind(), "{err}");
        writeln!(self.output, "{err}")?;
        Ok(Transaction::Rejected(err))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vending_core::{Catalog, CatalogEntry, Money};

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

    fn session_with(
        machine: Machine,
        config: VendingConfig,
        input: impl AsRef<[u8]>,
    ) -> TestSession {
        Session::new(machine, config, Cursor::new(input.as_ref().to_vec()), Vec::new())
    }

    fn new_session(input: impl AsRef<[u8]>) -> TestSession {
        session_with(Machine::default(), VendingConfig::default(), input)
    }

    fn printed(session: &TestSession) -> String {
        String::from_utf8(session.output().clone()).unwrap()
    }

    fn stock_levels(session: &TestSession) -> Vec<u32> {
        session.machine().catalog().products().map(Product::stock).collect()
    }

    fn completed(outcome: Transaction) -> Receipt {
        match outcome {
            Transaction::Completed(receipt) => receipt,
            other => panic!("expected a completed sale, got {other:?}"),
        }
    }

    fn sold_out_machine() -> Machine {
        let snack = |name: &str, cents: i64, stock: u32| {
            Product::new(name, "Snacks", Money::from_cents(cents), stock)
        };
        Machine::new(
            Catalog::new(vec![
                CatalogEntry::new("1", snack("Chips", 130, 0)),
                CatalogEntry::new("2", snack("Apple", 100, 3)),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_display_menu() {
        let mut session = new_session("");
        session.display_menu().unwrap();

        let out = printed(&session);
        assert!(out.contains("--- Vending Machine Menu ---"));
        assert!(out.contains("\nHot Beverages:\n 1: Coffee - $1.50\n"));
        assert!(!out.contains("Out of Stock"));
    }

    #[test]
    fn test_invalid_selection() {
        let mut session = new_session("99\n");
        let before = stock_levels(&session);

        let outcome = session.run_purchase_transaction().unwrap();
        assert_eq!(
            outcome,
            Transaction::Rejected(PurchaseError::InvalidSelection {
                code: "99".to_string()
            })
        );
        assert!(printed(&session).contains("Invalid selection. Please try again.\n"));
        assert!(!printed(&session).contains("Please insert"));
        assert_eq!(stock_levels(&session), before);
    }

    #[test]
    fn test_selection_code_is_matched_exactly() {
        let mut session = new_session(" 4 \n1.00\n");

        let outcome = session.run_purchase_transaction().unwrap();
        assert_eq!(
            outcome,
            Transaction::Rejected(PurchaseError::InvalidSelection {
                code: " 4 ".to_string()
            })
        );
        assert!(!printed(&session).contains("Please insert"));
        assert_eq!(session.machine().catalog().get("4").unwrap().stock(), 15);
    }

    #[test]
    fn test_windows_line_endings() {
        let mut session = new_session("4\r\n1.00\r\nno\r\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert!(out.contains("Dispensing Water...\n"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_out_of_stock() {
        let mut session = session_with(sold_out_machine(), VendingConfig::default(), "1\n");

        let outcome = session.run_purchase_transaction().unwrap();
        assert!(matches!(
            outcome,
            Transaction::Rejected(PurchaseError::OutOfStock { .. })
        ));
        let out = printed(&session);
        assert!(out.contains(" 1: Chips - $1.30 (Out of Stock)\n"));
        assert!(out.contains("Sorry, Chips is out of stock.\n"));
        assert_eq!(stock_levels(&session), vec![0, 3]);
    }

    #[test]
    fn test_malformed_payment() {
        let mut session = new_session("1\nlots\n");
        let before = stock_levels(&session);

        let outcome = session.run_purchase_transaction().unwrap();
        assert!(matches!(
            outcome,
            Transaction::Rejected(PurchaseError::MalformedPayment { .. })
        ));
        let out = printed(&session);
        assert!(out.contains("Please insert $1.50: "));
        assert!(out.contains("Invalid amount entered. Transaction cancelled.\n"));
        assert_eq!(stock_levels(&session), before);
    }

    #[test]
    fn test_invalid_utf8_payment_is_malformed() {
        let mut session = new_session(b"4\n\xff\xfe\nno\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert!(out.contains("Invalid amount entered. Transaction cancelled.\n"));
        assert!(out.ends_with("Thank you for using Luigi's Vending Machine. Goodbye!\n"));
        assert_eq!(session.machine().catalog().get("4").unwrap().stock(), 15);
    }

    #[test]
    fn test_invalid_utf8_selection_is_invalid() {
        let mut session = new_session(b"\xff\n");

        let outcome = session.run_purchase_transaction().unwrap();
        assert!(matches!(
            outcome,
            Transaction::Rejected(PurchaseError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_insufficient_funds() {
        let mut session = new_session("1\n1.00\n");
        let before = stock_levels(&session);

        let outcome = session.run_purchase_transaction().unwrap();
        assert!(matches!(
            outcome,
            Transaction::Rejected(PurchaseError::InsufficientFunds { .. })
        ));
        assert!(printed(&session)
            .contains("Insufficient funds. Please insert at least $1.50.\n"));
        assert_eq!(stock_levels(&session), before);
    }

    #[test]
    fn test_negative_payment_default_and_strict() {
        let mut permissive = new_session("4\n-5\n");
        assert!(matches!(
            permissive.run_purchase_transaction().unwrap(),
            Transaction::Rejected(PurchaseError::InsufficientFunds { .. })
        ));

        let strict = VendingConfig {
            reject_negative_payments: true,
            ..VendingConfig::default()
        };
        let mut strict = session_with(Machine::default(), strict, "4\n-5\n");
        assert!(matches!(
            strict.run_purchase_transaction().unwrap(),
            Transaction::Rejected(PurchaseError::MalformedPayment { .. })
        ));
        assert_eq!(strict.machine().catalog().get("4").unwrap().stock(), 15);
    }

    #[test]
    fn test_successful_purchase_of_water() {
        let mut session = new_session("4\n 1.00 \n");

        let receipt = completed(session.run_purchase_transaction().unwrap());
        assert_eq!(receipt.product_name, "Water");
        assert_eq!(receipt.change, Money::default());
        assert_eq!(session.machine().catalog().get("4").unwrap().stock(), 14);

        let out = printed(&session);
        assert!(out.contains("Please insert $1.00: "));
        assert!(out.contains(
            "Dispensing Water...\n\
             Transaction complete. Your change is $0.00.\n\
             Suggestion: Why not try Juice as well?\n"
        ));
    }

    #[test]
    fn test_change_is_reported_to_the_cent() {
        let mut session = new_session("6\n2\n");
        session.run_purchase_transaction().unwrap();
        assert!(printed(&session)
            .contains("Transaction complete. Your change is $0.20.\n"));
    }

    #[test]
    fn test_sub_cent_payment_rounds_change() {
        let mut session = new_session("1\n1.999\nno\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert!(out.contains("Dispensing Coffee...\n"));
        assert!(out.contains("Your change is $0.50.\n"));
    }

    #[test]
    fn test_exponent_and_underscore_payments() {
        let mut session = new_session("1\n1e2\n");
        let receipt = completed(session.run_purchase_transaction().unwrap());
        assert_eq!(receipt.change.to_string(), "$98.50");
        assert!(printed(&session).contains("Your change is $98.50.\n"));

        let mut session = new_session("4\n1_0\n");
        let receipt = completed(session.run_purchase_transaction().unwrap());
        assert_eq!(receipt.change.to_string(), "$9.00");

        let mut session = new_session("4\ninf\n");
        assert!(matches!(
            session.run_purchase_transaction().unwrap(),
            Transaction::Rejected(PurchaseError::MalformedPayment { .. })
        ));
    }

    #[test]
    fn test_session_stops_on_anything_but_yes() {
        let mut session = new_session("4\n1.00\nno\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert!(out.starts_with("\nHello!! Luigi's Vending Machine, what do you have in mind?\n"));
        assert_eq!(out.matches("--- Vending Machine Menu ---").count(), 1);
        assert!(out.ends_with(
            "Would you like to buy another item? (yes/no): \
             Thank you for using Luigi's Vending Machine. Goodbye!\n"
        ));

        let mut session = new_session("99\ny\n");
        session.run_session().unwrap();
        assert_eq!(printed(&session).matches("Hello!!").count(), 1);
    }

    #[test]
    fn test_session_continues_on_yes_any_case() {
        let mut session = new_session("4\n1.00\n  YES \n4\n2.00\nYes\n99\nnope\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert_eq!(out.matches("Hello!!").count(), 3);
        assert_eq!(out.matches("Dispensing Water...").count(), 2);
        assert!(out.contains("Your change is $1.00."));
        assert!(out.contains("Invalid selection. Please try again."));
        assert_eq!(session.machine().catalog().get("4").unwrap().stock(), 13);
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_session_ends_cleanly_at_end_of_input() {
        let mut session = new_session("4\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert!(out.contains("Please insert $1.00: \n"));
        assert!(out.ends_with("Thank you for using Luigi's Vending Machine. Goodbye!\n"));
        assert_eq!(session.machine().catalog().get("4").unwrap().stock(), 15);

        let mut empty = new_session("");
        empty.run_session().unwrap();
        assert!(printed(&empty).ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_custom_machine_name() {
        let config = VendingConfig {
            machine_name: "Mario's Snacks".to_string(),
            ..VendingConfig::default()
        };
        let mut session = session_with(Machine::default(), config, "99\nno\n");
        session.run_session().unwrap();

        let out = printed(&session);
        assert!(out.contains("Hello!! Mario's Snacks, what do you have in mind?"));
        assert!(out.contains("Thank you for using Mario's Snacks. Goodbye!"));
    }
}
