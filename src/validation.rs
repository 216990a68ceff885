//! Field-level validation of stock payloads.
//!
//! Rules run in a fixed order and every failure is collected before the
//! payload is rejected, so one response reports all offending fields.

use crate::models::StockPayload;
use std::fmt;
use thiserror::Error;

pub const SYMBOL_MESSAGE: &str = "Symbol must be 3 letters followed by 1 number";
pub const COMPANY_NAME_MESSAGE: &str = "Company name cannot be blank";
pub const PRICE_MESSAGE: &str = "Price must be positive";

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.field, self.message)
    }
}

/// A rejected payload. Displays as the combined message returned to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed. Details: {}", join(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

type Rule = fn(&StockPayload) -> Option<Violation>;

const RULES: [Rule; 3] = [check_symbol, check_company_name, check_price];

/// Check a payload against every rule
pub fn validate(payload: &StockPayload) -> Result<(), ValidationFailure> {
    let violations: Vec<Violation> = RULES.iter().filter_map(|rule| rule(payload)).collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { violations })
    }
}

/// `^[A-Z]{3}[0-9]$`
fn is_valid_symbol(symbol: &str) -> bool {
    let bytes = symbol.as_bytes();
    bytes.len() == 4
        && bytes[..3].iter().all(u8::is_ascii_uppercase)
        && bytes[3].is_ascii_digit()
}

fn check_symbol(payload: &StockPayload) -> Option<Violation> {
    let valid = payload.symbol.as_deref().is_some_and(is_valid_symbol);
    (!valid).then_some(Violation {
        field: "symbol",
        message: SYMBOL_MESSAGE,
    })
}

fn check_company_name(payload: &StockPayload) -> Option<Violation> {
    let blank = payload
        .company_name
        .as_deref()
        .map_or(true, |name| name.trim().is_empty());
    blank.then_some(Violation {
        field: "companyName",
        message: COMPANY_NAME_MESSAGE,
    })
}

fn check_price(payload: &StockPayload) -> Option<Violation> {
    // Missing and NaN are rejected along with zero and negatives
    let positive = payload.price.is_some_and(|price| price > 0.0);
    (!positive).then_some(Violation {
        field: "price",
        message: PRICE_MESSAGE,
    })
}
