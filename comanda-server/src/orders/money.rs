//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary values are `Decimal` with 2 fractional digits, half-up
//! rounding. Totals are always recomputed from the lines; nothing trusts
//! an amount sent by a client.

use rust_decimal::prelude::*;

use crate::db::models::OrderLine;
use crate::orders::error::OrderError;

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (€1,000,000)
const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Round a monetary value to 2 decimal places, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal of a line: quantity × unit price, rounded
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Order total: sum of line subtotals, rounded
pub fn order_total(lines: &[OrderLine]) -> Decimal {
    round_money(lines.iter().map(|l| l.subtotal).sum())
}

/// Validate a snapshot unit price before it enters an order line
pub fn validate_unit_price(price: Decimal, product_name: &str) -> Result<(), OrderError> {
    if price.is_sign_negative() {
        return Err(OrderError::Validation(format!(
            "price of '{}' must be non-negative, got {}",
            product_name, price
        )));
    }
    if price > MAX_UNIT_PRICE {
        return Err(OrderError::Validation(format!(
            "price of '{}' exceeds maximum allowed, got {}",
            product_name, price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(unit_price: &str, quantity: i32) -> OrderLine {
        let unit_price = dec(unit_price);
        OrderLine {
            id: "l1".to_string(),
            product_id: "product:x".to_string(),
            product_name: "x".to_string(),
            quantity,
            unit_price,
            subtotal: line_subtotal(unit_price, quantity),
            note: None,
            completed: false,
            completed_at: None,
        }
    }

    #[test]
    fn subtotal_is_quantity_times_price() {
        assert_eq!(line_subtotal(dec("10.00"), 2), dec("20.00"));
        assert_eq!(line_subtotal(dec("3.33"), 3), dec("9.99"));
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_money(dec("2.005")), dec("2.01"));
        assert_eq!(round_money(dec("2.004")), dec("2.00"));
    }

    #[test]
    fn total_equals_sum_of_subtotals() {
        let lines = vec![line("10.00", 2), line("5.00", 1), line("0.95", 3)];
        assert_eq!(order_total(&lines), dec("27.85"));
        assert_eq!(order_total(&[]), dec("0"));
    }

    #[test]
    fn price_bounds() {
        assert!(validate_unit_price(dec("14.50"), "Paella").is_ok());
        assert!(validate_unit_price(dec("-0.01"), "Paella").is_err());
        assert!(validate_unit_price(dec("1000001"), "Paella").is_err());
    }
}
