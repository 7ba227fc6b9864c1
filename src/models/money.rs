use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A money amount stored as TEXT in the database
///
/// Prices and order totals are kept as decimals rather than floats so that
/// totals recomputed from line items are exact. The column parser accepts the
/// legacy locale forms that accumulated in the stored data: a comma decimal
/// separator (`12,50`) and a dot thousands separator combined with a comma
/// (`1.234,56`). Values are always written back in canonical dot form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Parses a money string, tolerating comma decimal separators
    pub fn parse(raw: &str) -> Result<Self, rust_decimal::Error> {
        let trimmed = raw.trim();
        let normalized = if trimmed.contains(',') {
            if trimmed.contains('.') {
                // "1.234,56": dot is a thousands separator
                trimmed.replace('.', "").replace(',', ".")
            } else {
                // "12,50": comma decimal separator
                trimmed.replace(',', ".")
            }
        } else {
            trimmed.to_string()
        };
        Ok(Money(Decimal::from_str(&normalized)?))
    }

    /// The zero amount
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromSql<Text, Sqlite> for Money {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let money = Money::parse(&text)?;
        Ok(money)
    }
}

impl ToSql<Text, Sqlite> for Money {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.0.to_string());
        Ok(IsNull::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_parse_dot_decimal() {
        assert_eq!(Money::parse("12.50").unwrap().0, Decimal::new(1250, 2));
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(Money::parse("12,50").unwrap().0, Decimal::new(1250, 2));
    }

    #[test]
    fn test_parse_thousands_separator_with_comma() {
        assert_eq!(Money::parse("1.234,56").unwrap().0, Decimal::new(123456, 2));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(Money::parse("8").unwrap().0, Decimal::new(8, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("twelve euros").is_err());
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::parse("8").unwrap().to_string(), "8.00");
        assert_eq!(Money::parse("12,5").unwrap().to_string(), "12.50");
    }

    proptest! {
        /// Any amount with at most two decimal places survives a
        /// display-then-parse round trip unchanged.
        #[test]
        fn prop_display_parse_round_trip(cents in 0i64..10_000_000) {
            let amount = Money(Decimal::new(cents, 2));
            let round_tripped = Money::parse(&amount.to_string()).unwrap();
            prop_assert_eq!(amount, round_tripped);
        }

        /// Comma and dot decimal separators parse to the same amount.
        #[test]
        fn prop_comma_equals_dot(whole in 0u32..100_000u32, frac in 0u32..100u32) {
            let with_dot = format!("{}.{:02}", whole, frac);
            let with_comma = format!("{},{:02}", whole, frac);
            prop_assert_eq!(
                Money::parse(&with_dot).unwrap(),
                Money::parse(&with_comma).unwrap()
            );
        }
    }

    #[test]
    fn test_from_f64_price_input() {
        // DTO prices arrive as JSON numbers; make sure the serde-float path
        // produces the same amount as the text parser.
        let from_json: Money = serde_json::from_str("12.5").unwrap();
        let expected = Decimal::from_f64(12.5).unwrap();
        assert_eq!(from_json.0, expected);
    }
}
