use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

use super::Money;

/// One line of an order: a snapshot of the referenced menu item
///
/// `name` and `price` are copied from the menu row when the order is created,
/// so the order keeps displaying what the customer actually paid even after
/// the menu changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The id of the referenced menu item
    pub id: i32,

    /// The menu item name at order time
    pub name: String,

    /// The unit price at order time
    pub price: Money,

    /// How many units were ordered
    pub quantity: i32,
}

impl OrderLine {
    /// The line subtotal (`price × quantity`)
    pub fn subtotal(&self) -> Money {
        Money(self.price.0 * rust_decimal::Decimal::from(self.quantity))
    }
}

/// The line items of an order, serialized as JSON in a single TEXT column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct LineItems(pub Vec<OrderLine>);

impl LineItems {
    /// The sum of all line subtotals
    pub fn total(&self) -> Money {
        Money(self.0.iter().map(|line| line.subtotal().0).sum())
    }
}

impl FromSql<Text, Sqlite> for LineItems {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let lines = serde_json::from_str(&text)?;
        Ok(LineItems(lines))
    }
}

impl ToSql<Text, Sqlite> for LineItems {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);
        Ok(IsNull::No)
    }
}
