use std::io::Write;

use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode{
    Cash,
    Card,
    Upi,
    BankTransfer
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str{
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
            PaymentMode::BankTransfer => "bank_transfer"
        }
    }
}

impl ToSql<Text, Pg> for PaymentMode {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for PaymentMode {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"cash" => Ok(PaymentMode::Cash),
            b"card" => Ok(PaymentMode::Card),
            b"upi" => Ok(PaymentMode::Upi),
            b"bank_transfer" => Ok(PaymentMode::BankTransfer),
            other => Err(format!(
                "Unrecognized payment mode: {}",
                String::from_utf8_lossy(other)
            ).into())
        }
    }
}
