use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
    #[error("name must not be empty")]
    EmptyName,
    #[error("installment count must be at least 1")]
    ZeroInstallments,
    #[error("invalid month key: {0} (expected YYYY-MM)")]
    BadMonthKey(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyType {
    #[default]
    #[serde(rename = "ARS")]
    Ars,
    #[serde(rename = "USD")]
    Usd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Alquiler,
    Supermercado,
    Entretenimiento,
    Salidas,
    Vacaciones,
    Servicios,
    Vestimenta,
    Subscripciones,
    Insumos,
    Estudio,
    Otros,
    Gym,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentKind {
    #[serde(rename = "Plazo Fijo")]
    FixedTerm,
    #[serde(rename = "Acciones")]
    Stocks,
    #[serde(rename = "Bonos")]
    Bonds,
    #[serde(rename = "Otros")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentStatus {
    #[serde(rename = "Activa")]
    Active,
    #[serde(rename = "Finalizada")]
    Finished,
}

/// Metadata shared by the sibling records of a multi-month expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installments {
    pub total: u32,
    /// Position of this record in the series, 1..=total.
    pub current: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    /// Always normalized to ARS at entry time.
    pub amount: Decimal,
    pub usd_rate: Decimal,
    pub category: Category,
    #[serde(default)]
    pub currency_type: CurrencyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Installments>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraIncome {
    pub id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub amount: Decimal,
    pub usd_rate: Decimal,
    #[serde(default)]
    pub currency_type: CurrencyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    /// Entered value as-is; investment amounts are not rate-normalized.
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: InvestmentKind,
    pub status: InvestmentStatus,
    pub expected_end_date: NaiveDate,
    pub usd_rate: Decimal,
    #[serde(default)]
    pub currency_type: CurrencyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub amount: Decimal,
    pub usd_rate: Decimal,
}

/// The single persisted aggregate root. Replaced wholesale on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    pub salaries: BTreeMap<String, Salary>,
    pub expenses: Vec<Expense>,
    pub extra_incomes: Vec<ExtraIncome>,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

impl MonthlyData {
    pub fn salary(&self, month_key: &str) -> Option<&Salary> {
        self.salaries.get(month_key)
    }
}

/// A user-entered amount in either currency, resolved to a stored ARS value
/// at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnteredAmount {
    Ars(Decimal),
    Usd(Decimal),
}

impl EnteredAmount {
    pub fn value(self) -> Decimal {
        match self {
            EnteredAmount::Ars(v) | EnteredAmount::Usd(v) => v,
        }
    }

    pub fn currency(self) -> CurrencyType {
        match self {
            EnteredAmount::Ars(_) => CurrencyType::Ars,
            EnteredAmount::Usd(_) => CurrencyType::Usd,
        }
    }

    /// The ARS value to store: USD entries are converted with the record's rate.
    pub fn normalized(self, usd_rate: Decimal) -> Decimal {
        match self {
            EnteredAmount::Ars(v) => v,
            EnteredAmount::Usd(v) => v * usd_rate,
        }
    }
}

/// USD view of a stored ARS amount. A non-positive rate (possible only in
/// records predating rate validation) yields zero rather than dividing by it.
pub fn to_usd(amount: Decimal, usd_rate: Decimal) -> Decimal {
    if usd_rate > Decimal::ZERO {
        amount / usd_rate
    } else {
        Decimal::ZERO
    }
}

/// Combines the selected year with the month portion of the separately
/// selected month string ("2026" + "2025-08" -> "2026-08").
pub fn month_key(year: &str, month: &str) -> String {
    let month_part = month.split_once('-').map(|(_, m)| m).unwrap_or(month);
    format!("{year}-{month_part}")
}

/// First and last day of the month named by a YYYY-MM key, both inclusive.
pub fn month_bounds(key: &str) -> Result<(NaiveDate, NaiveDate), InputError> {
    let bad = || InputError::BadMonthKey(key.to_string());
    let (y, m) = key.split_once('-').ok_or_else(bad)?;
    let year: i32 = y.parse().map_err(|_| bad())?;
    let month: u32 = m.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) {
        return Err(bad());
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(bad)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(bad)?
        .pred_opt()
        .ok_or_else(bad)?;
    Ok((start, end))
}

/// Same day-of-month `months` calendar months later. A day past the end of
/// the target month rolls forward into the following month (Jan 31 plus one
/// month lands on Mar 2 or Mar 3).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months as i32;
    let (year, month) = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);
    if let Some(d) = NaiveDate::from_ymd_opt(year, month, date.day()) {
        return d;
    }
    let last = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1),
    }
    .and_then(|d| d.pred_opt())
    .unwrap_or(date);
    last + Days::new((date.day() - last.day()) as u64)
}

/// Upgrades documents written under older schemas: records without a
/// currency type default to ARS, and a missing `investments` array becomes
/// empty. Applied by the store before typed deserialization.
pub fn migrate_monthly_data(mut value: Value) -> Value {
    let Some(root) = value.as_object_mut() else {
        return value;
    };

    if !root.get("investments").is_some_and(Value::is_array) {
        root.insert("investments".to_string(), Value::Array(Vec::new()));
    }

    for key in ["expenses", "extraIncomes", "investments"] {
        let Some(records) = root.get_mut(key).and_then(Value::as_array_mut) else {
            continue;
        };
        for record in records {
            let Some(obj) = record.as_object_mut() else {
                continue;
            };
            let unset = match obj.get("currencyType") {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if unset {
                obj.insert("currencyType".to_string(), Value::String("ARS".to_string()));
            }
        }
    }

    value
}
