use crate::domain::{
    CurrencyType, InputError, Investment, InvestmentKind, InvestmentStatus, MonthlyData,
    month_bounds,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct InvestmentInput {
    pub date: NaiveDate,
    pub name: String,
    /// Kept as entered; investment amounts skip the USD normalization applied
    /// to expenses and incomes.
    pub amount: Decimal,
    pub usd_rate: Decimal,
    pub kind: InvestmentKind,
    pub expected_end_date: NaiveDate,
}

impl InvestmentInput {
    fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::EmptyName);
        }
        if self.amount <= Decimal::ZERO {
            return Err(InputError::NonPositive("amount"));
        }
        if self.usd_rate <= Decimal::ZERO {
            return Err(InputError::NonPositive("usdRate"));
        }
        Ok(())
    }
}

/// New investments always open as `Active`; the only path to `Finished` is an
/// explicit status passed to `update`.
pub fn add(data: &MonthlyData, input: InvestmentInput) -> Result<MonthlyData, InputError> {
    input.validate()?;

    let investment = Investment {
        id: Uuid::new_v4(),
        date: input.date,
        name: input.name.clone(),
        amount: input.amount,
        kind: input.kind,
        status: InvestmentStatus::Active,
        expected_end_date: input.expected_end_date,
        usd_rate: input.usd_rate,
        currency_type: CurrencyType::Ars,
    };

    let mut next = data.clone();
    next.investments.push(investment);
    Ok(next)
}

pub fn update(
    data: &MonthlyData,
    id: Uuid,
    input: &InvestmentInput,
    status: InvestmentStatus,
) -> Result<Option<MonthlyData>, InputError> {
    input.validate()?;

    let Some(pos) = data.investments.iter().position(|i| i.id == id) else {
        return Ok(None);
    };

    let mut next = data.clone();
    let record = &mut next.investments[pos];
    record.date = input.date;
    record.name = input.name.clone();
    record.amount = input.amount;
    record.usd_rate = input.usd_rate;
    record.kind = input.kind;
    record.status = status;
    record.expected_end_date = input.expected_end_date;
    Ok(Some(next))
}

pub fn delete(data: &MonthlyData, id: Uuid) -> Option<MonthlyData> {
    if !data.investments.iter().any(|i| i.id == id) {
        return None;
    }
    let mut next = data.clone();
    next.investments.retain(|i| i.id != id);
    Some(next)
}

pub fn filter_by_month<'a>(
    investments: &'a [Investment],
    month_key: &str,
) -> Result<Vec<&'a Investment>, InputError> {
    let (start, end) = month_bounds(month_key)?;
    Ok(investments
        .iter()
        .filter(|i| i.date >= start && i.date <= end)
        .collect())
}

pub fn total<'a, I>(investments: I) -> Decimal
where
    I: IntoIterator<Item = &'a Investment>,
{
    investments.into_iter().map(|i| i.amount).sum()
}
