use crate::domain::{
    EnteredAmount, ExtraIncome, InputError, MonthlyData, Salary, month_bounds,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ExtraIncomeInput {
    pub date: NaiveDate,
    pub name: String,
    pub amount: EnteredAmount,
    pub usd_rate: Decimal,
}

impl ExtraIncomeInput {
    fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::EmptyName);
        }
        if self.amount.value() <= Decimal::ZERO {
            return Err(InputError::NonPositive("amount"));
        }
        if self.usd_rate <= Decimal::ZERO {
            return Err(InputError::NonPositive("usdRate"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SalaryInput {
    pub amount: Decimal,
    pub usd_rate: Decimal,
}

impl SalaryInput {
    fn validate(&self) -> Result<(), InputError> {
        if self.amount <= Decimal::ZERO {
            return Err(InputError::NonPositive("amount"));
        }
        if self.usd_rate <= Decimal::ZERO {
            return Err(InputError::NonPositive("usdRate"));
        }
        Ok(())
    }
}

pub fn add(data: &MonthlyData, input: ExtraIncomeInput) -> Result<MonthlyData, InputError> {
    input.validate()?;

    let income = ExtraIncome {
        id: Uuid::new_v4(),
        date: input.date,
        name: input.name.clone(),
        amount: input.amount.normalized(input.usd_rate),
        usd_rate: input.usd_rate,
        currency_type: input.amount.currency(),
    };

    let mut next = data.clone();
    next.extra_incomes.push(income);
    Ok(next)
}

pub fn update(
    data: &MonthlyData,
    id: Uuid,
    input: &ExtraIncomeInput,
) -> Result<Option<MonthlyData>, InputError> {
    input.validate()?;

    let Some(pos) = data.extra_incomes.iter().position(|i| i.id == id) else {
        return Ok(None);
    };

    let mut next = data.clone();
    let record = &mut next.extra_incomes[pos];
    record.date = input.date;
    record.name = input.name.clone();
    record.amount = input.amount.normalized(input.usd_rate);
    record.usd_rate = input.usd_rate;
    record.currency_type = input.amount.currency();
    Ok(Some(next))
}

pub fn delete(data: &MonthlyData, id: Uuid) -> Option<MonthlyData> {
    if !data.extra_incomes.iter().any(|i| i.id == id) {
        return None;
    }
    let mut next = data.clone();
    next.extra_incomes.retain(|i| i.id != id);
    Some(next)
}

pub fn filter_by_month<'a>(
    incomes: &'a [ExtraIncome],
    month_key: &str,
) -> Result<Vec<&'a ExtraIncome>, InputError> {
    let (start, end) = month_bounds(month_key)?;
    Ok(incomes
        .iter()
        .filter(|i| i.date >= start && i.date <= end)
        .collect())
}

pub fn total<'a, I>(incomes: I) -> Decimal
where
    I: IntoIterator<Item = &'a ExtraIncome>,
{
    incomes.into_iter().map(|i| i.amount).sum()
}

/// Upserts the single salary entry for the month key, overwriting any prior
/// value unconditionally.
pub fn set_salary(
    data: &MonthlyData,
    month_key: &str,
    input: SalaryInput,
) -> Result<MonthlyData, InputError> {
    input.validate()?;
    month_bounds(month_key)?;

    let mut next = data.clone();
    next.salaries.insert(
        month_key.to_string(),
        Salary {
            amount: input.amount,
            usd_rate: input.usd_rate,
        },
    );
    Ok(next)
}
