use crate::domain::{
    Category, EnteredAmount, Expense, InputError, Installments, MonthlyData, add_months,
    month_bounds,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub name: String,
    pub amount: EnteredAmount,
    pub usd_rate: Decimal,
    pub category: Category,
    /// 1 for a single charge.
    pub installments: u32,
}

impl ExpenseInput {
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
        if self.installments == 0 {
            return Err(InputError::ZeroInstallments);
        }
        Ok(())
    }
}

pub fn add(data: &MonthlyData, input: ExpenseInput) -> Result<MonthlyData, InputError> {
    input.validate()?;

    let base = Expense {
        id: Uuid::new_v4(),
        date: input.date,
        name: input.name.clone(),
        amount: input.amount.normalized(input.usd_rate),
        usd_rate: input.usd_rate,
        category: input.category,
        currency_type: input.amount.currency(),
        installments: None,
    };

    let mut next = data.clone();
    if input.installments > 1 {
        next.expenses
            .extend(expand_installments(base, input.installments));
    } else {
        next.expenses.push(base);
    }
    Ok(next)
}

/// One record per installment: fresh ids, dates walked out from the start
/// date one calendar month at a time, same amount on each.
fn expand_installments(base: Expense, total: u32) -> Vec<Expense> {
    (0..total)
        .map(|i| Expense {
            id: Uuid::new_v4(),
            date: add_months(base.date, i),
            installments: Some(Installments {
                total,
                current: i + 1,
                start_date: base.date,
            }),
            ..base.clone()
        })
        .collect()
}

/// Replaces the mutable fields of the matching record, keeping its id and
/// installment metadata. Edits touch only this record; an installment series
/// is never re-expanded. `None` when the id matches nothing.
pub fn update(
    data: &MonthlyData,
    id: Uuid,
    input: &ExpenseInput,
) -> Result<Option<MonthlyData>, InputError> {
    input.validate()?;

    let Some(pos) = data.expenses.iter().position(|e| e.id == id) else {
        return Ok(None);
    };

    let mut next = data.clone();
    let record = &mut next.expenses[pos];
    record.date = input.date;
    record.name = input.name.clone();
    record.amount = input.amount.normalized(input.usd_rate);
    record.usd_rate = input.usd_rate;
    record.category = input.category;
    record.currency_type = input.amount.currency();
    Ok(Some(next))
}

/// `None` when the id matches nothing, leaving the dataset untouched.
pub fn delete(data: &MonthlyData, id: Uuid) -> Option<MonthlyData> {
    if !data.expenses.iter().any(|e| e.id == id) {
        return None;
    }
    let mut next = data.clone();
    next.expenses.retain(|e| e.id != id);
    Some(next)
}

pub fn filter_by_month<'a>(
    expenses: &'a [Expense],
    month_key: &str,
) -> Result<Vec<&'a Expense>, InputError> {
    let (start, end) = month_bounds(month_key)?;
    Ok(expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .collect())
}

pub fn total<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|e| e.amount).sum()
}
