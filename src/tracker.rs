use crate::domain::{
    Expense, ExtraIncome, Investment, InvestmentStatus, MonthlyData, Salary, migrate_monthly_data,
    month_key,
};
use crate::expense::ExpenseInput;
use crate::income::{ExtraIncomeInput, SalaryInput};
use crate::investment::InvestmentInput;
use crate::report::{MonthBalance, MonthExpenses, MonthSalary, TotalAvailable};
use crate::store::JsonStore;
use crate::{expense, income, investment, report};
use anyhow::Result;
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Storage key of the persisted dataset.
pub const DATA_KEY: &str = "monthlyData";

/// Owns the in-memory dataset and the state the presentation layer selects:
/// the viewed year and month, and the per-entity editing target. Every
/// mutation applies a pure engine function, replaces the dataset wholesale,
/// then writes it through the store. A failed write leaves the in-memory
/// effect standing and surfaces the error; `persist` retries it.
pub struct Tracker {
    store: JsonStore,
    data: MonthlyData,
    selected_year: String,
    selected_month: String,
    editing_expense: Option<Uuid>,
    editing_income: Option<Uuid>,
    editing_investment: Option<Uuid>,
}

impl Tracker {
    /// Loads the dataset (or an empty default) and selects the current month.
    pub fn open(store: JsonStore) -> Self {
        let data = store.load(DATA_KEY, MonthlyData::default(), Some(migrate_monthly_data));
        let now = Utc::now();
        Self {
            store,
            data,
            selected_year: now.year().to_string(),
            selected_month: format!("{:04}-{:02}", now.year(), now.month()),
            editing_expense: None,
            editing_income: None,
            editing_investment: None,
        }
    }

    pub fn data(&self) -> &MonthlyData {
        &self.data
    }

    pub fn selected_year(&self) -> &str {
        &self.selected_year
    }

    pub fn set_selected_year(&mut self, year: impl Into<String>) {
        self.selected_year = year.into();
    }

    pub fn selected_month(&self) -> &str {
        &self.selected_month
    }

    pub fn set_selected_month(&mut self, month: impl Into<String>) {
        self.selected_month = month.into();
    }

    /// The selected year recombined with the month portion of the selected
    /// month string.
    pub fn current_month_key(&self) -> String {
        month_key(&self.selected_year, &self.selected_month)
    }

    /// Writes the current dataset to the store. Also the retry path after a
    /// failed save.
    pub fn persist(&self) -> Result<()> {
        self.store.save(DATA_KEY, &self.data)
    }

    fn commit(&mut self, next: MonthlyData) -> Result<()> {
        self.data = next;
        self.persist()
    }

    // Expenses

    pub fn add_expense(&mut self, input: ExpenseInput) -> Result<()> {
        let next = expense::add(&self.data, input)?;
        self.commit(next)
    }

    pub fn edit_expense(&mut self, id: Uuid) {
        self.editing_expense = Some(id);
    }

    pub fn cancel_expense_edit(&mut self) {
        self.editing_expense = None;
    }

    pub fn editing_expense(&self) -> Option<Uuid> {
        self.editing_expense
    }

    /// No-op returning `false` when no record is being edited or the editing
    /// target no longer exists. A rejected input keeps the edit session open
    /// so a corrected resubmit can go through.
    pub fn update_expense(&mut self, input: &ExpenseInput) -> Result<bool> {
        let Some(id) = self.editing_expense else {
            return Ok(false);
        };
        let next = expense::update(&self.data, id, input)?;
        self.editing_expense = None;
        let Some(next) = next else {
            return Ok(false);
        };
        self.commit(next)?;
        Ok(true)
    }

    /// Idempotent: deleting an id with no matching record changes nothing.
    pub fn delete_expense(&mut self, id: Uuid) -> Result<bool> {
        match expense::delete(&self.data, id) {
            Some(next) => {
                self.commit(next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn filtered_expenses(&self) -> Result<Vec<&Expense>> {
        Ok(expense::filter_by_month(
            &self.data.expenses,
            &self.current_month_key(),
        )?)
    }

    pub fn total_expenses(&self) -> Result<Decimal> {
        Ok(expense::total(self.filtered_expenses()?))
    }

    // Extra incomes and salary

    pub fn add_extra_income(&mut self, input: ExtraIncomeInput) -> Result<()> {
        let next = income::add(&self.data, input)?;
        self.commit(next)
    }

    pub fn edit_income(&mut self, id: Uuid) {
        self.editing_income = Some(id);
    }

    pub fn cancel_income_edit(&mut self) {
        self.editing_income = None;
    }

    pub fn editing_income(&self) -> Option<Uuid> {
        self.editing_income
    }

    pub fn update_extra_income(&mut self, input: &ExtraIncomeInput) -> Result<bool> {
        let Some(id) = self.editing_income else {
            return Ok(false);
        };
        let next = income::update(&self.data, id, input)?;
        self.editing_income = None;
        let Some(next) = next else {
            return Ok(false);
        };
        self.commit(next)?;
        Ok(true)
    }

    pub fn delete_extra_income(&mut self, id: Uuid) -> Result<bool> {
        match income::delete(&self.data, id) {
            Some(next) => {
                self.commit(next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn filtered_incomes(&self) -> Result<Vec<&ExtraIncome>> {
        Ok(income::filter_by_month(
            &self.data.extra_incomes,
            &self.current_month_key(),
        )?)
    }

    /// Upserts the salary for the currently selected month.
    pub fn set_salary(&mut self, input: SalaryInput) -> Result<()> {
        let next = income::set_salary(&self.data, &self.current_month_key(), input)?;
        self.commit(next)
    }

    /// `None` when unset; downstream balances treat that as zero income.
    pub fn salary(&self) -> Option<&Salary> {
        self.data.salaries.get(&self.current_month_key())
    }

    // Investments

    pub fn add_investment(&mut self, input: InvestmentInput) -> Result<()> {
        let next = investment::add(&self.data, input)?;
        self.commit(next)
    }

    pub fn edit_investment(&mut self, id: Uuid) {
        self.editing_investment = Some(id);
    }

    pub fn cancel_investment_edit(&mut self) {
        self.editing_investment = None;
    }

    pub fn editing_investment(&self) -> Option<Uuid> {
        self.editing_investment
    }

    pub fn update_investment(
        &mut self,
        input: &InvestmentInput,
        status: InvestmentStatus,
    ) -> Result<bool> {
        let Some(id) = self.editing_investment else {
            return Ok(false);
        };
        let next = investment::update(&self.data, id, input, status)?;
        self.editing_investment = None;
        let Some(next) = next else {
            return Ok(false);
        };
        self.commit(next)?;
        Ok(true)
    }

    pub fn delete_investment(&mut self, id: Uuid) -> Result<bool> {
        match investment::delete(&self.data, id) {
            Some(next) => {
                self.commit(next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn filtered_investments(&self) -> Result<Vec<&Investment>> {
        Ok(investment::filter_by_month(
            &self.data.investments,
            &self.current_month_key(),
        )?)
    }

    // Aggregates

    pub fn total_available(&self) -> TotalAvailable {
        report::total_available(&self.data)
    }

    pub fn month_balance(&self) -> Result<MonthBalance> {
        Ok(report::current_month_available(
            &self.data,
            &self.current_month_key(),
        )?)
    }

    pub fn monthly_expenses(&self) -> Result<Vec<MonthExpenses>> {
        Ok(report::monthly_expenses(&self.data, &self.selected_year)?)
    }

    pub fn monthly_salaries(&self) -> Vec<MonthSalary> {
        report::monthly_salaries(&self.data, &self.selected_year)
    }

    pub fn available_years(&self) -> Vec<String> {
        report::available_years(&self.data)
    }
}
