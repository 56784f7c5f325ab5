//! Derived-state engine for a single-user ARS/USD money tracker: entity
//! CRUD with installment expansion, month-filtered views, balance
//! aggregation, and a keyed JSON document store with load-time migration.

pub mod domain;
pub mod expense;
pub mod income;
pub mod investment;
pub mod report;
pub mod store;
pub mod tracker;

pub use domain::{
    Category, CurrencyType, EnteredAmount, Expense, ExtraIncome, InputError, Installments,
    Investment, InvestmentKind, InvestmentStatus, MonthlyData, Salary,
};
pub use expense::ExpenseInput;
pub use income::{ExtraIncomeInput, SalaryInput};
pub use investment::InvestmentInput;
pub use report::{MonthBalance, MonthExpenses, MonthSalary, TotalAvailable};
pub use store::JsonStore;
pub use tracker::{DATA_KEY, Tracker};
