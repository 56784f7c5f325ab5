use chrono::NaiveDate;
use monedero::{
    CurrencyType, InvestmentInput, InvestmentKind, InvestmentStatus, MonthlyData, investment,
};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

fn input(day: &str, name: &str, amount: &str) -> InvestmentInput {
    InvestmentInput {
        date: date(day),
        name: name.to_string(),
        amount: dec(amount),
        usd_rate: dec("1200"),
        kind: InvestmentKind::FixedTerm,
        expected_end_date: date("2024-12-01"),
    }
}

#[test]
fn add_opens_active_with_the_entered_amount() {
    let data = MonthlyData::default();
    let data =
        investment::add(&data, input("2024-05-10", "Plazo fijo mayo", "200000")).expect("add");

    let inv = &data.investments[0];
    assert_eq!(inv.status, InvestmentStatus::Active);
    assert_eq!(inv.currency_type, CurrencyType::Ars);
    // The entered amount is stored as-is, never multiplied by the rate.
    assert_eq!(inv.amount, dec("200000"));
}

#[test]
fn status_changes_only_through_an_explicit_update() {
    let data = MonthlyData::default();
    let data =
        investment::add(&data, input("2024-05-10", "Plazo fijo mayo", "200000")).expect("add");
    let id = data.investments[0].id;
    let edit = input("2024-05-10", "Plazo fijo mayo", "210000");

    // An ordinary field edit keeps the investment active.
    let data = investment::update(&data, id, &edit, InvestmentStatus::Active)
        .expect("valid edit")
        .expect("record exists");
    assert_eq!(data.investments[0].status, InvestmentStatus::Active);
    assert_eq!(data.investments[0].amount, dec("210000"));

    let data = investment::update(&data, id, &edit, InvestmentStatus::Finished)
        .expect("valid edit")
        .expect("record exists");
    assert_eq!(data.investments[0].status, InvestmentStatus::Finished);
}

#[test]
fn delete_is_idempotent() {
    let data = MonthlyData::default();
    let data = investment::add(&data, input("2024-05-10", "Bonos", "50000")).expect("add");
    let id = data.investments[0].id;

    let data = investment::delete(&data, id).expect("record exists");
    assert!(data.investments.is_empty());
    assert!(investment::delete(&data, id).is_none());
}

#[test]
fn month_filter_selects_investments_opened_that_month() {
    let mut data = MonthlyData::default();
    for day in ["2024-04-30", "2024-05-01", "2024-05-31", "2024-06-01"] {
        data = investment::add(&data, input(day, "Plazo fijo", "10000")).expect("add");
    }

    let may = investment::filter_by_month(&data.investments, "2024-05").expect("filter");
    assert_eq!(may.len(), 2);
    assert_eq!(investment::total(may), dec("20000"));
}
