use chrono::NaiveDate;
use monedero::{
    Category, EnteredAmount, ExpenseInput, JsonStore, SalaryInput, Tracker,
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

fn store_in(home: &tempfile::TempDir) -> JsonStore {
    JsonStore::open(Some(home.path().to_path_buf())).expect("store")
}

fn expense(day: &str, name: &str, amount: &str) -> ExpenseInput {
    ExpenseInput {
        date: date(day),
        name: name.to_string(),
        amount: EnteredAmount::Ars(dec(amount)),
        usd_rate: dec("1000"),
        category: Category::Supermercado,
        installments: 1,
    }
}

#[test]
fn current_month_key_recombines_the_two_selectors() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut tracker = Tracker::open(store_in(&home));

    tracker.set_selected_year("2030");
    tracker.set_selected_month("2024-05");
    assert_eq!(tracker.current_month_key(), "2030-05");
}

#[test]
fn mutations_persist_across_reopen() {
    let home = tempfile::tempdir().expect("tempdir");

    {
        let mut tracker = Tracker::open(store_in(&home));
        tracker.set_selected_year("2024");
        tracker.set_selected_month("2024-05");
        tracker.add_expense(expense("2024-05-10", "Supermercado", "40000")).expect("add");
        tracker.set_salary(SalaryInput { amount: dec("500000"), usd_rate: dec("1200") })
            .expect("salary");
    }

    let tracker = Tracker::open(store_in(&home));
    assert_eq!(tracker.data().expenses.len(), 1);
    assert_eq!(tracker.data().expenses[0].name, "Supermercado");
    assert!(tracker.data().salary("2024-05").is_some());
}

#[test]
fn update_without_an_edit_target_is_a_noop() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut tracker = Tracker::open(store_in(&home));
    tracker.add_expense(expense("2024-05-10", "Supermercado", "40000")).expect("add");

    let before = tracker.data().clone();
    let changed = tracker
        .update_expense(&expense("2024-05-11", "Otro", "99999"))
        .expect("update");
    assert!(!changed);
    assert_eq!(tracker.data(), &before);
}

#[test]
fn editing_flow_updates_the_selected_record_once() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut tracker = Tracker::open(store_in(&home));
    tracker.add_expense(expense("2024-05-10", "Supermercado", "40000")).expect("add");
    let id = tracker.data().expenses[0].id;

    tracker.edit_expense(id);
    assert_eq!(tracker.editing_expense(), Some(id));

    let changed = tracker
        .update_expense(&expense("2024-05-11", "Supermercado chino", "45000"))
        .expect("update");
    assert!(changed);
    assert_eq!(tracker.data().expenses[0].name, "Supermercado chino");
    // The edit target is consumed; a second submit changes nothing.
    assert_eq!(tracker.editing_expense(), None);
    let again = tracker
        .update_expense(&expense("2024-05-12", "Otra cosa", "1"))
        .expect("update");
    assert!(!again);
}

#[test]
fn edit_target_survives_a_rejected_submit() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut tracker = Tracker::open(store_in(&home));
    tracker.add_expense(expense("2024-05-10", "Supermercado", "40000")).expect("add");
    let id = tracker.data().expenses[0].id;

    tracker.edit_expense(id);
    tracker
        .update_expense(&expense("2024-05-11", "Supermercado", "0"))
        .expect_err("zero amount");
    // The session is still open, so a corrected resubmit goes through.
    assert_eq!(tracker.editing_expense(), Some(id));

    let changed = tracker
        .update_expense(&expense("2024-05-11", "Supermercado chino", "45000"))
        .expect("corrected resubmit");
    assert!(changed);
    assert_eq!(tracker.data().expenses[0].amount, dec("45000"));
    assert_eq!(tracker.editing_expense(), None);
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut tracker = Tracker::open(store_in(&home));
    tracker.add_expense(expense("2024-05-10", "Supermercado", "40000")).expect("add");

    let before = tracker.data().clone();
    assert!(!tracker.delete_expense(Uuid::new_v4()).expect("delete"));
    assert_eq!(tracker.data(), &before);
}

#[test]
fn filtered_views_follow_the_selected_month() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut tracker = Tracker::open(store_in(&home));
    tracker.set_selected_year("2024");
    tracker.set_selected_month("2024-05");
    tracker.add_expense(expense("2024-05-10", "Supermercado", "40000")).expect("add");
    tracker.add_expense(expense("2024-06-10", "Supermercado", "50000")).expect("add");

    assert_eq!(tracker.filtered_expenses().expect("filter").len(), 1);
    assert_eq!(tracker.total_expenses().expect("total"), dec("40000"));

    tracker.set_selected_month("2024-06");
    assert_eq!(tracker.total_expenses().expect("total"), dec("50000"));
}
