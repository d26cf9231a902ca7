//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(user: &str, amount: Decimal, category: &str) -> NewExpense {
        NewExpense {
            user: user.to_string(),
            amount,
            category: category.to_string(),
            payment_method: Some("cash".to_string()),
            kind: Frequency::Regular,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        }
    }

    fn income(user: &str, amount: Decimal, description: &str) -> NewIncome {
        NewIncome {
            user: user.to_string(),
            amount,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        }
    }

    #[test]
    fn test_fresh_db_is_empty() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_expenses("u1", None, None).unwrap().is_empty());
        assert!(db.list_incomes("u1", None, None).unwrap().is_empty());
        assert!(db.get_limit("u1").unwrap().is_none());
    }

    #[test]
    fn test_add_then_list_expense() {
        let db = Database::in_memory().unwrap();

        let id = db.add_expense(&expense("u1", dec!(42.50), "food")).unwrap();
        assert!(id > 0);

        let listed = db.list_expenses("u1", Some(3), Some(2025)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].amount, dec!(42.50));
        assert_eq!(listed[0].category, "food");
        assert_eq!(listed[0].payment_method.as_deref(), Some("cash"));
        assert_eq!(listed[0].kind, Frequency::Regular);
    }

    #[test]
    fn test_list_expenses_month_window() {
        let db = Database::in_memory().unwrap();

        let mut march = expense("u1", dec!(10), "food");
        march.date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        db.add_expense(&march).unwrap();

        let mut april = expense("u1", dec!(20), "food");
        april.date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        db.add_expense(&april).unwrap();

        let listed = db.list_expenses("u1", Some(3), Some(2025)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, dec!(10));

        // December window rolls into the next year, not month 13
        let mut december = expense("u1", dec!(30), "food");
        december.date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        db.add_expense(&december).unwrap();
        let listed = db.list_expenses("u1", Some(12), Some(2025)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, dec!(30));
    }

    #[test]
    fn test_expenses_scoped_by_user() {
        let db = Database::in_memory().unwrap();

        db.add_expense(&expense("alice", dec!(10), "food")).unwrap();
        db.add_expense(&expense("bob", dec!(20), "food")).unwrap();

        let alice = db.list_expenses("alice", None, None).unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].amount, dec!(10));
    }

    #[test]
    fn test_edit_expense_all_field_subsets() {
        // Partial-update contract: every combination of the three editable
        // fields touches exactly the supplied fields.
        for mask in 0..8u8 {
            let db = Database::in_memory().unwrap();
            let id = db.add_expense(&expense("u1", dec!(10), "food")).unwrap();

            let patch = ExpensePatch {
                amount: (mask & 1 != 0).then_some(dec!(99.90)),
                category: (mask & 2 != 0).then(|| "transport".to_string()),
                payment_method: (mask & 4 != 0).then(|| "transfer".to_string()),
            };
            db.edit_expense("u1", id, &patch).unwrap();

            let rec = &db.list_expenses("u1", None, None).unwrap()[0];
            let expected_amount = if mask & 1 != 0 { dec!(99.90) } else { dec!(10) };
            let expected_category = if mask & 2 != 0 { "transport" } else { "food" };
            let expected_payment = if mask & 4 != 0 { "transfer" } else { "cash" };
            assert_eq!(rec.amount, expected_amount, "mask {:03b}", mask);
            assert_eq!(rec.category, expected_category, "mask {:03b}", mask);
            assert_eq!(
                rec.payment_method.as_deref(),
                Some(expected_payment),
                "mask {:03b}",
                mask
            );
        }
    }

    #[test]
    fn test_edit_expense_missing_or_foreign_id() {
        let db = Database::in_memory().unwrap();
        let id = db.add_expense(&expense("alice", dec!(10), "food")).unwrap();

        let patch = ExpensePatch {
            amount: Some(dec!(1)),
            ..Default::default()
        };
        assert!(db.edit_expense("alice", id + 1, &patch).unwrap_err().is_not_found());
        // Another user's id behaves exactly like a missing one
        assert!(db.edit_expense("bob", id, &patch).unwrap_err().is_not_found());
        // Empty patch still reports NotFound for a foreign row
        assert!(db
            .edit_expense("bob", id, &ExpensePatch::default())
            .unwrap_err()
            .is_not_found());
        // ...and succeeds as a no-op on an owned row
        db.edit_expense("alice", id, &ExpensePatch::default()).unwrap();

        let rec = &db.list_expenses("alice", None, None).unwrap()[0];
        assert_eq!(rec.amount, dec!(10));
    }

    #[test]
    fn test_remove_expense() {
        let db = Database::in_memory().unwrap();
        let id = db.add_expense(&expense("u1", dec!(10), "food")).unwrap();

        db.remove_expense("u1", id).unwrap();
        assert!(db.list_expenses("u1", None, None).unwrap().is_empty());

        // Removing again, or removing a foreign id, is NotFound and leaves
        // the store unchanged
        assert!(db.remove_expense("u1", id).unwrap_err().is_not_found());

        let other = db.add_expense(&expense("alice", dec!(5), "food")).unwrap();
        assert!(db.remove_expense("bob", other).unwrap_err().is_not_found());
        assert_eq!(db.list_expenses("alice", None, None).unwrap().len(), 1);
    }

    #[test]
    fn test_income_crud() {
        let db = Database::in_memory().unwrap();

        let id = db.add_income(&income("u1", dec!(2500), "salary")).unwrap();
        let listed = db.list_incomes("u1", Some(3), Some(2025)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "salary");

        db.edit_income(
            "u1",
            id,
            &IncomePatch {
                amount: Some(dec!(2600)),
                description: None,
            },
        )
        .unwrap();
        let rec = &db.list_incomes("u1", None, None).unwrap()[0];
        assert_eq!(rec.amount, dec!(2600));
        assert_eq!(rec.description, "salary");

        db.remove_income("u1", id).unwrap();
        assert!(db.remove_income("u1", id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_limit_upsert() {
        let db = Database::in_memory().unwrap();

        assert!(db.get_limit("u1").unwrap().is_none());

        db.set_limit("u1", dec!(500)).unwrap();
        assert_eq!(db.get_limit("u1").unwrap(), Some(dec!(500)));

        // Setting again replaces, never duplicates
        db.set_limit("u1", dec!(800)).unwrap();
        assert_eq!(db.get_limit("u1").unwrap(), Some(dec!(800)));

        let count: i64 = db
            .conn()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM limits WHERE user = 'u1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);

        assert!(db.get_limit("u2").unwrap().is_none());
    }

    #[test]
    fn test_amounts_survive_exactly() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&expense("u1", dec!(0.10), "food")).unwrap();
        db.add_expense(&expense("u1", dec!(1234567.89), "food")).unwrap();

        let listed = db.list_expenses("u1", None, None).unwrap();
        assert_eq!(listed[0].amount, dec!(0.10));
        assert_eq!(listed[1].amount, dec!(1234567.89));
    }
}
