use rust_decimal::Decimal;
use uuid::Uuid;

use guardpost_domain::pagination::PageRequest;
use guardpost_workforce::domain::ledger::{
    GroupBy, LedgerFilter, LedgerKind, LedgerPatch, PaymentMethod,
};
use guardpost_workforce::error::WorkforceServiceError;
use guardpost_workforce::usecase::ledger::{
    EditLedgerEntryUseCase, GetLedgerEntryUseCase, LedgerReportUseCase, ListLedgerEntriesUseCase,
    RecordLedgerEntryInput, RecordLedgerEntryUseCase, SetLedgerClassificationUseCase,
};

use crate::helpers::{MockLedgerRepo, MockStaffRepo, approved_operator, day, pending_operator};

fn money(kind: LedgerKind, amount: i64, method: PaymentMethod, category: &str) -> RecordLedgerEntryInput {
    RecordLedgerEntryInput {
        kind,
        amount: Some(Decimal::new(amount, 0)),
        category: category.to_owned(),
        payment_method: method,
        description: "Monthly guard fee".to_owned(),
        reference: None,
        transaction_date: day(2026, 10, 5),
        staff_id: None,
        salary_period: None,
    }
}

fn salary(staff_id: Uuid, amount: Option<Decimal>) -> RecordLedgerEntryInput {
    RecordLedgerEntryInput {
        kind: LedgerKind::Salary,
        amount,
        category: String::new(),
        payment_method: PaymentMethod::BankTransfer,
        description: "October salary".to_owned(),
        reference: None,
        transaction_date: day(2026, 10, 28),
        staff_id: Some(staff_id),
        salary_period: Some("2026-10".to_owned()),
    }
}

#[tokio::test]
async fn should_default_salary_amount_to_staff_salary() {
    let operator = approved_operator();
    let uc = RecordLedgerEntryUseCase {
        ledger: MockLedgerRepo::default(),
        staff: MockStaffRepo::new(vec![operator.clone()]),
    };

    let entry = uc
        .execute(salary(operator.user.id, None), Uuid::now_v7())
        .await
        .unwrap();

    assert_eq!(entry.kind, LedgerKind::Salary);
    assert_eq!(Some(entry.fields.amount), operator.profile.salary);
    assert_eq!(entry.fields.category, "Salary");
    assert!(!entry.is_classified);
    assert!(entry.edit_history.is_empty());
}

#[tokio::test]
async fn should_require_salary_period_for_salary_entries() {
    let operator = approved_operator();
    let uc = RecordLedgerEntryUseCase {
        ledger: MockLedgerRepo::default(),
        staff: MockStaffRepo::new(vec![operator.clone()]),
    };
    let mut input = salary(operator.user.id, None);
    input.salary_period = None;

    let result = uc.execute(input, Uuid::now_v7()).await;

    assert!(
        matches!(result, Err(WorkforceServiceError::MissingData)),
        "expected MissingData, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_salary_for_unapproved_staff() {
    let pending = pending_operator();
    let uc = RecordLedgerEntryUseCase {
        ledger: MockLedgerRepo::default(),
        staff: MockStaffRepo::new(vec![pending.clone()]),
    };

    let result = uc
        .execute(
            salary(pending.user.id, Some(Decimal::new(50_000, 0))),
            Uuid::now_v7(),
        )
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::StaffNotApproved)),
        "expected StaffNotApproved, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_non_positive_amount() {
    let uc = RecordLedgerEntryUseCase {
        ledger: MockLedgerRepo::default(),
        staff: MockStaffRepo::empty(),
    };

    let result = uc
        .execute(
            money(LedgerKind::MoneyIn, 0, PaymentMethod::Cash, "Fees"),
            Uuid::now_v7(),
        )
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_append_one_history_record_per_edit() {
    let ledger = MockLedgerRepo::default();
    let record = RecordLedgerEntryUseCase {
        ledger: ledger.clone(),
        staff: MockStaffRepo::empty(),
    };
    let entry = record
        .execute(
            money(LedgerKind::MoneyOut, 12_000, PaymentMethod::Cash, "Fuel"),
            Uuid::now_v7(),
        )
        .await
        .unwrap();
    let original = entry.fields.clone();

    let edit = EditLedgerEntryUseCase {
        ledger: ledger.clone(),
    };
    let editor = Uuid::now_v7();
    for amount in [13_000, 14_500, 15_000] {
        edit.execute(
            entry.id,
            LedgerPatch {
                amount: Some(Decimal::new(amount, 0)),
                ..Default::default()
            },
            editor,
            false,
        )
        .await
        .unwrap();
    }
    let edited = edit
        .execute(
            entry.id,
            LedgerPatch {
                category: Some("Generator fuel".to_owned()),
                ..Default::default()
            },
            editor,
            false,
        )
        .await
        .unwrap();

    assert_eq!(edited.edit_history.len(), 4);
    assert_eq!(edited.fields.amount, Decimal::new(15_000, 0));
    assert_eq!(edited.fields.category, "Generator fuel");
    assert_eq!(edited.original_fields(), &original);
    assert_eq!(edited.replay().as_ref(), Some(&edited.fields));

    let stored = ledger.entries_handle();
    assert_eq!(stored.lock().unwrap()[0].edit_history.len(), 4);
}

#[tokio::test]
async fn should_refuse_edit_when_history_does_not_reproduce_fields() {
    let ledger = MockLedgerRepo::default();
    let entry = RecordLedgerEntryUseCase {
        ledger: ledger.clone(),
        staff: MockStaffRepo::empty(),
    }
    .execute(
        money(LedgerKind::MoneyIn, 50_000, PaymentMethod::Cash, "Guard fees"),
        Uuid::now_v7(),
    )
    .await
    .unwrap();
    let edit = EditLedgerEntryUseCase {
        ledger: ledger.clone(),
    };
    edit.execute(
        entry.id,
        LedgerPatch {
            amount: Some(Decimal::new(55_000, 0)),
            ..Default::default()
        },
        Uuid::now_v7(),
        false,
    )
    .await
    .unwrap();
    ledger.entries_handle().lock().unwrap()[0].fields.amount = Decimal::new(99_000, 0);

    let result = edit
        .execute(
            entry.id,
            LedgerPatch {
                description: Some("Adjusted".to_owned()),
                ..Default::default()
            },
            Uuid::now_v7(),
            false,
        )
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::Internal(_))),
        "expected Internal, got {result:?}"
    );
    assert_eq!(
        ledger.entries_handle().lock().unwrap()[0].edit_history.len(),
        1
    );
}

#[tokio::test]
async fn should_clear_reference_on_explicit_null() {
    let ledger = MockLedgerRepo::default();
    let entry = RecordLedgerEntryUseCase {
        ledger: ledger.clone(),
        staff: MockStaffRepo::empty(),
    }
    .execute(
        RecordLedgerEntryInput {
            reference: Some("TRX-4410".to_owned()),
            ..money(LedgerKind::MoneyOut, 8_000, PaymentMethod::BankTransfer, "Uniforms")
        },
        Uuid::now_v7(),
    )
    .await
    .unwrap();

    let edited = EditLedgerEntryUseCase { ledger }
        .execute(
            entry.id,
            LedgerPatch {
                reference: Some(None),
                ..Default::default()
            },
            Uuid::now_v7(),
            false,
        )
        .await
        .unwrap();

    assert_eq!(edited.fields.reference, None);
    assert_eq!(
        edited.edit_history[0].before.reference.as_deref(),
        Some("TRX-4410")
    );
}

#[tokio::test]
async fn should_reject_empty_edit() {
    let ledger = MockLedgerRepo::default();
    let result = EditLedgerEntryUseCase { ledger }
        .execute(Uuid::now_v7(), LedgerPatch::default(), Uuid::now_v7(), true)
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::MissingData)),
        "expected MissingData, got {result:?}"
    );
}

#[tokio::test]
async fn should_hide_classified_entries_from_unprivileged_readers() {
    let ledger = MockLedgerRepo::default();
    let record = RecordLedgerEntryUseCase {
        ledger: ledger.clone(),
        staff: MockStaffRepo::empty(),
    };
    let secret = record
        .execute(
            money(LedgerKind::MoneyOut, 500_000, PaymentMethod::Cheque, "Legal"),
            Uuid::now_v7(),
        )
        .await
        .unwrap();
    record
        .execute(
            money(LedgerKind::MoneyIn, 80_000, PaymentMethod::Pos, "Fees"),
            Uuid::now_v7(),
        )
        .await
        .unwrap();

    let classified = SetLedgerClassificationUseCase {
        ledger: ledger.clone(),
    }
    .execute(secret.id, true, Uuid::now_v7())
    .await
    .unwrap();
    assert!(classified.is_classified);

    let list = ListLedgerEntriesUseCase {
        ledger: ledger.clone(),
    };
    let visible = list
        .execute(LedgerFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(visible.total, 1);
    assert!(visible.items.iter().all(|e| e.id != secret.id));

    let all = list
        .execute(
            LedgerFilter {
                include_classified: true,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(all.total, 2);

    let get = GetLedgerEntryUseCase {
        ledger: ledger.clone(),
    };
    let hidden = get.execute(secret.id, false).await;
    assert!(
        matches!(hidden, Err(WorkforceServiceError::LedgerEntryNotFound)),
        "expected LedgerEntryNotFound, got {hidden:?}"
    );
    assert!(get.execute(secret.id, true).await.is_ok());
}

#[tokio::test]
async fn should_total_report_by_payment_method() {
    let ledger = MockLedgerRepo::default();
    let record = RecordLedgerEntryUseCase {
        ledger: ledger.clone(),
        staff: MockStaffRepo::empty(),
    };
    for (amount, method) in [
        (10_000, PaymentMethod::Cash),
        (5_000, PaymentMethod::Cash),
        (20_000, PaymentMethod::BankTransfer),
    ] {
        record
            .execute(
                money(LedgerKind::MoneyIn, amount, method, "Fees"),
                Uuid::now_v7(),
            )
            .await
            .unwrap();
    }

    let report = LedgerReportUseCase { ledger }
        .execute(
            LedgerFilter {
                kind: Some(LedgerKind::MoneyIn),
                ..Default::default()
            },
            GroupBy::PaymentMethod,
            PageRequest::new(Some(2), Some(1)),
        )
        .await
        .unwrap();

    assert_eq!(report.grand_total, Decimal::new(35_000, 0));
    assert_eq!(report.entries.total, 3);
    assert_eq!(report.entries.items.len(), 2);
    let cash = report.groups.iter().find(|g| g.key == "CASH").unwrap();
    assert_eq!(cash.total, Decimal::new(15_000, 0));
    assert_eq!(cash.count, 2);
    let bank = report
        .groups
        .iter()
        .find(|g| g.key == "BANK_TRANSFER")
        .unwrap();
    assert_eq!(bank.count, 1);
}

#[tokio::test]
async fn should_reject_inverted_date_range() {
    let result = LedgerReportUseCase {
        ledger: MockLedgerRepo::default(),
    }
    .execute(
        LedgerFilter {
            from: Some(day(2026, 10, 31)),
            to: Some(day(2026, 10, 1)),
            ..Default::default()
        },
        GroupBy::Category,
        PageRequest::default(),
    )
    .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidDateRange)),
        "expected InvalidDateRange, got {result:?}"
    );
}
