use uuid::Uuid;

use guardpost_workforce::domain::document::ExpiryStatus;
use guardpost_workforce::error::WorkforceServiceError;
use guardpost_workforce::usecase::document::{
    CreateDocumentInput, CreateDocumentUseCase, DeleteDocumentUseCase,
    ListExpiringDocumentsUseCase,
};

use crate::helpers::{MockDocumentRepo, MockStaffRepo, approved_operator, day};

fn licence(owner_id: Uuid, expires_on: Option<chrono::NaiveDate>) -> CreateDocumentInput {
    CreateDocumentInput {
        owner_id,
        title: "Firearm licence".to_owned(),
        document_type: "LICENCE".to_owned(),
        file_url: "https://files.example.com/licence.pdf".to_owned(),
        expires_on,
    }
}

#[tokio::test]
async fn should_record_document_for_existing_staff() {
    let owner = approved_operator();
    let documents = MockDocumentRepo::default();
    let uc = CreateDocumentUseCase {
        documents: documents.clone(),
        staff: MockStaffRepo::new(vec![owner.clone()]),
    };

    let document = uc
        .execute(licence(owner.user.id, Some(day(2027, 1, 1))), Uuid::now_v7())
        .await
        .unwrap();

    assert_eq!(document.owner_id, owner.user.id);
    assert_eq!(documents.documents.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_non_http_file_url() {
    let owner = approved_operator();
    let uc = CreateDocumentUseCase {
        documents: MockDocumentRepo::default(),
        staff: MockStaffRepo::new(vec![owner.clone()]),
    };
    let mut input = licence(owner.user.id, None);
    input.file_url = "ftp://files.example.com/licence.pdf".to_owned();

    let result = uc.execute(input, Uuid::now_v7()).await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_document_for_unknown_owner() {
    let uc = CreateDocumentUseCase {
        documents: MockDocumentRepo::default(),
        staff: MockStaffRepo::empty(),
    };

    let result = uc.execute(licence(Uuid::now_v7(), None), Uuid::now_v7()).await;

    assert!(
        matches!(result, Err(WorkforceServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_list_expired_and_soon_expiring_documents_soonest_first() {
    let owner = approved_operator();
    let documents = MockDocumentRepo::default();
    let create = CreateDocumentUseCase {
        documents: documents.clone(),
        staff: MockStaffRepo::new(vec![owner.clone()]),
    };
    for expires_on in [
        Some(day(2026, 11, 10)),
        Some(day(2026, 10, 1)),
        Some(day(2027, 6, 1)),
        None,
    ] {
        create
            .execute(licence(owner.user.id, expires_on), Uuid::now_v7())
            .await
            .unwrap();
    }
    let today = day(2026, 10, 16);

    let expiring = ListExpiringDocumentsUseCase {
        documents,
        warning_days: 30,
    }
    .execute(None, today)
    .await
    .unwrap();

    assert_eq!(expiring.len(), 2);
    assert_eq!(expiring[0].expires_on, Some(day(2026, 10, 1)));
    assert_eq!(expiring[0].expiry_status(today, 30), ExpiryStatus::Expired);
    assert_eq!(
        expiring[1].expiry_status(today, 30),
        ExpiryStatus::ExpiringSoon
    );
    assert_eq!(expiring[1].days_left(today), Some(25));
}

#[tokio::test]
async fn should_reject_expiry_window_past_calendar_range() {
    let result = ListExpiringDocumentsUseCase {
        documents: MockDocumentRepo::default(),
        warning_days: 30,
    }
    .execute(Some(u32::MAX), day(2026, 10, 16))
    .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_missing_document_on_delete() {
    let result = DeleteDocumentUseCase {
        documents: MockDocumentRepo::default(),
    }
    .execute(Uuid::now_v7(), Uuid::now_v7())
    .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::DocumentNotFound)),
        "expected DocumentNotFound, got {result:?}"
    );
}
