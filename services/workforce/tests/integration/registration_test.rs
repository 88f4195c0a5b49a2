use rust_decimal::Decimal;
use uuid::Uuid;

use guardpost_domain::role::Role;
use guardpost_workforce::domain::personnel::{ApprovalStatus, PersonalDetails, UserStatus};
use guardpost_workforce::error::WorkforceServiceError;
use guardpost_workforce::usecase::registration::{
    CreateStaffAccountInput, CreateStaffAccountUseCase, RegisterStaffInput, RegisterStaffUseCase,
};

use crate::helpers::{MockStaffRepo, verify_credential};

fn registration(email: &str, role: Role) -> RegisterStaffInput {
    RegisterStaffInput {
        email: email.to_owned(),
        phone: "0801 234 5678".to_owned(),
        first_name: " Amaka ".to_owned(),
        last_name: "Eze".to_owned(),
        role,
        photo_url: None,
        details: PersonalDetails {
            state_of_origin: Some("Enugu".to_owned()),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn should_register_operator_as_pending_with_sequential_employee_id() {
    let repo = MockStaffRepo::empty();
    let members = repo.members_handle();
    let uc = RegisterStaffUseCase { repo };

    let first = uc
        .execute(registration("Amaka@Example.com", Role::Operator), None)
        .await
        .unwrap();
    let second = uc
        .execute(registration("second@example.com", Role::Operator), None)
        .await
        .unwrap();

    assert_eq!(first.user.email, "amaka@example.com");
    assert_eq!(first.user.phone, "+2348012345678");
    assert_eq!(first.user.first_name, "Amaka");
    assert_eq!(first.user.status, UserStatus::Pending);
    assert_eq!(first.profile.approval_status, ApprovalStatus::Pending);
    assert!(first.profile.salary.is_none());
    assert_eq!(first.profile.employee_id, "OPR00001");
    assert_eq!(second.profile.employee_id, "OPR00002");
    assert_eq!(members.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_record_registering_office_user() {
    let secretary = Uuid::now_v7();
    let uc = RegisterStaffUseCase {
        repo: MockStaffRepo::empty(),
    };

    let member = uc
        .execute(registration("sup@example.com", Role::Supervisor), Some(secretary))
        .await
        .unwrap();

    assert_eq!(member.profile.registered_by, Some(secretary));
    assert_eq!(member.profile.employee_id, "SUP00001");
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let uc = RegisterStaffUseCase {
        repo: MockStaffRepo::empty(),
    };
    uc.execute(registration("dup@example.com", Role::Operator), None)
        .await
        .unwrap();

    let result = uc
        .execute(registration("DUP@example.com", Role::Operator), None)
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::EmailAlreadyRegistered)),
        "expected EmailAlreadyRegistered, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_office_role_through_registration() {
    let uc = RegisterStaffUseCase {
        repo: MockStaffRepo::empty(),
    };

    let result = uc
        .execute(registration("mgr@example.com", Role::Manager), None)
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidRole)),
        "expected InvalidRole, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unusable_phone_number() {
    let uc = RegisterStaffUseCase {
        repo: MockStaffRepo::empty(),
    };
    let mut input = registration("phone@example.com", Role::Operator);
    input.phone = "12345".to_owned();

    let result = uc.execute(input, None).await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidPhone)),
        "expected InvalidPhone, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let uc = RegisterStaffUseCase {
        repo: MockStaffRepo::empty(),
    };

    let result = uc
        .execute(registration("not-an-email", Role::Operator), None)
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_create_active_office_account_with_temporary_credential() {
    let director = Uuid::now_v7();
    let repo = MockStaffRepo::empty();
    let uc = CreateStaffAccountUseCase { repo: repo.clone() };

    let issued = uc
        .execute(
            CreateStaffAccountInput {
                email: "sec@example.com".to_owned(),
                phone: "+2348098765432".to_owned(),
                first_name: "Ngozi".to_owned(),
                last_name: "Bello".to_owned(),
                role: Role::Secretary,
                salary: Some(Decimal::new(150_000, 0)),
            },
            director,
        )
        .await
        .unwrap();

    let member = &issued.member;
    assert_eq!(member.user.status, UserStatus::Active);
    assert!(member.user.must_change_credential);
    assert_eq!(member.profile.approval_status, ApprovalStatus::Approved);
    assert_eq!(member.profile.employee_id, "STF00001");
    assert_eq!(member.profile.reviewed_by, Some(director));

    let hash = repo.credential_hash(member.user.id).unwrap();
    assert!(verify_credential(&issued.temporary_credential, &hash));
}

#[tokio::test]
async fn should_reject_field_role_for_direct_account_creation() {
    let uc = CreateStaffAccountUseCase {
        repo: MockStaffRepo::empty(),
    };

    let result = uc
        .execute(
            CreateStaffAccountInput {
                email: "op@example.com".to_owned(),
                phone: "+2348098765432".to_owned(),
                first_name: "Tunde".to_owned(),
                last_name: "Ade".to_owned(),
                role: Role::Operator,
                salary: None,
            },
            Uuid::now_v7(),
        )
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidRole)),
        "expected InvalidRole, got {result:?}"
    );
}
