use uuid::Uuid;

use guardpost_domain::pagination::PageRequest;
use guardpost_domain::role::Role;
use guardpost_workforce::error::WorkforceServiceError;
use guardpost_workforce::usecase::messaging::{
    BroadcastInput, DeleteMessageUseCase, InboxUseCase, ListBroadcastsUseCase,
    MarkBroadcastReadUseCase, MarkMessageReadUseCase, SendBroadcastUseCase, SendMessageInput,
    SendMessageUseCase, SentMessagesUseCase,
};

use crate::helpers::{MockBroadcastRepo, MockMessageRepo, MockStaffRepo, approved_operator, identity};

async fn send(messages: &MockMessageRepo, staff: &MockStaffRepo, from: Uuid, to: Uuid) -> Uuid {
    SendMessageUseCase {
        messages: messages.clone(),
        staff: staff.clone(),
    }
    .execute(
        SendMessageInput {
            recipient_id: to,
            subject: "Shift change".to_owned(),
            body: "Report to Gate B at 1800".to_owned(),
        },
        from,
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn should_deliver_message_to_recipient_inbox() {
    let recipient = approved_operator();
    let staff = MockStaffRepo::new(vec![recipient.clone()]);
    let messages = MockMessageRepo::default();
    let sender = Uuid::now_v7();

    let id = send(&messages, &staff, sender, recipient.user.id).await;

    let inbox = InboxUseCase {
        messages: messages.clone(),
    }
    .execute(recipient.user.id, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(inbox.total, 1);
    assert_eq!(inbox.items[0].id, id);

    let sent = SentMessagesUseCase { messages }
        .execute(sender, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(sent.total, 1);
}

#[tokio::test]
async fn should_reject_message_to_unknown_user() {
    let result = SendMessageUseCase {
        messages: MockMessageRepo::default(),
        staff: MockStaffRepo::empty(),
    }
    .execute(
        SendMessageInput {
            recipient_id: Uuid::now_v7(),
            subject: "Hello".to_owned(),
            body: "Anyone there?".to_owned(),
        },
        Uuid::now_v7(),
    )
    .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_first_read_time_when_marked_twice() {
    let recipient = approved_operator();
    let staff = MockStaffRepo::new(vec![recipient.clone()]);
    let messages = MockMessageRepo::default();
    let id = send(&messages, &staff, Uuid::now_v7(), recipient.user.id).await;
    let uc = MarkMessageReadUseCase { messages };

    let first = uc.execute(id, recipient.user.id).await.unwrap();
    let second = uc.execute(id, recipient.user.id).await.unwrap();

    assert!(first.read_at.is_some());
    assert_eq!(first.read_at, second.read_at);
}

#[tokio::test]
async fn should_forbid_sender_from_marking_read() {
    let recipient = approved_operator();
    let staff = MockStaffRepo::new(vec![recipient.clone()]);
    let messages = MockMessageRepo::default();
    let sender = Uuid::now_v7();
    let id = send(&messages, &staff, sender, recipient.user.id).await;

    let result = MarkMessageReadUseCase { messages }
        .execute(id, sender)
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_delete_message_for_one_party_only() {
    let recipient = approved_operator();
    let staff = MockStaffRepo::new(vec![recipient.clone()]);
    let messages = MockMessageRepo::default();
    let sender = Uuid::now_v7();
    let id = send(&messages, &staff, sender, recipient.user.id).await;

    DeleteMessageUseCase {
        messages: messages.clone(),
    }
    .execute(id, recipient.user.id)
    .await
    .unwrap();

    let inbox = InboxUseCase {
        messages: messages.clone(),
    }
    .execute(recipient.user.id, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(inbox.total, 0);

    let sent = SentMessagesUseCase {
        messages: messages.clone(),
    }
    .execute(sender, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(sent.total, 1);

    let again = DeleteMessageUseCase { messages }
        .execute(id, recipient.user.id)
        .await;
    assert!(
        matches!(again, Err(WorkforceServiceError::MessageNotFound)),
        "expected MessageNotFound, got {again:?}"
    );
}

#[tokio::test]
async fn should_show_broadcast_only_to_targeted_roles() {
    let broadcasts = MockBroadcastRepo::default();
    let sent = SendBroadcastUseCase {
        broadcasts: broadcasts.clone(),
    }
    .execute(
        BroadcastInput {
            subject: "Supervisor briefing".to_owned(),
            body: "Friday 0900 at head office".to_owned(),
            target_roles: vec![Role::Supervisor, Role::Supervisor, Role::GeneralSupervisor],
        },
        Uuid::now_v7(),
    )
    .await
    .unwrap();
    assert_eq!(sent.target_roles.len(), 2, "duplicate roles are dropped");

    let list = ListBroadcastsUseCase {
        broadcasts: broadcasts.clone(),
    };
    let supervisor = identity(Role::Supervisor);
    let for_supervisor = list
        .execute(supervisor, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(for_supervisor.total, 1);
    assert!(for_supervisor.items[0].read_at.is_none());

    let for_operator = list
        .execute(identity(Role::Operator), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(for_operator.total, 0);

    let mark = MarkBroadcastReadUseCase {
        broadcasts: broadcasts.clone(),
    };
    mark.execute(sent.id, supervisor).await.unwrap();
    mark.execute(sent.id, supervisor).await.unwrap();
    assert_eq!(broadcasts.reads.lock().unwrap().len(), 1);

    let after = list
        .execute(supervisor, PageRequest::default())
        .await
        .unwrap();
    assert!(after.items[0].read_at.is_some());

    let not_targeted = mark.execute(sent.id, identity(Role::Operator)).await;
    assert!(
        matches!(not_targeted, Err(WorkforceServiceError::BroadcastNotFound)),
        "expected BroadcastNotFound, got {not_targeted:?}"
    );
}

#[tokio::test]
async fn should_reach_everyone_when_no_roles_targeted() {
    let broadcasts = MockBroadcastRepo::default();
    SendBroadcastUseCase {
        broadcasts: broadcasts.clone(),
    }
    .execute(
        BroadcastInput {
            subject: "Public holiday".to_owned(),
            body: "Office closed Monday".to_owned(),
            target_roles: vec![],
        },
        Uuid::now_v7(),
    )
    .await
    .unwrap();

    let list = ListBroadcastsUseCase { broadcasts };
    for role in Role::ALL {
        let page = list
            .execute(identity(role), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1, "{role} should see the broadcast");
    }
}
