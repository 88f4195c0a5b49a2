use std::sync::{Arc, Mutex};

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Role;

use guardpost_workforce::domain::assignment::{Assignment, AssignmentFilter, AssignmentStatus};
use guardpost_workforce::domain::dashboard::DashboardSummary;
use guardpost_workforce::domain::document::Document;
use guardpost_workforce::domain::ledger::{GroupBy, GroupTotal, LedgerEntry, LedgerFilter};
use guardpost_workforce::domain::meeting::Meeting;
use guardpost_workforce::domain::messaging::{Broadcast, BroadcastView, Message, Party};
use guardpost_workforce::domain::personnel::{
    Approval, ApprovalStatus, NewStaffMember, PersonalDetails, Posting, StaffFilter, StaffMember,
    StaffProfile, User, UserStatus, format_employee_id,
};
use guardpost_workforce::domain::repository::{
    AssignmentRepository, BeatRepository, BroadcastRepository, DashboardQuery,
    DocumentRepository, LedgerRepository, LocationRepository, MeetingRepository,
    MessageRepository, SmsSender, StaffRepository,
};
use guardpost_workforce::domain::site::{Beat, Location};
use guardpost_workforce::error::WorkforceServiceError;

fn paged<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let slice = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(slice, page, total)
}

// ── MockStaffRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockStaffRepo {
    pub members: Arc<Mutex<Vec<StaffMember>>>,
    pub credential_hashes: Arc<Mutex<Vec<(Uuid, String)>>>,
}

impl MockStaffRepo {
    pub fn new(members: Vec<StaffMember>) -> Self {
        Self {
            members: Arc::new(Mutex::new(members)),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the stored members for post-execution inspection.
    pub fn members_handle(&self) -> Arc<Mutex<Vec<StaffMember>>> {
        Arc::clone(&self.members)
    }

    pub fn credential_hash(&self, user_id: Uuid) -> Option<String> {
        self.credential_hashes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _)| *id == user_id)
            .map(|(_, hash)| hash.clone())
    }
}

impl StaffRepository for MockStaffRepo {
    async fn email_exists(&self, email: &str) -> Result<bool, WorkforceServiceError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.user.email == email))
    }

    async fn create(&self, member: &NewStaffMember) -> Result<StaffMember, WorkforceServiceError> {
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| m.user.email == member.user.email) {
            return Err(WorkforceServiceError::EmailAlreadyRegistered);
        }
        let prefix = member.user.role.employee_id_prefix();
        let sequence = members
            .iter()
            .filter(|m| m.user.role.employee_id_prefix() == prefix)
            .count() as i64
            + 1;
        let approved = member.approval_status == ApprovalStatus::Approved;
        let created = StaffMember {
            user: member.user.clone(),
            profile: StaffProfile {
                user_id: member.user.id,
                employee_id: format_employee_id(prefix, sequence),
                salary: member.salary,
                approval_status: member.approval_status,
                rejection_reason: None,
                reviewed_by: member.registered_by.filter(|_| approved),
                reviewed_at: approved.then_some(member.user.created_at),
                posting: Posting::default(),
                details: member.details.clone(),
                registered_by: member.registered_by,
                created_at: member.user.created_at,
                updated_at: member.user.updated_at,
            },
        };
        if let Some(hash) = &member.credential_hash {
            self.credential_hashes
                .lock()
                .unwrap()
                .push((member.user.id, hash.clone()));
        }
        members.push(created.clone());
        Ok(created)
    }

    async fn find(&self, user_id: Uuid) -> Result<Option<StaffMember>, WorkforceServiceError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.user.id == user_id)
            .cloned())
    }

    async fn list(
        &self,
        filter: StaffFilter,
        page: PageRequest,
    ) -> Result<Page<StaffMember>, WorkforceServiceError> {
        let members: Vec<_> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| filter.role.is_none_or(|r| m.user.role == r))
            .filter(|m| {
                filter
                    .approval_status
                    .is_none_or(|s| m.profile.approval_status == s)
            })
            .cloned()
            .collect();
        Ok(paged(&members, page))
    }

    async fn approve(&self, approval: &Approval) -> Result<bool, WorkforceServiceError> {
        let mut members = self.members.lock().unwrap();
        let Some(member) = members.iter_mut().find(|m| {
            m.user.id == approval.user_id && m.profile.approval_status == ApprovalStatus::Pending
        }) else {
            return Ok(false);
        };
        member.profile.approval_status = ApprovalStatus::Approved;
        member.profile.salary = Some(approval.salary);
        member.profile.reviewed_by = Some(approval.reviewed_by);
        member.profile.reviewed_at = Some(approval.reviewed_at);
        member.user.status = UserStatus::Active;
        member.user.must_change_credential = true;
        self.credential_hashes
            .lock()
            .unwrap()
            .push((approval.user_id, approval.credential_hash.clone()));
        Ok(true)
    }

    async fn reject(
        &self,
        user_id: Uuid,
        reason: &str,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        let mut members = self.members.lock().unwrap();
        let Some(member) = members.iter_mut().find(|m| {
            m.user.id == user_id && m.profile.approval_status == ApprovalStatus::Pending
        }) else {
            return Ok(false);
        };
        member.profile.approval_status = ApprovalStatus::Rejected;
        member.profile.rejection_reason = Some(reason.to_owned());
        member.profile.reviewed_by = Some(reviewed_by);
        member.profile.reviewed_at = Some(reviewed_at);
        member.user.status = UserStatus::Inactive;
        Ok(true)
    }

    async fn set_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<(), WorkforceServiceError> {
        if let Some(m) = self
            .members
            .lock()
            .unwrap()
            .iter_mut()
            .find(|m| m.user.id == user_id)
        {
            m.user.status = status;
        }
        Ok(())
    }
}

// ── MockLocationRepo / MockBeatRepo ──────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockLocationRepo {
    pub locations: Arc<Mutex<Vec<Location>>>,
}

impl MockLocationRepo {
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations: Arc::new(Mutex::new(locations)),
        }
    }
}

impl LocationRepository for MockLocationRepo {
    async fn create(&self, location: &Location) -> Result<(), WorkforceServiceError> {
        self.locations.lock().unwrap().push(location.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Location>, WorkforceServiceError> {
        Ok(self
            .locations
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn list(
        &self,
        active_only: bool,
        page: PageRequest,
    ) -> Result<Page<Location>, WorkforceServiceError> {
        let items: Vec<_> = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|l| !active_only || l.is_active)
            .cloned()
            .collect();
        Ok(paged(&items, page))
    }

    async fn update(&self, location: &Location) -> Result<(), WorkforceServiceError> {
        let mut locations = self.locations.lock().unwrap();
        if let Some(l) = locations.iter_mut().find(|l| l.id == location.id) {
            *l = location.clone();
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockBeatRepo {
    pub beats: Arc<Mutex<Vec<Beat>>>,
}

impl MockBeatRepo {
    pub fn new(beats: Vec<Beat>) -> Self {
        Self {
            beats: Arc::new(Mutex::new(beats)),
        }
    }
}

impl BeatRepository for MockBeatRepo {
    async fn create(&self, beat: &Beat) -> Result<(), WorkforceServiceError> {
        let mut beats = self.beats.lock().unwrap();
        if beats
            .iter()
            .any(|b| b.location_id == beat.location_id && b.name == beat.name)
        {
            return Err(WorkforceServiceError::InvalidInput(
                "beat name already used at this location",
            ));
        }
        beats.push(beat.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Beat>, WorkforceServiceError> {
        Ok(self
            .beats
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list(
        &self,
        location_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Beat>, WorkforceServiceError> {
        let items: Vec<_> = self
            .beats
            .lock()
            .unwrap()
            .iter()
            .filter(|b| location_id.is_none_or(|id| b.location_id == id))
            .cloned()
            .collect();
        Ok(paged(&items, page))
    }

    async fn update(&self, beat: &Beat) -> Result<(), WorkforceServiceError> {
        let mut beats = self.beats.lock().unwrap();
        if let Some(b) = beats.iter_mut().find(|b| b.id == beat.id) {
            *b = beat.clone();
        }
        Ok(())
    }
}

// ── MockAssignmentRepo ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAssignmentRepo {
    pub assignments: Arc<Mutex<Vec<Assignment>>>,
}

impl MockAssignmentRepo {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments: Arc::new(Mutex::new(assignments)),
        }
    }

    /// Returns a shared handle to the stored assignments for post-execution inspection.
    pub fn assignments_handle(&self) -> Arc<Mutex<Vec<Assignment>>> {
        Arc::clone(&self.assignments)
    }

    fn transition(
        &self,
        id: Uuid,
        from: AssignmentStatus,
        apply: impl FnOnce(&mut Assignment),
    ) -> bool {
        let mut assignments = self.assignments.lock().unwrap();
        match assignments
            .iter_mut()
            .find(|a| a.id == id && a.status == from)
        {
            Some(a) => {
                apply(a);
                true
            }
            None => false,
        }
    }
}

impl AssignmentRepository for MockAssignmentRepo {
    async fn find(&self, id: Uuid) -> Result<Option<Assignment>, WorkforceServiceError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: AssignmentFilter,
        page: PageRequest,
    ) -> Result<Page<Assignment>, WorkforceServiceError> {
        let items: Vec<_> = self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        Ok(paged(&items, page))
    }

    async fn find_active_for_operator(
        &self,
        operator_id: Uuid,
    ) -> Result<Option<Assignment>, WorkforceServiceError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.operator_id == operator_id && a.status == AssignmentStatus::Active)
            .cloned())
    }

    async fn count_active_for_beat(&self, beat_id: Uuid) -> Result<u32, WorkforceServiceError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.beat_id == beat_id && a.status == AssignmentStatus::Active)
            .count() as u32)
    }

    async fn create(&self, assignment: &Assignment) -> Result<(), WorkforceServiceError> {
        let mut assignments = self.assignments.lock().unwrap();
        if assignment.status == AssignmentStatus::Active
            && assignments.iter().any(|a| {
                a.operator_id == assignment.operator_id && a.status == AssignmentStatus::Active
            })
        {
            return Err(WorkforceServiceError::OperatorAlreadyAssigned);
        }
        assignments.push(assignment.clone());
        Ok(())
    }

    async fn activate(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        capacity_override: bool,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        Ok(self.transition(id, AssignmentStatus::Pending, |a| {
            a.status = AssignmentStatus::Active;
            a.reviewed_by = Some(reviewed_by);
            a.capacity_override = capacity_override;
            a.updated_at = at;
        }))
    }

    async fn reject(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        Ok(self.transition(id, AssignmentStatus::Pending, |a| {
            a.status = AssignmentStatus::Rejected;
            a.reviewed_by = Some(reviewed_by);
            a.rejection_reason = Some(reason.to_owned());
            a.updated_at = at;
        }))
    }

    async fn end(
        &self,
        id: Uuid,
        end_date: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        Ok(self.transition(id, AssignmentStatus::Active, |a| {
            a.status = AssignmentStatus::Ended;
            a.end_date = Some(end_date);
            a.updated_at = at;
        }))
    }

    async fn transfer(
        &self,
        id: Uuid,
        replacement: &Assignment,
    ) -> Result<bool, WorkforceServiceError> {
        let moved = self.transition(id, AssignmentStatus::Active, |a| {
            a.status = AssignmentStatus::Transferred;
            a.transferred_to = Some(replacement.id);
            a.end_date = Some(replacement.start_date);
            a.updated_at = replacement.created_at;
        });
        if moved {
            self.assignments.lock().unwrap().push(replacement.clone());
        }
        Ok(moved)
    }
}

// ── MockLedgerRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockLedgerRepo {
    pub entries: Arc<Mutex<Vec<LedgerEntry>>>,
}

impl MockLedgerRepo {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn entries_handle(&self) -> Arc<Mutex<Vec<LedgerEntry>>> {
        Arc::clone(&self.entries)
    }
}

impl LedgerRepository for MockLedgerRepo {
    async fn create(&self, entry: &LedgerEntry) -> Result<(), WorkforceServiceError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<LedgerEntry>, WorkforceServiceError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn save_edit(&self, entry: &LedgerEntry) -> Result<(), WorkforceServiceError> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(e) = entries.iter_mut().find(|e| e.id == entry.id) {
            *e = entry.clone();
        }
        Ok(())
    }

    async fn set_classified(
        &self,
        id: Uuid,
        classified: bool,
    ) -> Result<bool, WorkforceServiceError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.is_classified = classified;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(
        &self,
        filter: LedgerFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, WorkforceServiceError> {
        let mut items: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.fields.transaction_date.cmp(&a.fields.transaction_date));
        Ok(paged(&items, page))
    }

    async fn totals(
        &self,
        filter: LedgerFilter,
        group_by: GroupBy,
    ) -> Result<Vec<GroupTotal>, WorkforceServiceError> {
        let mut groups: Vec<GroupTotal> = Vec::new();
        for entry in self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
        {
            let key = match group_by {
                GroupBy::PaymentMethod => entry.fields.payment_method.as_str().to_owned(),
                GroupBy::Category => entry.fields.category.clone(),
            };
            match groups.iter_mut().find(|g| g.key == key) {
                Some(g) => {
                    g.total += entry.fields.amount;
                    g.count += 1;
                }
                None => groups.push(GroupTotal {
                    key,
                    total: entry.fields.amount,
                    count: 1,
                }),
            }
        }
        groups.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(groups)
    }
}

// ── MockMessageRepo / MockBroadcastRepo ──────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMessageRepo {
    pub messages: Arc<Mutex<Vec<Message>>>,
}

impl MockMessageRepo {
    pub fn messages_handle(&self) -> Arc<Mutex<Vec<Message>>> {
        Arc::clone(&self.messages)
    }
}

impl MessageRepository for MockMessageRepo {
    async fn create(&self, message: &Message) -> Result<(), WorkforceServiceError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Message>, WorkforceServiceError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn inbox(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        let items: Vec<_> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.recipient_id == user_id && !m.deleted_by_recipient)
            .cloned()
            .collect();
        Ok(paged(&items, page))
    }

    async fn sent(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        let items: Vec<_> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.sender_id == user_id && !m.deleted_by_sender)
            .cloned()
            .collect();
        Ok(paged(&items, page))
    }

    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), WorkforceServiceError> {
        if let Some(m) = self
            .messages
            .lock()
            .unwrap()
            .iter_mut()
            .find(|m| m.id == id && m.read_at.is_none())
        {
            m.read_at = Some(at);
        }
        Ok(())
    }

    async fn delete_for(&self, id: Uuid, party: Party) -> Result<(), WorkforceServiceError> {
        if let Some(m) = self
            .messages
            .lock()
            .unwrap()
            .iter_mut()
            .find(|m| m.id == id)
        {
            match party {
                Party::Sender => m.deleted_by_sender = true,
                Party::Recipient => m.deleted_by_recipient = true,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockBroadcastRepo {
    pub broadcasts: Arc<Mutex<Vec<Broadcast>>>,
    pub reads: Arc<Mutex<Vec<(Uuid, Uuid, DateTime<Utc>)>>>,
}

impl BroadcastRepository for MockBroadcastRepo {
    async fn create(&self, broadcast: &Broadcast) -> Result<(), WorkforceServiceError> {
        self.broadcasts.lock().unwrap().push(broadcast.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Broadcast>, WorkforceServiceError> {
        Ok(self
            .broadcasts
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list_for(
        &self,
        user_id: Uuid,
        role: Role,
        page: PageRequest,
    ) -> Result<Page<BroadcastView>, WorkforceServiceError> {
        let reads = self.reads.lock().unwrap();
        let items: Vec<_> = self
            .broadcasts
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.targets(role))
            .map(|b| BroadcastView {
                broadcast: b.clone(),
                read_at: reads
                    .iter()
                    .find(|(id, user, _)| *id == b.id && *user == user_id)
                    .map(|(_, _, at)| *at),
            })
            .collect();
        Ok(paged(&items, page))
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), WorkforceServiceError> {
        let mut reads = self.reads.lock().unwrap();
        if !reads.iter().any(|(b, u, _)| *b == id && *u == user_id) {
            reads.push((id, user_id, at));
        }
        Ok(())
    }
}

// ── MockDocumentRepo / MockMeetingRepo ───────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockDocumentRepo {
    pub documents: Arc<Mutex<Vec<Document>>>,
}

impl MockDocumentRepo {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: Arc::new(Mutex::new(documents)),
        }
    }
}

impl DocumentRepository for MockDocumentRepo {
    async fn create(&self, document: &Document) -> Result<(), WorkforceServiceError> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Document>, WorkforceServiceError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn list(
        &self,
        owner_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Document>, WorkforceServiceError> {
        let items: Vec<_> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| owner_id.is_none_or(|id| d.owner_id == id))
            .cloned()
            .collect();
        Ok(paged(&items, page))
    }

    async fn list_expiring(&self, until: NaiveDate) -> Result<Vec<Document>, WorkforceServiceError> {
        let mut items: Vec<_> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.expires_on.is_some_and(|e| e <= until))
            .cloned()
            .collect();
        items.sort_by_key(|d| d.expires_on);
        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WorkforceServiceError> {
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| d.id != id);
        Ok(documents.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct MockMeetingRepo {
    pub meetings: Arc<Mutex<Vec<Meeting>>>,
}

impl MeetingRepository for MockMeetingRepo {
    async fn create(&self, meeting: &Meeting) -> Result<(), WorkforceServiceError> {
        self.meetings.lock().unwrap().push(meeting.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Meeting>, WorkforceServiceError> {
        Ok(self
            .meetings
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_upcoming(
        &self,
        role: Role,
        after: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<Meeting>, WorkforceServiceError> {
        let mut items: Vec<_> = self
            .meetings
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !m.is_cancelled && m.scheduled_for > after && m.invites(role))
            .cloned()
            .collect();
        items.sort_by_key(|m| m.scheduled_for);
        Ok(paged(&items, page))
    }

    async fn cancel(&self, id: Uuid) -> Result<bool, WorkforceServiceError> {
        let mut meetings = self.meetings.lock().unwrap();
        match meetings.iter_mut().find(|m| m.id == id && !m.is_cancelled) {
            Some(m) => {
                m.is_cancelled = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockDashboard ────────────────────────────────────────────────────────────

pub struct MockDashboard(pub DashboardSummary);

impl DashboardQuery for MockDashboard {
    async fn summary(&self) -> Result<DashboardSummary, WorkforceServiceError> {
        Ok(self.0)
    }
}

// ── MockSms ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSms {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
    pub hang: bool,
}

impl MockSms {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// A provider that never answers.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl SmsSender for MockSms {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), WorkforceServiceError> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(anyhow::anyhow!("sms provider unavailable").into());
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), body.to_owned()));
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Whether `hash` is the argon2 hash of `credential`.
pub fn verify_credential(credential: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(credential.as_bytes(), &parsed)
            .is_ok()
    })
}

pub fn identity(role: Role) -> Identity {
    Identity {
        user_id: Uuid::now_v7(),
        role,
    }
}

pub fn test_member(role: Role, approval_status: ApprovalStatus) -> StaffMember {
    let id = Uuid::now_v7();
    let now = Utc::now();
    let status = match approval_status {
        ApprovalStatus::Pending => UserStatus::Pending,
        ApprovalStatus::Approved => UserStatus::Active,
        ApprovalStatus::Rejected => UserStatus::Inactive,
    };
    StaffMember {
        user: User {
            id,
            email: format!("{id}@guardpost.test"),
            phone: "+2348012345678".to_owned(),
            first_name: "Chinedu".to_owned(),
            last_name: "Okafor".to_owned(),
            role,
            status,
            photo_url: None,
            must_change_credential: false,
            created_at: now,
            updated_at: now,
        },
        profile: StaffProfile {
            user_id: id,
            employee_id: format_employee_id(role.employee_id_prefix(), 1),
            salary: (approval_status == ApprovalStatus::Approved)
                .then(|| Decimal::new(85_000, 0)),
            approval_status,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            posting: Posting::default(),
            details: PersonalDetails::default(),
            registered_by: None,
            created_at: now,
            updated_at: now,
        },
    }
}

pub fn approved_operator() -> StaffMember {
    test_member(Role::Operator, ApprovalStatus::Approved)
}

pub fn pending_operator() -> StaffMember {
    test_member(Role::Operator, ApprovalStatus::Pending)
}

pub fn approved_supervisor() -> StaffMember {
    test_member(Role::Supervisor, ApprovalStatus::Approved)
}

pub fn test_location() -> Location {
    let now = Utc::now();
    Location {
        id: Uuid::now_v7(),
        name: "Lekki Phase 1 Estate".to_owned(),
        address: "12 Admiralty Way".to_owned(),
        city: "Lagos".to_owned(),
        state: "Lagos".to_owned(),
        contact_name: None,
        contact_phone: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_beat(location_id: Uuid, required: u32) -> Beat {
    let now = Utc::now();
    Beat {
        id: Uuid::now_v7(),
        location_id,
        name: format!("Gate {}", Uuid::now_v7().simple()),
        description: None,
        number_of_operators: required,
        headcount_override: false,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An assignment with the given status for `operator_id` on `beat`.
pub fn test_assignment(
    operator_id: Uuid,
    supervisor_id: Uuid,
    beat: &Beat,
    status: AssignmentStatus,
) -> Assignment {
    use guardpost_workforce::domain::assignment::{AssignmentType, ShiftType};

    let now = Utc::now();
    Assignment {
        id: Uuid::now_v7(),
        operator_id,
        supervisor_id,
        beat_id: beat.id,
        location_id: beat.location_id,
        shift_type: ShiftType::Day,
        assignment_type: AssignmentType::Permanent,
        start_date: day(2026, 9, 1),
        end_date: None,
        status,
        created_by: Uuid::now_v7(),
        reviewed_by: None,
        rejection_reason: None,
        capacity_override: false,
        transferred_to: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}
