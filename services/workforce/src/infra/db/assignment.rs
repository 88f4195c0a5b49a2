use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_workforce_schema::{assignments, staff_profiles};

use crate::domain::assignment::{Assignment, AssignmentFilter, AssignmentStatus};
use crate::domain::personnel::Posting;
use crate::domain::repository::AssignmentRepository;
use crate::error::WorkforceServiceError;

use super::is_unique_violation_in_txn;

/// Point the operator's profile at a posting (or clear it).
async fn set_posting<C: ConnectionTrait>(
    conn: &C,
    operator_id: Uuid,
    posting: Posting,
    at: DateTime<Utc>,
) -> Result<(), DbErr> {
    staff_profiles::Entity::update_many()
        .col_expr(
            staff_profiles::Column::LocationId,
            Expr::value(posting.location_id),
        )
        .col_expr(staff_profiles::Column::BeatId, Expr::value(posting.beat_id))
        .col_expr(
            staff_profiles::Column::SupervisorId,
            Expr::value(posting.supervisor_id),
        )
        .col_expr(staff_profiles::Column::UpdatedAt, Expr::value(at))
        .filter(staff_profiles::Column::UserId.eq(operator_id))
        .exec(conn)
        .await?;
    Ok(())
}

fn posting_of(model: &assignments::Model) -> Posting {
    Posting {
        location_id: Some(model.location_id),
        beat_id: Some(model.beat_id),
        supervisor_id: Some(model.supervisor_id),
    }
}

/// The partial unique index on ACTIVE assignments rejects a second one.
fn map_txn_error(
    err: TransactionError<DbErr>,
    context: &'static str,
) -> WorkforceServiceError {
    if is_unique_violation_in_txn(&err) {
        WorkforceServiceError::OperatorAlreadyAssigned
    } else {
        anyhow::Error::new(err).context(context).into()
    }
}

#[derive(Clone)]
pub struct DbAssignmentRepository {
    pub db: DatabaseConnection,
}

impl AssignmentRepository for DbAssignmentRepository {
    async fn find(&self, id: Uuid) -> Result<Option<Assignment>, WorkforceServiceError> {
        let model = assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find assignment by id")?;
        Ok(model.map(assignment_from_model).transpose()?)
    }

    async fn list(
        &self,
        filter: AssignmentFilter,
        page: PageRequest,
    ) -> Result<Page<Assignment>, WorkforceServiceError> {
        let mut query = assignments::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(assignments::Column::Status.eq(status.as_str()));
        }
        if let Some(beat_id) = filter.beat_id {
            query = query.filter(assignments::Column::BeatId.eq(beat_id));
        }
        if let Some(operator_id) = filter.operator_id {
            query = query.filter(assignments::Column::OperatorId.eq(operator_id));
        }
        if let Some(supervisor_id) = filter.supervisor_id {
            query = query.filter(assignments::Column::SupervisorId.eq(supervisor_id));
        }
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count assignments")?;
        let models = query
            .order_by_desc(assignments::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list assignments")?;
        let items = models
            .into_iter()
            .map(assignment_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn find_active_for_operator(
        &self,
        operator_id: Uuid,
    ) -> Result<Option<Assignment>, WorkforceServiceError> {
        let model = assignments::Entity::find()
            .filter(assignments::Column::OperatorId.eq(operator_id))
            .filter(assignments::Column::Status.eq(AssignmentStatus::Active.as_str()))
            .one(&self.db)
            .await
            .context("find active assignment for operator")?;
        Ok(model.map(assignment_from_model).transpose()?)
    }

    async fn count_active_for_beat(&self, beat_id: Uuid) -> Result<u32, WorkforceServiceError> {
        let count = assignments::Entity::find()
            .filter(assignments::Column::BeatId.eq(beat_id))
            .filter(assignments::Column::Status.eq(AssignmentStatus::Active.as_str()))
            .count(&self.db)
            .await
            .context("count active assignments for beat")?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn create(&self, assignment: &Assignment) -> Result<(), WorkforceServiceError> {
        let model = assignment_to_active_model(assignment);
        let operator_id = assignment.operator_id;
        let at = assignment.created_at;
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    let inserted = model.insert(txn).await?;
                    if inserted.status == AssignmentStatus::Active.as_str() {
                        set_posting(txn, operator_id, posting_of(&inserted), at).await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| map_txn_error(e, "create assignment"))
    }

    async fn activate(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        capacity_override: bool,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        self.db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = assignments::Entity::update_many()
                        .col_expr(
                            assignments::Column::Status,
                            Expr::value(AssignmentStatus::Active.as_str()),
                        )
                        .col_expr(assignments::Column::ReviewedBy, Expr::value(reviewed_by))
                        .col_expr(
                            assignments::Column::CapacityOverride,
                            Expr::value(capacity_override),
                        )
                        .col_expr(assignments::Column::UpdatedAt, Expr::value(at))
                        .filter(assignments::Column::Id.eq(id))
                        .filter(
                            assignments::Column::Status.eq(AssignmentStatus::Pending.as_str()),
                        )
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    let model = assignments::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| DbErr::RecordNotFound(format!("assignment {id}")))?;
                    set_posting(txn, model.operator_id, posting_of(&model), at).await?;
                    Ok(true)
                })
            })
            .await
            .map_err(|e| map_txn_error(e, "activate assignment"))
    }

    async fn reject(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        let result = assignments::Entity::update_many()
            .col_expr(
                assignments::Column::Status,
                Expr::value(AssignmentStatus::Rejected.as_str()),
            )
            .col_expr(assignments::Column::ReviewedBy, Expr::value(reviewed_by))
            .col_expr(assignments::Column::RejectionReason, Expr::value(reason))
            .col_expr(assignments::Column::UpdatedAt, Expr::value(at))
            .filter(assignments::Column::Id.eq(id))
            .filter(assignments::Column::Status.eq(AssignmentStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .context("reject assignment")?;
        Ok(result.rows_affected > 0)
    }

    async fn end(
        &self,
        id: Uuid,
        end_date: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        let ended = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = assignments::Entity::update_many()
                        .col_expr(
                            assignments::Column::Status,
                            Expr::value(AssignmentStatus::Ended.as_str()),
                        )
                        .col_expr(assignments::Column::EndDate, Expr::value(end_date))
                        .col_expr(assignments::Column::UpdatedAt, Expr::value(at))
                        .filter(assignments::Column::Id.eq(id))
                        .filter(assignments::Column::Status.eq(AssignmentStatus::Active.as_str()))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    let model = assignments::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| DbErr::RecordNotFound(format!("assignment {id}")))?;
                    set_posting(txn, model.operator_id, Posting::default(), at).await?;
                    Ok(true)
                })
            })
            .await
            .context("end assignment")?;
        Ok(ended)
    }

    async fn transfer(
        &self,
        id: Uuid,
        replacement: &Assignment,
    ) -> Result<bool, WorkforceServiceError> {
        let new_model = assignment_to_active_model(replacement);
        let new_id = replacement.id;
        let start_date = replacement.start_date;
        let operator_id = replacement.operator_id;
        let at = replacement.created_at;
        self.db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = assignments::Entity::update_many()
                        .col_expr(
                            assignments::Column::Status,
                            Expr::value(AssignmentStatus::Transferred.as_str()),
                        )
                        .col_expr(assignments::Column::TransferredTo, Expr::value(new_id))
                        .col_expr(assignments::Column::EndDate, Expr::value(start_date))
                        .col_expr(assignments::Column::UpdatedAt, Expr::value(at))
                        .filter(assignments::Column::Id.eq(id))
                        .filter(assignments::Column::Status.eq(AssignmentStatus::Active.as_str()))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    let inserted = new_model.insert(txn).await?;
                    set_posting(txn, operator_id, posting_of(&inserted), at).await?;
                    Ok(true)
                })
            })
            .await
            .map_err(|e| map_txn_error(e, "transfer assignment"))
    }
}

fn assignment_to_active_model(assignment: &Assignment) -> assignments::ActiveModel {
    assignments::ActiveModel {
        id: Set(assignment.id),
        operator_id: Set(assignment.operator_id),
        supervisor_id: Set(assignment.supervisor_id),
        beat_id: Set(assignment.beat_id),
        location_id: Set(assignment.location_id),
        shift_type: Set(assignment.shift_type.as_str().to_owned()),
        assignment_type: Set(assignment.assignment_type.as_str().to_owned()),
        start_date: Set(assignment.start_date),
        end_date: Set(assignment.end_date),
        status: Set(assignment.status.as_str().to_owned()),
        created_by: Set(assignment.created_by),
        reviewed_by: Set(assignment.reviewed_by),
        rejection_reason: Set(assignment.rejection_reason.clone()),
        capacity_override: Set(assignment.capacity_override),
        transferred_to: Set(assignment.transferred_to),
        notes: Set(assignment.notes.clone()),
        created_at: Set(assignment.created_at),
        updated_at: Set(assignment.updated_at),
    }
}

fn assignment_from_model(model: assignments::Model) -> anyhow::Result<Assignment> {
    Ok(Assignment {
        id: model.id,
        operator_id: model.operator_id,
        supervisor_id: model.supervisor_id,
        beat_id: model.beat_id,
        location_id: model.location_id,
        shift_type: model.shift_type.parse().context("decode shift type")?,
        assignment_type: model
            .assignment_type
            .parse()
            .context("decode assignment type")?,
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.parse().context("decode assignment status")?,
        created_by: model.created_by,
        reviewed_by: model.reviewed_by,
        rejection_reason: model.rejection_reason,
        capacity_override: model.capacity_override,
        transferred_to: model.transferred_to,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
