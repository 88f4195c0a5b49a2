use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_workforce_schema::{staff_profiles, users};

use crate::domain::personnel::{
    Approval, ApprovalStatus, NewStaffMember, PersonalDetails, Posting, StaffFilter, StaffMember,
    StaffProfile, User, UserStatus, format_employee_id,
};
use crate::domain::repository::StaffRepository;
use crate::error::WorkforceServiceError;

use super::is_unique_violation_in_txn;

#[derive(Debug, FromQueryResult)]
struct CounterValue {
    value: i64,
}

/// Atomically increment and return the named counter, creating it at 1.
async fn next_counter_value<C: ConnectionTrait>(conn: &C, name: &str) -> Result<i64, DbErr> {
    let row = CounterValue::find_by_statement(Statement::from_sql_and_values(
        conn.get_database_backend(),
        r#"
        INSERT INTO counters (name, value) VALUES ($1, 1)
        ON CONFLICT (name) DO UPDATE SET value = counters.value + 1
        RETURNING value
        "#,
        [name.into()],
    ))
    .one(conn)
    .await?;
    row.map(|r| r.value).ok_or(DbErr::RecordNotInserted)
}

#[derive(Clone)]
pub struct DbStaffRepository {
    pub db: DatabaseConnection,
}

impl StaffRepository for DbStaffRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, WorkforceServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count users by email")?;
        Ok(count > 0)
    }

    async fn create(&self, member: &NewStaffMember) -> Result<StaffMember, WorkforceServiceError> {
        let member = member.clone();
        let result = self
            .db
            .transaction::<_, (users::Model, staff_profiles::Model), DbErr>(|txn| {
                Box::pin(async move {
                    let NewStaffMember {
                        user,
                        approval_status,
                        salary,
                        details,
                        registered_by,
                        credential_hash,
                    } = member;
                    let prefix = user.role.employee_id_prefix();
                    let sequence = next_counter_value(txn, prefix).await?;

                    let user_model = users::ActiveModel {
                        id: Set(user.id),
                        email: Set(user.email),
                        phone: Set(user.phone),
                        first_name: Set(user.first_name),
                        last_name: Set(user.last_name),
                        role: Set(user.role.as_str().to_owned()),
                        status: Set(user.status.as_str().to_owned()),
                        photo_url: Set(user.photo_url),
                        credential_hash: Set(credential_hash),
                        must_change_credential: Set(user.must_change_credential),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    let approved = approval_status == ApprovalStatus::Approved;
                    let profile_model = staff_profiles::ActiveModel {
                        user_id: Set(user.id),
                        employee_id: Set(format_employee_id(prefix, sequence)),
                        salary: Set(salary),
                        approval_status: Set(approval_status.as_str().to_owned()),
                        rejection_reason: Set(None),
                        reviewed_by: Set(registered_by.filter(|_| approved)),
                        reviewed_at: Set(approved.then_some(user.created_at)),
                        location_id: Set(None),
                        beat_id: Set(None),
                        supervisor_id: Set(None),
                        address: Set(details.address),
                        state_of_origin: Set(details.state_of_origin),
                        date_of_birth: Set(details.date_of_birth),
                        next_of_kin_name: Set(details.next_of_kin_name),
                        next_of_kin_phone: Set(details.next_of_kin_phone),
                        guarantor_name: Set(details.guarantor_name),
                        guarantor_phone: Set(details.guarantor_phone),
                        registered_by: Set(registered_by),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok((user_model, profile_model))
                })
            })
            .await;

        let (user, profile) = match result {
            Ok(models) => models,
            Err(e) if is_unique_violation_in_txn(&e) => {
                return Err(WorkforceServiceError::EmailAlreadyRegistered);
            }
            Err(e) => return Err(anyhow::Error::new(e).context("create staff member").into()),
        };
        Ok(member_from_models(user, profile)?)
    }

    async fn find(&self, user_id: Uuid) -> Result<Option<StaffMember>, WorkforceServiceError> {
        let found = users::Entity::find_by_id(user_id)
            .find_also_related(staff_profiles::Entity)
            .one(&self.db)
            .await
            .context("find staff member")?;
        match found {
            Some((user, Some(profile))) => Ok(Some(member_from_models(user, profile)?)),
            _ => Ok(None),
        }
    }

    async fn list(
        &self,
        filter: StaffFilter,
        page: PageRequest,
    ) -> Result<Page<StaffMember>, WorkforceServiceError> {
        let mut query = users::Entity::find().find_also_related(staff_profiles::Entity);
        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        if let Some(status) = filter.approval_status {
            query = query.filter(staff_profiles::Column::ApprovalStatus.eq(status.as_str()));
        }
        let total = query.clone().count(&self.db).await.context("count staff")?;
        let rows = query
            .order_by_desc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list staff")?;

        let mut items = Vec::with_capacity(rows.len());
        for (user, profile) in rows {
            if let Some(profile) = profile {
                items.push(member_from_models(user, profile)?);
            }
        }
        Ok(Page::new(items, page, total))
    }

    async fn approve(&self, approval: &Approval) -> Result<bool, WorkforceServiceError> {
        let approval = approval.clone();
        let approved = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = staff_profiles::Entity::update_many()
                        .col_expr(
                            staff_profiles::Column::ApprovalStatus,
                            Expr::value(ApprovalStatus::Approved.as_str()),
                        )
                        .col_expr(staff_profiles::Column::Salary, Expr::value(approval.salary))
                        .col_expr(
                            staff_profiles::Column::ReviewedBy,
                            Expr::value(approval.reviewed_by),
                        )
                        .col_expr(
                            staff_profiles::Column::ReviewedAt,
                            Expr::value(approval.reviewed_at),
                        )
                        .col_expr(
                            staff_profiles::Column::UpdatedAt,
                            Expr::value(approval.reviewed_at),
                        )
                        .filter(staff_profiles::Column::UserId.eq(approval.user_id))
                        .filter(
                            staff_profiles::Column::ApprovalStatus
                                .eq(ApprovalStatus::Pending.as_str()),
                        )
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    users::Entity::update_many()
                        .col_expr(
                            users::Column::Status,
                            Expr::value(UserStatus::Active.as_str()),
                        )
                        .col_expr(
                            users::Column::CredentialHash,
                            Expr::value(approval.credential_hash),
                        )
                        .col_expr(users::Column::MustChangeCredential, Expr::value(true))
                        .col_expr(users::Column::UpdatedAt, Expr::value(approval.reviewed_at))
                        .filter(users::Column::Id.eq(approval.user_id))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("approve staff member")?;
        Ok(approved)
    }

    async fn reject(
        &self,
        user_id: Uuid,
        reason: &str,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError> {
        let reason = reason.to_owned();
        let rejected = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = staff_profiles::Entity::update_many()
                        .col_expr(
                            staff_profiles::Column::ApprovalStatus,
                            Expr::value(ApprovalStatus::Rejected.as_str()),
                        )
                        .col_expr(staff_profiles::Column::RejectionReason, Expr::value(reason))
                        .col_expr(staff_profiles::Column::ReviewedBy, Expr::value(reviewed_by))
                        .col_expr(staff_profiles::Column::ReviewedAt, Expr::value(reviewed_at))
                        .col_expr(staff_profiles::Column::UpdatedAt, Expr::value(reviewed_at))
                        .filter(staff_profiles::Column::UserId.eq(user_id))
                        .filter(
                            staff_profiles::Column::ApprovalStatus
                                .eq(ApprovalStatus::Pending.as_str()),
                        )
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    users::Entity::update_many()
                        .col_expr(
                            users::Column::Status,
                            Expr::value(UserStatus::Inactive.as_str()),
                        )
                        .col_expr(users::Column::UpdatedAt, Expr::value(reviewed_at))
                        .filter(users::Column::Id.eq(user_id))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("reject staff member")?;
        Ok(rejected)
    }

    async fn set_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<(), WorkforceServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::Status, Expr::value(status.as_str()))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .context("set user status")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    Ok(User {
        id: model.id,
        email: model.email,
        phone: model.phone,
        first_name: model.first_name,
        last_name: model.last_name,
        role: model.role.parse().context("decode user role")?,
        status: model.status.parse().context("decode user status")?,
        photo_url: model.photo_url,
        must_change_credential: model.must_change_credential,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn profile_from_model(model: staff_profiles::Model) -> anyhow::Result<StaffProfile> {
    Ok(StaffProfile {
        user_id: model.user_id,
        employee_id: model.employee_id,
        salary: model.salary,
        approval_status: model
            .approval_status
            .parse()
            .context("decode approval status")?,
        rejection_reason: model.rejection_reason,
        reviewed_by: model.reviewed_by,
        reviewed_at: model.reviewed_at,
        posting: Posting {
            location_id: model.location_id,
            beat_id: model.beat_id,
            supervisor_id: model.supervisor_id,
        },
        details: PersonalDetails {
            address: model.address,
            state_of_origin: model.state_of_origin,
            date_of_birth: model.date_of_birth,
            next_of_kin_name: model.next_of_kin_name,
            next_of_kin_phone: model.next_of_kin_phone,
            guarantor_name: model.guarantor_name,
            guarantor_phone: model.guarantor_phone,
        },
        registered_by: model.registered_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn member_from_models(
    user: users::Model,
    profile: staff_profiles::Model,
) -> anyhow::Result<StaffMember> {
    Ok(StaffMember {
        user: user_from_model(user)?,
        profile: profile_from_model(profile)?,
    })
}
