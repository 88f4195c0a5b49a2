use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_workforce_schema::{beats, locations};

use crate::domain::repository::{BeatRepository, LocationRepository};
use crate::domain::site::{Beat, Location};
use crate::error::WorkforceServiceError;

use super::is_unique_violation;

// ── Location repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLocationRepository {
    pub db: DatabaseConnection,
}

impl LocationRepository for DbLocationRepository {
    async fn create(&self, location: &Location) -> Result<(), WorkforceServiceError> {
        location_to_active_model(location)
            .insert(&self.db)
            .await
            .context("create location")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Location>, WorkforceServiceError> {
        let model = locations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find location by id")?;
        Ok(model.map(location_from_model))
    }

    async fn list(
        &self,
        active_only: bool,
        page: PageRequest,
    ) -> Result<Page<Location>, WorkforceServiceError> {
        let mut query = locations::Entity::find();
        if active_only {
            query = query.filter(locations::Column::IsActive.eq(true));
        }
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count locations")?;
        let models = query
            .order_by_asc(locations::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list locations")?;
        Ok(Page::new(
            models.into_iter().map(location_from_model).collect(),
            page,
            total,
        ))
    }

    async fn update(&self, location: &Location) -> Result<(), WorkforceServiceError> {
        location_to_active_model(location)
            .update(&self.db)
            .await
            .context("update location")?;
        Ok(())
    }
}

fn location_to_active_model(location: &Location) -> locations::ActiveModel {
    locations::ActiveModel {
        id: Set(location.id),
        name: Set(location.name.clone()),
        address: Set(location.address.clone()),
        city: Set(location.city.clone()),
        state: Set(location.state.clone()),
        contact_name: Set(location.contact_name.clone()),
        contact_phone: Set(location.contact_phone.clone()),
        is_active: Set(location.is_active),
        created_at: Set(location.created_at),
        updated_at: Set(location.updated_at),
    }
}

fn location_from_model(model: locations::Model) -> Location {
    Location {
        id: model.id,
        name: model.name,
        address: model.address,
        city: model.city,
        state: model.state,
        contact_name: model.contact_name,
        contact_phone: model.contact_phone,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Beat repository ──────────────────────────────────────────────────────────

const DUPLICATE_BEAT_NAME: WorkforceServiceError =
    WorkforceServiceError::InvalidInput("beat name already used at this location");

#[derive(Clone)]
pub struct DbBeatRepository {
    pub db: DatabaseConnection,
}

impl BeatRepository for DbBeatRepository {
    async fn create(&self, beat: &Beat) -> Result<(), WorkforceServiceError> {
        match beat_to_active_model(beat).insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DUPLICATE_BEAT_NAME),
            Err(e) => Err(anyhow::Error::new(e).context("create beat").into()),
        }
    }

    async fn find(&self, id: Uuid) -> Result<Option<Beat>, WorkforceServiceError> {
        let model = beats::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find beat by id")?;
        Ok(model.map(beat_from_model))
    }

    async fn list(
        &self,
        location_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Beat>, WorkforceServiceError> {
        let mut query = beats::Entity::find();
        if let Some(location_id) = location_id {
            query = query.filter(beats::Column::LocationId.eq(location_id));
        }
        let total = query.clone().count(&self.db).await.context("count beats")?;
        let models = query
            .order_by_asc(beats::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list beats")?;
        Ok(Page::new(
            models.into_iter().map(beat_from_model).collect(),
            page,
            total,
        ))
    }

    async fn update(&self, beat: &Beat) -> Result<(), WorkforceServiceError> {
        match beat_to_active_model(beat).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DUPLICATE_BEAT_NAME),
            Err(e) => Err(anyhow::Error::new(e).context("update beat").into()),
        }
    }
}

fn beat_to_active_model(beat: &Beat) -> beats::ActiveModel {
    beats::ActiveModel {
        id: Set(beat.id),
        location_id: Set(beat.location_id),
        name: Set(beat.name.clone()),
        description: Set(beat.description.clone()),
        number_of_operators: Set(i32::try_from(beat.number_of_operators).unwrap_or(i32::MAX)),
        headcount_override: Set(beat.headcount_override),
        is_active: Set(beat.is_active),
        created_at: Set(beat.created_at),
        updated_at: Set(beat.updated_at),
    }
}

fn beat_from_model(model: beats::Model) -> Beat {
    Beat {
        id: model.id,
        location_id: model.location_id,
        name: model.name,
        description: model.description,
        number_of_operators: u32::try_from(model.number_of_operators).unwrap_or(0),
        headcount_override: model.headcount_override,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
