use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Capability;

use crate::domain::site::{Beat, BeatPatch, Location, LocationPatch, Occupancy};
use crate::error::WorkforceServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::site::{
    BeatOccupancyUseCase, CreateBeatInput, CreateBeatUseCase, CreateLocationInput,
    CreateLocationUseCase, GetBeatUseCase, GetLocationUseCase, ListBeatsUseCase,
    ListLocationsUseCase, UpdateBeatUseCase, UpdateLocationUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationResponse {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            address: l.address,
            city: l.city,
            state: l.state,
            contact_name: l.contact_name,
            contact_phone: l.contact_phone,
            is_active: l.is_active,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct BeatResponse {
    pub id: Uuid,
    pub location_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub number_of_operators: u32,
    pub headcount_override: bool,
    pub is_active: bool,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Beat> for BeatResponse {
    fn from(b: Beat) -> Self {
        Self {
            id: b.id,
            location_id: b.location_id,
            name: b.name,
            description: b.description,
            number_of_operators: b.number_of_operators,
            headcount_override: b.headcount_override,
            is_active: b.is_active,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct OccupancyResponse {
    pub beat_id: Uuid,
    pub occupancy: u32,
    pub required: u32,
    pub available: u32,
    pub over_capacity: bool,
}

impl OccupancyResponse {
    fn new(beat_id: Uuid, o: Occupancy) -> Self {
        Self {
            beat_id,
            occupancy: o.occupancy,
            required: o.required,
            available: o.available(),
            over_capacity: o.over_capacity(),
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateBeatRequest {
    pub location_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub number_of_operators: u32,
}

#[derive(Deserialize)]
pub struct UpdateBeatRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_of_operators: Option<u32>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub override_capacity: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct LocationListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BeatListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub location_id: Option<Uuid>,
}

// ── Locations ────────────────────────────────────────────────────────────────

pub async fn create_location(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), WorkforceServiceError> {
    identity.require(Capability::ManageSites)?;
    let uc = CreateLocationUseCase {
        locations: state.location_repo(),
    };
    let location = uc
        .execute(CreateLocationInput {
            name: body.name,
            address: body.address,
            city: body.city,
            state: body.state,
            contact_name: body.contact_name,
            contact_phone: body.contact_phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(location.into())))
}

pub async fn list_locations(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<LocationResponse>>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let query: LocationListQuery = parse_query(raw_query)?;
    let uc = ListLocationsUseCase {
        locations: state.location_repo(),
    };
    let page = uc
        .execute(
            query.active_only,
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(page.map(LocationResponse::from)))
}

pub async fn get_location(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationResponse>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let uc = GetLocationUseCase {
        locations: state.location_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

pub async fn update_location(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateLocationRequest>,
) -> Result<Json<LocationResponse>, WorkforceServiceError> {
    identity.require(Capability::ManageSites)?;
    let uc = UpdateLocationUseCase {
        locations: state.location_repo(),
    };
    let location = uc
        .execute(
            id,
            LocationPatch {
                name: body.name,
                address: body.address,
                city: body.city,
                state: body.state,
                contact_name: body.contact_name,
                contact_phone: body.contact_phone,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(location.into()))
}

// ── Beats ────────────────────────────────────────────────────────────────────

pub async fn create_beat(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateBeatRequest>,
) -> Result<(StatusCode, Json<BeatResponse>), WorkforceServiceError> {
    identity.require(Capability::ManageSites)?;
    let uc = CreateBeatUseCase {
        locations: state.location_repo(),
        beats: state.beat_repo(),
    };
    let beat = uc
        .execute(CreateBeatInput {
            location_id: body.location_id,
            name: body.name,
            description: body.description,
            number_of_operators: body.number_of_operators,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(beat.into())))
}

pub async fn list_beats(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<BeatResponse>>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let query: BeatListQuery = parse_query(raw_query)?;
    let uc = ListBeatsUseCase {
        beats: state.beat_repo(),
    };
    let page = uc
        .execute(
            query.location_id,
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(page.map(BeatResponse::from)))
}

pub async fn get_beat(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BeatResponse>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let uc = GetBeatUseCase {
        beats: state.beat_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

pub async fn update_beat(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBeatRequest>,
) -> Result<Json<BeatResponse>, WorkforceServiceError> {
    identity.require(Capability::ManageSites)?;
    let uc = UpdateBeatUseCase {
        beats: state.beat_repo(),
        assignments: state.assignment_repo(),
    };
    let beat = uc
        .execute(
            id,
            BeatPatch {
                name: body.name,
                description: body.description,
                number_of_operators: body.number_of_operators,
                is_active: body.is_active,
                override_capacity: body.override_capacity,
            },
        )
        .await?;
    Ok(Json(beat.into()))
}

// ── GET /beats/{id}/occupancy ────────────────────────────────────────────────

pub async fn beat_occupancy(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OccupancyResponse>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let uc = BeatOccupancyUseCase {
        beats: state.beat_repo(),
        assignments: state.assignment_repo(),
    };
    let occupancy = uc.execute(id).await?;
    Ok(Json(OccupancyResponse::new(id, occupancy)))
}
