use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{AssignmentRepository, BeatRepository, LocationRepository};
use crate::domain::site::{Beat, BeatPatch, Location, LocationPatch, Occupancy};
use crate::error::WorkforceServiceError;

fn required(value: &str, what: &'static str) -> Result<String, WorkforceServiceError> {
    let value = value.trim();
    if value.is_empty() {
        Err(WorkforceServiceError::InvalidInput(what))
    } else {
        Ok(value.to_owned())
    }
}

// ── Locations ────────────────────────────────────────────────────────────────

pub struct CreateLocationInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

pub struct CreateLocationUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> CreateLocationUseCase<L> {
    pub async fn execute(
        &self,
        input: CreateLocationInput,
    ) -> Result<Location, WorkforceServiceError> {
        let now = Utc::now();
        let location = Location {
            id: Uuid::now_v7(),
            name: required(&input.name, "location name is required")?,
            address: required(&input.address, "address is required")?,
            city: required(&input.city, "city is required")?,
            state: required(&input.state, "state is required")?,
            contact_name: input.contact_name,
            contact_phone: input.contact_phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.locations.create(&location).await?;
        info!(location_id = %location.id, name = %location.name, "location created");
        Ok(location)
    }
}

pub struct UpdateLocationUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> UpdateLocationUseCase<L> {
    pub async fn execute(
        &self,
        id: Uuid,
        patch: LocationPatch,
    ) -> Result<Location, WorkforceServiceError> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(WorkforceServiceError::InvalidInput(
                "location name is required",
            ));
        }
        let mut location = self
            .locations
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::LocationNotFound)?;
        location.apply(patch, Utc::now());
        self.locations.update(&location).await?;
        info!(location_id = %id, is_active = location.is_active, "location updated");
        Ok(location)
    }
}

pub struct GetLocationUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> GetLocationUseCase<L> {
    pub async fn execute(&self, id: Uuid) -> Result<Location, WorkforceServiceError> {
        self.locations
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::LocationNotFound)
    }
}

pub struct ListLocationsUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> ListLocationsUseCase<L> {
    pub async fn execute(
        &self,
        active_only: bool,
        page: PageRequest,
    ) -> Result<Page<Location>, WorkforceServiceError> {
        self.locations.list(active_only, page).await
    }
}

// ── Beats ────────────────────────────────────────────────────────────────────

pub struct CreateBeatInput {
    pub location_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub number_of_operators: u32,
}

pub struct CreateBeatUseCase<L: LocationRepository, B: BeatRepository> {
    pub locations: L,
    pub beats: B,
}

impl<L: LocationRepository, B: BeatRepository> CreateBeatUseCase<L, B> {
    pub async fn execute(&self, input: CreateBeatInput) -> Result<Beat, WorkforceServiceError> {
        if input.number_of_operators < 1 {
            return Err(WorkforceServiceError::InvalidInput(
                "number of operators must be at least 1",
            ));
        }
        let location = self
            .locations
            .find(input.location_id)
            .await?
            .ok_or(WorkforceServiceError::LocationNotFound)?;
        if !location.is_active {
            return Err(WorkforceServiceError::InvalidInput("location is inactive"));
        }
        let now = Utc::now();
        let beat = Beat {
            id: Uuid::now_v7(),
            location_id: location.id,
            name: required(&input.name, "beat name is required")?,
            description: input.description,
            number_of_operators: input.number_of_operators,
            headcount_override: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.beats.create(&beat).await?;
        info!(
            beat_id = %beat.id,
            location_id = %beat.location_id,
            required = beat.number_of_operators,
            "beat created"
        );
        Ok(beat)
    }
}

/// Lowering the headcount below the beat's current occupancy needs
/// `override_capacity`; the beat then records `headcount_override`.
pub struct UpdateBeatUseCase<B: BeatRepository, A: AssignmentRepository> {
    pub beats: B,
    pub assignments: A,
}

impl<B: BeatRepository, A: AssignmentRepository> UpdateBeatUseCase<B, A> {
    pub async fn execute(&self, id: Uuid, patch: BeatPatch) -> Result<Beat, WorkforceServiceError> {
        if patch.number_of_operators == Some(0) {
            return Err(WorkforceServiceError::InvalidInput(
                "number of operators must be at least 1",
            ));
        }
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(WorkforceServiceError::InvalidInput("beat name is required"));
        }
        let mut beat = self
            .beats
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::BeatNotFound)?;
        if let Some(required) = patch.number_of_operators {
            let occupancy = self.assignments.count_active_for_beat(id).await?;
            if required < occupancy {
                if !patch.override_capacity {
                    return Err(WorkforceServiceError::CapacityExceeded {
                        occupancy,
                        required,
                    });
                }
                beat.headcount_override = true;
                info!(
                    beat_id = %id,
                    occupancy,
                    required,
                    "headcount lowered below occupancy with override"
                );
            } else {
                beat.headcount_override = false;
            }
        }
        beat.apply(patch, Utc::now());
        self.beats.update(&beat).await?;
        info!(beat_id = %id, is_active = beat.is_active, "beat updated");
        Ok(beat)
    }
}

pub struct GetBeatUseCase<B: BeatRepository> {
    pub beats: B,
}

impl<B: BeatRepository> GetBeatUseCase<B> {
    pub async fn execute(&self, id: Uuid) -> Result<Beat, WorkforceServiceError> {
        self.beats
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::BeatNotFound)
    }
}

pub struct ListBeatsUseCase<B: BeatRepository> {
    pub beats: B,
}

impl<B: BeatRepository> ListBeatsUseCase<B> {
    pub async fn execute(
        &self,
        location_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Beat>, WorkforceServiceError> {
        self.beats.list(location_id, page).await
    }
}

pub struct BeatOccupancyUseCase<B: BeatRepository, A: AssignmentRepository> {
    pub beats: B,
    pub assignments: A,
}

impl<B: BeatRepository, A: AssignmentRepository> BeatOccupancyUseCase<B, A> {
    pub async fn execute(&self, beat_id: Uuid) -> Result<Occupancy, WorkforceServiceError> {
        let beat = self
            .beats
            .find(beat_id)
            .await?
            .ok_or(WorkforceServiceError::BeatNotFound)?;
        let occupancy = self.assignments.count_active_for_beat(beat_id).await?;
        Ok(Occupancy::new(occupancy, beat.number_of_operators))
    }
}
