use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A client site.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: Option<bool>,
}

impl Location {
    pub fn apply(&mut self, patch: LocationPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if patch.contact_name.is_some() {
            self.contact_name = patch.contact_name;
        }
        if patch.contact_phone.is_some() {
            self.contact_phone = patch.contact_phone;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        self.updated_at = now;
    }
}

/// A named post within a location with a required guard headcount.
#[derive(Debug, Clone)]
pub struct Beat {
    pub id: Uuid,
    pub location_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub number_of_operators: u32,
    /// Set while the headcount sits below occupancy because a lowering was
    /// confirmed with an override.
    pub headcount_override: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BeatPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_of_operators: Option<u32>,
    pub is_active: Option<bool>,
    /// Allow `number_of_operators` below the current occupancy.
    pub override_capacity: bool,
}

impl Beat {
    pub fn apply(&mut self, patch: BeatPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if let Some(required) = patch.number_of_operators {
            self.number_of_operators = required;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        self.updated_at = now;
    }
}

/// Filled vs. required headcount of a beat. Computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub occupancy: u32,
    pub required: u32,
}

impl Occupancy {
    pub fn new(occupancy: u32, required: u32) -> Self {
        Self {
            occupancy,
            required,
        }
    }

    /// No free slot remains.
    pub fn is_full(self) -> bool {
        self.occupancy >= self.required
    }

    pub fn available(self) -> u32 {
        self.required.saturating_sub(self.occupancy)
    }

    pub fn over_capacity(self) -> bool {
        self.occupancy > self.required
    }
}
