//! Workplace Configuration
//!
//! The workplace is the fixed point and radius that clock-ins are checked
//! against. Exactly one set of settings is active at a time; an editor
//! update replaces it wholesale rather than mutating it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{CoordinateError, GeoPoint, PerimeterCheck};
use crate::units::{km_to_meters, meters_to_km};

/// Name used when the editor leaves the name blank
pub const DEFAULT_WORKPLACE_NAME: &str = "Healthcare Facility";

/// Perimeter radius used when the editor leaves the radius unset (2 km)
pub const DEFAULT_RADIUS_METERS: f64 = 2000.0;

/// Smallest radius the editor accepts (0.1 km)
pub const MIN_EDITOR_RADIUS_METERS: f64 = 100.0;

/// Largest radius the editor accepts (10 km)
pub const MAX_EDITOR_RADIUS_METERS: f64 = 10_000.0;

/// Workplace configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkplaceError {
    #[error("Workplace location requires both latitude and longitude")]
    MissingLocation,

    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("Radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),

    #[error("Radius must be between 100 and 10000 meters (0.1 to 10 km), got {0} m")]
    RadiusOutOfRange(f64),

    #[error("Malformed workplace settings: {0}")]
    Malformed(String),
}

/// The active workplace: a location and the clock-in perimeter around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkplaceSettings {
    pub name: String,

    pub location: GeoPoint,

    /// Clock-in perimeter radius in meters
    pub radius_meters: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Editor input. Unset fields keep the current value, or fall back to the
/// defaults when no workplace exists yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkplaceUpdate {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub address: Option<String>,

    /// Radius in meters
    #[serde(default)]
    pub radius_meters: Option<f64>,

    /// Radius in kilometers, as typed into the editor. Ignored when
    /// `radius_meters` is also set.
    #[serde(default)]
    pub radius_km: Option<f64>,
}

impl WorkplaceSettings {
    pub fn new(name: impl Into<String>, location: GeoPoint, radius_meters: f64) -> Self {
        WorkplaceSettings {
            name: name.into(),
            location,
            radius_meters,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Radius in kilometers for display
    pub fn radius_km(&self) -> f64 {
        meters_to_km(self.radius_meters)
    }

    /// Distance from the workplace and perimeter membership for `worker`
    pub fn check(&self, worker: GeoPoint) -> PerimeterCheck {
        PerimeterCheck::evaluate(worker, self.location, self.radius_meters)
    }

    /// Whether `worker` may clock in from where they are
    pub fn contains(&self, worker: GeoPoint) -> bool {
        self.check(worker).within
    }

    /// Check the invariants every stored workplace must hold: coordinates in
    /// range and a finite, positive radius.
    pub fn validate(&self) -> Result<(), WorkplaceError> {
        self.location.validate()?;
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(WorkplaceError::InvalidRadius(self.radius_meters));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON, e.g. a seed file
    pub fn from_json(json: &str) -> Result<Self, WorkplaceError> {
        let settings: WorkplaceSettings =
            serde_json::from_str(json).map_err(|e| WorkplaceError::Malformed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build the settings that replace `current` after an editor update.
    ///
    /// The editor is stricter than [`WorkplaceSettings::validate`]: a radius
    /// given in the update has to fall within 0.1 to 10 km. A radius carried
    /// over from `current` is kept as is.
    pub fn from_update(
        current: Option<&WorkplaceSettings>,
        update: WorkplaceUpdate,
    ) -> Result<Self, WorkplaceError> {
        let latitude = update
            .latitude
            .or(current.map(|c| c.location.latitude))
            .ok_or(WorkplaceError::MissingLocation)?;
        let longitude = update
            .longitude
            .or(current.map(|c| c.location.longitude))
            .ok_or(WorkplaceError::MissingLocation)?;
        let location = GeoPoint::validated(latitude, longitude)?;

        let radius_meters = match update.radius_meters.or(update.radius_km.map(km_to_meters)) {
            Some(edited) => {
                if !edited.is_finite() || edited <= 0.0 {
                    return Err(WorkplaceError::InvalidRadius(edited));
                }
                if !(MIN_EDITOR_RADIUS_METERS..=MAX_EDITOR_RADIUS_METERS).contains(&edited) {
                    return Err(WorkplaceError::RadiusOutOfRange(edited));
                }
                edited
            }
            None => current.map_or(DEFAULT_RADIUS_METERS, |c| c.radius_meters),
        };

        let name = non_blank(update.name)
            .or(current.map(|c| c.name.clone()))
            .unwrap_or_else(|| DEFAULT_WORKPLACE_NAME.to_string());
        let address = non_blank(update.address).or(current.and_then(|c| c.address.clone()));

        Ok(WorkplaceSettings {
            name,
            location,
            radius_meters,
            address,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
