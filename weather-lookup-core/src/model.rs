use crate::category::Category;

/// Resolved weather for one successful lookup.
///
/// Only built by [`crate::mapper`] from a fully-shaped provider payload, or
/// via [`WeatherSnapshot::placeholder`] for the initial screen.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Percent, 0-100.
    pub humidity: f64,
    pub feels_like: f64,
    pub condition_description: String,
    /// Meters per second.
    pub wind_speed: f64,
    /// Hectopascals.
    pub pressure: f64,
    /// Kilometers, one decimal place.
    pub visibility_km: f64,
}

impl WeatherSnapshot {
    /// Seeded snapshot shown before any lookup has succeeded.
    pub fn placeholder() -> Self {
        Self {
            city: "Mumbai".to_string(),
            temperature: 24.0,
            temperature_min: 23.0,
            temperature_max: 45.0,
            humidity: 47.0,
            feels_like: 25.0,
            condition_description: "cloud".to_string(),
            wind_speed: 5.2,
            pressure: 1013.0,
            visibility_km: 10.0,
        }
    }

    pub fn category(&self) -> Category {
        Category::classify(self.humidity, self.temperature)
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Transient state of the search form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupState {
    /// Current contents of the input field.
    pub pending_text: String,
    pub status: LookupStatus,
    /// Message shown in the error notice region while `status` is `Error`.
    pub last_error: Option<String>,
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        self.status == LookupStatus::Loading
    }
}
