//! Provider JSON -> [`WeatherSnapshot`].
//!
//! The payload is decoded into strict private structs first, so a snapshot is
//! either built from every required field or not built at all.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::WeatherSnapshot;

#[derive(Debug, Error)]
pub enum MappingError {
    /// A field is absent or has the wrong JSON type.
    #[error("malformed provider payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("provider payload is missing `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    feels_like: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Meters.
    visibility: f64,
}

pub fn map_response(body: &str) -> Result<WeatherSnapshot, MappingError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    into_snapshot(parsed)
}

pub fn map_value(value: Value) -> Result<WeatherSnapshot, MappingError> {
    let parsed: OwCurrentResponse = serde_json::from_value(value)?;
    into_snapshot(parsed)
}

fn into_snapshot(parsed: OwCurrentResponse) -> Result<WeatherSnapshot, MappingError> {
    let condition_description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or(MappingError::MissingField("weather[0].description"))?;

    Ok(WeatherSnapshot {
        city: parsed.name,
        temperature: parsed.main.temp,
        temperature_min: parsed.main.temp_min,
        temperature_max: parsed.main.temp_max,
        humidity: parsed.main.humidity,
        feels_like: parsed.main.feels_like,
        condition_description,
        wind_speed: parsed.wind.speed,
        pressure: parsed.main.pressure,
        visibility_km: round_to_tenth(parsed.visibility / 1000.0),
    })
}

/// Round to one decimal place using the exact binary value of `value`, so
/// 12.35 (stored as 12.3499...) becomes 12.3. Exact ties go away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    // Every finite double at or above 2^52 is already an integer.
    if !value.is_finite() || value.abs() >= TWO_POW_52 {
        return value;
    }

    let tenths = tenths_half_up(value.abs());
    (tenths as f64 / 10.0).copysign(value)
}

const TWO_POW_52: f64 = 4_503_599_627_370_496.0;

/// `round(value * 10)` computed on the exact mantissa/exponent of a
/// non-negative double below 2^52.
fn tenths_half_up(value: f64) -> u64 {
    let bits = value.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);

    let (mantissa, exp) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), exp_bits - 1075)
    };

    // value < 2^52 keeps exp negative; value * 10 < 2^56 fits in u64 below.
    let shift = exp.unsigned_abs();
    if shift > 64 {
        return 0;
    }

    let scaled = u128::from(mantissa) * 10;
    let whole = scaled >> shift;
    let remainder = scaled & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);

    let rounded = if remainder >= half { whole + 1 } else { whole };
    rounded as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use serde_json::json;

    fn london() -> Value {
        json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
            "main": {
                "temp": 18,
                "feels_like": 17.4,
                "temp_min": 16.1,
                "temp_max": 19.3,
                "pressure": 1012,
                "humidity": 60
            },
            "visibility": 10000,
            "wind": { "speed": 4.1, "deg": 240 },
            "name": "London",
            "cod": 200
        })
    }

    #[test]
    fn maps_full_payload() {
        let snapshot = map_value(london()).expect("payload is complete");

        assert_eq!(snapshot.city, "London");
        assert_eq!(snapshot.temperature, 18.0);
        assert_eq!(snapshot.temperature_min, 16.1);
        assert_eq!(snapshot.temperature_max, 19.3);
        assert_eq!(snapshot.humidity, 60.0);
        assert_eq!(snapshot.feels_like, 17.4);
        assert_eq!(snapshot.condition_description, "broken clouds");
        assert_eq!(snapshot.wind_speed, 4.1);
        assert_eq!(snapshot.pressure, 1012.0);
        assert_eq!(snapshot.visibility_km, 10.0);
        assert_eq!(snapshot.category(), Category::Hot);
    }

    #[test]
    fn visibility_is_rounded_to_one_decimal() {
        let mut payload = london();
        payload["visibility"] = json!(12345);

        let snapshot = map_value(payload).unwrap();
        assert_eq!(snapshot.visibility_km, 12.3);
    }

    #[test]
    fn visibility_rounds_from_the_stored_value() {
        // 12.35 is stored just below the tie, 2.45 and 8.65 just above it.
        let mut payload = london();
        payload["visibility"] = json!(12350);
        assert_eq!(map_value(payload).unwrap().visibility_km, 12.3);

        assert_eq!(round_to_tenth(2450.0 / 1000.0), 2.5);
        assert_eq!(round_to_tenth(8650.0 / 1000.0), 8.7);
    }

    #[test]
    fn round_to_tenth_breaks_exact_ties_upward() {
        assert_eq!(round_to_tenth(10.0), 10.0);
        assert_eq!(round_to_tenth(12.345), 12.3);
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(2250.0 / 1000.0), 2.3);
        assert_eq!(round_to_tenth(-0.25), -0.3);
    }

    #[test]
    fn round_to_tenth_handles_extremes() {
        assert_eq!(round_to_tenth(0.0), 0.0);
        assert_eq!(round_to_tenth(0.04), 0.0);
        assert_eq!(round_to_tenth(0.05), 0.1);
        assert_eq!(round_to_tenth(1e-300), 0.0);
        assert_eq!(round_to_tenth(1e17), 1e17);
        assert!(round_to_tenth(f64::NAN).is_nan());
    }

    #[test]
    fn missing_nested_field_is_malformed() {
        let mut payload = london();
        payload["main"].as_object_mut().unwrap().remove("pressure");

        let err = map_value(payload).unwrap_err();
        assert!(matches!(err, MappingError::Malformed(_)));
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn wrong_type_is_malformed() {
        let mut payload = london();
        payload["main"]["temp"] = json!("18");

        assert!(matches!(map_value(payload), Err(MappingError::Malformed(_))));
    }

    #[test]
    fn missing_visibility_is_malformed() {
        let mut payload = london();
        payload.as_object_mut().unwrap().remove("visibility");

        assert!(map_value(payload).is_err());
    }

    #[test]
    fn empty_weather_array_is_rejected() {
        let mut payload = london();
        payload["weather"] = json!([]);

        let err = map_value(payload).unwrap_err();
        assert!(matches!(err, MappingError::MissingField("weather[0].description")));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = map_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, MappingError::Malformed(_)));
    }

    #[test]
    fn map_response_matches_map_value() {
        let body = london().to_string();
        assert_eq!(map_response(&body).unwrap(), map_value(london()).unwrap());
    }
}
