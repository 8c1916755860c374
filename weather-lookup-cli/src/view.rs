//! Text rendering of the search form notices and the results panel.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use weather_lookup_core::WeatherSnapshot;

pub const TITLE: &str = "⛅ Weather App";
pub const TAGLINE: &str = "Get accurate weather information worldwide";
pub const SEARCH_HINT: &str =
    "Tip: You can use country codes for more accuracy (e.g., \"London,UK\" or \"Paris,FR\")";
pub const LOOKUP_FAILED: &str = "City not found. Please check the spelling and try again.";
pub const FOOTER: &str = "Powered by OpenWeather API";

const RULE: &str = "────────────────────────────────────────────";

pub fn render_header() -> String {
    format!("{TITLE}\n{TAGLINE}\n🌡️ Temperature · 💧 Humidity · 💨 Wind Speed\n")
}

pub fn searching(city: &str) -> String {
    format!("Searching for {}...", city.trim())
}

/// Results panel. `now` is the render time shown as "Last updated".
pub fn render_panel<Tz>(snapshot: &WeatherSnapshot, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let category = snapshot.category();

    let rows = [
        ("Feels Like", format!("{}°C", snapshot.feels_like)),
        ("Humidity", format!("{}%", snapshot.humidity)),
        ("Min Temp", format!("{}°C", snapshot.temperature_min)),
        ("Max Temp", format!("{}°C", snapshot.temperature_max)),
        ("Wind Speed", format!("{} m/s", snapshot.wind_speed)),
        ("Pressure", format!("{} hPa", snapshot.pressure)),
        ("Visibility", format!("{:.1} km", snapshot.visibility_km)),
    ];

    let mut lines = vec![
        RULE.to_string(),
        format!(
            "  🌡️ {}°C   {}   [{} {}]",
            snapshot.temperature,
            snapshot.city,
            category.icon(),
            category.label()
        ),
        format!("  {}", snapshot.condition_description),
        RULE.to_string(),
    ];
    lines.extend(rows.iter().map(|(label, value)| format!("  {label:<12} {value}")));
    lines.push(RULE.to_string());
    lines.push(format!("  🖼  {}", category.image_url()));
    lines.push(format!("  🕐 Last updated: {}", now.format("%H:%M:%S")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
