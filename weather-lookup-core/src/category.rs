//! Display category derived from a snapshot.

const RAINY_HUMIDITY_THRESHOLD: f64 = 80.0;
const HOT_TEMPERATURE_THRESHOLD: f64 = 15.0;

const RAINY_IMAGE_URL: &str = "https://media.istockphoto.com/id/498063665/photo/rainy-landscape.webp?a=1&b=1&s=612x612&w=0&k=20&c=hOE6L7f7OoSKUW1Q4tR27GoEkOU_ywKJGCvSO77SeZg=";
const HOT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1565677913671-ce5a5c0ae655?auto=format&fit=crop&q=60&w=600";
const COLD_IMAGE_URL: &str = "https://images.unsplash.com/photo-1674407866481-a39b2239f771?auto=format&fit=crop&q=60&w=600";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Rainy,
    Hot,
    Cold,
}

impl Category {
    /// First match wins: humidity above 80 is rainy, otherwise temperature
    /// above 15 is hot, everything else is cold. Both thresholds are strict.
    pub fn classify(humidity: f64, temperature: f64) -> Self {
        if humidity > RAINY_HUMIDITY_THRESHOLD {
            Category::Rainy
        } else if temperature > HOT_TEMPERATURE_THRESHOLD {
            Category::Hot
        } else {
            Category::Cold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Rainy => "Rainy",
            Category::Hot => "Hot",
            Category::Cold => "Cold",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Rainy => "🌧️",
            Category::Hot => "☀️",
            Category::Cold => "❄️",
        }
    }

    pub fn image_url(&self) -> &'static str {
        match self {
            Category::Rainy => RAINY_IMAGE_URL,
            Category::Hot => HOT_IMAGE_URL,
            Category::Cold => COLD_IMAGE_URL,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humid_is_rainy_regardless_of_temperature() {
        assert_eq!(Category::classify(85.0, 10.0), Category::Rainy);
        assert_eq!(Category::classify(85.0, 35.0), Category::Rainy);
    }

    #[test]
    fn warm_and_dry_is_hot() {
        assert_eq!(Category::classify(50.0, 20.0), Category::Hot);
    }

    #[test]
    fn cool_and_dry_is_cold() {
        assert_eq!(Category::classify(50.0, 10.0), Category::Cold);
    }

    #[test]
    fn thresholds_are_strict() {
        // humidity 80 falls through to the temperature check
        assert_eq!(Category::classify(80.0, 20.0), Category::Hot);
        assert_eq!(Category::classify(80.0, 10.0), Category::Cold);
        assert_eq!(Category::classify(50.0, 15.0), Category::Cold);
    }

    #[test]
    fn total_over_extreme_inputs() {
        assert_eq!(Category::classify(-5.0, -40.0), Category::Cold);
        assert_eq!(Category::classify(100.0, 60.0), Category::Rainy);
        assert_eq!(Category::classify(f64::NAN, f64::NAN), Category::Cold);
    }

    #[test]
    fn label_and_display_agree() {
        for category in [Category::Rainy, Category::Hot, Category::Cold] {
            assert_eq!(category.to_string(), category.label());
            assert!(category.image_url().starts_with("https://"));
        }
    }
}
