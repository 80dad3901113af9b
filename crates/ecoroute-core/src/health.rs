//! AQI categories and health advice.

/// Category name for an index on the provider's 1-5 scale.
pub fn aqi_label(aqi: Option<u32>) -> &'static str {
    match aqi {
        None | Some(0) => "N/A",
        Some(1) => "Good",
        Some(2) => "Fair",
        Some(3) => "Moderate",
        Some(4) => "Poor",
        Some(_) => "Very Poor",
    }
}

/// Map the provider's 1-5 index to an approximate US AQI value.
pub fn to_us_scale(index: u32) -> u32 {
    match index {
        1 => 50,
        2 => 100,
        3 => 150,
        4 => 200,
        5 => 300,
        _ => 100,
    }
}

/// Advice for a US-scale AQI value.
pub fn health_tips(us_aqi: u32) -> &'static [&'static str] {
    match us_aqi {
        0..=50 => &[
            "Air quality is good. Enjoy outdoor activities!",
            "Keep windows open for fresh air.",
            "Maintain regular exercise.",
        ],
        51..=100 => &[
            "Air quality is moderate. Sensitive groups should be cautious.",
            "Avoid outdoor exercise if you feel irritation.",
            "Drink more water to stay hydrated.",
        ],
        101..=200 => &[
            "Air quality is unhealthy for sensitive groups.",
            "Wear a mask when outdoors.",
            "Use an air purifier indoors.",
        ],
        201..=300 => &[
            "Air quality is poor. Limit outdoor exposure.",
            "Avoid outdoor exercise.",
            "Keep doors and windows closed.",
        ],
        _ => &[
            "Air quality is hazardous!",
            "Stay indoors as much as possible.",
            "Use an N95 mask if you must go out.",
            "Consult a doctor if you have breathing issues.",
        ],
    }
}
