//! Condition text translation and icon mapping.
//!
//! The agency reports conditions as free Korean text ("맑음", "흐리고 비",
//! ...). The UI wants an English display string and an icon key.

/// Translate an agency condition string to its English display form.
///
/// Unknown strings pass through verbatim; empty input defaults to "Clear".
pub fn translate_condition(condition: &str) -> String {
    if condition.is_empty() {
        return "Clear".to_string();
    }

    match condition {
        "맑음" => "Clear",
        "구름많음" => "Partly Cloudy",
        "흐림" => "Cloudy",
        "흐리고 비" => "Cloudy with Rain",
        "구름많고 비" => "Partly Cloudy with Rain",
        "비" => "Rainy",
        "소나기" => "Showers",
        "눈" => "Snow",
        "구름많고 눈" => "Partly Cloudy with Snow",
        "흐리고 눈" => "Cloudy with Snow",
        other => return other.to_string(),
    }
    .to_string()
}

/// Map an agency condition string to an icon key.
///
/// Substring checks, in priority order: cloud cover wins over
/// precipitation ("구름많고 비" renders the partly-cloudy icon).
pub fn icon_key(condition: &str) -> &'static str {
    if condition.contains('맑') {
        "sunny"
    } else if condition.contains("구름많") {
        "partly-cloudy"
    } else if condition.contains("흐림") || condition.contains("흐리") {
        "cloudy"
    } else if condition.contains('비') || condition.contains("소나기") {
        "rainy"
    } else if condition.contains('눈') {
        "snowy"
    } else {
        "sunny"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_conditions() {
        assert_eq!(translate_condition("맑음"), "Clear");
        assert_eq!(translate_condition("비"), "Rainy");
        assert_eq!(translate_condition("소나기"), "Showers");
        assert_eq!(translate_condition("구름많고 눈"), "Partly Cloudy with Snow");
    }

    #[test]
    fn test_translate_unknown_passes_through() {
        assert_eq!(translate_condition("황사"), "황사");
    }

    #[test]
    fn test_translate_empty_defaults_to_clear() {
        assert_eq!(translate_condition(""), "Clear");
    }

    #[test]
    fn test_icon_keys() {
        assert_eq!(icon_key("맑음"), "sunny");
        assert_eq!(icon_key("구름많음"), "partly-cloudy");
        assert_eq!(icon_key("흐림"), "cloudy");
        assert_eq!(icon_key("비"), "rainy");
        assert_eq!(icon_key("눈"), "snowy");
    }

    #[test]
    fn test_cloud_cover_beats_precipitation() {
        assert_eq!(icon_key("구름많고 비"), "partly-cloudy");
        assert_eq!(icon_key("흐리고 눈"), "cloudy");
    }

    #[test]
    fn test_icon_unknown_defaults_to_sunny() {
        assert_eq!(icon_key("안개"), "sunny");
    }
}
