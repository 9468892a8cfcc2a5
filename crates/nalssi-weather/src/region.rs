//! 기상청 예보구역코드 매핑.
//!
//! Maps a region display name to the four agency-specific codes the
//! mid-range endpoints key on. Each forecast type has its own code space,
//! so the four tables are looked up independently and each falls back to
//! its Seoul default on a miss.

use serde::{Deserialize, Serialize};

/// 중기기상전망조회 지점번호
const OUTLOOK_STATIONS: &[(&str, &str)] = &[
    ("전국", "108"),
    ("서울", "109"),
    ("인천", "109"),
    ("경기", "109"),
    ("강원", "105"),
    ("충북", "131"),
    ("대전", "133"),
    ("세종", "133"),
    ("충남", "133"),
    ("전북", "146"),
    ("광주", "156"),
    ("전남", "156"),
    ("대구", "143"),
    ("경북", "143"),
    ("부산", "159"),
    ("울산", "159"),
    ("경남", "159"),
    ("제주", "184"),
];

/// 중기육상예보구역코드
const LAND_FORECAST_REGIONS: &[(&str, &str)] = &[
    ("서울", "11B00000"),
    ("인천", "11B00000"),
    ("경기", "11B00000"),
    ("강원영서", "11D10000"),
    ("강원영동", "11D20000"),
    ("대전", "11C20000"),
    ("세종", "11C20000"),
    ("충남", "11C20000"),
    ("충북", "11C10000"),
    ("광주", "11F20000"),
    ("전남", "11F20000"),
    ("전북", "11F10000"),
    ("대구", "11H10000"),
    ("경북", "11H10000"),
    ("부산", "11H20000"),
    ("울산", "11H20000"),
    ("경남", "11H20000"),
    ("제주", "11G00000"),
];

/// 중기기온예보구역코드 (주요 도시만)
const TEMPERATURE_REGIONS: &[(&str, &str)] = &[
    ("서울", "11B10101"),
    ("인천", "11B20201"),
    ("수원", "11B20601"),
    ("파주", "11B20305"),
    ("춘천", "11D10301"),
    ("원주", "11D10401"),
    ("강릉", "11D20501"),
    ("대전", "11C20401"),
    ("서산", "11C20101"),
    ("세종", "11C20404"),
    ("청주", "11C10301"),
    ("제주", "11G00201"),
    ("서귀포", "11G00401"),
    ("광주", "11F20501"),
    ("목포", "21F20801"),
    ("여수", "11F20401"),
    ("전주", "11F10201"),
    ("군산", "21F10501"),
    ("부산", "11H20201"),
    ("울산", "11H20101"),
    ("창원", "11H20301"),
    ("대구", "11H10701"),
    ("안동", "11H10501"),
    ("포항", "11H10201"),
];

/// 중기해상예보구역코드
const SEA_FORECAST_REGIONS: &[(&str, &str)] = &[
    ("서해북부", "12A10000"),
    ("서해중부", "12A20000"),
    ("서해남부", "12A30000"),
    ("남해서부", "12B10000"),
    ("남해동부", "12B20000"),
    ("동해남부", "12C10000"),
    ("동해중부", "12C20000"),
    ("동해북부", "12C30000"),
    ("제주도", "12B10500"),
    ("대화퇴", "12D00000"),
    ("동중국해", "12E00000"),
    ("규슈", "12F00000"),
    ("연해주", "12G00000"),
];

/// The four agency codes resolved for one region name.
///
/// Always fully populated; unknown names fall back to the Seoul defaults
/// per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCodeSet {
    pub outlook_station: String,
    pub land_forecast_region: String,
    pub temperature_region: String,
    pub sea_forecast_region: String,
}

impl Default for RegionCodeSet {
    /// Seoul defaults (sea: 서해중부).
    fn default() -> Self {
        Self {
            outlook_station: "109".to_string(),
            land_forecast_region: "11B00000".to_string(),
            temperature_region: "11B10101".to_string(),
            sea_forecast_region: "12A20000".to_string(),
        }
    }
}

fn table_lookup(table: &[(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, code)| *code)
}

/// Resolve a region display name to its agency code set.
///
/// Never fails: unknown or empty input yields the Seoul defaults, and each
/// table falls back independently. 강원 is treated as 강원영서 (a known
/// simplification — no 영서/영동 disambiguation exists here) and any name
/// containing 경기 as exactly 경기.
pub fn resolve(location: &str) -> RegionCodeSet {
    let defaults = RegionCodeSet::default();

    let normalized = location.trim();
    if normalized.is_empty() {
        return defaults;
    }

    let mut processed = normalized;
    if normalized.contains("강원") {
        processed = "강원영서";
    }
    if normalized.contains("경기") {
        processed = "경기";
    }

    let lookup = |table: &[(&'static str, &'static str)], default: &str| -> String {
        table_lookup(table, processed)
            .or_else(|| table_lookup(table, normalized))
            .unwrap_or(default)
            .to_string()
    };

    RegionCodeSet {
        outlook_station: lookup(OUTLOOK_STATIONS, &defaults.outlook_station),
        land_forecast_region: lookup(LAND_FORECAST_REGIONS, &defaults.land_forecast_region),
        temperature_region: lookup(TEMPERATURE_REGIONS, &defaults.temperature_region),
        sea_forecast_region: lookup(SEA_FORECAST_REGIONS, &defaults.sea_forecast_region),
    }
}

/// All region names the search UI should accept, in display order.
pub fn supported_regions() -> &'static [&'static str] {
    &[
        "서울", "인천", "경기", "수원", "파주",
        "강원", "춘천", "원주", "강릉",
        "충북", "청주", "대전", "세종", "충남", "서산",
        "전북", "전주", "군산", "광주", "전남", "목포", "여수",
        "대구", "경북", "안동", "포항", "부산", "울산", "경남", "창원",
        "제주", "서귀포",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_region_resolves_all_tables() {
        let codes = resolve("부산");
        assert_eq!(codes.outlook_station, "159");
        assert_eq!(codes.land_forecast_region, "11H20000");
        assert_eq!(codes.temperature_region, "11H20201");
        // 부산 has no sea-forecast entry; falls back to the Seoul default.
        assert_eq!(codes.sea_forecast_region, "12A20000");
    }

    #[test]
    fn test_empty_input_yields_seoul_defaults() {
        assert_eq!(resolve(""), RegionCodeSet::default());
        assert_eq!(resolve("   "), RegionCodeSet::default());
    }

    #[test]
    fn test_unknown_input_yields_seoul_defaults() {
        assert_eq!(resolve("아틀란티스"), RegionCodeSet::default());
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(resolve("  대전  "), resolve("대전"));
    }

    #[test]
    fn test_gangwon_substitutes_western_region() {
        // 강원 maps to the western (영서) land code, not the eastern one.
        let codes = resolve("강원");
        assert_eq!(codes.land_forecast_region, "11D10000");
        assert_eq!(codes.outlook_station, "105");
    }

    #[test]
    fn test_gangwon_substring_also_substitutes() {
        let codes = resolve("강원도");
        assert_eq!(codes.land_forecast_region, "11D10000");
    }

    #[test]
    fn test_gyeonggi_substring_normalizes() {
        let codes = resolve("경기도");
        assert_eq!(codes.outlook_station, "109");
        assert_eq!(codes.land_forecast_region, "11B00000");
    }

    #[test]
    fn test_tables_fall_back_independently() {
        // 춘천 exists only in the temperature table; the other three fall
        // back to Seoul defaults.
        let codes = resolve("춘천");
        assert_eq!(codes.temperature_region, "11D10301");
        assert_eq!(codes.outlook_station, "109");
        assert_eq!(codes.land_forecast_region, "11B00000");
    }

    #[test]
    fn test_supported_regions_resolve_somewhere() {
        for name in supported_regions() {
            let codes = resolve(name);
            assert!(!codes.outlook_station.is_empty(), "{name}");
            assert!(!codes.land_forecast_region.is_empty(), "{name}");
        }
    }
}
