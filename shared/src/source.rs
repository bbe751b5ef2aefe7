use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Country, County, Metro, State, Summary};

/// How a topology feature's identifier maps into the source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureIdScheme {
    /// `id` field, or STATEFP + COUNTYFP concatenated from properties.
    CountyFips,
    /// ISO 3166-1 alpha-2 code from the ISO_A2 property.
    CountryIso,
}

/// Per-map topology location and projection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub geo_url: String,
    pub scheme: FeatureIdScheme,
    /// Longitude at the projection center; feature longitudes are wrapped
    /// into `center_lon ± 180` before projecting.
    pub center_lon: f64,
}

/// One drill-down navigation target: a label and its route string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
    pub label: String,
    pub route: String,
}

/// The case-data snapshot the client works against. County, state and
/// metro records are stored whole; world countries are split across three
/// facet tables and only assembled when every facet is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSource {
    #[serde(default)]
    pub counties: HashMap<String, County>,
    #[serde(default)]
    pub states: HashMap<String, State>,
    #[serde(default)]
    pub metros: HashMap<String, Metro>,
    #[serde(default)]
    pub country_names: HashMap<String, String>,
    #[serde(default)]
    pub country_data: HashMap<String, Summary>,
    #[serde(default)]
    pub country_populations: HashMap<String, u64>,
    pub us_map: MapConfig,
    pub world_map: MapConfig,
    pub generated_at: DateTime<Utc>,
}

impl CaseSource {
    /// Direct keyed lookup. `id` is the state+county FIPS concatenation.
    pub fn county_for_id(&self, id: &str) -> Option<&County> {
        self.counties.get(id)
    }

    /// Assemble a country from its name, data and population facets.
    /// Any absent facet means the code does not resolve.
    pub fn country_for_code(&self, code: &str) -> Option<Country> {
        let name = self.country_names.get(code)?;
        let summary = self.country_data.get(code)?;
        let population = self.country_populations.get(code)?;
        Some(Country {
            iso: code.to_string(),
            name: name.clone(),
            population: *population,
            summary: *summary,
        })
    }

    pub fn state_of(&self, county: &County) -> Option<&State> {
        self.states.get(&county.state_fips)
    }

    pub fn metro_of(&self, county: &County) -> Option<&Metro> {
        county.metro_id.as_ref().and_then(|id| self.metros.get(id))
    }

    /// Navigation targets for a clicked county: the county itself, its
    /// metro area when it belongs to one, and its state.
    pub fn navigation_targets(&self, county: &County) -> Vec<NavTarget> {
        let mut targets = vec![NavTarget {
            label: county.name.clone(),
            route: county.route.clone(),
        }];
        if let Some(metro) = self.metro_of(county) {
            targets.push(NavTarget {
                label: metro.name.clone(),
                route: metro.route.clone(),
            });
        }
        if let Some(state) = self.state_of(county) {
            targets.push(NavTarget {
                label: state.name.clone(),
                route: state.route.clone(),
            });
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(confirmed: u64, deaths: u64) -> Summary {
        Summary {
            confirmed,
            deaths,
            days_to_double: 0.0,
        }
    }

    fn test_source() -> CaseSource {
        let mut counties = HashMap::new();
        counties.insert(
            "06085".to_string(),
            County {
                fips: "06085".to_string(),
                name: "Santa Clara".to_string(),
                population: 1_927_852,
                summary: summary(500, 20),
                state_fips: "06".to_string(),
                metro_id: Some("bay-area".to_string()),
                route: "/county/CA/Santa_Clara".to_string(),
            },
        );
        counties.insert(
            "06049".to_string(),
            County {
                fips: "06049".to_string(),
                name: "Modoc".to_string(),
                population: 8_841,
                summary: summary(0, 0),
                state_fips: "06".to_string(),
                metro_id: None,
                route: "/county/CA/Modoc".to_string(),
            },
        );

        let mut states = HashMap::new();
        states.insert(
            "06".to_string(),
            State {
                fips: "06".to_string(),
                name: "California".to_string(),
                population: 39_512_223,
                summary: summary(10_000, 400),
                route: "/state/CA".to_string(),
            },
        );

        let mut metros = HashMap::new();
        metros.insert(
            "bay-area".to_string(),
            Metro {
                id: "bay-area".to_string(),
                name: "Bay Area".to_string(),
                population: 7_753_000,
                summary: summary(2_000, 80),
                route: "/metro/bay-area".to_string(),
            },
        );

        let mut country_names = HashMap::new();
        let mut country_data = HashMap::new();
        let mut country_populations = HashMap::new();
        country_names.insert("IT".to_string(), "Italy".to_string());
        country_data.insert("IT".to_string(), summary(120_000, 15_000));
        country_populations.insert("IT".to_string(), 60_360_000);
        // No population facet for this one.
        country_names.insert("XK".to_string(), "Kosovo".to_string());
        country_data.insert("XK".to_string(), summary(100, 2));

        CaseSource {
            counties,
            states,
            metros,
            country_names,
            country_data,
            country_populations,
            us_map: MapConfig {
                geo_url: "/data/us-counties.json".to_string(),
                scheme: FeatureIdScheme::CountyFips,
                center_lon: -96.0,
            },
            world_map: MapConfig {
                geo_url: "/data/world-110m.json".to_string(),
                scheme: FeatureIdScheme::CountryIso,
                center_lon: 10.0,
            },
            generated_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn county_lookup_is_direct_keyed_access() {
        let source = test_source();
        assert_eq!(source.county_for_id("06085").unwrap().name, "Santa Clara");
        assert!(source.county_for_id("99999").is_none());
    }

    #[test]
    fn country_resolves_only_when_all_facets_present() {
        let source = test_source();
        let italy = source.country_for_code("IT").unwrap();
        assert_eq!(italy.name, "Italy");
        assert_eq!(italy.population, 60_360_000);
        assert_eq!(italy.summary.confirmed, 120_000);

        // Kosovo is missing its population facet.
        assert!(source.country_for_code("XK").is_none());
        assert!(source.country_for_code("ZZ").is_none());
    }

    #[test]
    fn county_with_metro_yields_three_nav_targets() {
        let source = test_source();
        let county = source.county_for_id("06085").unwrap();
        let targets = source.navigation_targets(county);
        let labels: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Santa Clara", "Bay Area", "California"]);
        assert_eq!(targets[1].route, "/metro/bay-area");
    }

    #[test]
    fn county_without_metro_yields_two_nav_targets() {
        let source = test_source();
        let county = source.county_for_id("06049").unwrap();
        let targets = source.navigation_targets(county);
        let labels: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Modoc", "California"]);
    }

    #[test]
    fn snapshot_roundtrips_through_serde() {
        let source = test_source();
        let json = serde_json::to_string(&source).unwrap();
        let back: CaseSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }
}
