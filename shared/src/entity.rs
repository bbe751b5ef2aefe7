use serde::{Deserialize, Serialize};

/// Current cumulative figures for one geographic unit.
/// A zero field means the unit has no data for that metric; the upstream
/// aggregation never reports a genuine zero once a unit is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub days_to_double: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct County {
    /// State FIPS + county FIPS concatenated, e.g. "06085".
    pub fips: String,
    pub name: String,
    pub population: u64,
    #[serde(default)]
    pub summary: Summary,
    pub state_fips: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metro_id: Option<String>,
    /// Pre-computed route string for drill-down navigation.
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub fips: String,
    pub name: String,
    pub population: u64,
    #[serde(default)]
    pub summary: Summary,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metro {
    pub id: String,
    pub name: String,
    pub population: u64,
    #[serde(default)]
    pub summary: Summary,
    pub route: String,
}

/// A world country, assembled from the source's facet tables at resolution
/// time. Not stored whole; see `CaseSource::country_for_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub iso: String,
    pub name: String,
    pub population: u64,
    pub summary: Summary,
}

/// Uniform view over the four entity shapes a map feature can resolve to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    County(County),
    State(State),
    Metro(Metro),
    Country(Country),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::County(c) => &c.name,
            Entity::State(s) => &s.name,
            Entity::Metro(m) => &m.name,
            Entity::Country(c) => &c.name,
        }
    }

    pub fn population(&self) -> u64 {
        match self {
            Entity::County(c) => c.population,
            Entity::State(s) => s.population,
            Entity::Metro(m) => m.population,
            Entity::Country(c) => c.population,
        }
    }

    pub fn summary(&self) -> &Summary {
        match self {
            Entity::County(c) => &c.summary,
            Entity::State(s) => &s.summary,
            Entity::Metro(m) => &m.summary,
            Entity::Country(c) => &c.summary,
        }
    }

    /// Route string for navigation, where one exists. Countries are not
    /// navigable drill-down targets.
    pub fn route(&self) -> Option<&str> {
        match self {
            Entity::County(c) => Some(&c.route),
            Entity::State(s) => Some(&s.route),
            Entity::Metro(m) => Some(&m.route),
            Entity::Country(_) => None,
        }
    }
}
