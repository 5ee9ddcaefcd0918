use crate::domain::{CropCategory, LandMetric, RadarDimension, Region};
use crate::timeline::Year;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Row of the production tables as it appears on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductionRow {
    pub country_or_area: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub country_code: Option<u32>,
    pub year: Year,
    #[serde(default)]
    pub unit: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub value: Option<f64>,
    pub category: String,
}

/// Country-level production of one crop category in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    pub country: String,
    pub code: Option<u32>,
    pub year: Year,
    pub unit: String,
    /// Tonnes.
    pub value: f64,
    pub category: CropCategory,
}

impl ProductionRecord {
    pub(crate) fn from_row(row: ProductionRow) -> Option<Self> {
        let category = CropCategory::parse(&row.category)?;
        let value = row.value.filter(|value| value.is_finite())?;
        Some(Self {
            country: row.country_or_area.trim().to_string(),
            code: row.country_code,
            year: row.year,
            unit: row.unit,
            value,
            category,
        })
    }
}

/// Region-level production of one crop category in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalRecord {
    pub region: Region,
    pub year: Year,
    /// Tonnes.
    pub value: f64,
    pub category: CropCategory,
}

impl RegionalRecord {
    pub(crate) fn from_row(row: ProductionRow) -> Option<Self> {
        Some(Self {
            region: Region::parse(&row.country_or_area)?,
            year: row.year,
            value: row.value.filter(|value| value.is_finite())?,
            category: CropCategory::parse(&row.category)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LandUseRow {
    #[serde(rename = "Country")]
    pub country: String,
    pub year: Year,
    #[serde(
        rename = "Agricultural land (% of land area)",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub agricultural: Option<f64>,
    #[serde(
        rename = "Fertilizer consumption (kilograms per hectare of arable land)",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub fertilizer: Option<f64>,
    #[serde(
        rename = "Agricultural water withdrawal as % of total renewable water resources",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub water: Option<f64>,
}

/// Continental land indicators for one year. Missing cells stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LandUseRecord {
    pub continent: Region,
    pub year: Year,
    pub agricultural: Option<f64>,
    pub fertilizer: Option<f64>,
    pub water: Option<f64>,
}

impl LandUseRecord {
    pub(crate) fn from_row(row: LandUseRow) -> Option<Self> {
        Some(Self {
            continent: Region::parse(&row.country)?,
            year: row.year,
            agricultural: row.agricultural,
            fertilizer: row.fertilizer,
            water: row.water,
        })
    }

    pub fn metric(&self, metric: LandMetric) -> Option<f64> {
        let value = match metric {
            LandMetric::Agricultural => self.agricultural,
            LandMetric::Fertilizer => self.fertilizer,
            LandMetric::Water => self.water,
        };
        value.filter(|value| value.is_finite())
    }
}

/// Per-region radar scores keyed by dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub regions: BTreeMap<Region, BTreeMap<RadarDimension, f64>>,
}

impl ScoreTable {
    /// Builds the table from the raw `{ region: { indicator: score } }` document.
    /// Unknown regions and indicators are dropped.
    pub fn from_raw(raw: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        let regions = raw
            .into_iter()
            .filter_map(|(region, values)| {
                let region = Region::parse(&region)?;
                let scores = values
                    .into_iter()
                    .filter_map(|(key, value)| Some((RadarDimension::parse(&key)?, value)))
                    .collect();
                Some((region, scores))
            })
            .collect();
        Self { regions }
    }

    pub fn score(&self, region: Region, dimension: RadarDimension) -> Option<f64> {
        self.regions.get(&region)?.get(&dimension).copied()
    }
}
