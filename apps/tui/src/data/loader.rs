use crate::data::error::DataError;
use crate::data::models::{
    LandUseRecord, LandUseRow, ProductionRecord, ProductionRow, RegionalRecord, ScoreTable,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const PRODUCTION_FILE: &str = "Map1.csv";
pub const REGIONAL_FILE: &str = "Map2.csv";
pub const LAND_USE_FILE: &str = "Map3.csv";
pub const SCORES_FILE: &str = "main_effect_scores.json";

/// Everything the dashboard renders from. A table that failed to load is
/// `None`; the charts built on it stay unrendered.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub production: Option<Arc<[ProductionRecord]>>,
    pub regional: Option<Arc<[RegionalRecord]>>,
    pub land_use: Option<Arc<[LandUseRecord]>>,
    pub scores: Option<Arc<ScoreTable>>,
}

impl Dataset {
    pub const fn is_empty(&self) -> bool {
        self.production.is_none()
            && self.regional.is_none()
            && self.land_use.is_none()
            && self.scores.is_none()
    }
}

/// Loads all input tables concurrently. Failures are logged and leave the
/// corresponding table unset; there is no retry.
pub async fn load_dataset(dir: &Path) -> Dataset {
    info!(dir = %dir.display(), "loading dataset");

    let production_path = dir.join(PRODUCTION_FILE);
    let regional_path = dir.join(REGIONAL_FILE);
    let land_use_path = dir.join(LAND_USE_FILE);
    let scores_path = dir.join(SCORES_FILE);
    let (production, regional, land_use, scores) = tokio::join!(
        load_production(&production_path),
        load_regional(&regional_path),
        load_land_use(&land_use_path),
        load_scores(&scores_path),
    );

    Dataset {
        production: keep(production).map(Arc::from),
        regional: keep(regional).map(Arc::from),
        land_use: keep(land_use).map(Arc::from),
        scores: keep(scores).map(Arc::new),
    }
}

fn keep<T>(result: Result<T, DataError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("{e}");
            None
        }
    }
}

pub async fn load_production(path: &Path) -> Result<Vec<ProductionRecord>, DataError> {
    let bytes = read(path).await?;
    let records = parse_production(bytes.as_slice()).map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    non_empty(records, path)
}

pub async fn load_regional(path: &Path) -> Result<Vec<RegionalRecord>, DataError> {
    let bytes = read(path).await?;
    let records = parse_regional(bytes.as_slice()).map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    non_empty(records, path)
}

pub async fn load_land_use(path: &Path) -> Result<Vec<LandUseRecord>, DataError> {
    let bytes = read(path).await?;
    let records = parse_land_use(bytes.as_slice()).map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    non_empty(records, path)
}

pub async fn load_scores(path: &Path) -> Result<ScoreTable, DataError> {
    let bytes = read(path).await?;
    parse_scores(bytes.as_slice()).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

async fn read(path: &Path) -> Result<Vec<u8>, DataError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    Ok(bytes)
}

fn non_empty<T>(records: Vec<T>, path: &Path) -> Result<Vec<T>, DataError> {
    if records.is_empty() {
        return Err(DataError::Empty {
            path: PathBuf::from(path),
        });
    }
    Ok(records)
}

pub fn parse_production<R: Read>(reader: R) -> Result<Vec<ProductionRecord>, csv::Error> {
    parse_rows(reader, ProductionRecord::from_row)
}

pub fn parse_regional<R: Read>(reader: R) -> Result<Vec<RegionalRecord>, csv::Error> {
    parse_rows(reader, RegionalRecord::from_row)
}

pub fn parse_land_use<R: Read>(reader: R) -> Result<Vec<LandUseRecord>, csv::Error> {
    parse_rows(reader, LandUseRecord::from_row)
}

pub fn parse_scores<R: Read>(reader: R) -> Result<ScoreTable, serde_json::Error> {
    let raw: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_reader(reader)?;
    Ok(ScoreTable::from_raw(raw))
}

/// Deserializes every row and keeps the ones `convert` accepts. Rows that do
/// not deserialize are skipped with a warning; a broken header fails the file.
fn parse_rows<R, Row, T>(reader: R, convert: fn(Row) -> Option<T>) -> Result<Vec<T>, csv::Error>
where
    R: Read,
    Row: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader.headers()?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for row in reader.deserialize::<Row>() {
        match row {
            Ok(row) => match convert(row) {
                Some(record) => records.push(record),
                None => skipped += 1,
            },
            Err(e) => {
                warn!("skipping malformed row: {e}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!(kept = records.len(), skipped, "filtered input rows");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CropCategory, LandMetric, RadarDimension, Region};
    use std::fs;

    const PRODUCTION_CSV: &str = "\
country_or_area,country_code,year,unit,value,category
China,156,2007,Tonnes,457800000,cereals_total
India,356,2007,Tonnes,260500000,cereals_total
Atlantis,,2007,Tonnes,,cereals_total
France,250,2007,Tonnes,59000000,wheat_only
Brazil,76,not-a-year,Tonnes,1,cereals_total
";

    #[test]
    fn production_rows_without_value_or_known_category_are_skipped() -> Result<(), csv::Error> {
        let records = parse_production(PRODUCTION_CSV.as_bytes())?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country, "China");
        assert_eq!(records[0].code, Some(156));
        assert_eq!(records[0].category, CropCategory::CerealsTotal);
        assert!((records[1].value - 260_500_000.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn regional_rows_accept_northern_america() -> Result<(), csv::Error> {
        let csv = "\
country_or_area,country_code,year,unit,value,category
Northern America,,1961,Tonnes,200000000,cereals_total
World,,1961,Tonnes,900000000,cereals_total
";
        let records = parse_regional(csv.as_bytes())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, Region::NorthAmerica);
        Ok(())
    }

    #[test]
    fn land_use_keeps_missing_cells_as_none() -> Result<(), csv::Error> {
        let csv = "\
Country,year,Agricultural land (% of land area),Fertilizer consumption (kilograms per hectare of arable land),Agricultural water withdrawal as % of total renewable water resources
Asia,2000,52.1,,19.5
Kenya,2000,48.0,30.0,10.0
";
        let records = parse_land_use(csv.as_bytes())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].continent, Region::Asia);
        assert_eq!(records[0].metric(LandMetric::Fertilizer), None);
        assert_eq!(records[0].metric(LandMetric::Water), Some(19.5));
        Ok(())
    }

    #[test]
    fn scores_map_indicator_names_to_dimensions() -> Result<(), serde_json::Error> {
        let json = r#"{
            "Europe": {
                "Agricultural land (% of land area)": 1.25,
                "Permanent cropland (% of land area)": 3.1,
                "Unrelated indicator": 9.0
            },
            "Atlantis": { "Agricultural land (% of land area)": 1.0 }
        }"#;
        let table = parse_scores(json.as_bytes())?;

        assert_eq!(table.regions.len(), 1);
        assert_eq!(table.score(Region::Europe, RadarDimension::LandUse), Some(1.25));
        assert_eq!(table.score(Region::Europe, RadarDimension::WaterUse), None);
        Ok(())
    }

    #[tokio::test]
    async fn load_dataset_keeps_tables_that_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PRODUCTION_FILE), PRODUCTION_CSV)?;
        fs::write(dir.path().join(SCORES_FILE), "{ not json")?;

        let dataset = load_dataset(dir.path()).await;

        assert_eq!(dataset.production.as_ref().map(|rows| rows.len()), Some(2));
        assert!(dataset.regional.is_none());
        assert!(dataset.land_use.is_none());
        assert!(dataset.scores.is_none());
        assert!(!dataset.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_reports_io_error() {
        let result = load_production(Path::new("/definitely/not/here/Map1.csv")).await;

        assert!(matches!(result, Err(DataError::Io { .. })));
    }

    #[tokio::test]
    async fn header_only_file_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(REGIONAL_FILE);
        fs::write(&path, "country_or_area,country_code,year,unit,value,category\n")?;

        let result = load_regional(&path).await;

        assert!(matches!(result, Err(DataError::Empty { .. })));
        Ok(())
    }
}
