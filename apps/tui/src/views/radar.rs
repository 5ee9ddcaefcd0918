use crate::data::ScoreTable;
use crate::domain::{RadarDimension, Region};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Order of the radar panels on screen.
pub const RADAR_REGIONS: [Region; 6] = [
    Region::Africa,
    Region::Asia,
    Region::Europe,
    Region::NorthAmerica,
    Region::Oceania,
    Region::SouthAmerica,
];

pub const LABEL_WIDTH: usize = 15;

/// Radial axis of one region's chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarScale {
    pub max: f64,
    pub step: f64,
}

impl RadarScale {
    pub const fn for_region(region: Region) -> Self {
        let (max, step) = match region {
            Region::Africa => (1.75, 0.25),
            Region::Asia => (1.2, 0.2),
            Region::Europe => (3.5, 0.5),
            Region::NorthAmerica => (35.0, 5.0),
            Region::Oceania => (7.0, 1.0),
            Region::SouthAmerica => (3.0, 0.5),
        };
        Self { max, step }
    }

    /// Ring values from the first step up to the maximum.
    pub fn ticks(&self) -> Vec<f64> {
        if self.step <= 0.0 {
            return vec![self.max];
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (self.max / self.step + 1e-6).floor() as usize;
        (1..=count).map(|ring| ring as f64 * self.step).collect()
    }
}

pub const fn description(region: Region) -> &'static str {
    match region {
        Region::Africa => "Africa's high land use and cropland stability highlight the agricultural sector's economic significance and reliance on stable farmland. However, very low fertilizer intensity reflects limited input use, which can cap yield potential and challenge food security.",
        Region::Asia => "Asia's relatively high water use efficiency reflects strong irrigation practices and resource adaptation in many countries. However, limited cropland stability and agro-economic advancement highlight challenges with farmland resilience and economic modernization.",
        Region::Europe => "Europe's high cropland stability and fertilizer intensity align with its advanced, mechanized agricultural systems. The balance across other indicators matches Europe's approach to controlled, high-yield farming supported by strong infrastructure.",
        Region::NorthAmerica => "North America's consistently high scores confirm its industrialized, technology-driven agriculture. While ensuring productivity, these intensive practices also come with environmental pressures and resource sustainability concerns.",
        Region::Oceania => "Oceania's high land use and water efficiency scores align with its extensive farming resources and efficient practices. The generally balanced profile reflects a region focused on adaptability and sustainable resource use.",
        Region::SouthAmerica => "South America shows strong cropland stability and land use, fitting its vast natural resources and agricultural capacity. Lower economic and water efficiency scores point to challenges in supporting systems and infrastructure.",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarProfile {
    pub region: Region,
    /// Aligned with [`RadarDimension::ALL`].
    pub scores: [f64; 5],
    pub scale: RadarScale,
}

impl RadarProfile {
    pub fn from_table(table: &ScoreTable, region: Region) -> Self {
        let scores = RadarDimension::ALL.map(|dimension| {
            table
                .score(region, dimension)
                .filter(|score| score.is_finite())
                .unwrap_or(0.0)
        });
        Self {
            region,
            scores,
            scale: RadarScale::for_region(region),
        }
    }

    /// Axis length, stretched when a score exceeds the configured maximum.
    pub fn extent(&self) -> f64 {
        self.scores.iter().copied().fold(self.scale.max, f64::max)
    }

    /// Polygon vertices on the unit circle, first axis pointing up and the
    /// rest following clockwise.
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        let extent = self.extent();
        self.scores
            .iter()
            .enumerate()
            .map(|(index, score)| {
                let radius = if extent > 0.0 {
                    (score / extent).max(0.0)
                } else {
                    0.0
                };
                let (x, y) = axis_direction(index, self.scores.len());
                (x * radius, y * radius)
            })
            .collect()
    }
}

/// Unit vector of axis `index` out of `count`.
pub fn axis_direction(index: usize, count: usize) -> (f64, f64) {
    if count == 0 {
        return (0.0, 1.0);
    }
    let angle = FRAC_PI_2 - TAU * index as f64 / count as f64;
    (angle.cos(), angle.sin())
}

pub fn profiles(table: &ScoreTable) -> Vec<RadarProfile> {
    RADAR_REGIONS
        .into_iter()
        .map(|region| RadarProfile::from_table(table, region))
        .collect()
}

/// Greedy word wrap. Words longer than `max_width` get a line of their own.
pub fn wrap_label(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + word.len() < max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn table() -> ScoreTable {
        let mut europe = BTreeMap::new();
        europe.insert(RadarDimension::AgroEconomic, 1.0);
        europe.insert(RadarDimension::CroplandStability, 3.5);
        let mut oceania = BTreeMap::new();
        oceania.insert(RadarDimension::LandUse, 9.0);
        let mut regions = BTreeMap::new();
        regions.insert(Region::Europe, europe);
        regions.insert(Region::Oceania, oceania);
        ScoreTable { regions }
    }

    #[test]
    fn profiles_follow_panel_order_and_default_missing_scores() {
        let profiles = profiles(&table());

        let order: Vec<Region> = profiles.iter().map(|profile| profile.region).collect();
        assert_eq!(order, RADAR_REGIONS.to_vec());
        assert_eq!(profiles[2].scores, [1.0, 0.0, 0.0, 3.5, 0.0]);
        assert_eq!(profiles[0].scores, [0.0; 5]);
    }

    #[test]
    fn scale_ticks_cover_the_axis() {
        let africa = RadarScale::for_region(Region::Africa);
        let america = RadarScale::for_region(Region::NorthAmerica);

        assert_eq!(africa.ticks().len(), 7);
        assert_eq!(america.ticks(), vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);
        assert_eq!(RadarScale::for_region(Region::Asia).ticks().len(), 6);
    }

    #[test]
    fn vertices_start_at_the_top() {
        let profile = RadarProfile::from_table(&table(), Region::Europe);
        let vertices = profile.vertices();

        let (x, y) = vertices[0];
        assert!(x.abs() < 1e-9);
        assert!((y - 1.0 / 3.5).abs() < 1e-9);
        let (x, y) = vertices[3];
        assert!(x < 0.0 && y < 0.0, "fourth axis sits lower left");
    }

    #[test]
    fn scores_beyond_the_scale_stretch_the_axis() {
        let profile = RadarProfile::from_table(&table(), Region::Oceania);

        assert!((profile.extent() - 9.0).abs() < 1e-9);
        let (x, y) = profile.vertices()[2];
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn labels_wrap_at_word_boundaries() {
        assert_eq!(
            wrap_label("Agro-Economic Advancement", LABEL_WIDTH),
            vec!["Agro-Economic", "Advancement"]
        );
        assert_eq!(wrap_label("Land Use", LABEL_WIDTH), vec!["Land Use"]);
        assert_eq!(
            wrap_label("Water Use Efficiency", LABEL_WIDTH),
            vec!["Water Use", "Efficiency"]
        );
    }
}
