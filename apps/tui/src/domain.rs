#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropCategory {
    CerealsTotal,
    RiceMilled,
    CoarseGrain,
}

impl CropCategory {
    pub const ALL: [Self; 3] = [Self::CerealsTotal, Self::RiceMilled, Self::CoarseGrain];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CerealsTotal => "cereals_total",
            Self::RiceMilled => "cereals_rice_milled_eqv",
            Self::CoarseGrain => "coarse_grain_total",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cereals_total" => Some(Self::CerealsTotal),
            "cereals_rice_milled_eqv" => Some(Self::RiceMilled),
            "coarse_grain_total" => Some(Self::CoarseGrain),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CerealsTotal => "Total Cereals",
            Self::RiceMilled => "Rice (Milled)",
            Self::CoarseGrain => "Coarse Grains",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::CerealsTotal => Self::RiceMilled,
            Self::RiceMilled => Self::CoarseGrain,
            Self::CoarseGrain => Self::CerealsTotal,
        }
    }
}

/// Land indicators shown on the land-use map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandMetric {
    Agricultural,
    Fertilizer,
    Water,
}

impl LandMetric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Agricultural => "Agricultural Land",
            Self::Fertilizer => "Fertilizer Usage",
            Self::Water => "Water Use Efficiency",
        }
    }

    /// Column header carrying this metric in the land-use table.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Agricultural => "Agricultural land (% of land area)",
            Self::Fertilizer => "Fertilizer consumption (kilograms per hectare of arable land)",
            Self::Water => "Agricultural water withdrawal as % of total renewable water resources",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Fertilizer => " kg/ha",
            Self::Agricultural | Self::Water => "%",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Agricultural => Self::Fertilizer,
            Self::Fertilizer => Self::Water,
            Self::Water => Self::Agricultural,
        }
    }
}

/// Continental regions. The regional production table spells North America
/// as "Northern America"; the land-use table and the score file do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Oceania,
}

impl Region {
    pub const ALL: [Self; 6] = [
        Self::Africa,
        Self::Asia,
        Self::Europe,
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Oceania,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Africa),
            1 => Some(Self::Asia),
            2 => Some(Self::Europe),
            3 => Some(Self::NorthAmerica),
            4 => Some(Self::SouthAmerica),
            5 => Some(Self::Oceania),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "africa" => Some(Self::Africa),
            "asia" => Some(Self::Asia),
            "europe" => Some(Self::Europe),
            "north america" | "northern america" => Some(Self::NorthAmerica),
            "south america" => Some(Self::SouthAmerica),
            "oceania" => Some(Self::Oceania),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Oceania => "Oceania",
        }
    }

    /// Name used by the regional production table.
    pub const fn regional_name(self) -> &'static str {
        match self {
            Self::NorthAmerica => "Northern America",
            other => other.label(),
        }
    }
}

/// Score dimensions of the regional radar charts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RadarDimension {
    AgroEconomic,
    WaterUse,
    LandUse,
    CroplandStability,
    FertilizerIntensity,
}

impl RadarDimension {
    pub const ALL: [Self; 5] = [
        Self::AgroEconomic,
        Self::WaterUse,
        Self::LandUse,
        Self::CroplandStability,
        Self::FertilizerIntensity,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::AgroEconomic => "Agro-Economic Advancement",
            Self::WaterUse => "Water Use Efficiency",
            Self::LandUse => "Land Use",
            Self::CroplandStability => "Cropland Stability",
            Self::FertilizerIntensity => "Fertilizer Intensity",
        }
    }

    /// Accepts either the indicator name from the score file or the short label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Agriculture, forestry, and fishing, value added (% of GDP)"
            | "Agro-Economic Advancement" => Some(Self::AgroEconomic),
            "Agricultural water withdrawal as % of total renewable water resources"
            | "Water Use Efficiency" => Some(Self::WaterUse),
            "Agricultural land (% of land area)" | "Land Use" => Some(Self::LandUse),
            "Permanent cropland (% of land area)" | "Cropland Stability" => {
                Some(Self::CroplandStability)
            }
            "Fertilizer consumption (kilograms per hectare of arable land)"
            | "Fertilizer Intensity" => Some(Self::FertilizerIntensity),
            _ => None,
        }
    }
}
