//! Closed vocabulary of the demand model.
//!
//! These enumerations are fixed: the scoring tables in [`crate::config`] are
//! sized by them and every dense matrix in the pipeline is indexed by them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Time-of-day bucket. Five fixed buckets; ordering is presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    Morning,
    AmRush,
    Midday,
    PmRush,
    Night,
}

impl TimePeriod {
    pub const COUNT: usize = 5;

    pub const ALL: [TimePeriod; Self::COUNT] = [
        TimePeriod::Morning,
        TimePeriod::AmRush,
        TimePeriod::Midday,
        TimePeriod::PmRush,
        TimePeriod::Night,
    ];

    /// Dense index into per-period storage.
    pub fn index(self) -> usize {
        match self {
            TimePeriod::Morning => 0,
            TimePeriod::AmRush => 1,
            TimePeriod::Midday => 2,
            TimePeriod::PmRush => 3,
            TimePeriod::Night => 4,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimePeriod::Morning => "morning",
            TimePeriod::AmRush => "am_rush",
            TimePeriod::Midday => "midday",
            TimePeriod::PmRush => "pm_rush",
            TimePeriod::Night => "night",
        };
        write!(f, "{}", name)
    }
}

/// Land-use classification carried by land-use polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanduseClass {
    Commercial,
    Retail,
    Industrial,
    Residential,
}

impl LanduseClass {
    pub const COUNT: usize = 4;

    pub const ALL: [LanduseClass; Self::COUNT] = [
        LanduseClass::Commercial,
        LanduseClass::Retail,
        LanduseClass::Industrial,
        LanduseClass::Residential,
    ];

    pub fn index(self) -> usize {
        match self {
            LanduseClass::Commercial => 0,
            LanduseClass::Retail => 1,
            LanduseClass::Industrial => 2,
            LanduseClass::Residential => 3,
        }
    }

    /// Parse the upstream classification attribute. Unknown tags are ignored
    /// by the acquisition layer, so this only covers the closed set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "commercial" => Some(LanduseClass::Commercial),
            "retail" => Some(LanduseClass::Retail),
            "industrial" => Some(LanduseClass::Industrial),
            "residential" => Some(LanduseClass::Residential),
            _ => None,
        }
    }
}

/// Building classification used only to estimate zone population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Apartments,
    Barracks,
    Bungalow,
    Detached,
    Dormitory,
    Hotel,
    House,
    SemidetachedHouse,
}

impl BuildingKind {
    pub const COUNT: usize = 8;

    pub const ALL: [BuildingKind; Self::COUNT] = [
        BuildingKind::Apartments,
        BuildingKind::Barracks,
        BuildingKind::Bungalow,
        BuildingKind::Detached,
        BuildingKind::Dormitory,
        BuildingKind::Hotel,
        BuildingKind::House,
        BuildingKind::SemidetachedHouse,
    ];

    pub fn index(self) -> usize {
        match self {
            BuildingKind::Apartments => 0,
            BuildingKind::Barracks => 1,
            BuildingKind::Bungalow => 2,
            BuildingKind::Detached => 3,
            BuildingKind::Dormitory => 4,
            BuildingKind::Hotel => 5,
            BuildingKind::House => 6,
            BuildingKind::SemidetachedHouse => 7,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "apartments" => Some(BuildingKind::Apartments),
            "barracks" => Some(BuildingKind::Barracks),
            "bungalow" => Some(BuildingKind::Bungalow),
            "detached" => Some(BuildingKind::Detached),
            "dormitory" => Some(BuildingKind::Dormitory),
            "hotel" => Some(BuildingKind::Hotel),
            "house" => Some(BuildingKind::House),
            "semidetached_house" => Some(BuildingKind::SemidetachedHouse),
            _ => None,
        }
    }
}
