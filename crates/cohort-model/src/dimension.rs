//! Closed sets of survey column names.
//!
//! The household and women tables carry dozens of columns, but only a fixed
//! set of categorical attributes is explored and a fixed set of structural
//! columns is used for joining and for the mortality statistic. Both sets are
//! enums backed by the exact CSV header text, so configuration is validated
//! once when it is loaded instead of comparing strings throughout the
//! pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Name of the derived per-row mortality column.
pub const MORTALITY_RATE_COLUMN: &str = "Mortality Rate";

/// Categorical attributes whose value combinations are explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dimension {
    AgeIn5YearGroups,
    TypeOfPlaceOfResidence,
    NumberOfHouseholdMembers,
    SourceOfDrinkingWater,
    TimeToGetToWaterSource,
    TypeOfToiletFacility,
    HasElectricity,
    HasRadio,
    AgeOfHeadOfHousehold,
}

impl Dimension {
    /// Every dimension, in default exploration order.
    pub const ALL: [Dimension; 9] = [
        Dimension::AgeIn5YearGroups,
        Dimension::TypeOfPlaceOfResidence,
        Dimension::NumberOfHouseholdMembers,
        Dimension::SourceOfDrinkingWater,
        Dimension::TimeToGetToWaterSource,
        Dimension::TypeOfToiletFacility,
        Dimension::HasElectricity,
        Dimension::HasRadio,
        Dimension::AgeOfHeadOfHousehold,
    ];

    /// Returns the CSV column header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::AgeIn5YearGroups => "Age in 5-year groups",
            Dimension::TypeOfPlaceOfResidence => "Type of place of residence",
            Dimension::NumberOfHouseholdMembers => "Number of household members",
            Dimension::SourceOfDrinkingWater => "Source of drinking water",
            Dimension::TimeToGetToWaterSource => "Time to get to water source (minutes)",
            Dimension::TypeOfToiletFacility => "Type of toilet facility",
            Dimension::HasElectricity => "Has electricity",
            Dimension::HasRadio => "Has radio",
            Dimension::AgeOfHeadOfHousehold => "Age of head of household",
        }
    }

    /// Returns the snake_case identifier accepted in configuration files.
    pub fn identifier(&self) -> &'static str {
        match self {
            Dimension::AgeIn5YearGroups => "age_in_5_year_groups",
            Dimension::TypeOfPlaceOfResidence => "type_of_place_of_residence",
            Dimension::NumberOfHouseholdMembers => "number_of_household_members",
            Dimension::SourceOfDrinkingWater => "source_of_drinking_water",
            Dimension::TimeToGetToWaterSource => "time_to_get_to_water_source_minutes",
            Dimension::TypeOfToiletFacility => "type_of_toilet_facility",
            Dimension::HasElectricity => "has_electricity",
            Dimension::HasRadio => "has_radio",
            Dimension::AgeOfHeadOfHousehold => "age_of_head_of_household",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ModelError;

    /// Accepts the column header or the snake_case identifier, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|dimension| {
                dimension.as_str().eq_ignore_ascii_case(trimmed)
                    || dimension.identifier().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ModelError::UnknownDimension(s.to_string()))
    }
}

impl TryFrom<String> for Dimension {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dimension> for String {
    fn from(value: Dimension) -> Self {
        value.as_str().to_string()
    }
}

/// Structural columns used for joining tables and deriving mortality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyColumn {
    HouseholdNumber,
    ClusterNumber,
    TotalChildrenEverBorn,
    SonsWhoHaveDied,
    DaughtersWhoHaveDied,
}

impl KeyColumn {
    /// Composite key shared by the household and women tables.
    pub const JOIN_KEYS: [KeyColumn; 2] = [KeyColumn::ClusterNumber, KeyColumn::HouseholdNumber];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyColumn::HouseholdNumber => "Household number",
            KeyColumn::ClusterNumber => "Cluster number",
            KeyColumn::TotalChildrenEverBorn => "Total children ever born",
            KeyColumn::SonsWhoHaveDied => "Sons who have died",
            KeyColumn::DaughtersWhoHaveDied => "Daughters who have died",
        }
    }
}

impl fmt::Display for KeyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyColumn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [
            KeyColumn::HouseholdNumber,
            KeyColumn::ClusterNumber,
            KeyColumn::TotalChildrenEverBorn,
            KeyColumn::SonsWhoHaveDied,
            KeyColumn::DaughtersWhoHaveDied,
        ]
        .into_iter()
        .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| ModelError::UnknownKeyColumn(s.to_string()))
    }
}
