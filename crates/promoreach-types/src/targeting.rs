//! Campaign objective and audience targeting options.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::InputError;

/// What the advertiser wants the promotion to achieve.
///
/// The objective selects the click-through-rate assumption used by the
/// estimator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Maximize how many people see the content.
    #[default]
    Awareness,
    /// Maximize likes, comments and shares.
    Engagement,
    /// Drive visits to a destination.
    Traffic,
    /// Drive sign-ups or purchases.
    Conversions,
    /// Unrecognized objective; priced with the default click-through rate.
    #[serde(other)]
    Unspecified,
}

impl Objective {
    /// Returns the objective as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Awareness => "awareness",
            Self::Engagement => "engagement",
            Self::Traffic => "traffic",
            Self::Conversions => "conversions",
            Self::Unspecified => "unspecified",
        }
    }

    /// Returns all recognized objectives.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Awareness,
            Self::Engagement,
            Self::Traffic,
            Self::Conversions,
        ]
    }

    /// Parses an objective, mapping anything unrecognized to
    /// [`Objective::Unspecified`].
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "awareness" => Self::Awareness,
            "engagement" => Self::Engagement,
            "traffic" => Self::Traffic,
            "conversions" | "conversion" => Self::Conversions,
            _ => Self::Unspecified,
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Objective {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

/// Gender targeting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// No gender restriction.
    #[default]
    All,
    /// Men only.
    Male,
    /// Women only.
    Female,
}

impl Gender {
    /// Returns the gender option as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Returns true if the audience is restricted to one gender.
    #[must_use]
    pub const fn is_targeted(&self) -> bool {
        !matches!(self, Self::All)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(InputError::UnknownGender(s.to_string())),
        }
    }
}

/// Device class an ad can be delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Desktop browsers.
    Desktop,
    /// Phones.
    Mobile,
    /// Tablets.
    Tablet,
}

impl Device {
    /// Returns the device as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
        }
    }

    /// Returns every device class.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Desktop, Self::Mobile, Self::Tablet]
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Device {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            _ => Err(InputError::UnknownDevice(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_parse() {
        assert_eq!("Traffic".parse::<Objective>().unwrap(), Objective::Traffic);
        assert_eq!(
            Objective::parse_lenient("conversion"),
            Objective::Conversions
        );
        assert_eq!(Objective::parse_lenient("reach"), Objective::Unspecified);
        assert_eq!(Objective::parse_lenient(""), Objective::Unspecified);
    }

    #[test]
    fn test_objective_serde_unknown() {
        let objective: Objective = serde_json::from_str("\"brand_lift\"").unwrap();
        assert_eq!(objective, Objective::Unspecified);
        assert_eq!(
            serde_json::to_string(&Objective::Engagement).unwrap(),
            "\"engagement\""
        );
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("".parse::<Gender>().unwrap(), Gender::All);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert!(matches!(
            "other".parse::<Gender>(),
            Err(InputError::UnknownGender(_))
        ));
        assert!(Gender::Male.is_targeted());
        assert!(!Gender::All.is_targeted());
    }

    #[test]
    fn test_device_parse() {
        assert_eq!(" Mobile ".parse::<Device>().unwrap(), Device::Mobile);
        assert!(matches!(
            "tv".parse::<Device>(),
            Err(InputError::UnknownDevice(_))
        ));
        assert_eq!(Device::all().len(), 3);
    }
}
