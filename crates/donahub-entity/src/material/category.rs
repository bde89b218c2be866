//! Material category and condition enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use donahub_core::AppError;

/// Kind of construction material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    /// Mixed demolition rubble and salvage.
    #[serde(alias = "demolicion")]
    Demolition,
    /// Tiles and other ceramics.
    #[serde(alias = "ceramicos")]
    Ceramics,
    /// Beams, boards, panels.
    #[serde(alias = "madera")]
    Wood,
    /// Steel and other metals.
    Metal,
    /// Concrete blocks and cement.
    #[serde(alias = "concreto")]
    Concrete,
    /// Bricks.
    #[serde(alias = "ladrillos")]
    Bricks,
    /// Pipes and fittings.
    #[serde(alias = "tuberia")]
    Piping,
    /// Cable and electrical fittings.
    #[serde(alias = "electrico")]
    Electrical,
    /// Anything else.
    #[serde(alias = "otros")]
    Other,
}

impl MaterialCategory {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demolition => "demolition",
            Self::Ceramics => "ceramics",
            Self::Wood => "wood",
            Self::Metal => "metal",
            Self::Concrete => "concrete",
            Self::Bricks => "bricks",
            Self::Piping => "piping",
            Self::Electrical => "electrical",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demolition" | "demolicion" => Ok(Self::Demolition),
            "ceramics" | "ceramicos" => Ok(Self::Ceramics),
            "wood" | "madera" => Ok(Self::Wood),
            "metal" => Ok(Self::Metal),
            "concrete" | "concreto" => Ok(Self::Concrete),
            "bricks" | "ladrillos" => Ok(Self::Bricks),
            "piping" | "tuberia" => Ok(Self::Piping),
            "electrical" | "electrico" => Ok(Self::Electrical),
            "other" | "otros" => Ok(Self::Other),
            _ => Err(AppError::validation(format!(
                "Invalid material category: '{s}'"
            ))),
        }
    }
}

/// State of the offered goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCondition {
    /// Like new.
    #[serde(alias = "excelente")]
    Excellent,
    /// Reusable as is.
    #[serde(alias = "bueno")]
    Good,
    /// Usable with some work.
    #[serde(alias = "regular")]
    Fair,
    /// Only fit for recycling.
    #[serde(alias = "para_reciclaje")]
    ForRecycling,
}

impl MaterialCondition {
    /// Return the condition as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::ForRecycling => "for_recycling",
        }
    }
}

impl fmt::Display for MaterialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialCondition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" | "excelente" => Ok(Self::Excellent),
            "good" | "bueno" => Ok(Self::Good),
            "fair" | "regular" => Ok(Self::Fair),
            "for_recycling" | "para_reciclaje" => Ok(Self::ForRecycling),
            _ => Err(AppError::validation(format!(
                "Invalid material condition: '{s}'"
            ))),
        }
    }
}
