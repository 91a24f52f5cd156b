use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Visuals the rendering layer can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChartId {
    /// Choropleth map of prices by postcode.
    Map,
    Fig1,
    Fig2,
    Fig3,
    Fig4,
}

impl ChartId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Map => "Carte",
            Self::Fig1 => "Fig. 1",
            Self::Fig2 => "Fig. 2",
            Self::Fig3 => "Fig. 3",
            Self::Fig4 => "Fig. 4",
        }
    }

    /// All charts in selector order. This is also the default selection.
    pub fn all() -> &'static [ChartId] {
        &[Self::Map, Self::Fig1, Self::Fig2, Self::Fig3, Self::Fig4]
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartId {
    type Err = ModelError;

    /// Accepts selector labels (`Carte`, `Fig. 2`) and short forms (`map`, `fig2`).
    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "carte" | "map" => Ok(Self::Map),
            "fig1" => Ok(Self::Fig1),
            "fig2" => Ok(Self::Fig2),
            "fig3" => Ok(Self::Fig3),
            "fig4" => Ok(Self::Fig4),
            _ => Err(ModelError::UnknownChart(s.to_string())),
        }
    }
}
