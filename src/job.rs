use std::error::Error;
use std::fs;
use std::path::Path;

use pixelsolid_grid::{LabelGrid, Palette, Rgb};
use pixelsolid_mesh::LayerParams;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct JobConfig {
    #[serde(default)]
    palette: Vec<PaletteEntry>,
    labels: Vec<Vec<i32>>,
    #[serde(default)]
    params: LayerParams,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum PaletteEntry {
    // Hex: "#rrggbb"
    Hex(String),
    // Table: { r = 0, g = 128, b = 255 }
    Channels { r: u8, g: u8, b: u8 },
}

impl PaletteEntry {
    pub fn to_rgb(&self) -> Result<Rgb, Box<dyn Error>> {
        match self {
            PaletteEntry::Hex(s) => Rgb::from_hex(s).ok_or_else(|| format!("invalid palette color '{s}'").into()),
            PaletteEntry::Channels { r, g, b } => Ok(Rgb::new(*r, *g, *b)),
        }
    }
}

/// One model: its label grid, palette and physical dimensions.
#[derive(Debug, Clone)]
pub struct Job {
    pub grid: LabelGrid,
    pub palette: Palette,
    pub params: LayerParams,
}

impl Job {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Parses a job; a non-empty palette must cover every label in the grid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: JobConfig = toml::from_str(toml_str)?;
        let palette = cfg
            .palette
            .iter()
            .map(PaletteEntry::to_rgb)
            .collect::<Result<Palette, _>>()?;
        let grid = LabelGrid::from_rows(&cfg.labels)?;
        if !palette.is_empty() {
            grid.check_palette(&palette)?;
        }
        Ok(Job {
            grid,
            palette,
            params: cfg.params,
        })
    }
}
