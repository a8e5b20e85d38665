//! Game configuration and its properties-file loader.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};

pub const KEY_HCELLS: &str = "panel.hcells";
pub const KEY_VCELLS: &str = "panel.vcells";
pub const KEY_CELL: &str = "panel.cell";
pub const KEY_DELAY: &str = "delay.millis";

/// Everything needed to build a board and drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Horizontal cell count
    pub hcells: usize,
    /// Vertical cell count
    pub vcells: usize,
    /// Cell edge in pixels
    pub cell: u32,
    /// Delay between generations while playing
    pub delay_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hcells: 50,
            vcells: 50,
            cell: 15,
            delay_millis: 100,
        }
    }
}

impl GameConfig {
    /// Read and parse a properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_properties(&text)
    }

    /// Parse `key=value` / `key: value` lines. Missing keys keep their defaults,
    /// unknown keys are ignored.
    pub fn from_properties(text: &str) -> Result<Self> {
        let mut config = Self::default();

        for (key, value) in properties(text) {
            match key {
                KEY_HCELLS => config.hcells = parse_value(key, value)?,
                KEY_VCELLS => config.vcells = parse_value(key, value)?,
                KEY_CELL   => config.cell = parse_value(key, value)?,
                KEY_DELAY  => config.delay_millis = parse_value(key, value)?,
                _ => debug!("Ignoring unknown configuration key '{}'", key),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hcells == 0 {
            return Err(Error::InvalidDimension { name: KEY_HCELLS });
        }
        if self.vcells == 0 {
            return Err(Error::InvalidDimension { name: KEY_VCELLS });
        }
        if self.cell == 0 {
            return Err(Error::InvalidDimension { name: KEY_CELL });
        }
        if pixel_extent(self.hcells, self.cell).is_none() {
            return Err(Error::TooLarge { name: KEY_HCELLS });
        }
        if pixel_extent(self.vcells, self.cell).is_none() {
            return Err(Error::TooLarge { name: KEY_VCELLS });
        }
        Ok(())
    }

    /// Grid size in pixels, margins excluded. Saturates on configs that fail `validate`.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            pixel_extent(self.hcells, self.cell).unwrap_or(u32::MAX),
            pixel_extent(self.vcells, self.cell).unwrap_or(u32::MAX),
        )
    }
}

/// `cells * cell` in pixels, `None` when it does not fit in a `u32`.
pub(crate) fn pixel_extent(cells: usize, cell: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(cell)
}

fn properties(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(|line| match line.find(['=', ':']) {
            Some(at) => (line[..at].trim_end(), line[at + 1..].trim_start()),
            None => (line, ""),
        })
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.hcells, 50);
        assert_eq!(config.vcells, 50);
        assert_eq!(config.pixel_size(), (750, 750));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_properties() {
        let text = "\
# board layout
panel.hcells=40
panel.vcells = 30
! legacy comment
panel.cell: 10

delay.millis=250
window.title=ignored
";
        let config = GameConfig::from_properties(text).unwrap();
        assert_eq!(config, GameConfig { hcells: 40, vcells: 30, cell: 10, delay_millis: 250 });
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = GameConfig::from_properties("panel.cell=8\n").unwrap();
        assert_eq!(config.cell, 8);
        assert_eq!(config.hcells, GameConfig::default().hcells);
        assert_eq!(config.delay_millis, GameConfig::default().delay_millis);
    }

    #[test]
    fn test_invalid_number() {
        let err = GameConfig::from_properties("panel.hcells=lots\n").unwrap_err();
        match err {
            Error::InvalidValue { key, value } => {
                assert_eq!(key, KEY_HCELLS);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = GameConfig::from_properties("panel.vcells=0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { name: KEY_VCELLS }));
    }

    #[test]
    fn test_oversized_board_rejected() {
        let err = GameConfig::from_properties("panel.hcells=1000\npanel.cell=5000000\n").unwrap_err();
        assert!(matches!(err, Error::TooLarge { name: KEY_HCELLS }));

        let config = GameConfig { vcells: usize::MAX, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::TooLarge { name: KEY_VCELLS })));
        assert_eq!(config.pixel_size().1, u32::MAX);
    }

    #[test]
    fn test_bundled_properties() {
        let config = GameConfig::from_properties(include_str!("../../config.properties")).unwrap();
        assert_eq!(config, GameConfig { hcells: 50, vcells: 40, cell: 15, delay_millis: 100 });
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("conway-config-{}.properties", std::process::id()));
        fs::write(&path, "panel.hcells=12\npanel.vcells=9\n").unwrap();

        let config = GameConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!((config.hcells, config.vcells), (12, 9));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.properties").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
