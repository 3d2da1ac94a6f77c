//! Configuration module.
//!
//! Handles loading, validating, and merging `cf-meme.toml`. Stock defaults
//! reproduce the classic meme layout; a config file only needs the keys it
//! wants to change.
//!
//! ## Config File Location
//!
//! `cf-meme.toml` in the working directory is picked up when present. Pass
//! `--config PATH` to use another file (which must then exist).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "."            # Where memes are written and looked up
//!
//! [search]
//! endpoint = "http://ajax.googleapis.com/ajax/services/search/images"
//! timeout_secs = 30           # Per request, search and download alike
//! user_agent = "cf-meme"
//!
//! [search.params]             # Extra query parameters; `q` is the caption
//! v = "1.0"
//! rsz = "5"
//! imgsz = "xxlarge"
//! safe = "active"
//!
//! [text]
//! font = "Aller_Std_Rg.ttf"   # TrueType font, relative to the working directory
//! max_size = 200              # Font size search starts here...
//! min_size = 10               # ...and never goes below this
//! step = 10
//! margin = 10                 # Horizontal slack the caption must leave
//! outline_offset = 2
//! outline_color = [0, 0, 0]
//! fill_color = [255, 255, 255]
//!
//! [canvas]
//! enabled = false             # Pad images smaller than width x height
//! width = 1440
//! height = 900
//! background = [68, 68, 68]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "cf-meme.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `cf-meme.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemeConfig {
    /// Directory memes are written to and checked against.
    pub output_dir: PathBuf,
    /// Image search provider settings.
    pub search: SearchConfig,
    /// Font and caption drawing settings.
    pub text: TextConfig,
    /// Padding canvas for small images.
    pub canvas: CanvasConfig,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            search: SearchConfig::default(),
            text: TextConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl MemeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.step == 0 {
            return Err(ConfigError::Validation("text.step must be non-zero".into()));
        }
        if self.text.min_size == 0 {
            return Err(ConfigError::Validation(
                "text.min_size must be non-zero".into(),
            ));
        }
        if self.text.min_size > self.text.max_size {
            return Err(ConfigError::Validation(
                "text.min_size must not exceed text.max_size".into(),
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Validation(
                "canvas.width and canvas.height must be non-zero".into(),
            ));
        }
        if self.search.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "search.timeout_secs must be non-zero".into(),
            ));
        }
        if self.search.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search.endpoint must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Image search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Search endpoint URL. The caption is sent as the `q` parameter.
    pub endpoint: String,
    /// Timeout for every HTTP request, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Additional query parameters (result count, size, safe search).
    pub params: BTreeMap<String, String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let params = [("v", "1.0"), ("rsz", "5"), ("imgsz", "xxlarge"), ("safe", "active")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            endpoint: "http://ajax.googleapis.com/ajax/services/search/images".to_string(),
            timeout_secs: 30,
            user_agent: "cf-meme".to_string(),
            params,
        }
    }
}

/// Font and caption drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// TrueType font file.
    pub font: PathBuf,
    /// Largest font size tried.
    pub max_size: u32,
    /// Smallest font size tried; captions that still overflow are drawn at it.
    pub min_size: u32,
    /// Decrement between tried sizes.
    pub step: u32,
    /// Horizontal slack the caption must leave inside the image.
    pub margin: u32,
    /// Distance of the diagonal outline passes, in pixels.
    pub outline_offset: i32,
    pub outline_color: [u8; 3],
    pub fill_color: [u8; 3],
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from("Aller_Std_Rg.ttf"),
            max_size: 200,
            min_size: 10,
            step: 10,
            margin: 10,
            outline_offset: 2,
            outline_color: [0, 0, 0],
            fill_color: [255, 255, 255],
        }
    }
}

/// Padding canvas settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Pad images smaller than `width` x `height` onto a solid canvas.
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1440,
            height: 900,
            background: [68, 68, 68],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(MemeConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MemeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MemeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, merged over stock defaults.
///
/// A missing file yields the defaults unless `required` is set.
pub fn load_config(path: &Path, required: bool) -> Result<MemeConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() && required {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `cf-meme.toml`.
///
/// Printed by `cf-meme --gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# cf-meme Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory memes are written to. Existing memes here are never redone.
output_dir = "."

# ---------------------------------------------------------------------------
# Image search
# ---------------------------------------------------------------------------
[search]
# Endpoint queried with the caption as the `q` parameter. It must answer
# with JSON shaped like {"responseData": {"results": [{"url": "..."}]}}.
endpoint = "http://ajax.googleapis.com/ajax/services/search/images"

# Timeout for every request (search and image download), in seconds.
timeout_secs = 30

user_agent = "cf-meme"

# Extra query parameters sent with every search.
[search.params]
v = "1.0"
rsz = "5"
imgsz = "xxlarge"
safe = "active"

# ---------------------------------------------------------------------------
# Caption text
# ---------------------------------------------------------------------------
[text]
# TrueType font, relative to the working directory.
font = "Aller_Std_Rg.ttf"

# The font size starts at max_size and shrinks by step until the caption
# plus margin fits the image width. It never goes below min_size.
max_size = 200
min_size = 10
step = 10
margin = 10

# The outline is the caption drawn four times, offset diagonally by this
# many pixels, underneath the fill.
outline_offset = 2
outline_color = [0, 0, 0]
fill_color = [255, 255, 255]

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas]
# Images smaller than width x height (on both edges) are centered on a
# solid canvas of that size and saved as JPEG.
enabled = false
width = 1440
height = 900
background = [68, 68, 68]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_classic_layout() {
        let config = MemeConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.text.font, PathBuf::from("Aller_Std_Rg.ttf"));
        assert_eq!(config.text.max_size, 200);
        assert_eq!(config.text.step, 10);
        assert!(!config.canvas.enabled);
        assert_eq!(config.canvas.background, [68, 68, 68]);
    }

    #[test]
    fn default_search_params() {
        let config = MemeConfig::default();
        assert_eq!(config.search.params.get("rsz").map(String::as_str), Some("5"));
        assert_eq!(config.search.params.get("safe").map(String::as_str), Some("active"));
        assert!(!config.search.params.contains_key("q"));
        assert_eq!(config.search.timeout_secs, 30);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[canvas]
enabled = true
"#;
        let config: MemeConfig = toml::from_str(toml).unwrap();
        assert!(config.canvas.enabled);
        assert_eq!(config.canvas.width, 1440);
        assert_eq!(config.text.max_size, 200);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(DEFAULT_CONFIG_FILE), false).unwrap();
        assert_eq!(config.text.max_size, 200);
    }

    #[test]
    fn load_config_required_file_missing_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("custom.toml"), true);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
output_dir = "memes"

[text]
font = "fonts/Impact.ttf"
outline_offset = 3

[search.params]
rsz = "1"
"#,
        )
        .unwrap();

        let config = load_config(&path, true).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("memes"));
        assert_eq!(config.text.font, PathBuf::from("fonts/Impact.ttf"));
        assert_eq!(config.text.outline_offset, 3);
        // Unspecified values stay at their defaults
        assert_eq!(config.text.margin, 10);
        assert_eq!(config.search.params.get("rsz").map(String::as_str), Some("1"));
        assert_eq!(config.search.params.get("v").map(String::as_str), Some("1.0"));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "this is not [valid toml").unwrap();

        let result = load_config(&path, false);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[text]
font_size = 12
"#;
        let result: Result<MemeConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<MemeConfig, _> = toml::from_str("[cache]\nenabled = true\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_tables() {
        let base: toml::Value = toml::from_str("[text]\nstep = 10\nmargin = 10").unwrap();
        let overlay: toml::Value = toml::from_str("[text]\nstep = 5").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["text"]["step"].as_integer(), Some(5));
        assert_eq!(merged["text"]["margin"].as_integer(), Some(10));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("c = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("c = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["c"].as_array().map(Vec::len), Some(1));
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(MemeConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_step() {
        let mut config = MemeConfig::default();
        config.text.step = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_min_above_max() {
        let mut config = MemeConfig::default();
        config.text.min_size = 300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_min_size() {
        let mut config = MemeConfig::default();
        config.text.min_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_canvas() {
        let mut config = MemeConfig::default();
        config.canvas.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_timeout() {
        let mut config = MemeConfig::default();
        config.search.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[text]\nstep = 0\n").unwrap();

        let result = load_config(&path, false);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: MemeConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = MemeConfig::default();
        assert_eq!(config.output_dir, defaults.output_dir);
        assert_eq!(config.search.endpoint, defaults.search.endpoint);
        assert_eq!(config.search.params, defaults.search.params);
        assert_eq!(config.text.font, defaults.text.font);
        assert_eq!(config.text.outline_color, defaults.text.outline_color);
        assert_eq!(config.canvas.enabled, defaults.canvas.enabled);
        assert_eq!(config.canvas.background, defaults.canvas.background);
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value().unwrap();
        assert!(value.is_table());
        for section in ["search", "text", "canvas"] {
            assert!(value.get(section).is_some(), "missing [{section}]");
        }
    }
}
