//! Plot property definitions and typed property reading
//!
//! Property definitions and their defaults are parsed from plot_properties.json,
//! embedded at compile time, so defaults are defined in ONE place. User values
//! come from a flat JSON object (config file) and from command line overrides.
//! Invalid user values are reported and replaced by the default.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::error::{PlotError, Result};

/// plot_properties.json embedded at compile time
const PROPERTIES_JSON: &str = include_str!("../plot_properties.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "BooleanProperty")]
    Boolean,
}

/// Property definition from plot_properties.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PropertiesFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all plot properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a property definition document
    pub fn from_json(json: &str) -> std::result::Result<Self, String> {
        let file: PropertiesFile = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse property definitions: {}", e))?;

        let properties = file
            .properties
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// All property definitions, sorted by name
    pub fn definitions(&self) -> Vec<&PropertyDef> {
        let mut defs: Vec<&PropertyDef> = self.properties.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PROPERTIES_JSON).unwrap_or_else(|e| {
            error!("{}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed property reader
///
/// User values take precedence; everything else falls back to the registry
/// defaults. Empty values count as "not set".
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    /// Create from explicit name/value pairs
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let user_values = user_values
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { user_values }
    }

    /// Parse a flat JSON object; strings, numbers and booleans are accepted
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| PlotError::Config(format!("invalid config JSON: {}", e)))?;

        let mut user_values = HashMap::new();
        for (key, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    warn!("Ignoring property '{}': unsupported value {}", key, other);
                    continue;
                }
            };
            if registry().get_property(&key).is_none() {
                warn!("Unknown property '{}' in config", key);
            }
            user_values.insert(key, value_str);
        }

        debug!("PropertyReader: {} user value(s)", user_values.len());
        Ok(Self::new(user_values))
    }

    /// Read a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PlotError::Config(format!("cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Override a property (command line flags)
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.user_values.remove(name);
        } else {
            self.user_values.insert(name.to_string(), value);
        }
    }

    /// Get string property (user value or registry default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property with validation
    ///
    /// Returns the user-set value if valid, otherwise the default.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.clone();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    /// Get boolean property ("true"/"false", case-insensitive)
    pub fn get_bool(&self, name: &str) -> bool {
        let default = registry()
            .get_default(name)
            .map(|d| d.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        match self.user_values.get(name).map(|v| v.to_lowercase()) {
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(other) => {
                warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    other, name, default
                );
                default
            }
            None => default,
        }
    }

    /// Get integer property within `[min, max]`
    pub fn get_i32_in_range(&self, name: &str, min: i32, max: i32) -> i32 {
        let default = registry()
            .get_default(name)
            .and_then(|d| d.parse::<i32>().ok())
            .unwrap_or(min);

        let Some(raw) = self.user_values.get(name) else {
            return default;
        };

        match raw.trim().parse::<i32>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                warn!(
                    "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v, name, min, max, default
                );
                default
            }
            Err(_) => {
                warn!(
                    "Invalid integer value '{}' for property '{}'. Using default: {}",
                    raw, name, default
                );
                default
            }
        }
    }

    /// Get a plot dimension property ("auto" or pixels)
    pub fn get_dimension(&self, name: &str) -> PlotDimension {
        PlotDimension::from_str(&self.get_string(name), PlotDimension::Auto)
    }
}

/// Plot dimension - either explicit pixels or "auto"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl PlotDimension {
    /// Smallest accepted explicit size
    pub const MIN_PIXELS: u32 = 100;
    /// Largest accepted explicit size
    pub const MAX_PIXELS: u32 = 10_000;

    /// Parse from string property value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "1500" → Pixels(1500) if in valid range [100, 10000]
    pub fn from_str(value: &str, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (Self::MIN_PIXELS..=Self::MAX_PIXELS).contains(&px) => {
                PlotDimension::Pixels(px)
            }
            Ok(px) => {
                warn!(
                    "Plot dimension {} out of valid range [{}-{}], using default: {:?}",
                    px,
                    Self::MIN_PIXELS,
                    Self::MAX_PIXELS,
                    default
                );
                default
            }
            Err(_) => {
                warn!(
                    "Invalid plot dimension '{}', using default: {:?}",
                    trimmed, default
                );
                default
            }
        }
    }
}
