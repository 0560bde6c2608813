use super::measure::Measure;
use super::validate;
use serde::Deserialize;
use serde::Serialize;

/// Settings every dispatch call reads.
///
/// The measure is kept as its identifier and resolved on each call,
/// so an unknown name fails where it is used, not where it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// identifier of the active measure, e.g. `EMD` or `KLD`
    pub measure: String,
    /// decimal digits distances are rounded to
    pub precision: usize,
}

impl Config {
    /// defaults, overridden by `REPERTOIRE_MEASURE` and `REPERTOIRE_PRECISION`
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(measure) = std::env::var(crate::MEASURE_ENV) {
            config.measure = measure;
        }
        if let Ok(precision) = std::env::var(crate::PRECISION_ENV) {
            config.precision = precision.trim().parse().map_err(|e| {
                anyhow::anyhow!("{}={} is not a precision: {}", crate::PRECISION_ENV, precision, e)
            })?;
        }
        Ok(config)
    }
    /// read from a JSON file. missing fields take their defaults.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&text)?)
    }
    pub fn with_measure(self, measure: Measure) -> Self {
        Self {
            measure: measure.name().to_string(),
            ..self
        }
    }
    pub fn with_precision(self, precision: usize) -> Self {
        Self { precision, ..self }
    }
    /// resolve the configured identifier against the registry
    pub fn measure(&self) -> anyhow::Result<Measure> {
        validate::measure(&self.measure)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            measure: Measure::Emd.name().to_string(),
            precision: crate::PRECISION,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {} digits", self.measure, self.precision)
    }
}
