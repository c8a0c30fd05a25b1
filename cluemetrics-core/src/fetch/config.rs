use std::path::{Path, PathBuf};

use derive_builder::Builder;
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_default::DefaultFromSerde;

use crate::error::{Error, Result};

pub const OFFSET_PLACEHOLDER: &str = "{offset}";

/// Where to page the dataset from and where to put it.
///
/// Every field has a default matching the public clue dataset, so an empty
/// config object is valid.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, DefaultFromSerde, Builder,
)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
#[builder(default, setter(into))]
pub struct FetchConfig {
    /// URL of one page. `{offset}` is replaced by the row offset of the page.
    #[serde(default = "default_url_template")]
    url_template: String,

    /// First row offset to request.
    #[serde(default)]
    start: u64,

    /// Offsets at or beyond this value are not requested.
    #[serde(default = "default_end")]
    end: u64,

    /// Rows per page, i.e. the distance between consecutive offsets.
    #[serde(default = "default_step")]
    step: u64,

    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,

    #[serde(default = "default_file_prefix")]
    file_prefix: String,

    #[serde(default = "default_file_extension")]
    file_extension: String,

    /// Per request timeout.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_url_template() -> String {
    "https://cryptics.georgeho.org/data/clues.csv?_next={offset}&_size=max".to_owned()
}

const fn default_end() -> u64 {
    663652
}

const fn default_step() -> u64 {
    1000
}

fn default_output_dir() -> PathBuf {
    Path::new("data").join("raw_data")
}

fn default_file_prefix() -> String {
    "clues_".to_owned()
}

fn default_file_extension() -> String {
    "csv".to_owned()
}

const fn default_timeout_secs() -> u64 {
    60
}

impl FetchConfig {
    pub fn from_json(json: &str) -> Result<FetchConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<FetchConfig> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config file. `.yaml` and `.yml` files are read as YAML, anything
    /// else as JSON.
    pub fn from_file(path: &Path) -> Result<FetchConfig> {
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => FetchConfig::from_yaml(&contents)?,
            _ => FetchConfig::from_json(&contents)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn schema() -> RootSchema {
        schema_for!(FetchConfig)
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::InvalidConfiguration(
                "step must be greater than zero".to_owned(),
            ));
        }
        if usize::try_from(self.step).is_err() {
            return Err(Error::InvalidConfiguration(format!(
                "step ({}) is too large for this platform",
                self.step
            )));
        }
        if self.start > self.end {
            return Err(Error::InvalidConfiguration(format!(
                "start ({}) is beyond end ({})",
                self.start, self.end
            )));
        }
        if !self.url_template.contains(OFFSET_PLACEHOLDER) {
            return Err(Error::InvalidConfiguration(format!(
                "url template \"{}\" does not contain {}",
                self.url_template, OFFSET_PLACEHOLDER
            )));
        }
        Ok(())
    }

    /// Builder seeded with this config's values, for applying overrides.
    pub fn to_builder(&self) -> FetchConfigBuilder {
        let mut builder = FetchConfigBuilder::default();
        builder
            .url_template(self.url_template.clone())
            .start(self.start)
            .end(self.end)
            .step(self.step)
            .output_dir(self.output_dir.clone())
            .file_prefix(self.file_prefix.clone())
            .file_extension(self.file_extension.clone())
            .timeout_secs(self.timeout_secs);
        builder
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn url_for(&self, offset: u64) -> String {
        self.url_template
            .replace(OFFSET_PLACEHOLDER, &offset.to_string())
    }

    /// Output file for the `index`-th page. Files are numbered by request
    /// order, not by offset.
    pub fn file_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.{}",
            self.file_prefix, index, self.file_extension
        ))
    }

    pub fn offsets(&self) -> impl Iterator<Item = u64> {
        // validate rejects a zero or oversized step; clamp so an unvalidated
        // config cannot panic in step_by.
        let step = usize::try_from(self.step).unwrap_or(usize::MAX).max(1);
        (self.start..self.end).step_by(step)
    }

    pub fn page_count(&self) -> u64 {
        if self.step == 0 || self.start >= self.end {
            return 0;
        }
        (self.end - self.start).div_ceil(self.step)
    }
}
