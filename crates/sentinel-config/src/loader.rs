use std::path::Path;
use std::str::FromStr;

use sentinel_domain::{LabelMatch, LabelSelector};
use tracing::debug;

use crate::error::ConfigError;
use crate::raw::RawSentinelConfig;
use crate::template::validate_template;
use crate::types::{HyperfleetApiConfig, SentinelConfig};

/// Load and validate a sentinel configuration file from `path`.
pub fn load(path: &Path) -> Result<SentinelConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %path.display(), "loading sentinel configuration");
    let raw: RawSentinelConfig = serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
        path: path.display().to_string(),
        source: e,
    })?;
    convert(raw)
}

fn convert(raw: RawSentinelConfig) -> Result<SentinelConfig, ConfigError> {
    let resource_type = sentinel_domain::ResourceType::from_str(&raw.resource_type)?;

    if raw.poll_interval.is_zero() {
        return Err(ConfigError::Validation {
            field: "poll_interval".into(),
            message: "must be greater than zero".into(),
        });
    }
    if raw.max_age_ready.is_zero() {
        return Err(ConfigError::Validation {
            field: "max_age_ready".into(),
            message: "must be greater than zero".into(),
        });
    }
    if raw.max_age_not_ready.is_zero() {
        return Err(ConfigError::Validation {
            field: "max_age_not_ready".into(),
            message: "must be greater than zero".into(),
        });
    }
    if raw.hyperfleet_api.endpoint.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "hyperfleet_api.endpoint".into(),
            message: "must not be empty".into(),
        });
    }

    for (key, template) in &raw.message_data {
        validate_template(key, template)?;
    }

    let resource_selector = LabelSelector(
        raw.resource_selector
            .into_iter()
            .map(|m| LabelMatch { label: m.label, value: m.value })
            .collect(),
    );

    Ok(SentinelConfig {
        resource_type,
        poll_interval: raw.poll_interval,
        max_age_ready: raw.max_age_ready,
        max_age_not_ready: raw.max_age_not_ready,
        resource_selector,
        topic: raw.topic,
        hyperfleet_api: HyperfleetApiConfig {
            endpoint: raw.hyperfleet_api.endpoint,
            timeout: raw.hyperfleet_api.timeout,
        },
        message_data: raw.message_data,
    })
}
