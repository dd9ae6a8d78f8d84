//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts, staking bounds, instance counts)
//! - Check endpoint URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: SdkConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::SdkConfig;
use crate::network::Network;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidUrl { field: &'static str, url: String },
    MissingDevnetUrl,
    StakingBoundsInverted { min: u64, max: u64 },
    ZeroMinWeight,
    ZeroNodeCount,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUrl { field, url } => {
                write!(f, "{} is not a valid URL: '{}'", field, url)
            }
            ValidationError::MissingDevnetUrl => {
                write!(f, "network.api_url is required when network.name is 'devnet'")
            }
            ValidationError::StakingBoundsInverted { min, max } => {
                write!(f, "staking.min_duration_secs {} exceeds max_duration_secs {}", min, max)
            }
            ValidationError::ZeroMinWeight => write!(f, "staking.min_weight must be at least 1"),
            ValidationError::ZeroNodeCount => write!(f, "cloud.node_count must be at least 1"),
        }
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Network::from_name(&config.network.name).is_none() && config.network.api_url.is_empty() {
        errors.push(ValidationError::MissingDevnetUrl);
    }

    if !config.network.api_url.is_empty() && config.network.api_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "network.api_url",
            url: config.network.api_url.clone(),
        });
    }
    for failover in &config.network.failover_urls {
        if failover.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "network.failover_urls",
                url: failover.clone(),
            });
        }
    }

    if config.staking.min_duration_secs > config.staking.max_duration_secs {
        errors.push(ValidationError::StakingBoundsInverted {
            min: config.staking.min_duration_secs,
            max: config.staking.max_duration_secs,
        });
    }
    if config.staking.min_weight == 0 {
        errors.push(ValidationError::ZeroMinWeight);
    }

    if config.cloud.node_count == 0 {
        errors.push(ValidationError::ZeroNodeCount);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&SdkConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SdkConfig::default();
        config.staking.min_duration_secs = 100;
        config.staking.max_duration_secs = 10;
        config.staking.min_weight = 0;
        config.cloud.node_count = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_devnet_requires_url() {
        let mut config = SdkConfig::default();
        config.network.name = "devnet".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingDevnetUrl));
    }

    #[test]
    fn test_invalid_failover_url() {
        let mut config = SdkConfig::default();
        config.network.failover_urls = vec!["not a url".to_string()];

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidUrl { field: "network.failover_urls", .. }));
    }
}
