//! Configuration validation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::Config;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Lowercase alphanumerics and underscores, dot-separated.
static HOST_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_]+(\.[a-z0-9_]+)*$").expect("static host name pattern")
});

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Largest message a native messaging host may send to the browser.
const HOST_MESSAGE_LIMIT: usize = 1024 * 1024;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_host(config, &mut result);
        Self::validate_channel(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_page(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_host(config: &Config, result: &mut ValidationResult) {
        if !HOST_NAME.is_match(&config.host.name) {
            result.add_error(ValidationError::new(
                "host.name",
                "Host name must be lowercase alphanumerics and underscores separated by single dots",
            ));
        }

        if let Some(ref command) = config.host.command {
            if command.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "host.command",
                    "Host command cannot be empty",
                ));
            }
        } else if !config.host.args.is_empty() {
            result.add_warning(ValidationWarning::new(
                "host.args",
                "Arguments are only used with an explicit host.command",
            ));
        }
    }

    fn validate_channel(config: &Config, result: &mut ValidationResult) {
        if config.channel.reconnect_delay_ms == 0 {
            result.add_error(ValidationError::new(
                "channel.reconnect_delay_ms",
                "reconnect_delay_ms must be greater than 0",
            ));
        }

        if config.channel.max_message_bytes == 0 {
            result.add_error(ValidationError::new(
                "channel.max_message_bytes",
                "max_message_bytes must be greater than 0",
            ));
        } else if config.channel.max_message_bytes > HOST_MESSAGE_LIMIT {
            result.add_warning(ValidationWarning::new(
                "channel.max_message_bytes",
                "Browsers cap host messages at 1 MiB; larger frames will never arrive",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.cdp_endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.cdp_endpoint",
                "cdp_endpoint must start with http:// or https://",
            ));
        }
    }

    fn validate_page(config: &Config, result: &mut ValidationResult) {
        if !(config.page.scroll_step_px > 0.0) {
            result.add_error(ValidationError::new(
                "page.scroll_step_px",
                "scroll_step_px must be greater than 0",
            ));
        }

        let fraction = config.page.page_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            result.add_error(ValidationError::new(
                "page.page_fraction",
                "page_fraction must be in (0, 1]",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }
    }
}
