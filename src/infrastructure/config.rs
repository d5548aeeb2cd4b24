use crate::application::comment_rotator::RotationTiming;
use crate::application::data_fetcher::DEFAULT_ERROR_MESSAGE;
use crate::application::renderer::{DisplayZone, Renderer};
use crate::application::widget::WidgetOptions;
use crate::domain::snapshot::Variant;
use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub backend: BackendSettings,
    pub widget: WidgetSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub variant: Variant,
    /// Request timeout; unset leaves reqwest's default (none).
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WidgetSettings {
    pub poll_interval_secs: u64,
    pub rotate_interval_secs: u64,
    pub fade_delay_ms: u64,
    pub time_format: String,
    /// Fixed offset such as `+02:00`; unset uses the host's local zone.
    pub utc_offset: Option<String>,
    pub error_message: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub listen_addr: SocketAddr,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            variant: Variant::default(),
            timeout_secs: None,
        }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            rotate_interval_secs: 5,
            fade_delay_ms: 500,
            time_format: "%-I:%M:%S %p".to_string(),
            utc_offset: None,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl WidgetSettings {
    pub fn display_zone(&self) -> anyhow::Result<DisplayZone> {
        match &self.utc_offset {
            None => Ok(DisplayZone::Local),
            Some(offset) => {
                let offset: FixedOffset = offset
                    .parse()
                    .with_context(|| format!("invalid utc_offset `{}`", offset))?;
                Ok(DisplayZone::Fixed(offset))
            }
        }
    }

    pub fn renderer(&self) -> anyhow::Result<Renderer> {
        Ok(Renderer::new(self.display_zone()?, self.time_format.clone())?)
    }

    pub fn options(&self, variant: Variant) -> anyhow::Result<WidgetOptions> {
        if self.poll_interval_secs == 0 || self.rotate_interval_secs == 0 {
            anyhow::bail!("poll and rotate intervals must be at least one second");
        }
        Ok(WidgetOptions {
            variant,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            rotation: RotationTiming {
                interval: Duration::from_secs(self.rotate_interval_secs),
                fade_delay: Duration::from_millis(self.fade_delay_ms),
            },
            error_message: self.error_message.clone(),
        })
    }
}

/// Load `config/dashboard.*` if present, then `DASHBOARD__SECTION__KEY` overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend.variant, Variant::Full);
        assert_eq!(config.backend.timeout(), None);
        assert_eq!(config.widget.poll_interval_secs, 60);
        assert_eq!(config.server.listen_addr.port(), 8080);

        let options = config.widget.options(config.backend.variant).unwrap();
        assert_eq!(options.rotation, RotationTiming::default());
        assert_eq!(options.error_message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://games.local"
            variant = "winners"
            timeout_secs = 10

            [widget]
            poll_interval_secs = 30
            utc_offset = "+02:00"
            "#,
        );

        assert_eq!(config.backend.variant, Variant::Winners);
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.widget.rotate_interval_secs, 5);
        assert_eq!(
            config.widget.display_zone().unwrap(),
            DisplayZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
        );
        assert_eq!(
            config.widget.options(Variant::Winners).unwrap().poll_interval,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = parse("[widget]\nutc_offset = \"somewhere\"\npoll_interval_secs = 0");
        assert!(config.widget.display_zone().is_err());
        assert!(config.widget.options(Variant::Full).is_err());
    }
}
