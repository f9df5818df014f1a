use anyhow::{Context, Result, bail};
use reqwest::Url;

pub const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://bushjones514.app.n8n.cloud/webhook/b9ec5bd5-506b-4f6b-b59f-e55361fe1d96";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Startup configuration handed to the window and the headless sender.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub webhook_url: Url,
    pub theme: Theme,
}

impl AppConfig {
    pub fn from_url(raw: &str) -> Result<Self> {
        Ok(Self {
            webhook_url: parse_webhook_url(raw)?,
            theme: Theme::Dark,
        })
    }

    pub fn with_theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }
}

pub fn parse_webhook_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).with_context(|| format!("invalid webhook URL '{trimmed}'"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("webhook URL must use http or https, got '{other}'"),
    }
    if url.host_str().is_none() {
        bail!("webhook URL '{trimmed}' has no host");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_is_valid() {
        let config = AppConfig::from_url(DEFAULT_WEBHOOK_URL).expect("default url");
        assert_eq!(config.webhook_url.as_str(), DEFAULT_WEBHOOK_URL);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let url = parse_webhook_url("  http://localhost:5678/webhook/x \n").expect("url");
        assert_eq!(url.as_str(), "http://localhost:5678/webhook/x");
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        let err = parse_webhook_url("ftp://example.com/hook").expect_err("ftp rejected");
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn garbage_is_rejected_with_context() {
        let err = parse_webhook_url("not a url").expect_err("garbage rejected");
        assert!(err.to_string().contains("invalid webhook URL"));
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
