use crate::scoring::{QuarterRule, ScoringOptions};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024; // 1MB

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_body_bytes: usize,
    pub strict_quarter_rule: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_BODY_BYTES.to_string())
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a positive integer"))
                .and_then(|bytes| {
                    if bytes == 0 {
                        anyhow::bail!("MAX_BODY_BYTES must be greater than 0");
                    }
                    Ok(bytes)
                })?,
            strict_quarter_rule: std::env::var("STRICT_QUARTER_RULE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().parse::<bool>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("STRICT_QUARTER_RULE must be true or false"))?
                .unwrap_or(false),
        };

        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Max body size: {} bytes", config.max_body_bytes);
        if config.strict_quarter_rule {
            tracing::info!("Strict quarter rule enabled: unparsable totals earn no quarter points");
        }

        Ok(config)
    }

    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            quarter_rule: if self.strict_quarter_rule {
                QuarterRule::Strict
            } else {
                QuarterRule::Lenient
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            strict_quarter_rule: false,
        }
    }
}
