//! Configuration module
//!
//! Configuration is read from the environment (optionally seeded from a `.env` file).
//! Every path the service writes to is part of the configuration so that storage roots
//! can be swapped for temporary directories in tests.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const JSON_BODY_LIMIT_MB: usize = 5;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" | "pretty" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
    pub http_concurrency_limit: usize,
    pub json_body_limit_bytes: usize,
    /// Directory holding the static frontend (index.html, assets)
    pub public_dir: PathBuf,
}

/// Where uploads and feedback live, and how large an upload may be
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub feedback_file: PathBuf,
    pub max_upload_size_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub intake: IntakeConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

impl Config {
    fn inner(&self) -> &AppConfig {
        &self.0
    }

    pub fn new(base: BaseConfig, intake: IntakeConfig) -> Self {
        Config(Box::new(AppConfig { base, intake }))
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Configuration rooted at `data_dir`, with defaults for everything else.
    ///
    /// Used by tests and tooling that need an isolated data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let base = BaseConfig {
            server_port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            log_format: LogFormat::Compact,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            json_body_limit_bytes: JSON_BODY_LIMIT_MB * 1024 * 1024,
            public_dir: data_dir.join("public"),
        };
        let intake = IntakeConfig {
            uploads_dir: data_dir.join("uploads"),
            feedback_file: data_dir.join("feedback.json"),
            data_dir,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
        };
        Config::new(base, intake)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn json_body_limit_bytes(&self) -> usize {
        self.inner().base.json_body_limit_bytes
    }

    pub fn public_dir(&self) -> &PathBuf {
        &self.inner().base.public_dir
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner().intake.data_dir
    }

    pub fn uploads_dir(&self) -> &PathBuf {
        &self.inner().intake.uploads_dir
    }

    pub fn feedback_file(&self) -> &PathBuf {
        &self.inner().intake.feedback_file
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().intake.max_upload_size_bytes
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn megabytes_to_bytes(name: &str, mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} is too large: {} MB", name, mb))
}

fn parse_megabytes(name: &str, raw: &str) -> Result<usize, anyhow::Error> {
    let mb = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("{} must be a whole number of megabytes", name))?;
    megabytes_to_bytes(name, mb)
}

fn env_megabytes(name: &str, default_mb: usize) -> Result<usize, anyhow::Error> {
    match env::var(name) {
        Ok(raw) => parse_megabytes(name, &raw),
        Err(_) => megabytes_to_bytes(name, default_mb),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = env::var("LOG_FORMAT")
            .ok()
            .map(|s| s.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(LogFormat::Compact);

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));
        let uploads_dir = env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("uploads"));
        let feedback_file = env::var("FEEDBACK_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("feedback.json"));

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            json_body_limit_bytes: env_megabytes("JSON_BODY_LIMIT_MB", JSON_BODY_LIMIT_MB)?,
            public_dir: PathBuf::from(
                env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string()),
            ),
        };

        let intake = IntakeConfig {
            data_dir,
            uploads_dir,
            feedback_file,
            max_upload_size_bytes: env_megabytes("MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB)?,
        };

        let config = AppConfig { base, intake };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than zero"));
        }

        if self.intake.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if self.base.json_body_limit_bytes == 0 {
            return Err(anyhow::anyhow!("JSON_BODY_LIMIT_MB must be greater than zero"));
        }

        if self.intake.feedback_file.starts_with(&self.intake.uploads_dir) {
            // The feedback file would show up as an upload in analytics.
            return Err(anyhow::anyhow!(
                "FEEDBACK_FILE must not live inside UPLOADS_DIR ({})",
                self.intake.uploads_dir.display()
            ));
        }

        Ok(())
    }
}
