use std::{collections::HashMap, env, path::Path, sync::Arc};
use serde::Deserialize;
use tracing::{debug, info};
use crate::middleware::{Handler, MiddlewareConfig, MiddlewareError, MiddlewareManager};
use crate::middleware::config::MiddlewareType;
use crate::middleware::evaluator::FilterConfig;

pub mod logging;
mod error;

pub use logging::{parse_env_var, LogFormat, LogOutput, LogSettings};
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_FILE_ENV: &str = "PROXY_CONFIG_FILE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 미들웨어 설정
    #[serde(default)]
    pub middlewares: HashMap<String, MiddlewareConfig>,
}

impl Settings {
    pub async fn load() -> Result<Self> {
        if let Ok(config_path) = env::var(CONFIG_FILE_ENV) {
            Self::from_toml_file(&config_path).await
        } else {
            Self::from_env()
        }
    }

    pub async fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SettingsError::FileError {
                path: path.as_ref().to_string_lossy().to_string(),
                error: e,
            })?;

        debug!(path = %path.as_ref().display(), "설정 파일 로드");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 환경 변수에서 로깅 설정만 읽습니다. 미들웨어는 비어 있습니다.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            logging: LogSettings::from_env()?,
            middlewares: HashMap::new(),
        })
    }

    /// 활성화된 미들웨어 설정을 검증합니다.
    pub fn validate(&self) -> Result<()> {
        for (name, middleware) in &self.middlewares {
            if !middleware.enabled {
                continue;
            }
            match middleware.middleware_type {
                MiddlewareType::HeaderEvaluator => {
                    FilterConfig::from_settings(&middleware.settings)
                        .and_then(|config| config.validate())
                        .map_err(|source| SettingsError::Middleware {
                            name: name.clone(),
                            source,
                        })?;
                }
            }
        }
        Ok(())
    }

    /// 최종 처리기를 설정된 미들웨어로 감쌉니다.
    pub fn build_middleware(&self, terminal: Arc<dyn Handler>) -> Result<MiddlewareManager> {
        let manager = MiddlewareManager::new(terminal, &self.middlewares).map_err(|source| {
            let name = match &source {
                MiddlewareError::Build { middleware, .. } => middleware.clone(),
                _ => "middlewares".to_string(),
            };
            SettingsError::Middleware { name, source }
        })?;

        info!(count = manager.chain().len(), "미들웨어 로드 완료");
        Ok(manager)
    }
}
