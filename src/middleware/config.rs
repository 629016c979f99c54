use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Docker 라벨에서 미들웨어 설정을 찾을 때 쓰는 접두사
pub const LABEL_PREFIX: &str = "rproxy.http.middlewares.";

/// 미들웨어 타입
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum MiddlewareType {
    HeaderEvaluator,
}

impl std::str::FromStr for MiddlewareType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header-evaluator" => Ok(Self::HeaderEvaluator),
            _ => Err(format!("Invalid middleware type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// 미들웨어 타입
    pub middleware_type: MiddlewareType,

    /// 미들웨어 활성화 여부
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 실행 순서 (낮은 숫자가 바깥쪽, 즉 먼저 실행)
    #[serde(default)]
    pub order: i32,

    /// 미들웨어별 설정
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl MiddlewareConfig {
    /// Docker 라벨에서 미들웨어 설정을 파싱합니다.
    ///
    /// ```text
    /// rproxy.http.middlewares.match-json.type=header-evaluator
    /// rproxy.http.middlewares.match-json.headerEvaluator.OutputHeaderName=X-Match
    /// rproxy.http.middlewares.match-json.headerEvaluator.SimpleEval.kind=suffix
    /// ```
    pub fn from_labels(labels: &HashMap<String, String>) -> Vec<(String, Self)> {
        let mut configs = Vec::new();
        let mut middleware_groups: HashMap<String, HashMap<String, String>> = HashMap::new();

        for (key, value) in labels {
            if let Some(rest) = key.strip_prefix(LABEL_PREFIX) {
                if let Some((name, setting)) = rest.split_once('.') {
                    if name.is_empty() || setting.is_empty() {
                        continue;
                    }
                    middleware_groups
                        .entry(name.to_string())
                        .or_default()
                        .insert(setting.to_string(), value.clone());
                }
            }
        }

        for (name, settings) in middleware_groups {
            let Some(type_str) = settings.get("type") else {
                warn!(middleware = %name, "미들웨어 타입이 지정되지 않아 무시합니다");
                continue;
            };
            let middleware_type = match type_str.parse::<MiddlewareType>() {
                Ok(t) => t,
                Err(e) => {
                    warn!(middleware = %name, error = %e, "알 수 없는 미들웨어 타입");
                    continue;
                }
            };

            let config = MiddlewareConfig {
                middleware_type,
                enabled: settings
                    .get("enabled")
                    .map(|v| v.to_lowercase() == "true")
                    .unwrap_or(true),
                order: settings
                    .get("order")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
                settings: settings
                    .into_iter()
                    .filter(|(k, _)| k != "type" && k != "enabled" && k != "order")
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect(),
            };
            configs.push((name, config));
        }

        configs.sort_by(|(a, _), (b, _)| a.cmp(b));
        configs
    }

    /// TOML 설정에서 미들웨어 설정을 파싱합니다.
    pub fn from_toml(config: &str) -> Result<HashMap<String, Self>, toml::de::Error> {
        #[derive(Deserialize)]
        struct Config {
            #[serde(default)]
            middlewares: HashMap<String, MiddlewareConfig>,
        }

        let config: Config = toml::from_str(config)?;
        Ok(config.middlewares)
    }
}
