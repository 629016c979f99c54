use hyper::header::HeaderName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use crate::middleware::MiddlewareError;
use super::kind::MatchKind;

/// 플랫 설정 키의 접두사 (`headerEvaluator.SimpleEval.kind` 등)
pub const SETTINGS_PREFIX: &str = "headerEvaluator";

/// 단순 비교 평가기 설정
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EvaluatorConfig {
    /// 요청에서 읽을 헤더 이름 (비교 키)
    #[serde(rename = "requestHeaderField", default)]
    pub request_header_field: String,

    /// 응답에서 읽을 헤더 이름 (비교 대상)
    #[serde(rename = "responseHeaderField", default)]
    pub response_header_field: String,

    /// 비교 방식
    #[serde(default)]
    pub kind: String,
}

impl EvaluatorConfig {
    /// `kind`를 소문자로 정규화하고 유효성을 검사합니다.
    ///
    /// 성공하면 저장된 `kind`는 정규화된 이름으로 바뀝니다.
    pub fn normalize(&mut self) -> Result<MatchKind, MiddlewareError> {
        let raw = self.kind.clone();
        self.kind = self.kind.to_lowercase();

        let kind = self.kind.parse::<MatchKind>().map_err(|_| {
            MiddlewareError::config_with_reason("SimpleEval.kind", raw, MatchKind::VALID_VALUES)
        })?;

        self.kind = kind.as_str().to_string();
        Ok(kind)
    }

    /// `kind`가 유효한지 확인합니다. 설정은 변경하지 않습니다.
    pub fn is_valid(&self) -> bool {
        self.clone().normalize().is_ok()
    }

    /// 저장된 `kind`로 평가합니다. 알 수 없는 `kind`는 `false`입니다.
    pub fn eval(&self, src: &str, key: &str) -> bool {
        match self.kind.parse::<MatchKind>() {
            Ok(kind) => kind.matches(src, key),
            Err(_) => {
                debug!(kind = %self.kind, "알 수 없는 비교 방식, false로 평가");
                false
            }
        }
    }
}

/// 검증을 마친 설정에서 얻은 헤더 이름과 비교 방식
#[derive(Debug, Clone)]
pub(crate) struct CompiledFilter {
    pub output_header: HeaderName,
    pub request_header: HeaderName,
    pub response_header: HeaderName,
    pub kind: MatchKind,
}

fn parse_header_name(field: &str, value: &str) -> Result<HeaderName, MiddlewareError> {
    if value.is_empty() {
        return Err(MiddlewareError::config(field, value));
    }
    HeaderName::from_bytes(value.as_bytes())
        .map_err(|e| MiddlewareError::config_with_reason(field, value, e.to_string()))
}

/// 헤더 평가 미들웨어 설정
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilterConfig {
    #[serde(rename = "SimpleEval", default)]
    pub simple_eval: EvaluatorConfig,

    /// 결과를 기록할 응답 헤더 이름
    #[serde(rename = "OutputHeaderName", default)]
    pub output_header_name: String,
}

impl FilterConfig {
    pub fn new(
        output_header_name: impl Into<String>,
        request_header_field: impl Into<String>,
        response_header_field: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            simple_eval: EvaluatorConfig {
                request_header_field: request_header_field.into(),
                response_header_field: response_header_field.into(),
                kind: kind.into(),
            },
            output_header_name: output_header_name.into(),
        }
    }

    /// 필드를 순서대로 검증하고 `kind`를 정규화합니다.
    pub(crate) fn compile(&mut self) -> Result<CompiledFilter, MiddlewareError> {
        let output_header = parse_header_name("OutputHeaderName", &self.output_header_name)?;
        let request_header = parse_header_name(
            "SimpleEval.requestHeaderField",
            &self.simple_eval.request_header_field,
        )?;
        let response_header = parse_header_name(
            "SimpleEval.responseHeaderField",
            &self.simple_eval.response_header_field,
        )?;
        let kind = self.simple_eval.normalize()?;

        Ok(CompiledFilter {
            output_header,
            request_header,
            response_header,
            kind,
        })
    }

    /// 설정이 유효한지 검사합니다. 설정은 변경하지 않습니다.
    pub fn validate(&self) -> Result<(), MiddlewareError> {
        self.clone().compile().map(|_| ())
    }

    /// TOML 문자열에서 설정을 읽습니다.
    pub fn from_toml(content: &str) -> Result<Self, MiddlewareError> {
        Ok(toml::from_str(content)?)
    }

    /// `headerEvaluator.` 접두사가 붙은 플랫 키 맵에서 설정을 읽습니다.
    pub fn from_flat_map(settings: &HashMap<String, String>) -> Result<Self, MiddlewareError> {
        let mut config = Self::default();

        for (key, value) in settings {
            match key.split('.').collect::<Vec<_>>().as_slice() {
                [SETTINGS_PREFIX, "OutputHeaderName"] => {
                    config.output_header_name = value.trim().to_string();
                }
                [SETTINGS_PREFIX, "SimpleEval", "requestHeaderField"] => {
                    config.simple_eval.request_header_field = value.trim().to_string();
                }
                [SETTINGS_PREFIX, "SimpleEval", "responseHeaderField"] => {
                    config.simple_eval.response_header_field = value.trim().to_string();
                }
                [SETTINGS_PREFIX, "SimpleEval", "kind"] => {
                    config.simple_eval.kind = value.trim().to_string();
                }
                [SETTINGS_PREFIX, ..] => {
                    return Err(MiddlewareError::InvalidFormat(format!(
                        "알 수 없는 설정 키: {}",
                        key
                    )));
                }
                _ => continue,
            }
        }

        Ok(config)
    }

    /// 미들웨어 설정값에서 읽습니다.
    ///
    /// 플랫 형식 키가 하나라도 있으면 `from_flat_map`을 사용하고 접두사가 없는 키는 무시합니다.
    /// 그렇지 않으면 구조화된 값으로 역직렬화합니다.
    pub fn from_settings(
        settings: &HashMap<String, serde_json::Value>,
    ) -> Result<Self, MiddlewareError> {
        let prefix = format!("{}.", SETTINGS_PREFIX);
        let is_flat = settings.keys().any(|k| k.starts_with(&prefix));

        if is_flat {
            let string_settings: HashMap<String, String> = settings
                .iter()
                .map(|(k, v)| {
                    let string_value = v
                        .as_str()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| v.to_string());
                    (k.clone(), string_value)
                })
                .collect();
            return Self::from_flat_map(&string_settings);
        }

        Ok(serde_json::from_value(serde_json::to_value(settings)?)?)
    }
}
