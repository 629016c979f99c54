#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    /// 설치 시점 설정 오류. 잘못된 필드 이름과 값을 함께 보고합니다.
    #[error("Invalid/Empty {field}: '{value}'{reason}")]
    Config {
        field: String,
        value: String,
        reason: String,
    },

    #[error("미들웨어 {middleware} 생성 실패: {source}")]
    Build {
        middleware: String,
        #[source]
        source: Box<MiddlewareError>,
    },

    #[error("잘못된 설정 형식: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl MiddlewareError {
    /// 필드가 비어 있거나 잘못된 경우의 설정 오류를 만듭니다.
    pub fn config(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: String::new(),
        }
    }

    /// 추가 설명을 덧붙인 설정 오류를 만듭니다.
    pub fn config_with_reason(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl AsRef<str>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: format!(", {}", reason.as_ref()),
        }
    }

    /// 설정 오류라면 문제가 된 필드 이름을 반환합니다.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Config { field, .. } => Some(field),
            Self::Build { source, .. } => source.field(),
            _ => None,
        }
    }
}
