//! 헤더 평가 미들웨어
//!
//! 요청 헤더 값과 응답 헤더 값을 문자열 비교하여 그 결과를 응답 헤더에 기록합니다.

mod config;
mod kind;
mod middleware;

pub use config::{EvaluatorConfig, FilterConfig, SETTINGS_PREFIX};
pub use kind::MatchKind;
pub use middleware::HeaderEvaluatorMiddleware;
