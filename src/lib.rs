//! Header Evaluator는 요청 헤더와 응답 헤더를 비교하여 그 결과를 응답 헤더에 기록하는
//! HTTP 미들웨어입니다.
//!
//! # 주요 기능
//!
//! - 요청 헤더에서 키, 응답 헤더에서 대상 값 추출
//! - `suffix`, `prefix`, `contains`, `contains_ignorecase` 비교
//! - 설치 시점 설정 검증 (잘못된 설정은 체인에 올라가지 않음)
//! - TOML 및 Docker 라벨 기반 설정
//!
//! # 예제
//!
//! ```
//! use header_evaluator::middleware::{handler_fn, Handler, Request};
//! use header_evaluator::middleware::evaluator::{FilterConfig, HeaderEvaluatorMiddleware};
//! use bytes::Bytes;
//! use http_body_util::Full;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = Arc::new(handler_fn("backend", |_req: Request| async {
//!     hyper::Response::builder()
//!         .header("Content-Type", "application/json")
//!         .body(Full::new(Bytes::new()))
//!         .unwrap()
//! }));
//!
//! let config = FilterConfig::new("X-Is-Json", "X-Expect", "Content-Type", "suffix");
//! let middleware = HeaderEvaluatorMiddleware::new(backend, config, "json-check").unwrap();
//!
//! let req = hyper::Request::builder()
//!     .header("X-Expect", "json")
//!     .body(Full::new(Bytes::new()))
//!     .unwrap();
//! let res = middleware.handle(req).await;
//! assert_eq!(res.headers()["X-Is-Json"], "true");
//! # }
//! ```
//!
//! # 설정 파일
//!
//! ```
//! use header_evaluator::settings::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//!     [middlewares.json-check]
//!     middleware_type = "header-evaluator"
//!
//!     [middlewares.json-check.settings]
//!     OutputHeaderName = "X-Is-Json"
//!
//!     [middlewares.json-check.settings.SimpleEval]
//!     requestHeaderField = "X-Expect"
//!     responseHeaderField = "Content-Type"
//!     kind = "suffix"
//! "#).unwrap();
//!
//! assert_eq!(settings.middlewares.len(), 1);
//! ```

pub mod logging;
pub mod middleware;
pub mod settings;
