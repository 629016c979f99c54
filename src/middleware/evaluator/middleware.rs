use crate::middleware::{Handler, MiddlewareError, Request, Response};
use super::config::FilterConfig;
use super::kind::MatchKind;
use async_trait::async_trait;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// 헤더 평가 미들웨어
///
/// 요청 헤더에서 키를, 다음 처리기가 만든 응답 헤더에서 대상 값을 읽어
/// 비교 결과(`"true"`/`"false"`)를 출력 헤더에 기록합니다.
pub struct HeaderEvaluatorMiddleware {
    name: String,
    next: Arc<dyn Handler>,
    config: FilterConfig,
    kind: MatchKind,
    request_header: HeaderName,
    response_header: HeaderName,
    output_header: HeaderName,
}

impl HeaderEvaluatorMiddleware {
    /// 설정을 검증하고 미들웨어를 생성합니다.
    ///
    /// 필드가 비어 있거나 헤더 이름으로 쓸 수 없으면, 또는 `kind`가 유효하지 않으면
    /// `MiddlewareError::Config`를 반환합니다.
    pub fn new(
        next: Arc<dyn Handler>,
        mut config: FilterConfig,
        name: impl Into<String>,
    ) -> Result<Self, MiddlewareError> {
        let name = name.into();
        let compiled = config.compile()?;

        debug!(
            middleware = %name,
            next = %next.name(),
            request_header = %compiled.request_header,
            response_header = %compiled.response_header,
            output_header = %compiled.output_header,
            kind = %compiled.kind,
            "헤더 평가 미들웨어 생성"
        );

        Ok(Self {
            name,
            next,
            config,
            kind: compiled.kind,
            request_header: compiled.request_header,
            response_header: compiled.response_header,
            output_header: compiled.output_header,
        })
    }

    /// 정규화된 설정을 반환합니다.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}

/// 헤더 값을 읽습니다. 없으면 빈 문자열입니다.
///
/// ASCII 밖의 바이트(obs-text)도 값의 일부로 읽습니다.
fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Cow<'a, str> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .unwrap_or_default()
}

fn bool_header_value(matched: bool) -> HeaderValue {
    if matched {
        HeaderValue::from_static("true")
    } else {
        HeaderValue::from_static("false")
    }
}

#[async_trait]
impl Handler for HeaderEvaluatorMiddleware {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, req: Request) -> Response {
        let key = header_value(req.headers(), &self.request_header).into_owned();

        let mut res = self.next.handle(req).await;

        let src = header_value(res.headers(), &self.response_header).into_owned();
        if src.is_empty() {
            debug!(
                middleware = %self.name,
                response_header = %self.response_header,
                "응답 헤더 없음, 평가 생략"
            );
            return res;
        }

        let matched = self.kind.matches(&src, &key);
        debug!(
            middleware = %self.name,
            kind = %self.kind,
            src = %src,
            key = %key,
            matched,
            "헤더 평가 완료"
        );

        res.headers_mut()
            .insert(self.output_header.clone(), bool_header_value(matched));
        res
    }
}
