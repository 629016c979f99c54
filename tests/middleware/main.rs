mod evaluator_test;

use bytes::Bytes;
use header_evaluator::middleware::{handler_fn, Handler, Request, Response};
use http_body_util::Full;
use std::sync::Arc;

// 테스트 헬퍼 함수
pub fn create_request(headers: &[(&str, &str)]) -> Request {
    let mut builder = hyper::Request::builder().uri("http://example.com/");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Full::new(Bytes::new())).unwrap()
}

/// 고정된 응답 헤더를 돌려주는 최종 처리기
pub fn static_backend(headers: &'static [(&'static str, &'static str)]) -> Arc<dyn Handler> {
    Arc::new(handler_fn("backend", move |_req: Request| async move {
        let mut builder = hyper::Response::builder().status(200);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Full::new(Bytes::from("ok"))).unwrap()
    }))
}

/// 요청 헤더 `X-Echo` 값을 응답 헤더 `X-Resp`로 돌려주는 최종 처리기
pub fn echo_backend() -> Arc<dyn Handler> {
    Arc::new(handler_fn("echo", |req: Request| async move {
        let mut builder = hyper::Response::builder().status(200);
        if let Some(value) = req.headers().get("X-Echo") {
            builder = builder.header("X-Resp", value.clone());
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }))
}

pub fn header<'a>(res: &'a Response, name: &str) -> Option<&'a str> {
    res.headers().get(name).and_then(|v| v.to_str().ok())
}
