use super::{create_request, echo_backend, header, static_backend};
use header_evaluator::middleware::evaluator::{FilterConfig, HeaderEvaluatorMiddleware, MatchKind};
use header_evaluator::middleware::{handler_fn, Handler, MiddlewareError, Request};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn config(kind: &str) -> FilterConfig {
    FilterConfig::new("X-Match", "X-Req", "X-Resp", kind)
}

#[tokio::test]
async fn test_suffix_match_end_to_end() {
    let middleware = HeaderEvaluatorMiddleware::new(
        static_backend(&[("X-Resp", "xyzabc")]),
        config("suffix"),
        "suffix-check",
    )
    .unwrap();

    let res = middleware.handle(create_request(&[("X-Req", "abc")])).await;
    assert_eq!(header(&res, "X-Match"), Some("true"));
}

#[tokio::test]
async fn test_missing_response_header_leaves_output_unset() {
    let middleware =
        HeaderEvaluatorMiddleware::new(static_backend(&[]), config("suffix"), "suffix-check")
            .unwrap();

    let res = middleware.handle(create_request(&[("X-Req", "abc")])).await;
    assert_eq!(header(&res, "X-Match"), None);
}

#[tokio::test]
async fn test_predicates_through_filter() {
    // (비교 방식, 응답 값, 요청 값, 예상 결과)
    let cases = [
        ("suffix", "application/json", "json", "true"),
        ("suffix", "application/json", "xml", "false"),
        ("prefix", "Bearer abc123", "Bearer ", "true"),
        ("prefix", "Basic abc123", "Bearer ", "false"),
        ("contains", "Hello-World", "WORLD", "false"),
        ("contains", "Hello-World", "World", "true"),
        ("contains_ignorecase", "Hello-World", "WORLD", "true"),
        ("contains_ignorecase", "Hello-World", "planet", "false"),
    ];

    for (kind, src, key, expected) in cases {
        let middleware = HeaderEvaluatorMiddleware::new(echo_backend(), config(kind), "check")
            .unwrap();

        let res = middleware
            .handle(create_request(&[("X-Req", key), ("X-Echo", src)]))
            .await;
        assert_eq!(
            header(&res, "X-Match"),
            Some(expected),
            "비교 실패 - kind: {}, src: {}, key: {}",
            kind,
            src,
            key
        );
    }
}

#[tokio::test]
async fn test_empty_key_always_matches() {
    for kind in ["suffix", "prefix", "contains", "contains_ignorecase"] {
        let middleware =
            HeaderEvaluatorMiddleware::new(echo_backend(), config(kind), "check").unwrap();

        let res = middleware
            .handle(create_request(&[("X-Echo", "anything")]))
            .await;
        assert_eq!(header(&res, "X-Match"), Some("true"), "kind: {}", kind);
    }
}

#[tokio::test]
async fn test_output_header_is_replaced() {
    let middleware = HeaderEvaluatorMiddleware::new(
        static_backend(&[("X-Resp", "xyzabc"), ("X-Match", "stale")]),
        config("prefix"),
        "check",
    )
    .unwrap();

    let res = middleware.handle(create_request(&[("X-Req", "abc")])).await;
    let values: Vec<_> = res.headers().get_all("X-Match").iter().collect();
    assert_eq!(values, vec!["false"]);
}

#[tokio::test]
async fn test_downstream_response_is_preserved() {
    let backend = Arc::new(handler_fn("teapot", |_req: Request| async {
        hyper::Response::builder()
            .status(418)
            .header("X-Resp", "tea")
            .header("Content-Type", "text/plain")
            .body(Full::new(Bytes::from("short and stout")))
            .unwrap()
    }));
    let middleware = HeaderEvaluatorMiddleware::new(backend, config("contains"), "check").unwrap();

    let res = middleware.handle(create_request(&[("X-Req", "ea")])).await;
    assert_eq!(res.status(), 418);
    assert_eq!(header(&res, "Content-Type"), Some("text/plain"));
    assert_eq!(header(&res, "X-Match"), Some("true"));

    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"short and stout");
}

#[tokio::test]
async fn test_request_is_forwarded_unchanged() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let backend = Arc::new(handler_fn("inspect", move |req: Request| {
        let counter = Arc::clone(&counter);
        async move {
            assert_eq!(req.uri().path(), "/");
            assert_eq!(req.headers().get("X-Req").unwrap(), "abc");
            counter.fetch_add(1, Ordering::SeqCst);
            hyper::Response::new(Full::new(Bytes::new()))
        }
    }));
    let middleware = HeaderEvaluatorMiddleware::new(backend, config("suffix"), "check").unwrap();

    let res = middleware.handle(create_request(&[("X-Req", "abc")])).await;
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(header(&res, "X-Match"), None);
}

#[tokio::test]
async fn test_invocation_is_idempotent() {
    let middleware = HeaderEvaluatorMiddleware::new(
        static_backend(&[("X-Resp", "xyzabc")]),
        config("contains"),
        "check",
    )
    .unwrap();

    let first = middleware.handle(create_request(&[("X-Req", "zab")])).await;
    let second = middleware.handle(create_request(&[("X-Req", "zab")])).await;
    assert_eq!(header(&first, "X-Match"), Some("true"));
    assert_eq!(header(&first, "X-Match"), header(&second, "X-Match"));
}

#[tokio::test]
async fn test_concurrent_requests() {
    let middleware: Arc<dyn Handler> = Arc::new(
        HeaderEvaluatorMiddleware::new(echo_backend(), config("suffix"), "check").unwrap(),
    );

    let tasks = (0..64).map(|i| {
        let middleware = Arc::clone(&middleware);
        tokio::spawn(async move {
            let src = format!("value-{}", i);
            let key = if i % 2 == 0 { format!("-{}", i) } else { "nope".to_string() };
            let res = middleware
                .handle(create_request(&[("X-Req", key.as_str()), ("X-Echo", src.as_str())]))
                .await;
            (i, header(&res, "X-Match").map(str::to_string))
        })
    });

    for result in futures_util::future::join_all(tasks).await {
        let (i, value) = result.unwrap();
        let expected = if i % 2 == 0 { "true" } else { "false" };
        assert_eq!(value.as_deref(), Some(expected), "요청 {}", i);
    }
}

#[test]
fn test_mixed_case_kind_is_normalized() {
    let middleware =
        HeaderEvaluatorMiddleware::new(static_backend(&[]), config("PREFIX"), "check").unwrap();
    assert_eq!(middleware.kind(), MatchKind::Prefix);
    assert_eq!(middleware.config().simple_eval.kind, "prefix");
}

#[test]
fn test_invalid_kind_is_rejected() {
    let result = HeaderEvaluatorMiddleware::new(static_backend(&[]), config("regex"), "check");

    match result {
        Err(MiddlewareError::Config { field, value, .. }) => {
            assert_eq!(field, "SimpleEval.kind");
            assert_eq!(value, "regex");
        }
        Err(e) => panic!("예상하지 못한 오류: {}", e),
        Ok(_) => panic!("잘못된 kind가 허용됨"),
    }
}

#[test]
fn test_empty_fields_are_rejected() {
    let cases = [
        (FilterConfig::new("", "X-Req", "X-Resp", "suffix"), "OutputHeaderName"),
        (FilterConfig::new("X-Match", "", "X-Resp", "suffix"), "SimpleEval.requestHeaderField"),
        (FilterConfig::new("X-Match", "X-Req", "", "suffix"), "SimpleEval.responseHeaderField"),
        (FilterConfig::new("X-Match", "X-Req", "X-Resp", ""), "SimpleEval.kind"),
    ];

    for (config, field) in cases {
        let err = HeaderEvaluatorMiddleware::new(static_backend(&[]), config, "check")
            .err()
            .unwrap();
        assert_eq!(err.field(), Some(field));
        assert!(err.to_string().starts_with(&format!("Invalid/Empty {}", field)));
    }
}
