use super::{Request, Response};
use async_trait::async_trait;
use std::future::Future;

/// 요청 처리기 트레이트
///
/// 체인의 각 단계와 최종 처리기가 구현하는 인터페이스입니다.
/// 필터는 다음 단계를 `Arc<dyn Handler>`로 참조하고 자신도 `Handler`를 구현하므로
/// 임의의 순서로 중첩할 수 있습니다.
#[async_trait]
pub trait Handler: Send + Sync {
    /// 처리기의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// HTTP 요청을 처리하고 응답을 반환합니다.
    async fn handle(&self, req: Request) -> Response;
}

/// 비동기 클로저를 감싸는 처리기
pub struct HandlerFn<F> {
    name: String,
    f: F,
}

/// 비동기 클로저로부터 처리기를 만듭니다.
pub fn handler_fn<F, Fut>(name: impl Into<String>, f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    HandlerFn {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, req: Request) -> Response {
        (self.f)(req).await
    }
}
