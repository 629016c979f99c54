use super::{Handler, MiddlewareError, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;

/// 최종 처리기를 미들웨어로 감싼 체인
///
/// `wrap`으로 추가한 미들웨어가 가장 바깥쪽에 놓입니다.
#[derive(Clone)]
pub struct MiddlewareChain {
    head: Arc<dyn Handler>,
    names: Vec<String>,
}

impl MiddlewareChain {
    pub fn new(terminal: Arc<dyn Handler>) -> Self {
        Self {
            head: terminal,
            names: Vec::new(),
        }
    }

    /// 현재 체인을 다음 처리기로 받는 미들웨어를 바깥쪽에 추가합니다.
    pub fn wrap<H, F>(mut self, build: F) -> Result<Self, MiddlewareError>
    where
        H: Handler + 'static,
        F: FnOnce(Arc<dyn Handler>) -> Result<H, MiddlewareError>,
    {
        let middleware = build(Arc::clone(&self.head))?;
        self.names.insert(0, middleware.name().to_string());
        self.head = Arc::new(middleware);
        Ok(self)
    }

    /// 미들웨어 이름 목록 (바깥쪽부터)
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_handler(self) -> Arc<dyn Handler> {
        self.head
    }
}

#[async_trait]
impl Handler for MiddlewareChain {
    fn name(&self) -> &str {
        self.head.name()
    }

    async fn handle(&self, req: Request) -> Response {
        self.head.handle(req).await
    }
}
