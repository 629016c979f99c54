use tracing::{debug, info};
use crate::middleware::evaluator::{FilterConfig, HeaderEvaluatorMiddleware};
use super::{Handler, MiddlewareChain, MiddlewareConfig, MiddlewareError, Request, Response};
use super::config::MiddlewareType;
use std::collections::HashMap;
use std::sync::Arc;

/// 미들웨어 설정으로부터 미들웨어 인스턴스를 생성합니다.
fn create_middleware(
    name: &str,
    config: &MiddlewareConfig,
    next: Arc<dyn Handler>,
) -> Result<HeaderEvaluatorMiddleware, MiddlewareError> {
    debug!("미들웨어 생성 시작: name={}, type={:?}, settings={:?}", name, config.middleware_type, config.settings);

    match config.middleware_type {
        MiddlewareType::HeaderEvaluator => {
            let filter_config = FilterConfig::from_settings(&config.settings)?;
            HeaderEvaluatorMiddleware::new(next, filter_config, name)
        }
    }
}

#[derive(Clone)]
pub struct MiddlewareManager {
    chain: MiddlewareChain,
}

impl MiddlewareManager {
    /// 이름별 미들웨어 설정으로 체인을 구성합니다.
    ///
    /// 비활성 미들웨어는 건너뛰고, `order`가 낮을수록 바깥쪽에 놓입니다.
    /// 하나라도 생성에 실패하면 전체 구성이 실패합니다.
    pub fn new(
        terminal: Arc<dyn Handler>,
        middleware_configs: &HashMap<String, MiddlewareConfig>,
    ) -> Result<Self, MiddlewareError> {
        let configs: Vec<_> = middleware_configs
            .iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect();
        Self::from_entries(terminal, &configs)
    }

    pub fn from_entries(
        terminal: Arc<dyn Handler>,
        configs: &[(String, MiddlewareConfig)],
    ) -> Result<Self, MiddlewareError> {
        // 정렬을 위해 Vec으로 변환
        let mut ordered_configs: Vec<_> = configs
            .iter()
            .filter(|(_, config)| config.enabled)
            .collect();
        ordered_configs.sort_by(|(a_name, a), (b_name, b)| {
            a.order.cmp(&b.order).then_with(|| a_name.cmp(b_name))
        });

        // 안쪽부터 감싸기
        let mut chain = MiddlewareChain::new(terminal);
        for (name, config) in ordered_configs.into_iter().rev() {
            chain = chain
                .wrap(|next| create_middleware(name, config, next))
                .map_err(|e| MiddlewareError::Build {
                    middleware: name.clone(),
                    source: Box::new(e),
                })?;
        }

        info!(middlewares = ?chain.names(), "미들웨어 체인 구성 완료");
        Ok(Self { chain })
    }

    pub fn chain(&self) -> &MiddlewareChain {
        &self.chain
    }

    pub async fn handle(&self, req: Request) -> Response {
        self.chain.handle(req).await
    }
}
