pub mod chain;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod manager;
pub mod traits;

use bytes::Bytes;
use http_body_util::Full;

pub type Request = hyper::Request<Full<Bytes>>;
pub type Response = hyper::Response<Full<Bytes>>;

pub use chain::MiddlewareChain;
pub use config::{MiddlewareConfig, MiddlewareType};
pub use error::MiddlewareError;
pub use manager::MiddlewareManager;
pub use traits::{handler_fn, Handler, HandlerFn};
