//! 中间件

pub mod request;

pub use request::*;
