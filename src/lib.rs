//! cloudfront-invalidate - Invalidate cached paths of a CloudFront distribution

pub mod cli;
pub mod cloudfront;
pub mod config;

pub use cloudfront::{Connection, Credentials, Distribution, InvalidationError};
pub use config::Config;
