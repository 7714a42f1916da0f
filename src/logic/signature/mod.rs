//! Signature Module - Known-indicator matching

pub mod indicators;
pub mod matcher;

pub use indicators::IndicatorSet;
pub use matcher::SignatureMatcher;
