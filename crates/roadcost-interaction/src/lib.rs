//! Transport layer: talks HTTP to the analysis service.

pub mod http_client;
pub mod normalize;

pub use http_client::HttpAnalysisClient;
