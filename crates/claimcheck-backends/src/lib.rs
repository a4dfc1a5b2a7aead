//! claimcheck-backends: external collaborators for claim verification
//!
//! This crate defines the contracts the verification pipeline depends on and
//! ships the implementations it runs with.
//!
//! ## Key Components
//!
//! - `SearchBackend`, `PageFetcher`, `Summarizer`, `StanceClassifier`: async
//!   collaborator traits
//! - `Backends`: the four collaborators bundled as shared trait objects
//! - `fakes`: scripted in-memory implementations for tests
//! - `http`: `reqwest` implementations against search, reader and model
//!   inference endpoints

mod error;
pub mod fakes;
pub mod http;
pub mod traits;

pub use error::BackendError;
pub use http::{
    HfStanceClassifier, HfSummarizer, HttpBackendConfig, ReaderFetcher, SearxSearch,
};
pub use traits::{
    BackendResult, Backends, PageFetcher, SearchBackend, SearchHit, Stance, StanceClassifier,
    StanceScore, SummaryLength, Summarizer,
};
