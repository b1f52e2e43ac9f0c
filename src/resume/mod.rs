//! Resume content providers
//!
//! A provider maps a resume reference (a document link) to text that the
//! eligibility check can scan for skills. Nothing here ever fails: every
//! problem is reported as [`ContentResult::Unavailable`], which the evaluator
//! treats as "no skills found".

pub mod cache;
pub mod extract;
pub mod providers;

use crate::config::{ProviderKind, ResumeConfig};
use crate::error::{MatcherError, Result};
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

pub use cache::CachingProvider;
pub use providers::{DirectoryProvider, PlaceholderProvider, StaticProvider, TimeoutProvider};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentResult {
    Available(String),
    Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnavailableReason {
    /// No document id could be found in the reference
    MalformedReference,
    NotFound,
    Empty,
    ExtractionFailed(String),
    TimedOut,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnavailableReason::MalformedReference => write!(f, "malformed reference"),
            UnavailableReason::NotFound => write!(f, "not found"),
            UnavailableReason::Empty => write!(f, "empty content"),
            UnavailableReason::ExtractionFailed(e) => write!(f, "extraction failed: {}", e),
            UnavailableReason::TimedOut => write!(f, "timed out"),
        }
    }
}

impl ContentResult {
    /// Blank text is never reported as available.
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            ContentResult::Unavailable(UnavailableReason::Empty)
        } else {
            ContentResult::Available(text)
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ContentResult::Available(text) => Some(text),
            ContentResult::Unavailable(_) => None,
        }
    }
}

pub trait ResumeContentProvider: Send + Sync {
    fn fetch(&self, reference: &str) -> ContentResult;
}

impl<P: ResumeContentProvider + ?Sized> ResumeContentProvider for Arc<P> {
    fn fetch(&self, reference: &str) -> ContentResult {
        (**self).fetch(reference)
    }
}

impl<P: ResumeContentProvider + ?Sized> ResumeContentProvider for Box<P> {
    fn fetch(&self, reference: &str) -> ContentResult {
        (**self).fetch(reference)
    }
}

fn document_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("Invalid document id regex"))
}

/// Pull the opaque document id out of a `.../d/<id>/...` link.
pub fn extract_document_id(reference: &str) -> Option<&str> {
    document_id_regex()
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Builds the provider stack described by the resume configuration:
/// base provider, then the optional timeout, then the optional cache.
///
/// A timed out fetch keeps running on its worker thread until the base
/// provider returns. The cache does not keep `TimedOut` results, so a later
/// candidate with the same reference tries again.
pub fn provider_from_config(config: &ResumeConfig) -> Result<Box<dyn ResumeContentProvider>> {
    let base: Box<dyn ResumeContentProvider> = match config.provider {
        ProviderKind::Placeholder => Box::new(PlaceholderProvider),
        ProviderKind::Directory => {
            let dir = config.resume_dir.as_ref().ok_or_else(|| {
                MatcherError::Configuration("resume.resume_dir is required for the directory provider".to_string())
            })?;
            if !dir.is_dir() {
                return Err(MatcherError::InvalidInput(format!(
                    "Resume directory does not exist: {}",
                    dir.display()
                )));
            }
            info!("Reading resumes from {}", dir.display());
            Box::new(DirectoryProvider::new(dir.clone()))
        }
    };

    let bounded: Box<dyn ResumeContentProvider> = if config.fetch_timeout_secs > 0 {
        Box::new(TimeoutProvider::new(base, Duration::from_secs(config.fetch_timeout_secs)))
    } else {
        base
    };

    Ok(if config.cache {
        Box::new(CachingProvider::new(bounded))
    } else {
        bounded
    })
}
