//! Resume provider implementations

use super::extract::DocumentType;
use super::{extract_document_id, ContentResult, ResumeContentProvider, UnavailableReason};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Deterministic stand-in for a document store: canned text naming the id.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderProvider;

impl ResumeContentProvider for PlaceholderProvider {
    fn fetch(&self, reference: &str) -> ContentResult {
        match extract_document_id(reference) {
            Some(id) => ContentResult::Available(format!("Resume content from Drive ID: {}", id)),
            None => ContentResult::Unavailable(UnavailableReason::MalformedReference),
        }
    }
}

/// In-memory resumes keyed by document id.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    documents: HashMap<String, String>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(id.into(), text.into());
        self
    }
}

impl FromIterator<(String, String)> for StaticProvider {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl ResumeContentProvider for StaticProvider {
    fn fetch(&self, reference: &str) -> ContentResult {
        let Some(id) = extract_document_id(reference) else {
            return ContentResult::Unavailable(UnavailableReason::MalformedReference);
        };
        match self.documents.get(id) {
            Some(text) => ContentResult::from_text(text.clone()),
            None => ContentResult::Unavailable(UnavailableReason::NotFound),
        }
    }
}

/// Resumes stored as `<id>.txt`, `<id>.md` or `<id>.pdf` in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, id: &str) -> Option<(PathBuf, DocumentType)> {
        DocumentType::ALL.iter().find_map(|doc_type| {
            let path = self.root.join(format!("{}.{}", id, doc_type.extension()));
            path.is_file().then_some((path, *doc_type))
        })
    }
}

impl ResumeContentProvider for DirectoryProvider {
    fn fetch(&self, reference: &str) -> ContentResult {
        let Some(id) = extract_document_id(reference) else {
            return ContentResult::Unavailable(UnavailableReason::MalformedReference);
        };

        let Some((path, doc_type)) = self.locate(id) else {
            debug!("No resume document for id {} in {}", id, self.root.display());
            return ContentResult::Unavailable(UnavailableReason::NotFound);
        };

        match doc_type.extract(&path) {
            Ok(text) => ContentResult::from_text(text),
            Err(e) => {
                warn!("Could not read resume {}: {}", path.display(), e);
                ContentResult::Unavailable(UnavailableReason::ExtractionFailed(e.to_string()))
            }
        }
    }
}

/// Bounds each fetch of the wrapped provider. A fetch that overruns is
/// reported as timed out; its worker thread is left to finish on its own.
pub struct TimeoutProvider<P> {
    inner: Arc<P>,
    timeout: Duration,
}

impl<P> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }
}

impl<P: ResumeContentProvider + 'static> ResumeContentProvider for TimeoutProvider<P> {
    fn fetch(&self, reference: &str) -> ContentResult {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let owned_reference = reference.to_string();

        thread::spawn(move || {
            // The receiver may already be gone after a timeout
            let _ = tx.send(inner.fetch(&owned_reference));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!("Resume fetch for {} timed out after {:?}", reference, self.timeout);
                ContentResult::Unavailable(UnavailableReason::TimedOut)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                warn!("Resume provider failed while fetching {}", reference);
                ContentResult::Unavailable(UnavailableReason::ExtractionFailed(
                    "provider stopped without a result".to_string(),
                ))
            }
        }
    }
}
