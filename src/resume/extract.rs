//! Text extraction from local resume documents

use crate::error::{MatcherError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Text,
    Markdown,
}

impl DocumentType {
    /// Probe order when looking a document up by id
    pub const ALL: [DocumentType; 3] = [DocumentType::Text, DocumentType::Markdown, DocumentType::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Text => "txt",
            DocumentType::Markdown => "md",
        }
    }

    pub fn extract(&self, path: &Path) -> Result<String> {
        match self {
            DocumentType::Pdf => extract_pdf(path),
            DocumentType::Text => Ok(std::fs::read_to_string(path)?),
            DocumentType::Markdown => {
                let markdown = std::fs::read_to_string(path)?;
                Ok(markdown_to_text(&markdown))
            }
        }
    }
}

fn extract_pdf(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        MatcherError::Processing(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

/// Render Markdown to HTML, then strip it back to plain lines.
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let clean_text = tag_regex().replace_all(&text, "");

    clean_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
