//! AI-generated SEO audits: request/response model, prompt, Gemini call and
//! JSON extraction.

pub mod client;
pub mod extraction;
pub mod prompts;
pub mod screenshot;
pub mod types;

pub use client::{AuditClient, AuditSettings};
pub use screenshot::{fetch_preview_image, screenshot_url, PreviewImage};
pub use types::*;
