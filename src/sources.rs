//! `folio sources`: report what the chatbot would run with.

use anyhow::Result;
use std::time::Duration;

use crate::config::Config;
use crate::documents::DocumentStore;
use crate::error::ChatError;

pub async fn list_sources(config: &Config) -> Result<()> {
    let completion = &config.completion;
    let backend = match (completion.credential(), completion.has_endpoint()) {
        (Some(_), true) => format!("completion ({})", completion.model),
        (None, _) => format!("canned (no key in completion.api_key or ${})", completion.api_key_env),
        (_, false) => "canned (completion.endpoint is empty)".to_string(),
    };
    println!("responder: {}", backend);
    println!();

    let timeout = Duration::from_secs(completion.timeout_secs);
    let store = DocumentStore::from_config(&config.documents, timeout).await?;

    println!("{:<10} {:>8}  PATH", "STATUS", "BYTES");
    for doc in store.documents() {
        println!("{:<10} {:>8}  {}", "OK", doc.content.len(), doc.path);
    }
    for path in store.skipped() {
        println!("{:<10} {:>8}  {}", "SKIPPED", "-", path);
    }
    for failure in store.failures() {
        if let ChatError::DocumentLoad { path, reason } = failure {
            println!("{:<10} {:>8}  {} ({})", "FAILED", "-", path, reason);
        }
    }

    if store.documents().is_empty() && store.skipped().is_empty() && store.failures().is_empty() {
        println!("(no documents configured)");
    }

    Ok(())
}
