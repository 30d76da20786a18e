//! Question answering: the seam between the view layer and the pipeline.
//!
//! A [`Responder`] turns a visitor's question into an [`Answer`] and never
//! fails. Two implementations exist:
//!
//! - [`CannedResponder`]: keyword lookup in the [`CannedResponseTable`].
//! - [`CompletionResponder`]: rank documents, compose a grounded prompt,
//!   call the completion service. Any failure becomes the fixed apology (or,
//!   with `completion.on_error = "canned"`, a canned answer).
//!
//! [`build_responder`] picks one based on whether a completion credential is
//! configured.
//!
//! ```text
//! question ──▶ rank ──▶ compose ──▶ complete ──Ok──▶ completion answer
//!                                      │
//!                                     Err──▶ apology / canned answer
//! ```

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::completion::CompletionClient;
use crate::config::{Config, OnError};
use crate::documents::DocumentStore;
use crate::error::ChatError;
use crate::fallback::CannedResponseTable;
use crate::models::{Answer, Origin, SourceDocument};
use crate::prompt::{compose, persona_for};
use crate::search::search_documents;

/// Answers a single question. Implementations must always return text.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn answer(&self, question: &str) -> Answer;
}

/// Answers from the canned-response table only.
pub struct CannedResponder {
    table: Arc<CannedResponseTable>,
}

impl CannedResponder {
    pub fn new(table: Arc<CannedResponseTable>) -> Self {
        Self { table }
    }

    pub fn answer_now(&self, question: &str) -> Answer {
        Answer::new(self.table.respond(question), Origin::Canned)
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn answer(&self, question: &str) -> Answer {
        self.answer_now(question)
    }
}

/// The fixed reply used when the completion service cannot answer.
pub fn apology(contact_email: &str) -> String {
    format!(
        "I apologize, but I'm having trouble connecting to the AI service right now. \
         Please try again in a moment, or feel free to get in touch directly at {}",
        contact_email
    )
}

/// Answers through the completion service, grounded on loaded documents.
pub struct CompletionResponder {
    client: CompletionClient,
    documents: Arc<Vec<SourceDocument>>,
    persona: String,
    apology: String,
    on_error: OnError,
    canned: CannedResponder,
}

impl CompletionResponder {
    pub fn new(
        client: CompletionClient,
        documents: Arc<Vec<SourceDocument>>,
        config: &Config,
        table: Arc<CannedResponseTable>,
    ) -> Self {
        Self {
            client,
            documents,
            persona: persona_for(&config.persona),
            apology: apology(&config.persona.contact_email),
            on_error: config.completion.on_error,
            canned: CannedResponder::new(table),
        }
    }

    async fn try_answer(&self, question: &str) -> Result<String, ChatError> {
        let context = search_documents(question, &self.documents);
        let turns = compose(&self.persona, &context, question);
        self.client.complete(&turns).await
    }
}

#[async_trait]
impl Responder for CompletionResponder {
    async fn answer(&self, question: &str) -> Answer {
        if question.trim().is_empty() {
            return self.canned.answer_now(question);
        }

        match self.try_answer(question).await {
            Ok(text) => Answer::new(text, Origin::Completion),
            Err(e) => {
                tracing::warn!(error = %e, model = self.client.model(), "completion failed");
                match self.on_error {
                    OnError::Apology => Answer::new(self.apology.clone(), Origin::Apology),
                    OnError::Canned => self.canned.answer_now(question),
                }
            }
        }
    }
}

/// Choose and build the responder for `config`.
///
/// With no usable credential or endpoint the canned responder is returned
/// and no documents are loaded.
pub async fn build_responder(config: &Config) -> Result<Arc<dyn Responder>> {
    let table = Arc::new(config.fallback.table());

    let client = match CompletionClient::new(&config.completion) {
        Ok(client) => client,
        Err(e @ ChatError::ConfigurationMissing(_)) => {
            tracing::info!(reason = %e, "using canned responses");
            return Ok(Arc::new(CannedResponder::new(table)));
        }
        Err(e) => return Err(e.into()),
    };

    let timeout = Duration::from_secs(config.completion.timeout_secs);
    let store = DocumentStore::from_config(&config.documents, timeout).await?;
    let documents = Arc::new(store.into_documents());

    tracing::info!(
        model = client.model(),
        documents = documents.len(),
        "using completion service"
    );
    Ok(Arc::new(CompletionResponder::new(
        client, documents, config, table,
    )))
}

/// `folio ask`: answer one question and print it.
pub async fn run_ask(config: &Config, question: &str, show_origin: bool) -> Result<()> {
    let responder = build_responder(config).await?;
    let answer = responder.answer(question).await;

    if show_origin {
        println!("[{}]", answer.origin.as_str());
    }
    println!("{}", answer.text);

    Ok(())
}
