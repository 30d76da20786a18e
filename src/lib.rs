//! # portfolio-chat
//!
//! The Q&A core behind a personal portfolio site's chatbot. A visitor's
//! question is answered either by an external chat-completion service
//! grounded on the owner's CV documents, or by a deterministic table of
//! canned answers when no service is configured or reachable. The visitor
//! always gets readable text back.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌──────────┐   ┌────────────┐
//! │ Documents │──▶│  Search  │──▶│  Prompt  │──▶│ Completion │──▶ answer
//! │  FS/HTTP  │   │ keyword  │   │ persona+ │   │  (HTTP)    │
//! └───────────┘   └──────────┘   │ context  │   └─────┬──────┘
//!                                └──────────┘         │ error / no key
//!                                                     ▼
//!                                   apology  or  ┌──────────┐
//!                                                │ Fallback │──▶ answer
//!                                                └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! folio ask "What languages does he speak?"
//! folio rank "python machine learning" --context
//! folio sources
//! folio serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`error`] | Pipeline error taxonomy |
//! | [`documents`] | Document store and sources |
//! | [`search`] | Keyword-overlap ranking |
//! | [`prompt`] | Grounded prompt composition |
//! | [`completion`] | Chat-completion client |
//! | [`fallback`] | Canned-response table |
//! | [`responder`] | Responder trait and selection |
//! | [`server`] | JSON HTTP endpoint |

pub mod completion;
pub mod config;
pub mod documents;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod responder;
pub mod search;
pub mod server;
pub mod sources;
