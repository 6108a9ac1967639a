//! plaza - community board and franchise-inquiry backend
//!
//! A multi-tab community board (notices, events, FAQ, customer voice,
//! inquiries) with password-gated anonymous submissions, field-level
//! encryption of author contact data, an admin reply workflow, and a
//! consultation lead store sharing the same privacy treatment.

pub mod board;
pub mod config;
pub mod consultation;
pub mod db;
pub mod error;
pub mod logging;
pub mod notify;
pub mod privacy;
pub mod web;

pub use board::{
    AccessGate, Board, BoardCategory, BoardDirectory, BoardService, GateState, InquirySubmission,
    Post, PostPage, PostRepository, PostStatus, PostSummary, PostUpdate, Reply, ReplyOutcome,
    ReplyRepository, UnlockedPost, DEFAULT_PAGE_SIZE,
};
pub use config::Config;
pub use consultation::{ConsultationService, LeadStatus, LeadSubmission};
pub use db::Database;
pub use error::{PlazaError, Result};
pub use notify::{NoopNotifier, Notifier, RecordingNotifier, WebhookNotifier};
pub use privacy::{format_phone, hash_password, strip_phone, verify_password, FieldCodec};
