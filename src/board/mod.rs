//! Board subsystem: directory, post/reply stores, access gate, service.

pub mod access;
pub mod directory;
pub mod post_repository;
pub mod reply;
pub mod reply_repository;
pub mod service;
pub mod types;

pub use access::{AccessGate, GateState};
pub use directory::BoardDirectory;
pub use post_repository::PostRepository;
pub use reply::{Reply, ReplyOutcome};
pub use reply_repository::ReplyRepository;
pub use service::{BoardService, UnlockedPost, DEFAULT_PAGE_SIZE};
pub use types::{
    Board, BoardCategory, InquirySubmission, NewAdminPost, NewInquiryPost, Post, PostPage,
    PostStatus, PostSummary, PostUpdate,
};
