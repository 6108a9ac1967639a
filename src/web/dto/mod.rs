//! DTOs for the Web API.

pub mod request;
pub mod response;
pub mod validation;

pub use request::{
    CreatePostRequest, PaginationQuery, ReplyRequest, SubmitLeadRequest, SubmitPostRequest,
    UpdateLeadStatusRequest, UpdatePostRequest, VerifyPostRequest,
};
pub use response::{
    ApiResponse, LeadResponse, MessageResponse, PaginatedResponse, PaginationMeta,
    PostDetailResponse, PostSummaryResponse, ReplyOutcomeResponse, ReplyResponse,
    UnlockedPostResponse,
};
pub use validation::ValidatedJson;
