//! Consultation subsystem: franchise-inquiry leads with encrypted contact
//! fields.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::LeadRepository;
pub use service::ConsultationService;
pub use types::{
    ConsultationLead, DecryptedLead, LeadPage, LeadStatus, LeadSubmission, NewLead,
};
