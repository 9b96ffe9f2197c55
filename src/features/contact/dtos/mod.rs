pub mod contact_dto;

pub use contact_dto::{
    first_validation_message, ContactSubmissionDto, SanitizedSubmission, ServiceCategory,
};
