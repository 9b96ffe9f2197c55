//! Contact form feature for public website inquiries.
//!
//! A single stateless pipeline: honeypot check, per-IP fixed-window rate
//! limit, CAPTCHA verification, input sanitization and validation, and one
//! transactional email send. Nothing is persisted.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/send-contact-email` | No | Submit a contact inquiry |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::ContactState;
