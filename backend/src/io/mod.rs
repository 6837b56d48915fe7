//! # IO Module
//!
//! Boundary between the app's stored documents (evaluations, dog foods) and
//! the domain layer. Mappers turn the shared DTOs into domain models.

pub mod mappers;
