// src/db.rs

pub mod catalog_repo;
pub mod content_repo;
pub mod job_repo;
pub mod lead_repo;

pub use catalog_repo::CatalogRepository;
pub use content_repo::ContentRepository;
pub use job_repo::{JobApplicationRepository, JobApplicationStore};
pub use lead_repo::{LeadRepository, LeadStore};
