// src/services.rs

pub mod catalog_service;
pub mod content_service;
pub mod dispatch;
pub mod job_service;
pub mod lead_service;
pub mod spec_grouper;
pub mod utm;
