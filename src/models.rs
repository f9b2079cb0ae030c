// src/models.rs

pub mod catalog;
pub mod content;
pub mod job;
pub mod lead;
pub mod localized;
