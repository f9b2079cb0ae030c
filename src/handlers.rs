// src/handlers.rs

pub mod catalog;
pub mod content;
pub mod jobs;
pub mod language;
pub mod leads;
