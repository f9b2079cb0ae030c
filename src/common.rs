// src/common.rs

pub mod error;
pub mod i18n;
pub mod json_body;
