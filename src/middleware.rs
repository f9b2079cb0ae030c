// src/middleware.rs

pub mod i18n;
