// src/integrations.rs

// Clientes HTTP dos serviços externos que recebem os leads
pub mod crm;
pub mod telegram;
