//! HTTP access to the hotel backend

mod client;
mod dto;
mod gateway;

pub use client::ApiClient;
pub use gateway::RestGateway;
