//! Skill Server
//!
//! Hosts voice-assistant skills behind the platform's request trust model:
//! certificate and signature checks, timestamp freshness, then dispatch to
//! registered intent handlers.

pub mod api;
pub mod auth;
pub mod certs;
pub mod config;
pub mod demo;
pub mod skill;
