//! Route Handlers

pub mod catalog;
pub mod chat;
pub mod diagnose;
pub mod leads;
pub mod sessions;
