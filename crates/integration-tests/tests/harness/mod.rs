//! Shared helpers; each test binary uses a subset
#![allow(dead_code)]

pub mod app;
pub mod tls;
