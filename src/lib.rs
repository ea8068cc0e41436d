//! Stroke Guardian: a pre-trained stroke-risk classifier behind one HTTP
//! endpoint. The pipeline artifact is loaded once at startup and shared
//! read-only across request handlers.

pub mod pipeline;
pub mod web;
