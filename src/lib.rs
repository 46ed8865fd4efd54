//! Memory Keeper - family memories turned into a keepsake.
//!
//! A storyteller answers a fixed set of prompts. The answers are saved as
//! JSON, optionally polished into prose by a generative text provider,
//! assembled into an HTML document, exported as PDF and read aloud.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
