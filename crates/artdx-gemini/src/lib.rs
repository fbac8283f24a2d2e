//! Gemini `generateContent` backend for the conversation core.

pub mod client;
mod wire;

pub use client::GeminiClient;
