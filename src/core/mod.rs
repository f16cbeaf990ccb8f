// src/core/mod.rs
//! The new-word pipeline: tokenize, resolve to base forms, classify, explain.

pub mod classifier;
pub mod conjugation;
pub mod explain;
pub mod resolver;
pub mod tokenizer;
pub mod types;
