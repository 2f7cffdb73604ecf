//! Statically dispatched summarization pipeline
//!
//! The pipeline runs three stages over a tokenized [`crate::types::Document`]:
//! term weighting, sentence scoring and sentence selection. Each stage sits
//! behind a trait in [`traits`] so it can be swapped at compile time through
//! [`runner::PipelineBuilder`]. An [`observer::PipelineObserver`] sees every
//! stage boundary and intermediate artifact.
//!
//! [`spec`] and [`validation`] cover the JSON form of a configuration.

pub mod artifacts;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
