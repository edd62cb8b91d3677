//! Prompt pipelines for product marketing copy.
//!
//! Each pipeline is a free `run` function: build the prompt pair, call the
//! provider at the pipeline's temperature, normalize the output. All copy is
//! Brazilian-Portuguese.

pub mod long_description;
pub mod social_post;
pub mod tags;
pub mod title;
