//! Scenario and property tests over whole documents.
//!
//! Trees are built from small tag-soup strings by [`support::parse`], regions
//! come from [`support::find`] or flat char offsets, and results are checked
//! by rendering markup back out.

pub mod support;
