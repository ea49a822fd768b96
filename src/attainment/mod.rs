//! The attainment computation pipeline, leaf-first: per-student mark
//! aggregation, CLO summary statistics, weighted CLO-to-PLO rollup,
//! and gap classification. Every stage is a pure transformation over
//! its inputs; nothing here touches the store.

pub mod clo;
pub mod gap;
pub mod marks;
pub mod rollup;
