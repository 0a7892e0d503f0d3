// src/specs/mod.rs
//! # Page specs
//!
//! Where the ground truth lives in each scraped page and how to pull it out.
//! Specs only extract: fetching fan-out lives in `scrape`, derived columns in
//! `transform`, persistence in `store`.
//!
//! ```text
//! scrape::collect_cases → specs::case_status::fetch() → CaseRecord
//!                                     ↘ core::html / core::net
//! ```

pub mod case_status;
