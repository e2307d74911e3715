//! AutoPrep: Data Cleaning Library
//!
//! A library for cleaning tabular datasets through an ordered pipeline of
//! stages: duplicate removal, integrity and consistency repair, text
//! standardization, imputation, outlier removal, scaling and one-hot encoding.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
