//! pdb-merge - SQL file merging for posdb
//!
//! Slices the main schema file into named sections, separates essential
//! configuration inserts from sample data, and assembles two files: the
//! full schema with configuration, and the sample data.

pub mod assemble;
pub mod error;
pub mod filter;
pub mod inputs;
pub mod section;

pub use assemble::{
    build_sample_data, build_schema, merge, write_outputs, MergedOutputs, SAMPLE_OUTPUT,
    SCHEMA_OUTPUT,
};
pub use error::{MergeError, MergeResult};
pub use filter::{filter_essential_lines, filter_sample_lines, strip_sample_inserts};
pub use inputs::{InputFile, MergeInputs};
pub use section::{extract_section, SchemaSection};
