//! # Workflows
//! This module contains the workflows for the CLI: `find_site` and `make_box`.

pub mod find_site;
pub mod make_box;
