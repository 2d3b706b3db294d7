#![allow(clippy::missing_errors_doc)]
//! Inner builder generation for Java classes.
//!
//! The pipeline collects the fields of the class at a caret, lets a selector confirm
//! a subset and the options, then synthesizes (or refreshes) a nested `Builder` class
//! in the code model:
//!
//! ```no_run
//! use inner_builder_core::{
//!   config::MemoryStore, handler::InnerBuilderHandler, model::JavaModel, reformat::ShortenReferences,
//!   selection::SelectAll,
//! };
//!
//! # fn example(mut model: JavaModel, offset: usize) -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = MemoryStore::new();
//! let mut handler = InnerBuilderHandler::new(SelectAll, ShortenReferences);
//! let outcome = handler.invoke(&mut model, offset, &mut store)?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod config;
pub mod generator;
pub mod handler;
pub mod model;
pub mod naming;
pub mod options;
pub mod reformat;
pub mod render;
pub mod selection;
