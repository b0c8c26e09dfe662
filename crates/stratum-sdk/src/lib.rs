//! # stratum-sdk
//!
//! Public SDK for using Stratum as a Rust library.
//!
//! Provides two entry points:
//! - [`Compiler`](compiler::Compiler): Runs validation, mapping, and ordering as one pipeline.
//! - [`load_graph`](loader::load_graph): Reads a normalized diagram from a JSON file.
//!
//! # Example
//!
//! ```rust,no_run
//! use stratum_common::config::CompileConfig;
//! use stratum_sdk::{Compiler, load_graph};
//!
//! let graph = load_graph(std::path::Path::new("diagram.json"))?;
//! let compilation = Compiler::new(CompileConfig::default()).compile(&graph)?;
//! for resource in &compilation.order.resources {
//!     println!("{}", resource.id);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compiler;
pub mod loader;

pub use compiler::{Compilation, CompileError, Compiler};
pub use loader::load_graph;
