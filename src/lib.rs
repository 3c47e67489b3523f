//! tsjsdoc - JSDoc synthesis for TypeScript declarations
//!
//! tsjsdoc reads TypeScript sources and produces JSDoc comment blocks for every
//! documentable declaration: classes, interfaces, functions, members, enums,
//! namespaces and type aliases. Hand-written comments are kept and enriched
//! with names, types, parameters, owners and modifiers.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Documentation engine (parse, resolve, synthesize, walk)
//! - `error`: Library error type

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
