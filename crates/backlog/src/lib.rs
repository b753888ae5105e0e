//! Backlog - a YAML project-backlog tracker.
//!
//! The backlog for a project lives in a single `project-backlog.yml` file:
//! phased tasks with dependency and blocking edges forming a directed graph.
//! This crate provides both the CLI and a library: the [`graph`] module is
//! the analysis core (cycles, critical paths, effective status, validation),
//! [`ops`] holds the validate-then-mutate operations, and [`viewer`] projects
//! the document into the JSON model the web viewer consumes.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod graph;
pub mod ops;
pub mod storage;
pub mod viewer;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Output formatting shared by CLI commands
pub mod output;
