//! LearnBase MCP library
//!
//! Shared by the `learnbase-mcp` server and the `learnbase` CLI.

pub mod config;
