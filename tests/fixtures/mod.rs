//! Test fixtures for MCP protocol testing

pub mod requests;
