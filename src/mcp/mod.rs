//! MCP (Model Context Protocol) surface over JSON-RPC 2.0 and HTTP.
//!
//! - [`rpc`] - Request/response envelopes and error codes
//! - [`tools`] - Tool descriptors and `tools/call` dispatch
//! - [`render`] - Markdown formatting of tool results
//! - [`server`] - axum router and method dispatch

pub mod render;
pub mod rpc;
mod server;
pub mod tools;

pub use rpc::{JsonRpcRequest, JsonRpcResponse, RpcError, PROTOCOL_VERSION};
pub use server::{handle_message, handle_request, router, SERVER_NAME, SERVER_VERSION};
