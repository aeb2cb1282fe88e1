//! GitHub REST API access: the client and its wire types.

pub mod client;
pub mod types;

pub use client::{GithubClient, GithubError};
