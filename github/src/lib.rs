//! Types for the parts of Github's v3 API used to provision repositories
//! https://docs.github.com/en/rest

pub mod client;
mod common;
mod git;
mod pages;
mod protection;
mod repo;
mod user;

pub use client::Client;
pub use common::*;
pub use git::*;
pub use pages::*;
pub use protection::*;
pub use repo::*;
pub use user::*;
