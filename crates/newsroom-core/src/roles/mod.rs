//! Roles and their lifecycle.
//!
//! - [`role`]: `RoleIdentity`, the `Runnable` template
//! - [`worker`]: `Worker` and the `Investigate` strategy
//! - [`editor`]: `Editor`, the `Decompose` / `AssignTasks` strategies, `RoundRobin`
//! - [`newsroom`]: `Newsroom`, per-lead journal isolation

pub mod editor;
pub mod newsroom;
pub mod role;
pub mod worker;

pub use editor::{AssignTasks, Decompose, Editor, RoundRobin};
pub use newsroom::Newsroom;
pub use role::{RoleIdentity, Runnable};
pub use worker::{Investigate, Worker};
