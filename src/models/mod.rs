// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod story;
pub mod user;

pub use story::Story;
pub use user::User;
