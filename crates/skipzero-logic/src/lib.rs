//! Pure logic for Skip Zero Damage.
//!
//! This crate contains everything the add-on decides on its own, independent
//! of the host that dispatches damage events, stores files, or checks
//! permissions. Functions take plain data and return results, making them
//! unit-testable without a running host.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`access`] | Report command authorization (console / admin / permission) |
//! | [`config`] | Typed plugin configuration and its default document |
//! | [`constants`] | Plugin info, permission and command names, damage type IDs |
//! | [`damage`] | Damage classification (allow / suppress) and running statistics |
//! | [`document`] | Ordered configuration documents and default reconciliation |
//! | [`report`] | Plain-text damage-block report |

pub mod access;
pub mod config;
pub mod constants;
pub mod damage;
pub mod document;
pub mod report;
