//! Board-agnostic core logic for the plant cabinet firmware
//!
//! This crate contains all recipe logic that does not depend on specific
//! hardware implementations:
//!
//! - Collaborator traits (wall clock, slot outputs)
//! - Playback cursor and elapsed-time resolution
//! - Recipe player for the control loop
//! - Day/night recipe generation
//! - Playback configuration types and persistence

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

mod fmt;

pub mod config;
pub mod playback;
pub mod recipe;
pub mod traits;

pub use verdant_protocol as protocol;
