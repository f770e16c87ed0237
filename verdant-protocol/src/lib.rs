//! Verdant grow recipe format
//!
//! This crate defines the binary recipe a plant cabinet receives from the
//! cloud: a recipe id, a cycle epoch and up to three slots of
//! run-length-compressed periods. It decodes the format into a
//! bounds-checked [`Schedule`] view and encodes owned [`RecipeSpec`]s back
//! into bytes.
//!
//! # Format Overview
//!
//! ```text
//! ┌────────┬───────┬───────┬──────────────┬───────────────┬─────────────┐
//! │ HEADER │ COUNT │ VER   │ BLOCK COUNTS │ BLOCK HEADERS │ RECORDS     │
//! │ 8B     │ 1B    │ 1B    │ 1B per slot  │ 2B per block  │ 14B / 4B    │
//! └────────┴───────┴───────┴──────────────┴───────────────┴─────────────┘
//! ```
//!
//! The format carries no checksum; decoding only guarantees that every
//! field lies inside the buffer and every period has a non-zero duration.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

mod fmt;

pub mod encode;
pub mod reader;
pub mod samples;
pub mod schedule;

pub use encode::{BlockSpec, EncodeError, RecipeSpec, SlotSpec, MAX_BLOCK_PERIODS, MAX_SPEC_BLOCKS};
pub use reader::ByteReader;
pub use schedule::{
    Block, ChannelPayload, FormatError, Period, PeriodPayload, Schedule, Slot, SlotRole,
    APPLIANCE_SLOT, RECIPE_VERSION, SLOT_COUNT,
};
