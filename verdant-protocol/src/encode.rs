//! Recipe encoding
//!
//! Builds the binary recipe from an owned description. The output always
//! uses three slots and [`RECIPE_VERSION`], and anything accepted here is
//! accepted by [`Schedule::decode`](crate::Schedule::decode).

use heapless::Vec;

use crate::schedule::{Period, SlotRole, HEADER_LEN, RECIPE_VERSION, SLOT_COUNT};

/// Maximum blocks per slot in an owned recipe
pub const MAX_SPEC_BLOCKS: usize = 8;

/// Maximum distinct periods per block in an owned recipe
pub const MAX_BLOCK_PERIODS: usize = 8;

/// Errors that can occur while building or encoding a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer is smaller than the encoded recipe
    BufferTooSmall,
    /// Slot already holds [`MAX_SPEC_BLOCKS`] blocks
    TooManyBlocks,
    /// Block already holds [`MAX_BLOCK_PERIODS`] periods
    TooManyPeriods,
    /// Period payload does not match the slot role
    PayloadMismatch { slot: u8 },
    /// Block has no periods or a zero repeat count
    EmptyBlock { slot: u8, block: u8 },
    /// Period has zero duration
    InvalidDuration { slot: u8, block: u8, period: u8 },
}

/// A block to encode: `periods` played `repeat` times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub periods: Vec<Period, MAX_BLOCK_PERIODS>,
    pub repeat: u8,
}

impl BlockSpec {
    /// Create an empty block
    pub fn new(repeat: u8) -> Self {
        Self {
            periods: Vec::new(),
            repeat,
        }
    }

    /// Create a block from a list of periods
    pub fn from_periods(periods: &[Period], repeat: u8) -> Result<Self, EncodeError> {
        let mut block = Self::new(repeat);
        for period in periods {
            block.push(*period)?;
        }
        Ok(block)
    }

    /// Append a period
    pub fn push(&mut self, period: Period) -> Result<(), EncodeError> {
        self.periods
            .push(period)
            .map_err(|_| EncodeError::TooManyPeriods)
    }
}

/// Blocks of one slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotSpec {
    pub blocks: Vec<BlockSpec, MAX_SPEC_BLOCKS>,
}

impl SlotSpec {
    /// Create an inactive slot
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Append a block
    pub fn push(&mut self, block: BlockSpec) -> Result<(), EncodeError> {
        self.blocks
            .push(block)
            .map_err(|_| EncodeError::TooManyBlocks)
    }

    fn record_count(&self) -> usize {
        self.blocks.iter().map(|b| b.periods.len()).sum()
    }
}

/// Owned recipe description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSpec {
    pub recipe_id: u32,
    pub epoch_s: i32,
    pub slots: [SlotSpec; SLOT_COUNT],
}

impl RecipeSpec {
    /// Create a recipe with every slot inactive
    pub fn new(recipe_id: u32, epoch_s: i32) -> Self {
        Self {
            recipe_id,
            epoch_s,
            slots: Default::default(),
        }
    }

    /// Exact size of the encoded recipe
    pub fn encoded_len(&self) -> usize {
        let headers: usize = self.slots.iter().map(|s| s.blocks.len() * 2).sum();
        let records: usize = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, s)| s.record_count() * SlotRole::for_index(i).record_len())
            .sum();
        HEADER_LEN + SLOT_COUNT + headers + records
    }

    /// Check that the decoder will accept this recipe
    pub fn validate(&self) -> Result<(), EncodeError> {
        for (slot_index, slot) in self.slots.iter().enumerate() {
            let role = SlotRole::for_index(slot_index);
            for (block_index, block) in slot.blocks.iter().enumerate() {
                if block.periods.is_empty() || block.repeat == 0 {
                    return Err(EncodeError::EmptyBlock {
                        slot: slot_index as u8,
                        block: block_index as u8,
                    });
                }
                for (period_index, period) in block.periods.iter().enumerate() {
                    if period.payload.role() != role {
                        return Err(EncodeError::PayloadMismatch {
                            slot: slot_index as u8,
                        });
                    }
                    if period.duration_s == 0 {
                        return Err(EncodeError::InvalidDuration {
                            slot: slot_index as u8,
                            block: block_index as u8,
                            period: period_index as u8,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Encode into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        self.validate()?;

        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(EncodeError::BufferTooSmall);
        }

        buffer[0..4].copy_from_slice(&self.recipe_id.to_le_bytes());
        buffer[4..8].copy_from_slice(&self.epoch_s.to_le_bytes());
        buffer[8] = (SLOT_COUNT - 1) as u8;
        buffer[9] = RECIPE_VERSION;

        let mut pos = HEADER_LEN;
        for slot in &self.slots {
            buffer[pos] = slot.blocks.len() as u8;
            pos += 1;
        }

        for block in self.slots.iter().flat_map(|s| s.blocks.iter()) {
            buffer[pos] = block.periods.len() as u8;
            buffer[pos + 1] = block.repeat;
            pos += 2;
        }

        for (slot_index, slot) in self.slots.iter().enumerate() {
            let record_len = SlotRole::for_index(slot_index).record_len();
            for period in slot.blocks.iter().flat_map(|b| b.periods.iter()) {
                period.write(&mut buffer[pos..pos + record_len]);
                pos += record_len;
            }
        }

        debug!("encoded recipe {} ({} bytes)", self.recipe_id, pos);
        Ok(pos)
    }

    /// Encode into a heapless Vec
    pub fn encode_to_vec<const N: usize>(&self) -> Result<Vec<u8, N>, EncodeError> {
        let mut vec = Vec::new();
        vec.resize_default(self.encoded_len())
            .map_err(|_| EncodeError::BufferTooSmall)?;
        let len = self.encode(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }
}
