//! Recipe decoding
//!
//! Recipe layout (all integers little-endian):
//! ```text
//! ┌───────────┬──────────┬──────────────┬─────────┬──────────────┐
//! │ RECIPE ID │ EPOCH    │ SLOTS - 1    │ VERSION │ BLOCK COUNTS │
//! │ 4B        │ 4B (i32) │ 1B (0..=2)   │ 1B      │ 1B per slot  │
//! └───────────┴──────────┴──────────────┴─────────┴──────────────┘
//! ┌──────────────────────────────────┬──────────────────────────────┐
//! │ BLOCK HEADERS                    │ PERIOD RECORDS               │
//! │ (inner, outer) per block,        │ inner records per block,     │
//! │ every active slot in index order │ every active slot in order   │
//! └──────────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Slots 0 and 1 are channel slots with 14-byte period records, slot 2 is
//! the appliance slot with 4-byte records. All headers precede all records,
//! so the header pass must finish before the first record can be located.

use core::ops::Range;

use heapless::Vec;

use crate::reader::ByteReader;

/// Number of slots in every recipe
pub const SLOT_COUNT: usize = 3;

/// Index of the appliance slot
pub const APPLIANCE_SLOT: usize = 2;

/// Fixed header size before the block counts
pub const HEADER_LEN: usize = 10;

/// Period record size for channel slots
pub const CHANNEL_RECORD_LEN: usize = 14;

/// Period record size for the appliance slot
pub const APPLIANCE_RECORD_LEN: usize = 4;

/// Maximum blocks per slot (the count is a single byte)
pub const MAX_BLOCKS: usize = u8::MAX as usize;

/// Format version written by current encoders
pub const RECIPE_VERSION: u8 = 7;

/// Errors that can occur while decoding a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Buffer ends before a field that must be read
    Truncated {
        /// Offset of the field
        offset: usize,
        /// Bytes the field needs
        needed: usize,
    },
    /// A period has zero duration
    InvalidDuration { slot: u8, block: u8, period: u8 },
    /// Slot count byte is larger than 2
    InvalidSlotCount(u8),
    /// A block has no periods or no repetitions
    EmptyBlock { slot: u8, block: u8 },
}

/// Positional role of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotRole {
    /// Grow layer with light levels and targets
    Channel,
    /// Appliance with duration only
    Appliance,
}

impl SlotRole {
    /// Role for a slot index
    pub const fn for_index(index: usize) -> Self {
        if index == APPLIANCE_SLOT {
            SlotRole::Appliance
        } else {
            SlotRole::Channel
        }
    }

    /// Size of one period record for this role
    pub const fn record_len(self) -> usize {
        match self {
            SlotRole::Channel => CHANNEL_RECORD_LEN,
            SlotRole::Appliance => APPLIANCE_RECORD_LEN,
        }
    }
}

/// Light levels and targets carried by a channel period
///
/// The values are opaque to playback; the stock generator uses
/// `target_a` for temperature (°C × 100), `target_b` for the water target
/// and `target_c` for the water delay in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelPayload {
    /// Per-channel actuator levels
    pub levels: [u8; 4],
    pub target_a: u16,
    pub target_b: u16,
    pub target_c: u16,
}

/// Payload of a period, by slot role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodPayload {
    Channel(ChannelPayload),
    Appliance,
}

impl PeriodPayload {
    /// Role this payload belongs to
    pub const fn role(&self) -> SlotRole {
        match self {
            PeriodPayload::Channel(_) => SlotRole::Channel,
            PeriodPayload::Appliance => SlotRole::Appliance,
        }
    }
}

/// A single period: the atomic unit of recipe time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Period {
    /// Duration in seconds
    pub duration_s: u32,
    pub payload: PeriodPayload,
}

impl Period {
    /// Create a channel period
    pub const fn channel(duration_s: u32, payload: ChannelPayload) -> Self {
        Self {
            duration_s,
            payload: PeriodPayload::Channel(payload),
        }
    }

    /// Create an appliance period
    pub const fn appliance(duration_s: u32) -> Self {
        Self {
            duration_s,
            payload: PeriodPayload::Appliance,
        }
    }

    /// Channel payload, if this is a channel period
    pub fn channel_payload(&self) -> Option<&ChannelPayload> {
        match &self.payload {
            PeriodPayload::Channel(p) => Some(p),
            PeriodPayload::Appliance => None,
        }
    }

    /// Parse one record of the given role
    fn parse(role: SlotRole, reader: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        let duration_s = reader.read_u32()?;
        let payload = match role {
            SlotRole::Channel => PeriodPayload::Channel(ChannelPayload {
                levels: reader.read_array()?,
                target_a: reader.read_u16()?,
                target_b: reader.read_u16()?,
                target_c: reader.read_u16()?,
            }),
            SlotRole::Appliance => PeriodPayload::Appliance,
        };
        Ok(Self {
            duration_s,
            payload,
        })
    }

    /// Write this period as a record
    ///
    /// `out` must be exactly `payload.role().record_len()` bytes.
    pub(crate) fn write(&self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.duration_s.to_le_bytes());
        if let PeriodPayload::Channel(p) = &self.payload {
            out[4..8].copy_from_slice(&p.levels);
            out[8..10].copy_from_slice(&p.target_a.to_le_bytes());
            out[10..12].copy_from_slice(&p.target_b.to_le_bytes());
            out[12..14].copy_from_slice(&p.target_c.to_le_bytes());
        }
    }
}

/// A compressed repeat unit: `inner_count` periods played `outer_count` times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Block {
    inner_count: u8,
    outer_count: u8,
    /// Absolute offset of the first period record.
    /// Counts are single bytes, so recipes stay well below 4 GiB.
    start: u32,
}

impl Block {
    /// Distinct periods in one repetition
    pub const fn inner_count(&self) -> u8 {
        self.inner_count
    }

    /// Repetitions before playback moves to the next block
    pub const fn outer_count(&self) -> u8 {
        self.outer_count
    }

    /// Periods played across all repetitions
    pub const fn played_periods(&self) -> u32 {
        self.inner_count as u32 * self.outer_count as u32
    }

    /// Absolute byte span of this block's records
    pub fn record_span(&self, role: SlotRole) -> Range<usize> {
        let start = self.start as usize;
        start..start + role.record_len() * self.inner_count as usize
    }
}

/// One positional playback slot
#[derive(Debug, Clone)]
pub struct Slot {
    role: SlotRole,
    blocks: Vec<Block, MAX_BLOCKS>,
}

impl Slot {
    fn new(role: SlotRole) -> Self {
        Self {
            role,
            blocks: Vec::new(),
        }
    }

    pub fn role(&self) -> SlotRole {
        self.role
    }

    /// True only for the appliance slot
    pub fn is_appliance(&self) -> bool {
        self.role == SlotRole::Appliance
    }

    /// Number of blocks (0 = inactive)
    pub fn block_count(&self) -> u8 {
        self.blocks.len() as u8
    }

    /// Check if this slot plays anything
    pub fn has_periods(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Periods played before the slot wraps back to its first block
    pub fn cycle_periods(&self) -> u32 {
        self.blocks.iter().map(Block::played_periods).sum()
    }
}

/// Decoded recipe
///
/// A read-only view over the recipe bytes with every block's record span
/// resolved up front. Decoding a new buffer is the only way to change it.
#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    data: &'a [u8],
    recipe_id: u32,
    epoch_s: i32,
    version: u8,
    slots: [Slot; SLOT_COUNT],
    len: usize,
}

impl<'a> Schedule<'a> {
    /// Decode a recipe buffer
    ///
    /// Fails if any field lies beyond the end of `data`, if a period has
    /// zero duration, or if the header is structurally invalid. No partial
    /// schedule is ever returned.
    pub fn decode(data: &'a [u8]) -> Result<Self, FormatError> {
        let result = Self::decode_inner(data);
        match &result {
            Ok(schedule) => debug!(
                "recipe {} decoded: epoch {}, blocks {}/{}/{}",
                schedule.recipe_id,
                schedule.epoch_s,
                schedule.slots[0].block_count(),
                schedule.slots[1].block_count(),
                schedule.slots[2].block_count(),
            ),
            Err(e) => warn!("recipe decode failed: {:?}", e),
        }
        result
    }

    fn decode_inner(data: &'a [u8]) -> Result<Self, FormatError> {
        let mut reader = ByteReader::new(data);

        let recipe_id = reader.read_u32()?;
        let epoch_s = reader.read_i32()?;
        let slot_count_minus_one = reader.read_u8()?;
        let version = reader.read_u8()?;

        if slot_count_minus_one as usize >= SLOT_COUNT {
            return Err(FormatError::InvalidSlotCount(slot_count_minus_one));
        }

        // Slots without a count byte are inactive
        let mut block_counts = [0u8; SLOT_COUNT];
        for count in block_counts
            .iter_mut()
            .take(slot_count_minus_one as usize + 1)
        {
            *count = reader.read_u8()?;
        }

        let mut slots = [
            Slot::new(SlotRole::for_index(0)),
            Slot::new(SlotRole::for_index(1)),
            Slot::new(SlotRole::for_index(2)),
        ];

        // Header pass: every (inner, outer) pair of every active slot
        for (slot_index, (slot, &count)) in slots.iter_mut().zip(&block_counts).enumerate() {
            for block_index in 0..count {
                let inner_count = reader.read_u8()?;
                let outer_count = reader.read_u8()?;
                if inner_count == 0 || outer_count == 0 {
                    return Err(FormatError::EmptyBlock {
                        slot: slot_index as u8,
                        block: block_index,
                    });
                }
                // Capacity covers every value of the u8 count
                let _ = slot.blocks.push(Block {
                    inner_count,
                    outer_count,
                    start: 0,
                });
            }
        }

        // Record pass: resolve spans and reject zero durations
        for (slot_index, slot) in slots.iter_mut().enumerate() {
            let role = slot.role;
            for (block_index, block) in slot.blocks.iter_mut().enumerate() {
                block.start = reader.offset() as u32;
                for period_index in 0..block.inner_count {
                    let period = Period::parse(role, &mut reader)?;
                    if period.duration_s == 0 {
                        return Err(FormatError::InvalidDuration {
                            slot: slot_index as u8,
                            block: block_index as u8,
                            period: period_index,
                        });
                    }
                }
            }
        }

        if reader.remaining() > 0 {
            trace!("ignoring {} trailing recipe bytes", reader.remaining());
        }

        Ok(Self {
            data,
            recipe_id,
            epoch_s,
            version,
            slots,
            len: reader.offset(),
        })
    }

    /// Opaque recipe identifier
    pub fn recipe_id(&self) -> u32 {
        self.recipe_id
    }

    /// Cycle reference start (Unix seconds)
    pub fn epoch_s(&self) -> i32 {
        self.epoch_s
    }

    /// Format version byte (not interpreted)
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Bytes consumed by the recipe; anything after is ignored
    pub fn encoded_len(&self) -> usize {
        self.len
    }

    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Check if a slot has any blocks
    pub fn has_periods(&self, slot: usize) -> bool {
        self.slot(slot).is_some_and(Slot::has_periods)
    }

    /// Look up a period by position
    ///
    /// Returns `None` if any index is out of range.
    pub fn period(&self, slot: usize, block: usize, inner: usize) -> Option<Period> {
        let slot = self.slot(slot)?;
        let block = slot.block(block)?;
        if inner >= block.inner_count as usize {
            return None;
        }
        let offset = block.start as usize + inner * slot.role.record_len();
        Period::parse(slot.role, &mut ByteReader::at(self.data, offset)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::{RECIPE_A, RECIPE_B, RECIPE_GENERATED};

    #[test]
    fn test_decode_generated_header() {
        let schedule = Schedule::decode(&RECIPE_GENERATED).unwrap();

        assert_eq!(schedule.recipe_id(), 0x64d6_7b86);
        assert_eq!(schedule.epoch_s(), 0x64cc_3f80);
        assert_eq!(schedule.version(), RECIPE_VERSION);
        assert_eq!(schedule.slots()[0].block_count(), 2);
        assert_eq!(schedule.slots()[1].block_count(), 2);
        assert_eq!(schedule.slots()[2].block_count(), 0);
        assert!(schedule.has_periods(0));
        assert!(schedule.has_periods(1));
        assert!(!schedule.has_periods(2));
        assert!(!schedule.has_periods(3));
        assert_eq!(schedule.encoded_len(), RECIPE_GENERATED.len());
    }

    #[test]
    fn test_decode_generated_blocks() {
        let schedule = Schedule::decode(&RECIPE_GENERATED).unwrap();
        let slot = &schedule.slots()[0];

        assert_eq!(slot.blocks()[0].inner_count(), 1);
        assert_eq!(slot.blocks()[0].outer_count(), 6);
        assert_eq!(slot.blocks()[1].inner_count(), 2);
        assert_eq!(slot.blocks()[1].outer_count(), 100);
        assert_eq!(slot.cycle_periods(), 6 + 200);

        // Headers end at 21; slot 0 holds three records
        assert_eq!(slot.blocks()[0].record_span(SlotRole::Channel), 21..35);
        assert_eq!(slot.blocks()[1].record_span(SlotRole::Channel), 35..63);
        let slot1 = &schedule.slots()[1];
        assert_eq!(slot1.blocks()[0].record_span(SlotRole::Channel), 63..77);
    }

    #[test]
    fn test_decode_generated_periods() {
        let schedule = Schedule::decode(&RECIPE_GENERATED).unwrap();

        let skip = schedule.period(0, 0, 0).unwrap();
        assert_eq!(skip.duration_s, 86400);
        assert_eq!(
            skip.channel_payload(),
            Some(&ChannelPayload {
                levels: [0, 0, 0, 0],
                target_a: 2300,
                target_b: 70,
                target_c: 0xffff,
            })
        );

        let day = schedule.period(0, 1, 0).unwrap();
        assert_eq!(day.duration_s, 15 * 3600);
        assert_eq!(day.channel_payload().unwrap().levels, [1, 2, 3, 4]);
        assert_eq!(day.channel_payload().unwrap().target_c, 8 * 3600);

        let night = schedule.period(1, 1, 1).unwrap();
        assert_eq!(night.duration_s, 9 * 3600);
        assert_eq!(night.channel_payload().unwrap().target_a, 2000);

        assert!(schedule.period(0, 1, 2).is_none());
        assert!(schedule.period(0, 2, 0).is_none());
        assert!(schedule.period(2, 0, 0).is_none());
    }

    #[test]
    fn test_decode_captured_recipes() {
        let a = Schedule::decode(&RECIPE_A).unwrap();
        assert_eq!(a.slots()[0].block_count(), 2);
        assert_eq!(a.slots()[1].block_count(), 1);
        assert_eq!(a.slots()[0].blocks()[0].outer_count(), 94);
        assert_eq!(a.slots()[1].blocks()[0].outer_count(), 186);
        assert_eq!(a.period(1, 0, 1).unwrap().duration_s, 30600);

        let b = Schedule::decode(&RECIPE_B).unwrap();
        assert_eq!(b.slots()[0].block_count(), 1);
        assert_eq!(b.slots()[1].block_count(), 2);
        assert_eq!(b.period(0, 0, 0).unwrap().duration_s, 55800);
        assert_eq!(b.period(1, 0, 0).unwrap().duration_s, 86400);
    }

    #[test]
    fn test_truncated_everywhere() {
        // Every strict prefix of a valid recipe must fail cleanly
        for len in 0..RECIPE_GENERATED.len() {
            let result = Schedule::decode(&RECIPE_GENERATED[..len]);
            assert!(
                matches!(result, Err(FormatError::Truncated { .. })),
                "prefix of {} bytes: {:?}",
                len,
                result.map(|s| s.recipe_id())
            );
        }
    }

    #[test]
    fn test_truncated_header_offset() {
        let result = Schedule::decode(&RECIPE_GENERATED[..9]);
        assert_eq!(
            result.map(|s| s.recipe_id()),
            Err(FormatError::Truncated {
                offset: 9,
                needed: 1
            })
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = [0u8; 120];
        data[..RECIPE_GENERATED.len()].copy_from_slice(&RECIPE_GENERATED);
        let schedule = Schedule::decode(&data).unwrap();
        assert_eq!(schedule.encoded_len(), RECIPE_GENERATED.len());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut data = RECIPE_GENERATED;
        // Slot 1 block 1 (day period) starts at 77
        data[77..81].copy_from_slice(&[0, 0, 0, 0]);
        let result = Schedule::decode(&data).map(|s| s.recipe_id());
        assert_eq!(
            result,
            Err(FormatError::InvalidDuration {
                slot: 1,
                block: 1,
                period: 0
            })
        );
    }

    #[test]
    fn test_empty_block_rejected() {
        let mut data = RECIPE_GENERATED;
        data[13] = 0; // slot 0 block 0 inner count
        assert_eq!(
            Schedule::decode(&data).map(|s| s.recipe_id()),
            Err(FormatError::EmptyBlock { slot: 0, block: 0 })
        );

        let mut data = RECIPE_GENERATED;
        data[20] = 0; // slot 1 block 1 outer count
        assert_eq!(
            Schedule::decode(&data).map(|s| s.recipe_id()),
            Err(FormatError::EmptyBlock { slot: 1, block: 1 })
        );
    }

    #[test]
    fn test_invalid_slot_count() {
        let mut data = RECIPE_GENERATED;
        data[8] = 3;
        assert_eq!(
            Schedule::decode(&data).map(|s| s.recipe_id()),
            Err(FormatError::InvalidSlotCount(3))
        );
    }

    #[test]
    fn test_short_slot_list() {
        // One count byte: only slot 0 is described
        let data = [
            1, 0, 0, 0, // id
            0, 0, 0, 0, // epoch
            0, 7, // one slot, version
            1, // slot 0 has one block
            1, 2, // inner 1, outer 2
            60, 0, 0, 0, 9, 9, 9, 9, 1, 0, 2, 0, 3, 0,
        ];
        let schedule = Schedule::decode(&data).unwrap();
        assert!(schedule.has_periods(0));
        assert!(!schedule.has_periods(1));
        assert!(!schedule.has_periods(2));
        assert_eq!(schedule.period(0, 0, 0).unwrap().duration_s, 60);
    }

    #[test]
    fn test_appliance_records() {
        let data = [
            2, 0, 0, 0, // id
            0, 0, 0, 0, // epoch
            2, 7, // three slots
            0, 0, 1, // only the appliance is active
            2, 3, // inner 2, outer 3
            10, 0, 0, 0, // 10 s
            20, 0, 0, 0, // 20 s
        ];
        let schedule = Schedule::decode(&data).unwrap();
        let slot = schedule.slot(APPLIANCE_SLOT).unwrap();

        assert!(slot.is_appliance());
        assert_eq!(slot.blocks()[0].record_span(SlotRole::Appliance), 15..23);
        assert_eq!(schedule.period(2, 0, 1), Some(Period::appliance(20)));
        assert_eq!(schedule.encoded_len(), data.len());
    }

    #[test]
    fn test_roles_are_positional() {
        assert_eq!(SlotRole::for_index(0), SlotRole::Channel);
        assert_eq!(SlotRole::for_index(1), SlotRole::Channel);
        assert_eq!(SlotRole::for_index(2), SlotRole::Appliance);
        assert_eq!(SlotRole::Channel.record_len(), 14);
        assert_eq!(SlotRole::Appliance.record_len(), 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
                if let Ok(schedule) = Schedule::decode(&data) {
                    prop_assert!(schedule.encoded_len() <= data.len());
                    for (index, slot) in schedule.slots().iter().enumerate() {
                        prop_assert_eq!(schedule.has_periods(index), slot.block_count() > 0);
                        for (b, block) in slot.blocks().iter().enumerate() {
                            prop_assert!(block.record_span(slot.role()).end <= data.len());
                            for p in 0..block.inner_count() as usize {
                                let period = schedule.period(index, b, p);
                                prop_assert!(period.is_some_and(|p| p.duration_s > 0));
                            }
                        }
                    }
                }
            }
        }
    }
}
