//! Bit-planed serial buffers, one per LED row.
//!
//! A row holds `COLS` channel groups of [`BITS_PER_CHANNEL`] words. Word `p`
//! of group `c` is what the data lines carry on the `p`-th clock (MSB first)
//! of channel `c`; red, green and blue ride on fixed bits of the same word so
//! the three chip chains are fed in parallel.

use crate::protocol::DataLine;

/// Grayscale depth the chips are clocked with.
pub const BITS_PER_CHANNEL: usize = 16;

/// Bit planes of one channel, MSB first.
pub type ChannelPlanes = [u16; BITS_PER_CHANNEL];

/// Serial data for one physical row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBuffer<const COLS: usize> {
    channels: [ChannelPlanes; COLS],
}

/// One buffer per row.
pub type RowSet<const ROWS: usize, const COLS: usize> = [RowBuffer<COLS>; ROWS];

impl<const COLS: usize> RowBuffer<COLS> {
    /// All channels dark.
    pub const fn new() -> Self {
        Self {
            channels: [[0; BITS_PER_CHANNEL]; COLS],
        }
    }

    pub const fn channels(&self) -> &[ChannelPlanes; COLS] {
        &self.channels
    }

    pub fn channel(&self, col: usize) -> Option<&ChannelPlanes> {
        self.channels.get(col)
    }

    pub(crate) fn channel_mut(&mut self, col: usize) -> Option<&mut ChannelPlanes> {
        self.channels.get_mut(col)
    }

    /// Word clocked out for `col` at bit plane `plane` (0 = MSB).
    pub fn slot(&self, col: usize, plane: usize) -> Option<u16> {
        self.channel(col)?.get(plane).copied()
    }

    /// All words in storage order (channel 0 first).
    pub fn words(&self) -> &[u16] {
        self.channels.as_flattened()
    }

    /// Read back the grayscale value encoded for one color of a channel.
    pub fn grayscale(&self, col: usize, line: DataLine) -> Option<u16> {
        let planes = self.channel(col)?;
        Some(planes.iter().fold(0u16, |value, &word| {
            (value << 1) | ((word >> line.bit()) & 1)
        }))
    }

    pub fn clear(&mut self) {
        self.channels = [[0; BITS_PER_CHANNEL]; COLS];
    }
}

impl<const COLS: usize> Default for RowBuffer<COLS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Backing storage for the three row sets the driver rotates through.
///
/// The encoder fills a back bank, `flush` publishes it, and the refresh
/// scheduler adopts the published bank at the start of a scan cycle. The
/// banks only ever change hands by swapping references.
#[derive(Debug)]
pub struct RowBanks<const ROWS: usize, const COLS: usize> {
    banks: [RowSet<ROWS, COLS>; 3],
}

impl<const ROWS: usize, const COLS: usize> RowBanks<ROWS, COLS> {
    /// All banks all-off.
    pub const fn new() -> Self {
        Self {
            banks: [[RowBuffer::new(); ROWS]; 3],
        }
    }

    /// Reset every bank to all-off.
    pub fn clear(&mut self) {
        for row in self.banks.iter_mut().flatten() {
            row.clear();
        }
    }

    /// Hand out the back, published and active banks.
    pub(crate) fn split(
        &mut self,
    ) -> (
        &mut RowSet<ROWS, COLS>,
        &mut RowSet<ROWS, COLS>,
        &mut RowSet<ROWS, COLS>,
    ) {
        let [back, published, active] = &mut self.banks;
        (back, published, active)
    }
}

impl<const ROWS: usize, const COLS: usize> Default for RowBanks<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}
