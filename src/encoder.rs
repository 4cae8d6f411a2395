//! Frame to row buffer encoding.

use crate::frame_buffer::Rgb;
use crate::gamma::GammaTable;
use crate::layout::LedPosition;
use crate::protocol::DataLine;
use crate::row_buffer::{BITS_PER_CHANNEL, ChannelPlanes, RowSet};

/// Split three grayscale values into bit planes, MSB first, each color on
/// its data line's bit.
pub const fn pack_bit_planes(red: u16, green: u16, blue: u16) -> ChannelPlanes {
    let mut planes = [0u16; BITS_PER_CHANNEL];
    let mut plane = 0;
    while plane < BITS_PER_CHANNEL {
        let shift = BITS_PER_CHANNEL - 1 - plane;
        planes[plane] = (((red >> shift) & 1) << DataLine::Red.bit())
            | (((green >> shift) & 1) << DataLine::Green.bit())
            | (((blue >> shift) & 1) << DataLine::Blue.bit());
        plane += 1;
    }
    planes
}

/// Rewrite every row buffer in `rows` from a full frame.
///
/// Channels no LED maps to end up dark. Positions outside the grid are
/// skipped; the driver rejects such layouts before it ever encodes.
pub fn encode_frame<const LEDS: usize, const ROWS: usize, const COLS: usize>(
    colors: &[Rgb; LEDS],
    layout: &[LedPosition; LEDS],
    gamma: &GammaTable,
    rows: &mut RowSet<ROWS, COLS>,
) {
    for row in rows.iter_mut() {
        row.clear();
    }

    for (color, position) in colors.iter().zip(layout) {
        let Some(planes) = rows
            .get_mut(usize::from(position.row))
            .and_then(|row| row.channel_mut(usize::from(position.col)))
        else {
            continue;
        };
        *planes = pack_bit_planes(
            gamma.lookup(color.r),
            gamma.lookup(color.g),
            gamma.lookup(color.b),
        );
    }
}
