//! Compact cell encoding for the persisted visited set.
//!
//! A cell packs into one `u32`: the x coordinate's two's-complement 16 bits in
//! the high half, y in the low half. Only the signed 16-bit range packs.

use crate::error::{MemoryError, Result};
use crate::types::Cell;

/// Packs `cell` into a single 32-bit integer.
pub fn pack_cell(cell: Cell) -> Result<u32> {
    let out_of_range = || MemoryError::CellOutOfRange {
        x: cell.x,
        y: cell.y,
    };
    let x = i16::try_from(cell.x).map_err(|_| out_of_range())?;
    let y = i16::try_from(cell.y).map_err(|_| out_of_range())?;
    Ok(((x as u16 as u32) << 16) | (y as u16 as u32))
}

/// Inverse of [`pack_cell`].
pub fn unpack_cell(packed: u32) -> Cell {
    let x = (packed >> 16) as u16 as i16;
    let y = (packed & 0xFFFF) as u16 as i16;
    Cell::new(i32::from(x), i32::from(y))
}
