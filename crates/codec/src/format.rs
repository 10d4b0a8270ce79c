//! Group varint wire format.
//!
//! ```text
//! group := control_byte slot_bytes*
//! control_byte: bit7-6 = width(slot0)-1, bit5-4 = width(slot1)-1,
//!               bit3-2 = width(slot2)-1, bit1-0 = width(slot3)-1
//! slot_bytes(slotN): big-endian, length = width(slotN), width >= 1
//! ```
//!
//! A final group holding fewer than four values keeps its control byte as if
//! the missing slots were zero (width 1) and simply omits their bytes; the
//! decoder notices the short group by running out of input.

/// Slots per group.
pub const GROUP_LEN: usize = 4;

/// Largest width a single slot can declare.
pub const MAX_SLOT_WIDTH: usize = 4;

/// Control byte plus four full-width slots.
pub const MAX_GROUP_BYTES: usize = 1 + GROUP_LEN * MAX_SLOT_WIDTH;

const WIDTH_MASK: u8 = 0b11;

/// Bit offset of `slot`'s 2-bit field inside the control byte.
#[inline(always)]
const fn slot_shift(slot: usize) -> u32 {
    assert!(slot < GROUP_LEN, "slot index out of range");
    ((GROUP_LEN - 1 - slot) * 2) as u32
}

/// Fewest big-endian bytes needed for `x`, zero still takes one byte.
#[inline]
pub const fn minimal_width(x: u32) -> usize {
    match x {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    }
}

/// Width declared for `slot` by `control`, in `1..=4`. `slot` must be
/// below `GROUP_LEN`.
#[inline]
pub(crate) const fn slot_width(control: u8, slot: usize) -> usize {
    ((control >> slot_shift(slot)) & WIDTH_MASK) as usize + 1
}

/// Pack per-slot widths into a control byte.
#[inline]
pub fn control_byte(widths: [usize; GROUP_LEN]) -> u8 {
    widths
        .iter()
        .enumerate()
        .fold(0u8, |acc, (slot, &w)| {
            debug_assert!((1..=MAX_SLOT_WIDTH).contains(&w));
            acc | (((w - 1) as u8 & WIDTH_MASK) << slot_shift(slot))
        })
}

/// Write the low `width` bytes of `x` big-endian into `out`.
#[inline]
pub fn put_slot(x: u32, width: usize, out: &mut [u8]) {
    out[..width].copy_from_slice(&x.to_be_bytes()[MAX_SLOT_WIDTH - width..]);
}
