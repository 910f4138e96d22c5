use crate::compile::program::{MotionProgram, PartMotionData};
use crate::foundation::core::{MAX_PARTS, PARAM_COUNT};

/// Rows in an encoded program: whole body plus one per part slot.
pub const ROW_COUNT: usize = MAX_PARTS + 1;
/// Floats per row: 4 texels of 4 channels.
pub const FLOATS_PER_ROW: usize = 16;
/// Total floats in an encoded program buffer.
pub const BUFFER_LEN: usize = ROW_COUNT * FLOATS_PER_ROW;
/// Primitive id written to rows with no active assignment.
pub const INACTIVE_PRIMITIVE: f32 = -1.0;

const HEADER_LEN: usize = FLOATS_PER_ROW - PARAM_COUNT;

/// Write one row: `[primitiveId, phase, startTime, duration, p0..p11]`.
///
/// `row` must be exactly [`FLOATS_PER_ROW`] long. Inactive data writes an empty row.
pub fn encode_row(row: &mut [f32], data: Option<&PartMotionData>) {
    debug_assert_eq!(row.len(), FLOATS_PER_ROW);
    match data {
        Some(d) if d.active => {
            row[0] = f32::from(d.primitive_id);
            row[1] = d.phase;
            row[2] = d.start_time;
            row[3] = d.duration;
            row[HEADER_LEN..].copy_from_slice(&d.params);
        }
        _ => {
            row.fill(0.0);
            row[0] = INACTIVE_PRIMITIVE;
        }
    }
}

/// Mark every row of `buf` inactive.
pub fn fill_inactive(buf: &mut [f32]) {
    for row in buf.chunks_exact_mut(FLOATS_PER_ROW) {
        encode_row(row, None);
    }
}

/// Encode `program` into `buf` (row 0 whole body, rows 1..=32 part slots).
///
/// `buf` is resized to [`BUFFER_LEN`] when needed; every row is overwritten.
pub fn encode_program(program: &MotionProgram, buf: &mut Vec<f32>) {
    buf.resize(BUFFER_LEN, 0.0);
    for (slot, row) in buf.chunks_exact_mut(FLOATS_PER_ROW).enumerate() {
        let data = if slot == 0 {
            Some(&program.whole_body)
        } else {
            program.part(slot as u32)
        };
        encode_row(row, data);
    }
}

/// Encode `program` into a fresh buffer.
pub fn encode_to_vec(program: &MotionProgram) -> Vec<f32> {
    let mut buf = Vec::with_capacity(BUFFER_LEN);
    encode_program(program, &mut buf);
    buf
}

#[cfg(test)]
#[path = "../../tests/unit/encode/layout.rs"]
mod tests;
