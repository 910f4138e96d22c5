use crate::compile::program::{MotionProgram, PartMotionData};
use crate::foundation::core::MAX_PARTS;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x6b1e_4d0f_93a2_c571;

/// Stable 128-bit identity of a motion program's encoded content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ProgramFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for ProgramFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint everything that reaches the encoded buffer or the executor uniforms.
///
/// Attachment behavior is not hashed: it never reaches the buffer.
pub fn fingerprint_program(program: &MotionProgram) -> ProgramFingerprint {
    let mut h = StableHasher::new();
    h.write_f32(program.speed);
    h.write_f32(program.amplitude_scale);
    write_entry(&mut h, Some(&program.whole_body));
    for slot in 1..=MAX_PARTS as u32 {
        write_entry(&mut h, program.part(slot));
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn finish(self) -> ProgramFingerprint {
        let v = self.inner.digest128();
        ProgramFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_entry(h: &mut StableHasher, entry: Option<&PartMotionData>) {
    match entry {
        None => h.write_bool(false),
        Some(d) => {
            h.write_bool(true);
            h.write_u8(d.primitive_id);
            h.write_bool(d.active);
            h.write_f32(d.phase);
            h.write_f32(d.start_time);
            h.write_f32(d.duration);
            for p in d.params {
                h.write_f32(p);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
