use crate::foundation::core::{MAX_PARTS, PARAM_COUNT};
use crate::template::model::AttachmentBehavior;
use crate::template::primitive::Primitive;

/// One resolved primitive assignment, ready to pack into a buffer row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartMotionData {
    /// Primitive wire id.
    pub primitive_id: u8,
    /// Positional parameters, always exactly [`PARAM_COUNT`].
    pub params: [f32; PARAM_COUNT],
    /// Phase offset.
    pub phase: f32,
    /// Start time in seconds.
    pub start_time: f32,
    /// Duration in seconds; 0 loops indefinitely.
    pub duration: f32,
    /// Inactive entries encode as empty rows.
    pub active: bool,
    /// Attachment falloff for units bound to this part. Not part of the encoded row.
    #[serde(default)]
    pub attachment: AttachmentBehavior,
}

impl PartMotionData {
    /// Build an active assignment, padding or truncating `params` to [`PARAM_COUNT`].
    pub fn new(primitive: Primitive, params: &[f64]) -> Self {
        Self {
            primitive_id: primitive.id(),
            params: pack_params(params),
            phase: 0.0,
            start_time: 0.0,
            duration: 0.0,
            active: true,
            attachment: AttachmentBehavior::default(),
        }
    }

    /// Primitive for this entry, if the id is valid.
    pub fn primitive(&self) -> Option<Primitive> {
        Primitive::from_id(self.primitive_id)
    }

    /// Return `true` when the duration is 0 (indefinite loop).
    pub fn is_looping(&self) -> bool {
        self.duration == 0.0
    }
}

/// Pack resolved values positionally: extra values are dropped, missing ones are 0.
pub(crate) fn pack_params(values: &[f64]) -> [f32; PARAM_COUNT] {
    let mut out = [0.0f32; PARAM_COUNT];
    for (slot, v) in out.iter_mut().zip(values) {
        *slot = *v as f32;
    }
    out
}

/// Resolved whole-body and per-part motion plus global multipliers.
///
/// Part slots are `1..=MAX_PARTS`; slot 0 is reserved for the whole body and never stored here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionProgram {
    /// Motion applied to the object as a whole (row 0).
    pub whole_body: PartMotionData,
    #[serde(deserialize_with = "deserialize_slots")]
    parts: Vec<Option<PartMotionData>>,
    /// Global speed multiplier.
    pub speed: f32,
    /// Global amplitude multiplier.
    pub amplitude_scale: f32,
}

impl MotionProgram {
    /// Create a program with no part assignments.
    pub fn new(whole_body: PartMotionData, speed: f32, amplitude_scale: f32) -> Self {
        Self {
            whole_body,
            parts: vec![None; MAX_PARTS + 1],
            speed,
            amplitude_scale,
        }
    }

    /// Store `data` at `slot`, replacing any earlier entry.
    ///
    /// Returns `false` (and stores nothing) when `slot` is outside `1..=MAX_PARTS`.
    pub fn set_part(&mut self, slot: u32, data: PartMotionData) -> bool {
        let slot = slot as usize;
        if slot == 0 || slot > MAX_PARTS {
            return false;
        }
        match self.parts.get_mut(slot) {
            Some(entry) => {
                *entry = Some(data);
                true
            }
            None => false,
        }
    }

    /// Entry at `slot`, if assigned.
    pub fn part(&self, slot: u32) -> Option<&PartMotionData> {
        self.parts.get(slot as usize).and_then(Option::as_ref)
    }

    /// Assigned parts in slot order.
    pub fn parts(&self) -> impl Iterator<Item = (u32, &PartMotionData)> {
        self.parts
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.as_ref().map(|p| (slot as u32, p)))
    }

    /// Number of assigned part slots.
    pub fn part_count(&self) -> usize {
        self.parts.iter().filter(|p| p.is_some()).count()
    }
}

/// Read the slot table and pad it to `MAX_PARTS + 1` entries; longer tables are rejected.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<Vec<Option<PartMotionData>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut slots: Vec<Option<PartMotionData>> = serde::Deserialize::deserialize(deserializer)?;
    if slots.len() > MAX_PARTS + 1 {
        return Err(serde::de::Error::invalid_length(slots.len(), &"at most 33 part slots"));
    }
    slots.resize(MAX_PARTS + 1, None);
    Ok(slots)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/program.rs"]
mod tests;
