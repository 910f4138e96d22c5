use crate::compile::fingerprint::{ProgramFingerprint, fingerprint_program};
use crate::compile::program::MotionProgram;
use crate::encode::clock::{Clock, SystemClock};
use crate::encode::layout::{BUFFER_LEN, encode_program, fill_inactive};

/// Channels per slot in the part-attribute buffer: `[partId, weight, 0, 0]`.
pub const ATTRIBUTE_CHANNELS: usize = 4;

/// Crossfade state of a [`MotionEncoder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderState {
    /// No program is visible.
    #[default]
    Idle,
    /// The primary buffer holds the visible program.
    Active,
    /// Fading from the primary buffer toward the secondary buffer.
    Blending,
}

/// Global multipliers of an encoded program, passed to the executor alongside the buffer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EncodedGlobals {
    /// Speed multiplier.
    pub speed: f32,
    /// Amplitude multiplier.
    pub amplitude_scale: f32,
}

impl EncodedGlobals {
    fn of(program: &MotionProgram) -> Self {
        Self {
            speed: program.speed,
            amplitude_scale: program.amplitude_scale,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Blend {
    start_ms: f64,
    duration_ms: f64,
}

/// Owns the primary/secondary program buffers and drives crossfades between them.
///
/// The host calls [`MotionEncoder::tick`] once per frame and reads the buffers through
/// [`MotionEncoder::primary`] and [`MotionEncoder::secondary`] between ticks.
#[derive(Debug)]
pub struct MotionEncoder<C: Clock = SystemClock> {
    clock: C,
    primary: Vec<f32>,
    secondary: Vec<f32>,
    attributes: Vec<f32>,
    state: EncoderState,
    progress: f32,
    blend: Option<Blend>,
    visible: Option<(ProgramFingerprint, EncodedGlobals)>,
    pending: Option<(ProgramFingerprint, EncodedGlobals)>,
}

impl MotionEncoder<SystemClock> {
    /// Encoder driven by the monotonic system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for MotionEncoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MotionEncoder<C> {
    /// Idle encoder with both buffers holding inactive rows.
    pub fn with_clock(clock: C) -> Self {
        let mut primary = vec![0.0; BUFFER_LEN];
        fill_inactive(&mut primary);
        let secondary = primary.clone();
        Self {
            clock,
            primary,
            secondary,
            attributes: Vec::new(),
            state: EncoderState::Idle,
            progress: 0.0,
            blend: None,
            visible: None,
            pending: None,
        }
    }

    /// Borrow the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Show `program` immediately, abandoning any crossfade in progress.
    pub fn set_program(&mut self, program: &MotionProgram) {
        encode_program(program, &mut self.primary);
        reset_inactive(&mut self.secondary);
        self.blend = None;
        self.pending = None;
        self.progress = 0.0;
        self.state = EncoderState::Active;
        self.visible = Some((fingerprint_program(program), EncodedGlobals::of(program)));
    }

    /// Start fading toward `program` over `duration_ms` of clock time.
    ///
    /// A non-positive or non-finite duration completes on the next [`MotionEncoder::tick`].
    /// Calling this while blending restarts from the current primary buffer.
    pub fn crossfade_to(&mut self, program: &MotionProgram, duration_ms: f64) {
        if self.primary.len() != BUFFER_LEN {
            reset_inactive(&mut self.primary);
        }
        encode_program(program, &mut self.secondary);

        let fingerprint = fingerprint_program(program);
        if self.visible.map(|(f, _)| f) == Some(fingerprint) {
            tracing::debug!(%fingerprint, "crossfade target is already visible");
        }
        let start_ms = self.clock.now_ms();
        tracing::debug!(%fingerprint, duration_ms, start_ms, "crossfade started");

        self.pending = Some((fingerprint, EncodedGlobals::of(program)));
        self.blend = Some(Blend {
            start_ms,
            duration_ms,
        });
        self.progress = 0.0;
        self.state = EncoderState::Blending;
    }

    /// Advance the crossfade from the clock and return the current progress.
    ///
    /// When progress reaches 1.0 the secondary buffer becomes primary and progress resets to
    /// 0.0. Outside a crossfade this does nothing and returns 0.0.
    pub fn tick(&mut self) -> f32 {
        let Some(blend) = self.blend else {
            return self.progress;
        };

        let progress = if blend.duration_ms.is_finite() && blend.duration_ms > 0.0 {
            ((self.clock.now_ms() - blend.start_ms) / blend.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        // A NaN clock reading lands the fade.
        if progress.is_nan() || progress >= 1.0 {
            self.primary.copy_from_slice(&self.secondary);
            self.visible = self.pending.take();
            self.blend = None;
            self.progress = 0.0;
            self.state = EncoderState::Active;
            tracing::debug!("crossfade complete");
        } else {
            self.progress = progress as f32;
        }
        self.progress
    }

    /// Make every row inactive and go idle.
    pub fn clear(&mut self) {
        reset_inactive(&mut self.primary);
        reset_inactive(&mut self.secondary);
        self.blend = None;
        self.visible = None;
        self.pending = None;
        self.progress = 0.0;
        self.state = EncoderState::Idle;
    }

    /// Fill and borrow the part-attribute buffer: `slot_count` slots of
    /// `[partId, weight, 0, 0]`.
    ///
    /// Slots beyond `part_ids` get part 0; slots beyond `weights` get weight 1.0. Extra ids or
    /// weights past `slot_count` are ignored.
    pub fn encode_part_attributes(
        &mut self,
        slot_count: usize,
        part_ids: &[u32],
        weights: &[f32],
    ) -> &[f32] {
        self.attributes.clear();
        self.attributes.resize(slot_count * ATTRIBUTE_CHANNELS, 0.0);
        for (i, slot) in self
            .attributes
            .chunks_exact_mut(ATTRIBUTE_CHANNELS)
            .enumerate()
        {
            slot[0] = part_ids.get(i).copied().unwrap_or(0) as f32;
            slot[1] = weights.get(i).copied().unwrap_or(1.0);
        }
        &self.attributes
    }

    /// Release every owned buffer and go idle. Later setters re-allocate.
    pub fn dispose(&mut self) {
        self.primary = Vec::new();
        self.secondary = Vec::new();
        self.attributes = Vec::new();
        self.blend = None;
        self.visible = None;
        self.pending = None;
        self.progress = 0.0;
        self.state = EncoderState::Idle;
    }

    /// Buffer holding the visible program (empty after [`MotionEncoder::dispose`]).
    pub fn primary(&self) -> &[f32] {
        &self.primary
    }

    /// Buffer holding the crossfade target.
    pub fn secondary(&self) -> &[f32] {
        &self.secondary
    }

    /// The last part-attribute encoding.
    pub fn attributes(&self) -> &[f32] {
        &self.attributes
    }

    /// Crossfade progress as of the last tick.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Current state.
    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// `(progress, state)` for the executor's blend uniform.
    pub fn blend(&self) -> (f32, EncoderState) {
        (self.progress, self.state)
    }

    /// Globals of the visible program.
    pub fn globals(&self) -> Option<EncodedGlobals> {
        self.visible.map(|(_, g)| g)
    }

    /// Globals of the crossfade target while blending.
    pub fn pending_globals(&self) -> Option<EncodedGlobals> {
        self.pending.map(|(_, g)| g)
    }

    /// Fingerprint of the visible program.
    pub fn fingerprint(&self) -> Option<ProgramFingerprint> {
        self.visible.map(|(f, _)| f)
    }
}

fn reset_inactive(buf: &mut Vec<f32>) {
    buf.resize(BUFFER_LEN, 0.0);
    fill_inactive(buf);
}

#[cfg(test)]
#[path = "../../tests/unit/encode/encoder.rs"]
mod tests;
