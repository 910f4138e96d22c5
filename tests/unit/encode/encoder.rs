use super::*;
use crate::compile::program::PartMotionData;
use crate::encode::clock::ManualClock;
use crate::encode::layout::{FLOATS_PER_ROW, INACTIVE_PRIMITIVE, encode_to_vec};
use crate::template::primitive::Primitive;

fn program(primitive: Primitive, speed: f32) -> MotionProgram {
    let mut p = MotionProgram::new(PartMotionData::new(Primitive::Bob, &[0.1]), speed, 1.0);
    p.set_part(2, PartMotionData::new(primitive, &[0.4, 1.0]));
    p
}

fn encoder() -> (MotionEncoder<ManualClock>, ManualClock) {
    let clock = ManualClock::new(1000.0);
    (MotionEncoder::with_clock(clock.clone()), clock)
}

#[test]
fn starts_idle_with_inactive_rows() {
    let (mut enc, _) = encoder();
    assert_eq!(enc.state(), EncoderState::Idle);
    assert_eq!(enc.primary().len(), BUFFER_LEN);
    assert!(enc.primary().chunks_exact(FLOATS_PER_ROW).all(|r| r[0] == INACTIVE_PRIMITIVE));
    assert_eq!(enc.tick(), 0.0);
    assert_eq!(enc.state(), EncoderState::Idle);
    assert!(enc.globals().is_none());
}

#[test]
fn set_program_is_idempotent() {
    let (mut enc, _) = encoder();
    let a = program(Primitive::Oscillate, 1.0);
    enc.set_program(&a);
    let first = enc.primary().to_vec();
    enc.set_program(&a);
    assert_eq!(enc.primary(), first.as_slice());
    assert_eq!(enc.primary(), encode_to_vec(&a).as_slice());
    assert_eq!(enc.progress(), 0.0);
    assert_eq!(enc.state(), EncoderState::Active);
    assert_eq!(enc.fingerprint(), Some(fingerprint_program(&a)));
}

#[test]
fn crossfade_progress_follows_clock_time() {
    let (mut enc, clock) = encoder();
    let a = program(Primitive::Oscillate, 1.0);
    let b = program(Primitive::Flutter, 2.0);
    enc.set_program(&a);
    enc.crossfade_to(&b, 500.0);
    assert_eq!(enc.state(), EncoderState::Blending);
    assert_eq!(enc.progress(), 0.0);
    assert_eq!(enc.secondary(), encode_to_vec(&b).as_slice());
    assert_eq!(enc.pending_globals().unwrap().speed, 2.0);

    clock.advance(250.0);
    let p = enc.tick();
    assert!((p - 0.5).abs() < 1e-6);
    assert_eq!(enc.blend(), (p, EncoderState::Blending));
    assert_eq!(enc.primary(), encode_to_vec(&a).as_slice());

    clock.advance(300.0);
    assert_eq!(enc.tick(), 0.0);
    assert_eq!(enc.state(), EncoderState::Active);
    assert_eq!(enc.primary(), encode_to_vec(&b).as_slice());
    assert_eq!(enc.globals().unwrap().speed, 2.0);
    assert_eq!(enc.fingerprint(), Some(fingerprint_program(&b)));

    clock.advance(1000.0);
    assert_eq!(enc.tick(), 0.0);
    assert_eq!(enc.primary(), encode_to_vec(&b).as_slice());
}

#[test]
fn non_positive_duration_completes_next_tick() {
    let (mut enc, _) = encoder();
    let b = program(Primitive::Pulse, 1.0);
    enc.set_program(&program(Primitive::Oscillate, 1.0));
    enc.crossfade_to(&b, 0.0);
    assert_eq!(enc.state(), EncoderState::Blending);
    assert_eq!(enc.tick(), 0.0);
    assert_eq!(enc.state(), EncoderState::Active);
    assert_eq!(enc.primary(), encode_to_vec(&b).as_slice());
}

#[test]
fn non_finite_duration_completes_next_tick() {
    for duration in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let (mut enc, clock) = encoder();
        let b = program(Primitive::Pulse, 2.0);
        enc.set_program(&program(Primitive::Oscillate, 1.0));
        enc.crossfade_to(&b, duration);
        clock.advance(1e9);
        let progress = enc.tick();
        assert_eq!(progress, 0.0, "duration {duration}");
        assert_eq!(enc.state(), EncoderState::Active, "duration {duration}");
        assert_eq!(enc.primary(), encode_to_vec(&b).as_slice());
        assert_eq!(enc.globals().unwrap().speed, 2.0);
    }
}

#[test]
fn nan_clock_reading_lands_the_fade() {
    let (mut enc, clock) = encoder();
    let b = program(Primitive::Pulse, 1.0);
    enc.set_program(&program(Primitive::Oscillate, 1.0));
    enc.crossfade_to(&b, 500.0);
    clock.set(f64::NAN);
    assert_eq!(enc.tick(), 0.0);
    assert_eq!(enc.state(), EncoderState::Active);
}

#[test]
fn set_program_abandons_blend() {
    let (mut enc, clock) = encoder();
    let a = program(Primitive::Oscillate, 1.0);
    let c = program(Primitive::Sway, 1.0);
    enc.set_program(&a);
    enc.crossfade_to(&program(Primitive::Flutter, 1.0), 500.0);
    clock.advance(100.0);
    enc.tick();
    enc.set_program(&c);
    assert_eq!(enc.state(), EncoderState::Active);
    assert_eq!(enc.progress(), 0.0);
    clock.advance(1000.0);
    enc.tick();
    assert_eq!(enc.primary(), encode_to_vec(&c).as_slice());
}

#[test]
fn crossfade_restart_uses_new_start_time() {
    let (mut enc, clock) = encoder();
    enc.set_program(&program(Primitive::Oscillate, 1.0));
    enc.crossfade_to(&program(Primitive::Flutter, 1.0), 400.0);
    clock.advance(300.0);
    enc.tick();
    let d = program(Primitive::Wave, 1.0);
    enc.crossfade_to(&d, 400.0);
    clock.advance(100.0);
    assert!((enc.tick() - 0.25).abs() < 1e-6);
    assert_eq!(enc.secondary(), encode_to_vec(&d).as_slice());
}

#[test]
fn clear_deactivates_everything() {
    let (mut enc, _) = encoder();
    enc.set_program(&program(Primitive::Oscillate, 1.0));
    enc.crossfade_to(&program(Primitive::Flutter, 1.0), 500.0);
    enc.clear();
    assert_eq!(enc.state(), EncoderState::Idle);
    assert_eq!(enc.progress(), 0.0);
    assert!(enc.primary().chunks_exact(FLOATS_PER_ROW).all(|r| r[0] == INACTIVE_PRIMITIVE));
    assert!(enc.secondary().chunks_exact(FLOATS_PER_ROW).all(|r| r[0] == INACTIVE_PRIMITIVE));
    assert!(enc.fingerprint().is_none());
}

#[test]
fn part_attributes_default_missing_entries() {
    let (mut enc, _) = encoder();
    let attrs = enc.encode_part_attributes(3, &[4, 7], &[0.5]).to_vec();
    assert_eq!(
        attrs,
        vec![4.0, 0.5, 0.0, 0.0, 7.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    );

    let attrs = enc.encode_part_attributes(1, &[9, 9, 9], &[0.1, 0.2]);
    assert_eq!(attrs, &[9.0, 0.1, 0.0, 0.0]);
    assert_eq!(enc.attributes().len(), ATTRIBUTE_CHANNELS);
}

#[test]
fn dispose_releases_and_setters_reallocate() {
    let (mut enc, clock) = encoder();
    let a = program(Primitive::Oscillate, 1.0);
    enc.set_program(&a);
    enc.encode_part_attributes(8, &[], &[]);
    enc.dispose();
    assert_eq!(enc.state(), EncoderState::Idle);
    assert!(enc.primary().is_empty());
    assert!(enc.secondary().is_empty());
    assert!(enc.attributes().is_empty());
    assert_eq!(enc.tick(), 0.0);

    enc.crossfade_to(&a, 100.0);
    assert_eq!(enc.primary().len(), BUFFER_LEN);
    clock.advance(100.0);
    enc.tick();
    assert_eq!(enc.primary(), encode_to_vec(&a).as_slice());
}
