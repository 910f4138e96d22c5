//! Kinema compiles declarative motion templates into GPU-ready motion programs.
//!
//! The pipeline is data in, floats out:
//!
//! - Load and check templates with [`validate`] and [`TemplateLibrary`]
//! - Compile a template against a caller's [`PartList`] with [`TemplateParser`]
//! - Pack the resulting [`MotionProgram`] into a fixed 528-float buffer and crossfade between
//!   programs with [`MotionEncoder`]
//!
//! Parameter formulas are evaluated by a small closed arithmetic evaluator ([`evaluate`]); there
//! is no host-language eval anywhere.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compile;
pub(crate) mod encode;
pub(crate) mod expression;
pub(crate) mod matching;
/// Noun to part-list presets.
pub mod skeleton;
pub(crate) mod template;

pub use crate::foundation::core::{MAX_PARTS, PARAM_COUNT, PartInfo, PartList};
pub use crate::foundation::error::{KinemaError, KinemaResult};
pub use crate::foundation::issue::{Issue, Severity, has_errors};

pub use crate::expression::error::{ExprError, ExprErrorKind};
pub use crate::expression::eval::{FORMULA_CLOSE, FORMULA_OPEN, Variables, evaluate};
pub use crate::expression::value::{ParamMap, ParamValue, resolve_value};

pub use crate::matching::infer::{PartCategory, infer_part_category, infer_type};
pub use crate::matching::pattern::{
    OR_KEYWORD, PartPattern, PatternError, matches, validate_pattern,
};

pub use crate::template::library::TemplateLibrary;
pub use crate::template::model::{
    AdverbOverride, AttachmentBehavior, PartRule, PrimitiveSpec, Template, TemplateDefaults,
};
pub use crate::template::primitive::Primitive;
pub use crate::template::validate::{validate, validate_batch};

pub use crate::compile::fingerprint::{ProgramFingerprint, fingerprint_program};
pub use crate::compile::parser::{
    Globals, MotionVars, ParseOverrides, ParserOpts, RuleTargets, TemplateParser, match_exact,
    match_inferred, resolve_globals, resolve_targets,
};
pub use crate::compile::program::{MotionProgram, PartMotionData};

pub use crate::encode::clock::{Clock, ManualClock, SystemClock};
pub use crate::encode::encoder::{ATTRIBUTE_CHANNELS, EncodedGlobals, EncoderState, MotionEncoder};
pub use crate::encode::layout::{
    BUFFER_LEN, FLOATS_PER_ROW, INACTIVE_PRIMITIVE, ROW_COUNT, encode_program, encode_row,
    encode_to_vec, fill_inactive,
};
pub use crate::skeleton::{SkeletonPreset, skeleton_for};
