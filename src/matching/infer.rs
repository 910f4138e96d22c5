use std::collections::HashMap;
use std::sync::LazyLock;

use crate::matching::pattern::OR_KEYWORD;

/// Broad anatomical/mechanical class of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    /// Heads, faces, beaks.
    Head,
    /// Torsos, hulls, fuselages, trunks.
    Body,
    /// Legs, arms, paws, tentacles.
    Limb,
    /// Wings and feathers.
    Wing,
    /// Tails and stingers.
    Tail,
    /// Fins and flippers.
    Fin,
    /// Anything that spins: wheels, rotors, propellers.
    Rotor,
    /// Small protrusions: ears, horns, antennae, necks.
    Appendage,
    /// Canopies, leaves, branches, roots.
    Foliage,
    /// Rigid architecture: roofs, walls, doors, windows.
    Structure,
}

const VOCABULARY: &[(&str, PartCategory)] = &[
    ("head", PartCategory::Head),
    ("skull", PartCategory::Head),
    ("face", PartCategory::Head),
    ("snout", PartCategory::Head),
    ("muzzle", PartCategory::Head),
    ("beak", PartCategory::Head),
    ("jaw", PartCategory::Head),
    ("body", PartCategory::Body),
    ("torso", PartCategory::Body),
    ("chest", PartCategory::Body),
    ("thorax", PartCategory::Body),
    ("abdomen", PartCategory::Body),
    ("belly", PartCategory::Body),
    ("pelvis", PartCategory::Body),
    ("hip", PartCategory::Body),
    ("trunk", PartCategory::Body),
    ("fuselage", PartCategory::Body),
    ("hull", PartCategory::Body),
    ("chassis", PartCategory::Body),
    ("seat", PartCategory::Body),
    ("leg", PartCategory::Limb),
    ("arm", PartCategory::Limb),
    ("limb", PartCategory::Limb),
    ("foreleg", PartCategory::Limb),
    ("hindleg", PartCategory::Limb),
    ("forelimb", PartCategory::Limb),
    ("hindlimb", PartCategory::Limb),
    ("paw", PartCategory::Limb),
    ("hand", PartCategory::Limb),
    ("foot", PartCategory::Limb),
    ("feet", PartCategory::Limb),
    ("claw", PartCategory::Limb),
    ("tentacle", PartCategory::Limb),
    ("thigh", PartCategory::Limb),
    ("shin", PartCategory::Limb),
    ("wing", PartCategory::Wing),
    ("feather", PartCategory::Wing),
    ("tail", PartCategory::Tail),
    ("stinger", PartCategory::Tail),
    ("fin", PartCategory::Fin),
    ("flipper", PartCategory::Fin),
    ("fluke", PartCategory::Fin),
    ("wheel", PartCategory::Rotor),
    ("tire", PartCategory::Rotor),
    ("tyre", PartCategory::Rotor),
    ("rotor", PartCategory::Rotor),
    ("propeller", PartCategory::Rotor),
    ("blade", PartCategory::Rotor),
    ("fan", PartCategory::Rotor),
    ("gear", PartCategory::Rotor),
    ("engine", PartCategory::Rotor),
    ("turbine", PartCategory::Rotor),
    ("neck", PartCategory::Appendage),
    ("ear", PartCategory::Appendage),
    ("horn", PartCategory::Appendage),
    ("antenna", PartCategory::Appendage),
    ("antennae", PartCategory::Appendage),
    ("tusk", PartCategory::Appendage),
    ("mane", PartCategory::Appendage),
    ("whisker", PartCategory::Appendage),
    ("crest", PartCategory::Appendage),
    ("canopy", PartCategory::Foliage),
    ("leaf", PartCategory::Foliage),
    ("leaves", PartCategory::Foliage),
    ("branch", PartCategory::Foliage),
    ("crown", PartCategory::Foliage),
    ("frond", PartCategory::Foliage),
    ("petal", PartCategory::Foliage),
    ("flower", PartCategory::Foliage),
    ("root", PartCategory::Foliage),
    ("stem", PartCategory::Foliage),
    ("roof", PartCategory::Structure),
    ("wall", PartCategory::Structure),
    ("window", PartCategory::Structure),
    ("windshield", PartCategory::Structure),
    ("door", PartCategory::Structure),
    ("foundation", PartCategory::Structure),
    ("backrest", PartCategory::Structure),
    ("chimney", PartCategory::Structure),
    ("tower", PartCategory::Structure),
];

static WORD_TO_CATEGORY: LazyLock<HashMap<&'static str, PartCategory>> =
    LazyLock::new(|| VOCABULARY.iter().copied().collect());

/// Classify a single word. Case-insensitive; a trailing plural `s`/`es` is tolerated.
pub fn infer_type(word: &str) -> Option<PartCategory> {
    let w = word.trim().to_ascii_lowercase();
    if w.is_empty() {
        return None;
    }
    if let Some(c) = WORD_TO_CATEGORY.get(w.as_str()) {
        return Some(*c);
    }
    if let Some(stem) = w.strip_suffix("es")
        && let Some(c) = WORD_TO_CATEGORY.get(stem)
    {
        return Some(*c);
    }
    w.strip_suffix('s')
        .and_then(|stem| WORD_TO_CATEGORY.get(stem))
        .copied()
}

/// Classify a part name or match pattern by its first recognised word.
///
/// Text is split on anything that is not ASCII alphanumeric, and `OR` keywords are ignored, so
/// `"front_*_leg OR forelimb*"` yields [`PartCategory::Limb`].
pub fn infer_part_category(text: &str) -> Option<PartCategory> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|tok| !tok.is_empty() && *tok != OR_KEYWORD)
        .find_map(infer_type)
}

#[cfg(test)]
#[path = "../../tests/unit/matching/infer.rs"]
mod tests;
