use std::collections::HashMap;
use std::sync::LazyLock;

use crate::foundation::core::PartList;

/// A canned part layout for a family of objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkeletonPreset {
    /// Preset name (`"quadruped"`, `"bird"`, ...).
    pub kind: &'static str,
    /// Part names in id order; ids are assigned `1..=N`.
    pub part_names: &'static [&'static str],
    /// Nouns that select this preset.
    pub nouns: &'static [&'static str],
}

impl SkeletonPreset {
    /// Number of parts in the preset.
    pub fn num_parts(&self) -> usize {
        self.part_names.len()
    }

    /// Part list with ids `1..=N` in declaration order.
    pub fn part_list(&self) -> PartList {
        PartList::from_names(self.part_names.iter().copied())
    }
}

/// Preset used for nouns no other preset claims.
pub const DEFAULT_KIND: &str = "default";

const DEFAULT_PRESET: SkeletonPreset = SkeletonPreset {
    kind: DEFAULT_KIND,
    part_names: &["body"],
    nouns: &[],
};

static PRESETS: &[SkeletonPreset] = &[
    SkeletonPreset {
        kind: "quadruped",
        part_names: &["head", "body", "front_legs", "back_legs", "tail", "neck"],
        nouns: &[
            "horse", "dog", "cat", "cow", "lion", "tiger", "deer", "wolf", "bear", "elephant",
            "giraffe", "zebra", "fox", "rabbit", "pony", "stallion", "mare", "mustang", "puppy",
            "kitten", "leopard", "cheetah", "panther", "moose", "rhino", "hippo", "camel",
        ],
    },
    SkeletonPreset {
        kind: "biped",
        part_names: &["head", "torso", "left_arm", "right_arm", "left_leg", "right_leg"],
        nouns: &[
            "person", "human", "man", "woman", "child", "robot", "soldier", "dancer",
            "astronaut", "knight", "warrior", "zombie", "skeleton", "angel", "devil", "ninja",
            "samurai", "pirate",
        ],
    },
    SkeletonPreset {
        kind: "bird",
        part_names: &["head", "body", "left_wing", "right_wing", "tail", "legs"],
        nouns: &[
            "bird", "eagle", "hawk", "owl", "parrot", "penguin", "flamingo", "crow", "raven",
            "dove", "sparrow", "hummingbird", "swan", "pelican", "toucan", "falcon", "vulture",
        ],
    },
    SkeletonPreset {
        kind: "fish",
        part_names: &["head", "body", "tail_fin", "dorsal_fin", "pectoral_fins"],
        nouns: &[
            "fish", "shark", "whale", "dolphin", "goldfish", "tuna", "swordfish", "ray",
            "seahorse", "octopus", "squid", "jellyfish",
        ],
    },
    SkeletonPreset {
        kind: "vehicle",
        part_names: &["body", "wheels", "windshield", "roof"],
        nouns: &[
            "car", "truck", "bus", "motorcycle", "van", "jeep", "taxi", "ambulance",
            "firetruck", "tractor",
        ],
    },
    SkeletonPreset {
        kind: "aircraft",
        part_names: &["fuselage", "left_wing", "right_wing", "tail", "engines"],
        nouns: &[
            "airplane",
            "jet",
            "helicopter",
            "plane",
            "biplane",
            "glider",
            "drone",
        ],
    },
    SkeletonPreset {
        kind: "furniture",
        part_names: &["seat", "backrest", "legs"],
        nouns: &[
            "chair", "stool", "bench", "throne", "couch", "sofa", "armchair", "recliner",
        ],
    },
    SkeletonPreset {
        kind: "plant",
        part_names: &["trunk", "canopy", "roots"],
        nouns: &[
            "tree", "palm", "oak", "pine", "willow", "birch", "maple", "cactus", "bamboo",
            "bonsai",
        ],
    },
    SkeletonPreset {
        kind: "building",
        part_names: &["walls", "roof", "windows", "door", "foundation"],
        nouns: &[
            "house",
            "building",
            "castle",
            "church",
            "cabin",
            "temple",
            "tower",
            "lighthouse",
            "barn",
            "mosque",
            "cathedral",
        ],
    },
    SkeletonPreset {
        kind: "insect",
        part_names: &["head", "thorax", "abdomen", "wings", "legs"],
        nouns: &[
            "butterfly",
            "bee",
            "dragonfly",
            "beetle",
            "ant",
            "spider",
            "moth",
            "wasp",
            "grasshopper",
            "ladybug",
            "scorpion",
        ],
    },
    DEFAULT_PRESET,
];

static NOUN_TO_PRESET: LazyLock<HashMap<&'static str, &'static SkeletonPreset>> =
    LazyLock::new(|| {
        PRESETS
            .iter()
            .flat_map(|p| p.nouns.iter().map(move |n| (*n, p)))
            .collect()
    });

/// Every preset, `default` last.
pub fn presets() -> &'static [SkeletonPreset] {
    PRESETS
}

/// Preset by kind name (exact, lowercase).
pub fn preset(kind: &str) -> Option<&'static SkeletonPreset> {
    PRESETS.iter().find(|p| p.kind == kind)
}

/// Resolve a noun to its preset. Case-insensitive and trimmed; unknown nouns get `default`.
pub fn skeleton_for(noun: &str) -> &'static SkeletonPreset {
    let key = noun.trim().to_lowercase();
    match NOUN_TO_PRESET.get(key.as_str()) {
        Some(p) => *p,
        None => {
            tracing::debug!(noun, "no skeleton preset for noun; using default");
            &DEFAULT_PRESET
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/skeleton.rs"]
mod tests;
