//! Generation profiles — stylistic buckets a generated review is shaped by.
//!
//! Selection is a weighted random draw, independent across calls. There is
//! deliberately no rotation counter: profile choice is a variety heuristic,
//! and keeping it stateless means nothing is shared across requests.

use rand::Rng;

/// How the business name may appear in the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRule {
    /// Refer to the business only as "they" / "the team".
    Forbidden,
    /// Use the name exactly once, naturally, mid-text or at the end.
    ExactlyOnce,
    /// The name must appear.
    Required,
}

impl NamingRule {
    /// Instruction sentence injected into the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            NamingRule::Forbidden => {
                "Do NOT mention the business by name. Refer to it only as \"they\" or \"the team\"."
            }
            NamingRule::ExactlyOnce => {
                "Mention the business name exactly once, naturally, in the middle or at the end. Never open with it."
            }
            NamingRule::Required => {
                "Mention the business by name at least once, but never in the opening sentence."
            }
        }
    }
}

/// A named style bucket: length target, naming rule, candidate topic foci
/// and opening hooks, plus its weight in the random draw.
#[derive(Debug)]
pub struct GenerationProfile {
    pub name: &'static str,
    pub length_target: &'static str,
    pub naming: NamingRule,
    pub topic_foci: &'static [&'static str],
    pub opening_hooks: &'static [&'static str],
    /// Relative weight out of the table total (currently 100).
    pub weight: u32,
}

/// The profile table. Weights: roughly half the output stays short and
/// anonymous, a third mid-length, the rest long and personal.
pub const PROFILES: &[GenerationProfile] = &[
    GenerationProfile {
        name: "short-anonymous",
        length_target: "2 short sentences, 20-35 words total",
        naming: NamingRule::Forbidden,
        topic_foci: &[
            "how quickly the staff responded",
            "cleanliness and organization",
            "value for money",
            "how easy booking was",
        ],
        opening_hooks: &[
            "Start with a plain statement of what you booked or bought.",
            "Start with the one thing that stood out most.",
            "Start mid-thought, like you're finishing a conversation.",
        ],
        weight: 50,
    },
    GenerationProfile {
        name: "medium-balanced",
        length_target: "3-4 sentences, 50-90 words",
        naming: NamingRule::ExactlyOnce,
        topic_foci: &[
            "a specific moment where the staff went out of their way",
            "comparing this to similar places you've used before",
            "a worry you had beforehand that turned out fine",
            "practical details other customers would want to know",
        ],
        opening_hooks: &[
            "Open with the context of your visit (who with, what for).",
            "Open with a mild hesitation you had before booking.",
            "Open with a recommendation you received from someone else.",
        ],
        weight: 30,
    },
    GenerationProfile {
        name: "long-personal",
        length_target: "5-6 sentences, 90-130 words",
        naming: NamingRule::Required,
        topic_foci: &[
            "the full arc of your experience from first contact to the end",
            "travelling with family or a group and how they handled it",
            "a problem that came up and how it was resolved",
        ],
        opening_hooks: &[
            "Open with why the trip or purchase mattered to you personally.",
            "Open by saying this is not your first time using them.",
        ],
        weight: 20,
    },
];

/// Weighted random draw over the profile table.
pub fn pick_profile<R: Rng + ?Sized>(rng: &mut R) -> &'static GenerationProfile {
    let total: u32 = PROFILES.iter().map(|p| p.weight).sum();
    let mut roll = rng.gen_range(0..total);
    for profile in PROFILES {
        if roll < profile.weight {
            return profile;
        }
        roll -= profile.weight;
    }
    // Unreachable while the table is non-empty; keep the last as a guard.
    &PROFILES[PROFILES.len() - 1]
}

/// Uniform pick from a non-empty static slice.
pub fn pick_one<R: Rng + ?Sized>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}
