//! Likely section masses for a biped, guessed from section names.
//!
//! Not exhaustive: the lookup is a substring match against common body
//! part names, so "L_UpperArm" and "upper arm left" both land on
//! `upper_arm`. Anything unrecognised gets [`FALLBACK_WEIGHT`].

/// Weight used when no body part matches.
pub const FALLBACK_WEIGHT: f64 = 1.0;

/// Body part names and their relative masses, in match priority order.
pub const BODY_PART_WEIGHTS: &[(&str, f64)] = &[
    ("belly", 8.6),
    ("torso", 8.6),
    ("hip", 8.6),
    ("lower_body", 8.6),
    ("chest", 10.0),
    ("upper_body", 10.0),
    ("body", 18.6),
    ("upper_arm", 0.6),
    ("arm_upper", 0.6),
    ("humerus", 0.6),
    ("lower_arm", 0.4),
    ("arm_lower", 0.4),
    ("forearm", 0.4),
    ("hand", 0.2),
    ("upper_leg", 1.9),
    ("leg_upper", 1.9),
    ("femur", 1.9),
    ("thigh", 1.9),
    ("lower_leg", 1.0),
    ("leg_lower", 1.0),
    ("calf", 1.0),
    ("foot", 0.5),
    ("feet", 0.5),
    ("head", 3.9),
];

/// Best-guess mass for a section called `section_name`.
pub fn default_weight(section_name: &str) -> f64 {
    let lowered = section_name.to_lowercase();

    for (part, weight) in BODY_PART_WEIGHTS {
        let spellings = [part.to_string(), part.replace('_', ""), part.replace('_', " ")];
        if spellings.iter().any(|s| lowered.contains(s.as_str())) {
            return *weight;
        }
    }

    FALLBACK_WEIGHT
}
