//! Name tables for generated hostiles and items

use rand::Rng;

pub fn hostile_name(rng: &mut impl Rng) -> &'static str {
    HOSTILE_NAMES[rng.gen_range(0..HOSTILE_NAMES.len())]
}

pub fn item_name(rng: &mut impl Rng) -> &'static str {
    ITEM_NAMES[rng.gen_range(0..ITEM_NAMES.len())]
}

static HOSTILE_NAMES: &[&str] = &[
    "goblin",
    "kobold",
    "cave rat",
    "skeleton",
    "orc",
    "giant spider",
    "bandit",
    "slime",
    "ghoul",
    "troll",
];

static ITEM_NAMES: &[&str] = &[
    "rusty sword",
    "dagger",
    "short bow",
    "iron mace",
    "spear",
    "wooden club",
    "hand axe",
    "war hammer",
    "quarterstaff",
    "sling",
];
