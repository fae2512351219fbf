//! Display-name generation for connected clients.

use rand::seq::IndexedRandom;

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Noah", "Amelia", "Liam", "Sofia", "Ethan", "Mia", "Lucas", "Hana", "Kenji", "Mei",
    "Hiro", "Clara", "Felix", "Nina", "Oscar", "Iris", "Theo", "Lena", "Marco",
];

const LAST_NAMES: &[&str] = &[
    "Brooks", "Tanaka", "Silva", "Novak", "Fischer", "Moreau", "Kimura", "Larsen", "Romano",
    "Weber", "Sato", "Keller", "Fontaine", "Berg", "Costa", "Walsh",
];

/// Pick a human-readable display name for a new connection.
///
/// Collisions are allowed: the registry is keyed by connection id, never
/// by name.
pub fn generate() -> String {
    let mut rng = rand::rng();
    let first = FIRST_NAMES.choose(&mut rng).expect("name list is non-empty");
    let last = LAST_NAMES.choose(&mut rng).expect("name list is non-empty");
    format!("{} {}", first, last)
}
