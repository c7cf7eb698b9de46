//! Display name generation.

use rand::Rng;

/// Length of generated display names.
const NAME_LENGTH: usize = 14;

/// Generate a random display name for a first-seen user.
///
/// Names are fixed-length lowercase ASCII letters.
#[must_use]
pub fn generate_display_name() -> String {
    let mut rng = rand::thread_rng();
    (0..NAME_LENGTH)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect()
}
