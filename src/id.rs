//! Task ID generation.
//!
//! IDs look like UUIDs (`8-4-4-12` groups joined by hyphens) but are plain
//! random picks from a 36-symbol alphabet. There are no version or variant
//! bits, and the generator is not cryptographically secure.

use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const GROUPS: [usize; 4] = [8, 4, 4, 12];
const GROUP_SEPARATOR: char = '-';

fn random_group<R: Rng>(rng: &mut R, len: usize, out: &mut String) {
    for _ in 0..len {
        out.push(char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]));
    }
}

/// Build one candidate id from `rng`, without any uniqueness check.
pub fn random_id<R: Rng>(rng: &mut R) -> String {
    let mut id = String::with_capacity(GROUPS.iter().sum::<usize>() + GROUPS.len() - 1);
    for (i, len) in GROUPS.iter().enumerate() {
        random_group(rng, *len, &mut id);
        if i + 1 < GROUPS.len() {
            id.push(GROUP_SEPARATOR);
        }
    }
    id
}

/// Generate an id for which `is_taken` returns false, retrying on collision.
pub fn generate_task_id(is_taken: impl Fn(&str) -> bool) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id = random_id(&mut rng);
        if !is_taken(&id) {
            return id;
        }
        tracing::debug!(%id, "generated id already in use, retrying");
    }
}
