use sha2::{Digest, Sha256};

const MAX_STEM: usize = 80;

/// Filesystem-safe, deterministic record filename: `{kind}_{slug}--{short_hash(key)}.json`.
///
/// The hash covers the full key, so truncating the slug never merges two records.
pub fn deterministic_filename(kind: &str, key: &str) -> String {
    let slug = slugify(key);
    let hash = short_hash(&format!("{kind}\n{key}"));
    format!("{kind}_{slug}--{hash}.json")
}

fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut prev_sep = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_sep = false;
        } else if !prev_sep {
            slug.push('_');
            prev_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.len() > MAX_STEM {
        slug.truncate(MAX_STEM);
    }
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::{deterministic_filename, slugify};

    #[test]
    fn slug_keeps_ascii_alphanumerics() {
        assert_eq!(slugify("20192020 AB 1234"), "20192020_AB_1234");
        assert_eq!(slugify("Senate Judiciary#Room 400#2024-03-05"), "Senate_Judiciary_Room_400_2024_03_05");
        assert_eq!(slugify("///"), "untitled");
    }

    #[test]
    fn filename_is_stable_and_kind_scoped() {
        let a = deterministic_filename("bill", "20192020 AB 1");
        assert_eq!(a, deterministic_filename("bill", "20192020 AB 1"));
        assert!(a.starts_with("bill_20192020_AB_1--"));
        assert!(a.ends_with(".json"));
        assert_ne!(a, deterministic_filename("vote_event", "20192020 AB 1"));
    }
}
