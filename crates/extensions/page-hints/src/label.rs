//! Bijective base-26 hint labels: `A`..`Z`, `AA`..`ZZ`, `AAA`...

const ALPHABET: u8 = 26;

/// Label for the element at `index` in the visible list.
pub fn hint_label(index: usize) -> String {
    let base = ALPHABET as usize;
    let mut n = index;
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (n % base) as u8);
        if n < base {
            break;
        }
        n = n / base - 1;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Inverse of [`hint_label`]; case-insensitive, `None` for anything that is not a label.
pub fn label_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for c in label.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return None;
        }
        let digit = (upper as u8 - b'A') as usize + 1;
        n = n.checked_mul(ALPHABET as usize)?.checked_add(digit)?;
    }
    Some(n - 1)
}

/// Lookup key for a spoken label: whitespace removed, lowercased.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
