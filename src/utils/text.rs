//! Display-name helpers

/// Title-case a crop label for display
///
/// Uppercases the first letter of every alphabetic run and lowercases the
/// rest: "sweet potato" → "Sweet Potato", "SOYBEAN" → "Soybean".
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_alpha = false;

    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if previous_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(ch);
            previous_alpha = false;
        }
    }

    out
}
