//! Slug canonicalization.
//!
//! Two spellings of the same resource coexist: hyphen-case route slugs
//! (`fes-eo`) and camel-case file stems (`fesEo`). The canonical form is
//! hyphen-case, and it is what registry keys are made of.

/// Normalize a slug into its canonical hyphen-case form.
///
/// A slug that already contains a hyphen is returned unchanged. Otherwise a
/// hyphen is inserted at every lowercase/digit to uppercase transition and
/// the result is lowercased. Idempotent; the empty string maps to itself.
pub fn canonicalize(raw: &str) -> String {
    if raw.contains('-') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if let Some(p) = prev {
            if (p.is_ascii_lowercase() || p.is_ascii_digit()) && c.is_ascii_uppercase() {
                out.push('-');
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_lowercase()
}

/// Ordered, deduplicated spellings to try for `slug`.
///
/// The canonical form always comes first. Each alternate is canonicalized
/// before it is added, so spellings that collapse onto an earlier candidate
/// are dropped.
pub fn candidates(slug: &str) -> Vec<String> {
    let canonical = canonicalize(slug);
    let mut out = vec![canonical.clone()];

    if canonical.contains('-') {
        push_unique(&mut out, to_camel_case(&canonical));
    } else if canonical.chars().any(char::is_uppercase) {
        // Only uppercase letters with no lowercase mapping survive canonicalize
        push_unique(&mut out, to_hyphen_case(&canonical));
    }

    out
}

/// Registry key for a content source path.
///
/// Takes the final path segment, strips the `.{extension}` suffix and
/// canonicalizes the stem: `data/scholarships/fesEo.json` -> `fes-eo`.
pub fn slug_from_path(path: &str, extension: &str) -> String {
    let filename = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let stem = filename.strip_suffix(suffix.as_str()).unwrap_or(filename);
    canonicalize(stem)
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    let candidate = canonicalize(&candidate);
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

fn to_camel_case(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());

    for (index, part) in slug.split('-').enumerate() {
        if index == 0 {
            out.push_str(&part.to_lowercase());
            continue;
        }

        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

fn to_hyphen_case(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len() + 4);
    let mut prev: Option<char> = None;

    for c in slug.chars() {
        if matches!(prev, Some(p) if p.is_lowercase() || p.is_ascii_digit()) && c.is_uppercase() {
            out.push('-');
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_lowercase()
}
