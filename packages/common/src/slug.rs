/// Id for a special award: lower-cased, whitespace runs collapsed to `-`.
pub fn award_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Id for a team or project: as [`award_slug`], then anything outside
/// `[a-z0-9-]` is dropped.
pub fn entity_slug(name: &str) -> String {
    award_slug(name)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Make `base` unique among `existing` by appending `-2`, `-3`, ...
pub fn disambiguate<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = existing.into_iter().collect();
    if !taken.contains(&base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .expect("an unbounded suffix range always yields a free id")
}
