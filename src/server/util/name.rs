/// Canonical form of a team name for matching WTRL payloads against local teams.
///
/// Trims, uppercases, drops every `"TEAM "` and collapses runs of spaces.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_uppercase()
        .replace("TEAM ", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::normalize_name;

    #[test]
    fn strips_team_prefix_and_spacing() {
        assert_eq!(normalize_name("  Team  Rocket   Racing "), "ROCKET RACING");
        assert_eq!(normalize_name("team rocket"), "ROCKET");
    }

    /// Expected: different spellings of the same team normalise identically
    #[test]
    fn matches_variants() {
        assert_eq!(normalize_name("TEAM Pedal  Pushers"), normalize_name("pedal pushers"));
    }
}
