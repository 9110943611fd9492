// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text helpers for league replies.

/// Two aligned lines for a head-to-head score table.
///
/// Names are left-aligned and padded to equal width, with one separating
/// space; scores are right-aligned to equal width.
pub fn format_matchup(name1: &str, name2: &str, score1: f64, score2: f64) -> (String, String) {
    let left = name1.chars().count().max(name2.chars().count()) + 1;
    let score1 = format_score(score1);
    let score2 = format_score(score2);
    let right = score1.len().max(score2.len());

    (
        format!("{:<left$}{:>right$}", name1, score1),
        format!("{:<left$}{:>right$}", name2, score2),
    )
}

/// Whole numbers keep one decimal place: `105.0`, `98.5`.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matchup_aligns_columns() {
        let (line1, line2) = format_matchup("Alpha", "Bob's Team", 105.0, 98.5);

        assert_eq!(line1, "Alpha      105.0");
        assert_eq!(line2, "Bob's Team  98.5");
        assert_eq!(line1.len(), line2.len());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(105.0), "105.0");
        assert_eq!(format_score(98.5), "98.5");
        assert_eq!(format_score(0.0), "0.0");
    }

    #[test]
    fn test_ordinal() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 103, 111].iter().map(|n| ordinal(*n)).collect();
        assert_eq!(
            got,
            vec!["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "103rd", "111th"]
        );
    }
}
