//! Customer reviews shown on the carousel cards.
//!
//! Reviews come either from a TOML file of `[[review]]` tables or from the
//! built-in sample set.  No UI types are used here.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    pub author: String,
    pub vehicle: String,
    /// Star rating, 1–5.
    pub rating: u8,
    pub date: NaiveDate,
    pub text: String,
}

impl Review {
    /// `"★★★★☆"`-style rating string.
    pub fn stars(&self) -> String {
        let filled = self.rating.min(5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }

    /// Short month/year label, e.g. `"Mar 2024"`.
    pub fn date_label(&self) -> String {
        self.date.format("%b %Y").to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("cannot read reviews file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed reviews file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("reviews file {0} contains no [[review]] entries")]
    Empty(PathBuf),
    #[error("review by {author:?} has rating {rating}; expected 1-5")]
    BadRating { author: String, rating: u8 },
}

#[derive(Deserialize)]
struct ReviewFile {
    #[serde(default)]
    review: Vec<Review>,
}

/// Load and validate reviews from a TOML file.
pub fn load(path: &Path) -> Result<Vec<Review>, ReviewError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ReviewError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<Vec<Review>, ReviewError> {
    let file: ReviewFile = toml::from_str(contents).map_err(|source| ReviewError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if file.review.is_empty() {
        return Err(ReviewError::Empty(path.to_path_buf()));
    }
    if let Some(bad) = file.review.iter().find(|r| !(1..=5).contains(&r.rating)) {
        return Err(ReviewError::BadRating {
            author: bad.author.clone(),
            rating: bad.rating,
        });
    }
    Ok(file.review)
}

/// Built-in reviews used when no file is given.
pub fn samples() -> Vec<Review> {
    const SAMPLES: &[(&str, &str, u8, (i32, u32, u32), &str)] = &[
        (
            "Alexei M.",
            "Toyota Camry",
            5,
            (2024, 3, 14),
            "Booked an oil change online and was out in forty minutes. They showed me the old filter without me asking.",
        ),
        (
            "Irina K.",
            "Kia Rio",
            5,
            (2024, 4, 2),
            "Brakes were squealing for weeks. Pads and discs replaced the same day, and the price matched the calculator.",
        ),
        (
            "Dmitry S.",
            "BMW X5",
            4,
            (2024, 5, 19),
            "Thorough diagnostics, clear explanation of what could wait. Waiting area coffee could be better.",
        ),
        (
            "Olga P.",
            "Hyundai Solaris",
            5,
            (2024, 6, 7),
            "Used the promo code for tyre fitting. Friendly staff, balanced all four wheels and checked pressure too.",
        ),
        (
            "Sergey V.",
            "Volkswagen Polo",
            4,
            (2024, 7, 23),
            "Air conditioning recharge done quickly. Had to wait a bit past my slot but they warned me by message.",
        ),
        (
            "Natalia R.",
            "Skoda Octavia",
            5,
            (2024, 8, 30),
            "Second time here for scheduled maintenance. Everything logged in the service book, no surprises on the bill.",
        ),
        (
            "Pavel G.",
            "Lada Vesta",
            5,
            (2024, 10, 11),
            "Suspension knock finally fixed after two other shops gave up. Honest about which parts actually needed replacing.",
        ),
        (
            "Elena T.",
            "Renault Duster",
            4,
            (2024, 11, 5),
            "Winter tyre swap and storage in one visit. Booking through the messenger link was very convenient.",
        ),
    ];

    SAMPLES
        .iter()
        .filter_map(|&(author, vehicle, rating, (y, m, d), text)| {
            Some(Review {
                author: author.to_string(),
                vehicle: vehicle.to_string(),
                rating,
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                text: text.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_review_tables() {
        let toml = r#"
            [[review]]
            author = "Anna"
            vehicle = "Mazda 3"
            rating = 4
            date = "2023-09-01"
            text = "Quick and tidy."

            [[review]]
            author = "Boris"
            vehicle = "Ford Focus"
            rating = 5
            date = "2023-10-12"
            text = "Great."
        "#;
        let reviews = parse(toml, Path::new("reviews.toml")).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].author, "Anna");
        assert_eq!(reviews[0].stars(), "★★★★☆");
        assert_eq!(reviews[1].date_label(), "Oct 2023");
    }

    #[test]
    fn rejects_empty_and_out_of_range() {
        let path = Path::new("reviews.toml");
        assert!(matches!(parse("", path), Err(ReviewError::Empty(_))));

        let bad = r#"
            [[review]]
            author = "Zero"
            vehicle = "Any"
            rating = 0
            date = "2023-01-01"
            text = "-"
        "#;
        assert!(matches!(
            parse(bad, path),
            Err(ReviewError::BadRating { rating: 0, .. })
        ));
        assert!(matches!(
            parse("review = 3", path),
            Err(ReviewError::Parse { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ReviewError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn samples_are_valid() {
        let s = samples();
        assert_eq!(s.len(), 8);
        assert!(s.iter().all(|r| (1..=5).contains(&r.rating)));
    }
}
