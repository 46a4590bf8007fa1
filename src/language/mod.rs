pub mod farewell;
pub mod words;

use crate::error::AppError;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub use farewell::{FarewellText, RandomFarewell};
pub use words::{FixedWord, RandomWord, WordProvider};

pub(crate) static DATA_DIR: Dir = include_dir!("src/data");

const LANGUAGES_FILE: &str = "languages.json";

/// 24-bit display color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #RRGGBB, got {s:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{s:?}: {e}"))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

fn deserialize_rgb<'de, D>(deserializer: D) -> Result<Rgb, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// One chip in the language bar. The list order is also the order in which
/// languages are lost: a wrong guess costs the next language in line.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    #[serde(deserialize_with = "deserialize_rgb")]
    pub color: Rgb,
    #[serde(deserialize_with = "deserialize_rgb")]
    pub background_color: Rgb,
}

impl Language {
    /// A language at `index` is lost once that many wrong guesses were made.
    pub fn is_lost_at(index: usize, wrong_guess_count: usize) -> bool {
        index < wrong_guess_count
    }
}

/// Load the embedded language list.
pub fn load_languages() -> Result<Vec<Language>, AppError> {
    let file = DATA_DIR
        .get_file(LANGUAGES_FILE)
        .ok_or_else(|| AppError::DataMissing(LANGUAGES_FILE.to_string()))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| AppError::data_invalid(LANGUAGES_FILE, "not valid UTF-8"))?;
    parse_languages(contents)
}

fn parse_languages(json: &str) -> Result<Vec<Language>, AppError> {
    let languages: Vec<Language> = serde_json::from_str(json)?;
    // The last language is the one that survives until the final wrong guess,
    // so there must be at least one language to lose.
    if languages.len() < 2 {
        return Err(AppError::data_invalid(
            LANGUAGES_FILE,
            "at least two languages are required",
        ));
    }
    Ok(languages)
}
