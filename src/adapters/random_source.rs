use crate::adapters::pattern::expand_pattern;
use crate::domain::{RandomSource, StringOptions};
use chrono::{DateTime, Utc};
use fake::faker::internet::en::{DomainSuffix, IPv4, SafeEmail};
use fake::faker::lorem::en::{Sentence, Word, Words};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYMBOLS: &[u8] = b"!@#$%^&*()[]";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// [`RandomSource`] backed by `fake` generators over a seedable `StdRng`.
pub struct FakerRandomSource {
    rng: StdRng,
    default_string_length: usize,
}

impl Default for FakerRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakerRandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            default_string_length: 16,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            default_string_length: 16,
        }
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Length used by [`RandomSource::string`] when none is requested.
    pub fn default_string_length(mut self, length: usize) -> Self {
        self.default_string_length = length.max(1);
        self
    }

    fn pick(&mut self, pool: &[u8]) -> char {
        pool[self.rng.gen_range(0..pool.len())] as char
    }
}

impl RandomSource for FakerRandomSource {
    fn sentence(&mut self) -> String {
        Sentence(3..10).fake_with_rng(&mut self.rng)
    }

    fn sentence_of(&mut self, words: usize) -> String {
        if words == 0 {
            return String::new();
        }
        let words: Vec<String> = Words(words..words + 1).fake_with_rng(&mut self.rng);
        let mut sentence = words.join(" ");
        sentence.push('.');
        sentence
    }

    fn word(&mut self, length: usize) -> String {
        let mut out = String::with_capacity(length);
        while out.len() < length {
            let word: String = Word().fake_with_rng(&mut self.rng);
            out.extend(word.chars().filter(char::is_ascii_lowercase));
        }
        out.truncate(length);
        out
    }

    fn string(&mut self, options: StringOptions) -> String {
        let length = match options.length {
            Some(length) => length,
            None => self.rng.gen_range(1..=self.default_string_length),
        };
        let pool = if options.symbols { SYMBOLS } else { ALPHANUMERIC };
        (0..length).map(|_| self.pick(pool)).collect()
    }

    fn integer(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn boolean(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn date_between(&mut self, min: DateTime<Utc>, max: DateTime<Utc>) -> DateTime<Utc> {
        let secs = self.integer(min.timestamp(), max.timestamp());
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(min)
    }

    fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.rng)
    }

    fn ip(&mut self) -> String {
        IPv4().fake_with_rng(&mut self.rng)
    }

    fn domain(&mut self) -> String {
        let length = self.rng.gen_range(4..=10);
        let label = self.word(length);
        let suffix: String = DomainSuffix().fake_with_rng(&mut self.rng);
        format!("{}.{}", label, suffix)
    }

    fn guid(&mut self) -> String {
        uuid::Builder::from_random_bytes(self.rng.gen())
            .into_uuid()
            .to_string()
    }

    fn string_matching(&mut self, pattern: &str) -> String {
        expand_pattern(pattern, &mut self.rng)
    }
}
