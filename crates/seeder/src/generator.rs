use chrono::{Duration, NaiveDate};
use core_types::NewBook;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amara", "Beatrice", "Bruno", "Carmen", "Cedric", "Clara", "Damian",
    "Diana", "Eli", "Elena", "Felix", "Fiona", "Gabriel", "Grace", "Hector", "Helena", "Ivan",
    "Iris", "Jonah", "Julia", "Kai", "Katherine", "Leo", "Lena", "Marcus", "Maya", "Nadia",
    "Nathan", "Olivia", "Oscar", "Priya", "Quentin", "Rosa", "Samuel", "Sofia", "Theo", "Ursula",
    "Victor", "Wendy", "Xavier", "Yara", "Zane",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Baker", "Castillo", "Dawson", "Ellison", "Fischer", "Garcia", "Hale", "Ibarra",
    "Jensen", "Kowalski", "Larsen", "Moreno", "Nakamura", "Okafor", "Petrov", "Quinn", "Rossi",
    "Schmidt", "Tanaka", "Underwood", "Vance", "Walsh", "Xu", "Young", "Zimmerman", "Brooks",
    "Chen", "Delgado", "Ferreira",
];

const WORDS: &[&str] = &[
    "about", "across", "after", "again", "against", "air", "always", "among", "answer", "autumn",
    "bird", "body", "bright", "bring", "broken", "city", "close", "cold", "country", "course",
    "dark", "dawn", "deep", "distant", "door", "dream", "early", "earth", "evening", "every",
    "field", "fire", "follow", "forest", "garden", "glass", "green", "ground", "half", "heart",
    "hidden", "history", "house", "island", "journey", "keep", "kind", "land", "last", "letter",
    "light", "little", "long", "machine", "memory", "mind", "moon", "morning", "mountain", "music",
    "never", "night", "north", "ocean", "open", "paper", "past", "people", "quiet", "rain",
    "river", "road", "room", "salt", "season", "second", "shadow", "silent", "small", "song",
    "south", "stone", "story", "summer", "table", "thousand", "together", "under", "voice",
    "wait", "water", "wild", "window", "winter", "without", "wonder", "word", "world", "year",
];

/// Shortest and longest generated title, in words.
const SENTENCE_WORDS: (usize, usize) = (4, 9);

/// Produces schema-valid synthetic authors and books.
pub struct FakeData<R: Rng> {
    rng: R,
    earliest: NaiveDate,
    latest: NaiveDate,
}

impl<R: Rng> FakeData<R> {
    /// Dates are drawn between 1970-01-01 and `today`, inclusive.
    pub fn new(rng: R, today: NaiveDate) -> Self {
        let earliest = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        Self {
            rng,
            earliest,
            latest: today.max(earliest),
        }
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        words[self.rng.gen_range(0..words.len())]
    }

    /// A first and last name, e.g. "Nadia Okafor".
    pub fn name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    /// A capitalized sentence ending in a period, e.g. "Quiet river under stone.".
    pub fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(SENTENCE_WORDS.0..=SENTENCE_WORDS.1);
        let words: Vec<&str> = (0..count).map(|_| self.pick(WORDS)).collect();

        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    pub fn date(&mut self) -> NaiveDate {
        let span = (self.latest - self.earliest).num_days();
        self.earliest + Duration::days(self.rng.gen_range(0..=span))
    }

    pub fn book(&mut self) -> NewBook {
        NewBook {
            title: self.sentence(),
            published_date: self.date(),
        }
    }

    pub fn books(&mut self, count: usize) -> Vec<NewBook> {
        (0..count).map(|_| self.book()).collect()
    }
}
