// Anime quotes shown in the header. A new one is drawn on every track change.

use rand::seq::IndexedRandom;
use rand::Rng;

pub const ANIME_QUOTES: &[&str] = &[
    "Believe it! - Naruto Uzumaki",
    "I am the bone of my sword - Emiya Shirou",
    "Plus Ultra! - All Might",
    "I'll become the Pirate King! - Monkey D. Luffy",
    "I am the hope of the universe! - Goku",
    "I am the shadow, the true self - Persona 5",
    "The world is cruel, but also beautiful - Attack on Titan",
    "I'll show you the power of a true hero! - My Hero Academia",
    "The only truth is music! - FLCL",
    "Music is the universal language! - Your Lie in April",
    "Let's make some noise! - Beck",
    "The rhythm of life! - Cowboy Bebop",
    "Feel the beat! - Initial D",
    "Channel your chakra! - Naruto",
    "Never give up! - One Piece",
];

#[derive(Debug, Clone)]
pub struct QuoteBook {
    quotes: &'static [&'static str],
    current: &'static str,
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteBook {
    pub fn new() -> Self {
        Self {
            quotes: ANIME_QUOTES,
            current: ANIME_QUOTES[0],
        }
    }

    pub fn current(&self) -> &'static str {
        self.current
    }

    /// Pick a new current quote.
    pub fn draw(&mut self, rng: &mut impl Rng) -> &'static str {
        if let Some(q) = self.quotes.choose(rng) {
            self.current = q;
        }
        self.current
    }

    pub fn all(&self) -> &'static [&'static str] {
        self.quotes
    }
}
