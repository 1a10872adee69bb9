use rand::seq::SliceRandom;
use rand::Rng;

pub const SURPRISE_ME: &str = "Surprise me";
pub const RANDOM: &str = "Random";

pub const TRENDING_TOPICS: [&str; 9] = [
    RANDOM,
    SURPRISE_ME,
    "Cat memes",
    "Distracted dog",
    "NFSW",
    "Shaun The Sheep",
    "Change My Mind",
    "sus world",
    "MafuMafu",
];

/// Picked from when the "Random" topic is chosen.
pub const RANDOM_TOPICS: [&str; 6] = [
    "funny",
    "relatable",
    "programming",
    "exam",
    "tamil",
    "monday meme",
];

/// Turns a clicked topic into the query to search for.
///
/// "Surprise me" picks any other trending topic (which may be "Random" itself,
/// searched literally), "Random" picks one of [`RANDOM_TOPICS`]; anything else
/// is returned as-is.
pub fn resolve_topic<R: Rng + ?Sized>(topic: &str, rng: &mut R) -> String {
    let choice = match topic {
        SURPRISE_ME => {
            let others: Vec<&str> = TRENDING_TOPICS
                .iter()
                .copied()
                .filter(|t| *t != SURPRISE_ME)
                .collect();
            others.choose(rng).copied()
        }
        RANDOM => RANDOM_TOPICS.choose(rng).copied(),
        _ => None,
    };
    choice.unwrap_or(topic).to_string()
}
