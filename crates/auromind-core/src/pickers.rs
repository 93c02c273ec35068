use rand::seq::SliceRandom;

pub const AFFIRMATIONS: [&str; 10] = [
    "I am worthy of love and respect.",
    "I trust my journey and am open to the lessons life offers me.",
    "I am resilient and can handle whatever comes my way.",
    "My potential is limitless, and I can achieve my goals.",
    "I am enough just as I am right now.",
    "I choose to focus on what I can control.",
    "I am growing and learning every day.",
    "I deserve peace and happiness in my life.",
    "My thoughts and feelings are valid.",
    "I am capable of overcoming challenges.",
];

pub const JOKES: [&str; 10] = [
    "Why don't scientists trust atoms? Because they make up everything!",
    "What did the ocean say to the beach? Nothing, it just waved.",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "I told my wife she was drawing her eyebrows too high. She looked surprised.",
    "How does a penguin build its house? Igloos it together!",
    "Why don't eggs tell jokes? They'd crack each other up.",
    "What's the best thing about Switzerland? I don't know, but the flag is a big plus.",
    "I'm reading a book about anti-gravity. It's impossible to put down!",
    "Did you hear about the mathematician who's afraid of negative numbers? He'll stop at nothing to avoid them.",
    "Why did the bicycle fall over? Because it was two-tired!",
];

pub fn random_affirmation() -> &'static str {
    pick(&AFFIRMATIONS)
}

pub fn random_joke() -> &'static str {
    pick(&JOKES)
}

fn pick(lines: &[&'static str]) -> &'static str {
    lines.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}
