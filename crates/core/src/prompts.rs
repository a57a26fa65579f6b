//! "Surprise me" prompt suggestions.

use rand::Rng;
use rand::seq::SliceRandom;

/// Prompts offered by the surprise-me button.
pub const SURPRISE_PROMPTS: &[&str] = &[
    "an armchair in the shape of an avocado",
    "a surrealist dream-like oil painting by Salvador Dalí of a cat playing checkers",
    "teddy bears shopping for groceries in Japan, ukiyo-e",
    "an oil painting by Matisse of a humanoid robot playing chess",
    "panda mad scientist mixing sparkling chemicals, digital art",
    "a macro 35mm photograph of two mice in Hawaii, they're each wearing tiny swimsuits and are carrying tiny surf boards, digital art",
    "3D render of a cute tropical fish in an aquarium on a dark blue background, digital art",
    "an astronaut lounging in a tropical resort in space, vaporwave",
    "an oil painting portrait of a capybara wearing medieval royal robes and an ornate crown on a dark background",
    "a stained glass window depicting a hamburger and french fries",
    "a pencil and watercolor drawing of a bright city in the future with flying cars",
    "a sunlit indoor lounge area with a pool with clear water and another pool with translucent pastel pink water, next to a big window, digital art",
    "a fortune-telling shiba inu reading your fate in a giant hamburger, digital art",
    "a lighthouse on a cliff at dawn, painted in the style of Studio Ghibli",
    "a fox wearing a knitted scarf reading a book under a paper lantern, soft pastel illustration",
    "a futuristic tea ceremony on the surface of the moon, cinematic lighting",
];

/// Returns a random surprise prompt that differs from `current`.
pub fn random_prompt(current: &str) -> String {
    random_prompt_with(&mut rand::thread_rng(), current)
}

/// Same as [`random_prompt`] with a caller supplied RNG.
pub fn random_prompt_with<R: Rng + ?Sized>(rng: &mut R, current: &str) -> String {
    let candidates: Vec<&str> = SURPRISE_PROMPTS
        .iter()
        .copied()
        .filter(|p| *p != current)
        .collect();

    candidates
        .choose(rng)
        .copied()
        .unwrap_or(SURPRISE_PROMPTS[0])
        .to_string()
}
