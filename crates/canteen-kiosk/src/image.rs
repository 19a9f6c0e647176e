//! Image references for dishes. The URL is a prompt for an external image generator; the
//! kiosk only builds it.
use rand::Rng;

const PROMPT_PREFIX: &str = "https://image.pollinations.ai/prompt/delicious%20indian%20food%20";
const PROMPT_SUFFIX: &str = "%20close%20up%20high%20quality?width=800&height=600&nologo=true";

/// Keeps ASCII letters, digits and spaces.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// The cleaned name as it appears inside the URL.
pub fn encoded_name(name: &str) -> String {
    clean_name(name).replace(' ', "%20")
}

pub fn image_url(name: &str, seed: u32) -> String {
    format!(
        "{PROMPT_PREFIX}{}{PROMPT_SUFFIX}&seed={seed}",
        encoded_name(name)
    )
}

/// [`image_url`] with a random seed below 1000.
pub fn random_image_url(name: &str) -> String {
    image_url(name, rand::thread_rng().gen_range(0..1000))
}

/// Whether `url` was generated for `name`.
pub fn embeds_name(url: &str, name: &str) -> bool {
    url.contains(&encoded_name(name))
}
