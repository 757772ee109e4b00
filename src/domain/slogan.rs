//! Built-in boot slogans.
//!
//! A small pool of savings wisdom shown once at boot when enabled. The
//! picker is deterministic in its seed so the choice can be driven by the
//! boot timestamp without pulling in a random number generator.

/// The slogan pool.
pub const SLOGANS: &[&str] = &[
    "A penny saved is a penny earned.",
    "Little by little, a little becomes a lot.",
    "Do not save what is left after spending; spend what is left after saving.",
    "A fool and his money are soon parted.",
    "He who buys what he does not need steals from himself.",
    "Beware of little expenses; a small leak will sink a great ship.",
    "The habit of saving is itself an education.",
    "Stack by stack, the pile grows.",
];

/// Pick a slogan for the given seed.
#[must_use]
pub fn pick_slogan(seed: u64) -> &'static str {
    SLOGANS[(seed % SLOGANS.len() as u64) as usize]
}
