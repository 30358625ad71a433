//! Vietnamese collation for native region names.
//!
//! Names are compared level by level:
//!
//! 1. base letters in Vietnamese alphabet order, where `ă`, `â`, `đ`, `ê`,
//!    `ô`, `ơ` and `ư` are letters of their own
//! 2. tone marks: level, grave, hook, tilde, acute, dot below
//! 3. case, lowercase first
//!
//! Whitespace sorts before punctuation, punctuation before digits, digits
//! before letters. Letters outside the alphabet follow it in code point
//! order. Names equal at every level fall back to a plain string comparison
//! so the ordering is total.

use core::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

const ALPHABET: &[(char, Modifier)] = &[
    ('a', Modifier::None),
    ('a', Modifier::Breve),
    ('a', Modifier::Circumflex),
    ('b', Modifier::None),
    ('c', Modifier::None),
    ('d', Modifier::None),
    ('đ', Modifier::None),
    ('e', Modifier::None),
    ('e', Modifier::Circumflex),
    ('f', Modifier::None),
    ('g', Modifier::None),
    ('h', Modifier::None),
    ('i', Modifier::None),
    ('j', Modifier::None),
    ('k', Modifier::None),
    ('l', Modifier::None),
    ('m', Modifier::None),
    ('n', Modifier::None),
    ('o', Modifier::None),
    ('o', Modifier::Circumflex),
    ('o', Modifier::Horn),
    ('p', Modifier::None),
    ('q', Modifier::None),
    ('r', Modifier::None),
    ('s', Modifier::None),
    ('t', Modifier::None),
    ('u', Modifier::None),
    ('u', Modifier::Horn),
    ('v', Modifier::None),
    ('w', Modifier::None),
    ('x', Modifier::None),
    ('y', Modifier::None),
    ('z', Modifier::None),
];

// Primary weight bands.
const SPACE: u32 = 0;
const PUNCT: u32 = 0x0010_0000;
const DIGIT: u32 = 0x0030_0000;
const LETTER: u32 = 0x0040_0000;
const OTHER_LETTER: u32 = 0x0050_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Modifier {
    None,
    Breve,
    Circumflex,
    Horn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Tone {
    #[default]
    Level,
    Grave,
    Hook,
    Tilde,
    Acute,
    DotBelow,
}

/// One base character with the marks that followed it after decomposition.
struct Cluster {
    base: char,
    modifier: Modifier,
    tone: Tone,
    // Marks that are neither a Vietnamese letter modifier nor a tone.
    extra: Vec<char>,
}

/// Sort key for a single string. Comparing two keys orders their strings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<(Tone, Vec<char>)>,
    tertiary: Vec<bool>,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let clusters = clusters(text);
        let mut primary = Vec::with_capacity(clusters.len());
        let mut secondary = Vec::with_capacity(clusters.len());
        let mut tertiary = Vec::with_capacity(clusters.len());

        for cluster in clusters {
            let lower = cluster.base.to_lowercase().next().unwrap_or(cluster.base);
            primary.push(primary_weight(lower, cluster.modifier));
            secondary.push((cluster.tone, cluster.extra));
            tertiary.push(cluster.base != lower);
        }

        Self {
            primary,
            secondary,
            tertiary,
        }
    }
}

/// Compares two strings under Vietnamese collation.
///
/// ```
/// use regid::compare_vietnamese;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_vietnamese("Hà Nam", "Hà Nội"), Ordering::Less);
/// assert_eq!(compare_vietnamese("Đồng Tháp", "Điện Biên"), Ordering::Greater);
/// assert_eq!(compare_vietnamese("Đà Nẵng", "Gia Lai"), Ordering::Less);
/// ```
pub fn compare_vietnamese(a: &str, b: &str) -> Ordering {
    CollationKey::new(a)
        .cmp(&CollationKey::new(b))
        .then_with(|| a.cmp(b))
}

/// Stable-sorts `items` by the Vietnamese collation of `key`.
pub fn sort_vietnamese_by<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| {
        let text = key(item);
        (CollationKey::new(text), text.to_owned())
    });
}

fn clusters(text: &str) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for ch in text.nfd() {
        let (Some(mark), Some(cluster)) = (classify_mark(ch), clusters.last_mut()) else {
            // Base characters, and marks with nothing to attach to, start a
            // new cluster.
            clusters.push(Cluster {
                base: ch,
                modifier: Modifier::None,
                tone: Tone::Level,
                extra: Vec::new(),
            });
            continue;
        };
        match mark {
            Mark::Modifier(modifier) if cluster.modifier == Modifier::None => {
                cluster.modifier = modifier;
            }
            Mark::Tone(tone) if cluster.tone == Tone::Level => cluster.tone = tone,
            _ => cluster.extra.push(ch),
        }
    }
    clusters
}

enum Mark {
    Modifier(Modifier),
    Tone(Tone),
    Other,
}

fn classify_mark(ch: char) -> Option<Mark> {
    let mark = match ch {
        '\u{0306}' => Mark::Modifier(Modifier::Breve),
        '\u{0302}' => Mark::Modifier(Modifier::Circumflex),
        '\u{031B}' => Mark::Modifier(Modifier::Horn),
        '\u{0300}' => Mark::Tone(Tone::Grave),
        '\u{0309}' => Mark::Tone(Tone::Hook),
        '\u{0303}' => Mark::Tone(Tone::Tilde),
        '\u{0301}' => Mark::Tone(Tone::Acute),
        '\u{0323}' => Mark::Tone(Tone::DotBelow),
        ch if unicode_normalization::char::is_combining_mark(ch) => Mark::Other,
        _ => return None,
    };
    Some(mark)
}

fn primary_weight(lower: char, modifier: Modifier) -> u32 {
    if let Some(rank) = ALPHABET
        .iter()
        .position(|&(base, m)| base == lower && m == modifier)
    {
        return LETTER + rank as u32;
    }
    // A modifier that doesn't form a Vietnamese letter (e.g. `ŭ`) sorts with
    // its base letter.
    if let Some(rank) = ALPHABET
        .iter()
        .position(|&(base, m)| base == lower && m == Modifier::None)
    {
        return LETTER + rank as u32;
    }
    if lower.is_whitespace() {
        SPACE
    } else if lower.is_ascii_digit() {
        DIGIT + lower as u32
    } else if lower.is_alphabetic() {
        OTHER_LETTER + lower as u32
    } else {
        PUNCT + lower as u32
    }
}
