//! OCR-style degradation for generated documents and page text.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use verity_core::{JsonMap, JsonValue};

use super::GeneratorConfig;

/// Character pairs OCR engines habitually confuse.
const CONFUSABLE: &[(char, char)] = &[
    ('0', 'O'),
    ('O', '0'),
    ('1', 'l'),
    ('l', '1'),
    ('5', 'S'),
    ('S', '5'),
    ('8', 'B'),
    ('B', '8'),
    ('2', 'Z'),
    ('Z', '2'),
    ('g', 'q'),
    ('e', 'c'),
];

const STRAY_ITEMS: &[&str] = &["1 x misc @ 0.00", "smudged line", "-- -- --"];

const JUNK_FIELD_VALUES: &[&str] = &["n/a", "", "-", "see attached"];

struct Rates {
    drop: f64,
    mutate: f64,
    insert: f64,
    null_array: f64,
    roughen: f64,
}

impl Rates {
    fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            drop: config.field_drop_rate.clamp(0.0, 1.0),
            mutate: config.mutation_rate.clamp(0.0, 1.0),
            insert: config.insertion_rate.clamp(0.0, 1.0),
            null_array: config.null_array_rate.clamp(0.0, 1.0),
            roughen: config.case_noise_rate.clamp(0.0, 1.0),
        }
    }
}

/// Produces a degraded copy of `document`: fields dropped, scalars misread,
/// junk fields invented, arrays nulled out or reshuffled with item noise.
pub fn apply_document_noise(
    document: &JsonValue,
    config: &GeneratorConfig,
    rng: &mut StdRng,
) -> JsonValue {
    let rates = Rates::from_config(config);
    let mut changes = 0usize;
    let mut noised = noise_value(document, &rates, rng, &mut changes);
    if changes == 0 {
        // Guarantee at least one structural edit so a generated pair never
        // collapses to the identical-document case.
        force_one_change(&mut noised, rng);
    }
    noised
}

fn noise_value(
    value: &JsonValue,
    rates: &Rates,
    rng: &mut StdRng,
    changes: &mut usize,
) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut out = JsonMap::new();
            for (key, child) in map {
                if rng.gen_bool(rates.drop) {
                    *changes += 1;
                    continue;
                }
                let noised = match child {
                    JsonValue::Object(_) => noise_value(child, rates, rng, changes),
                    JsonValue::Array(items) => {
                        if rng.gen_bool(rates.null_array) {
                            *changes += 1;
                            JsonValue::Null
                        } else {
                            noise_items(items, rates, rng)
                        }
                    }
                    JsonValue::Null
                    | JsonValue::Bool(_)
                    | JsonValue::Integer(_)
                    | JsonValue::UnsignedInteger(_)
                    | JsonValue::Float(_)
                    | JsonValue::String(_) => {
                        if rng.gen_bool(rates.mutate) {
                            *changes += 1;
                            mutate_scalar(child, rng)
                        } else {
                            child.clone()
                        }
                    }
                };
                out.insert(key.clone(), noised);
                if rng.gen_bool(rates.insert) {
                    let invented = format!("{key}_2");
                    if !map.contains_key(&invented) && !out.contains_key(&invented) {
                        *changes += 1;
                        out.insert(invented, junk_scalar(rng));
                    }
                }
            }
            JsonValue::Object(out)
        }
        JsonValue::Array(items) => noise_items(items, rates, rng),
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::Integer(_)
        | JsonValue::UnsignedInteger(_)
        | JsonValue::Float(_)
        | JsonValue::String(_) => value.clone(),
    }
}

/// Item-level noise inside an array. None of it counts as a structural
/// change: array contents are judged by the order-independent matcher,
/// not by the field diff.
fn noise_items(items: &[JsonValue], rates: &Rates, rng: &mut StdRng) -> JsonValue {
    let mut out = Vec::with_capacity(items.len() + 1);
    for item in items {
        if rng.gen_bool(rates.drop) {
            continue;
        }
        if rng.gen_bool(rates.mutate) {
            out.push(mutate_scalar(item, rng));
        } else if rng.gen_bool(rates.roughen) {
            out.push(roughen_item(item, rng));
        } else {
            out.push(item.clone());
        }
    }
    if rng.gen_bool(rates.insert) {
        out.push(JsonValue::String(
            STRAY_ITEMS[rng.gen_range(0..STRAY_ITEMS.len())].to_owned(),
        ));
    }
    out.shuffle(rng);
    JsonValue::Array(out)
}

/// Rewrites a scalar into a plausible misread. The result always differs
/// from the input; containers pass through untouched since noise on them
/// is handled structurally.
fn mutate_scalar(value: &JsonValue, rng: &mut StdRng) -> JsonValue {
    match value {
        JsonValue::String(s) => {
            JsonValue::String(swap_confusable(s).unwrap_or_else(|| format!("{s}~")))
        }
        JsonValue::Integer(i) => JsonValue::Integer(i.wrapping_add(rng.gen_range(1..10))),
        JsonValue::UnsignedInteger(u) => {
            JsonValue::UnsignedInteger(u.wrapping_add(rng.gen_range(1..10)))
        }
        JsonValue::Float(f) => JsonValue::Float(*f + f64::from(rng.gen_range(1..100)) / 100.0),
        JsonValue::Bool(b) => JsonValue::Bool(!*b),
        JsonValue::Null => JsonValue::String("n/a".to_owned()),
        JsonValue::Array(_) | JsonValue::Object(_) => value.clone(),
    }
}

/// Case and padding noise that trimmed, case-insensitive matching forgives
/// and strict matching punishes.
fn roughen_item(item: &JsonValue, rng: &mut StdRng) -> JsonValue {
    match item {
        JsonValue::String(s) => {
            if rng.gen_bool(0.5) {
                JsonValue::String(s.to_uppercase())
            } else {
                JsonValue::String(format!(" {s}  "))
            }
        }
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::Integer(_)
        | JsonValue::UnsignedInteger(_)
        | JsonValue::Float(_)
        | JsonValue::Array(_)
        | JsonValue::Object(_) => item.clone(),
    }
}

fn junk_scalar(rng: &mut StdRng) -> JsonValue {
    match rng.gen_range(0..3) {
        0 => JsonValue::Integer(0),
        1 => JsonValue::Bool(false),
        _ => JsonValue::String(JUNK_FIELD_VALUES[rng.gen_range(0..JUNK_FIELD_VALUES.len())].to_owned()),
    }
}

/// Swaps the first confusable character, if the string has one.
fn swap_confusable(s: &str) -> Option<String> {
    for (i, c) in s.char_indices() {
        if let Some((_, to)) = CONFUSABLE.iter().find(|(from, _)| *from == c) {
            let mut swapped = String::with_capacity(s.len());
            swapped.push_str(&s[..i]);
            swapped.push(*to);
            swapped.push_str(&s[i + c.len_utf8()..]);
            return Some(swapped);
        }
    }
    None
}

/// Mutates the first scalar found under `value`. Arrays are skipped since
/// they never show up in the structural diff.
fn force_one_change(value: &mut JsonValue, rng: &mut StdRng) -> bool {
    match value {
        JsonValue::Object(map) => {
            for child in map.values_mut() {
                if force_one_change(child, rng) {
                    return true;
                }
            }
            false
        }
        JsonValue::Array(_) => false,
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::Integer(_)
        | JsonValue::UnsignedInteger(_)
        | JsonValue::Float(_)
        | JsonValue::String(_) => {
            *value = mutate_scalar(value, rng);
            true
        }
    }
}

/// Runs every character through a scanner: most survive, some get confused,
/// dropped, or doubled. The result always differs from the input, even when
/// the random edits would otherwise cancel out.
pub fn apply_text_noise(text: &str, config: &GeneratorConfig, rng: &mut StdRng) -> String {
    let error_p = config.text_error_rate.clamp(0.0, 1.0);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !rng.gen_bool(error_p) {
            out.push(c);
            continue;
        }
        match rng.gen_range(0..3) {
            0 => out.push(confuse(c)),
            1 => {}
            _ => {
                out.push(c);
                out.push(c);
            }
        }
    }
    if out == text {
        out.push('~');
    }
    out
}

fn confuse(c: char) -> char {
    CONFUSABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or('#')
}
