//! Deterministic top-N reports.
//!
//! Every ranking orders by score (highest first), then by the position at
//! which the item first appeared in the input stream, then lexicographically.

use std::collections::HashMap;
use std::hash::Hash;

/// Guards `ln(0)` in the likelihood-ratio sum.
const SMALL: f64 = 1e-20;

struct Tally {
    count: u64,
    first_seen: usize,
}

fn tally<T, I>(items: I) -> HashMap<T, Tally>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, Tally> = HashMap::new();
    for (position, item) in items.into_iter().enumerate() {
        counts
            .entry(item)
            .or_insert(Tally {
                count: 0,
                first_seen: position,
            })
            .count += 1;
    }
    counts
}

/// The `n` most frequent items with their counts.
pub fn most_common<'a, I>(items: I, n: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<(&str, Tally)> = tally(items).into_iter().collect();
    ranked.sort_by(|(a, ta), (b, tb)| {
        tb.count
            .cmp(&ta.count)
            .then(ta.first_seen.cmp(&tb.first_seen))
            .then(a.cmp(b))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|(item, t)| (item.to_string(), t.count))
        .collect()
}

/// The `n` adjacent pairs of `tokens` with the highest Dunning
/// log-likelihood association score.
pub fn top_bigrams_by_likelihood(tokens: &[String], n: usize) -> Vec<(String, String)> {
    if tokens.len() < 2 || n == 0 {
        return Vec::new();
    }

    let unigrams = tally(tokens.iter().map(String::as_str));
    let pairs = tally(tokens.windows(2).map(|w| (w[0].as_str(), w[1].as_str())));
    let total = tokens.len() as f64;

    let mut scored: Vec<((&str, &str), f64, usize)> = pairs
        .iter()
        .map(|(&(first, second), t)| {
            let first_count = unigrams.get(first).map_or(0, |u| u.count);
            let second_count = unigrams.get(second).map_or(0, |u| u.count);
            let score = likelihood_ratio(t.count, first_count, second_count, total);
            ((first, second), score, t.first_seen)
        })
        .collect();

    scored.sort_by(|(pa, sa, fa), (pb, sb, fb)| {
        sb.total_cmp(sa).then(fa.cmp(fb)).then(pa.cmp(pb))
    });

    scored
        .into_iter()
        .take(n)
        .map(|((first, second), _, _)| (first.to_string(), second.to_string()))
        .collect()
}

/// Log-likelihood ratio over the 2x2 contingency table of a bigram.
fn likelihood_ratio(pair: u64, first: u64, second: u64, total: f64) -> f64 {
    let n_ii = pair as f64;
    let n_oi = second as f64 - n_ii;
    let n_io = first as f64 - n_ii;
    let n_oo = total - n_ii - n_oi - n_io;
    let observed = [n_ii, n_oi, n_io, n_oo];

    let expected = [
        (n_ii + n_oi) * (n_ii + n_io) / total,
        (n_oi + n_ii) * (n_oi + n_oo) / total,
        (n_io + n_oo) * (n_io + n_ii) / total,
        (n_oo + n_io) * (n_oo + n_oi) / total,
    ];

    2.0 * observed
        .iter()
        .zip(expected.iter())
        .map(|(obs, exp)| obs * (obs / (exp + SMALL) + SMALL).ln())
        .sum::<f64>()
}
