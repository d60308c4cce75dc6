//! Finalization: state scrambling and the width fold
//!
//! Finalization runs in two phases. The first scrambles the four lanes into
//! each other and injects the input length, so every output word depends on
//! every state word. The second folds the `4 * N` state words down to the
//! digest width.

use crate::digest::Digest;
use crate::params::{LANES, MAX_DIGEST_WORDS};
use crate::primitives::{add, mix, mix_with};
use crate::state::HashState;

/// Finish the hash of an input of `len` bytes.
pub(crate) fn finalize(state: &mut HashState, len: usize) -> Digest {
    scramble(state, len);
    fold(state)
}

/// Length injection, cross-lane propagation and the lane mix.
fn scramble(state: &mut HashState, len: usize) {
    let n = state.register_words();
    let [h1, h2, h3, h4] = state.lanes_mut();

    // Only the low 31 bits of the length take part.
    let lenc = mix((len & 0x7fff_ffff) as u32);
    for lane in [&mut *h1, &mut *h2, &mut *h3, &mut *h4] {
        lane.iter_mut().for_each(|w| *w ^= lenc);
    }

    // Forward propagation: word 0 of each lane soaks up its successor lane,
    // and is fed back into every word on the way.
    for j in 1..n {
        h1[0] = add(h1[0], h2[j]);
        h2[0] = add(h2[0], h3[j]);
        h3[0] = add(h3[0], h4[j]);
        h4[0] = add(h4[0], h1[j]);

        h1[j] = add(h1[j], h2[0]);
        h2[j] = add(h2[j], h3[0]);
        h3[j] = add(h3[j], h4[0]);
        h4[j] = add(h4[j], h1[0]);
    }

    // Gather, mix, gather. Everything here is word-local.
    for j in 0..n {
        let (mut a, mut b, mut c, mut d) = (h1[j], h2[j], h3[j], h4[j]);
        gather(&mut a, &mut b, &mut c, &mut d);
        a = mix_with(a, c);
        b = mix_with(b, d);
        c = mix_with(c, a);
        d = mix_with(d, b);
        gather(&mut a, &mut b, &mut c, &mut d);
        (h1[j], h2[j], h3[j], h4[j]) = (a, b, c, d);
    }

    // Backward propagation, predecessor lane this time.
    for j in 1..n {
        h1[0] = add(h1[0], h4[j]);
        h2[0] = add(h2[0], h1[j]);
        h3[0] = add(h3[0], h2[j]);
        h4[0] = add(h4[0], h3[j]);

        h1[j] = add(h1[j], h4[0]);
        h2[j] = add(h2[j], h1[0]);
        h3[j] = add(h3[j], h2[0]);
        h4[j] = add(h4[j], h3[0]);
    }
}

#[inline(always)]
fn gather(a: &mut u32, b: &mut u32, c: &mut u32, d: &mut u32) {
    *a = add(add(add(*a, *b), *c), *d);
    *b = add(*b, *a);
    *c = add(*c, *a);
    *d = add(*d, *a);
}

/// Fold the scrambled state down to the digest.
///
/// The state is viewed as `L` equal chunks (`L` = logical state words,
/// never below 4), laid out lane after lane. Provisional word `i` combines
/// chunk `i` with the chunk half the ring away, reading the second one
/// backwards. The provisional words are then halved pairwise until only
/// the digest words are left.
fn fold(state: &HashState) -> Digest {
    let width = state.width();
    let n = state.register_words();
    let logical = width.logical_state_words();
    let chunk = LANES * n / logical;
    let per_lane = logical / LANES;
    let half = logical / 2;

    let lanes = state.lanes();
    let word = |k: usize, j: usize| lanes[k / per_lane][(k % per_lane) * chunk + j];

    let mut words = [0u32; MAX_DIGEST_WORDS];
    for (i, out) in words.iter_mut().enumerate().take(logical) {
        *out = (0..chunk).fold(0, |acc, j| {
            let x = word((i + j) % logical, j);
            let y = word((i + j + half) % logical, chunk - 1 - j);
            acc ^ mix(x ^ y)
        });
    }

    let mut count = logical;
    while count > width.digest_words() {
        for i in 0..count / 2 {
            words[i] = mix_with(words[i], words[count - 1 - i]);
        }
        count /= 2;
    }

    Digest::from_words(width, &words[..width.digest_words()])
}
