//! Tests for the VectorHash algorithm

use proptest::prelude::*;

use crate::block::Blocks;
use crate::lanes::portable::Portable;
use crate::primitives::pad_block;
use crate::round;
use crate::state::HashState;
use crate::{
    Capabilities, DEFAULT_SEED, Digest, Error, Tier, TierRequest, VectorHash, Width, add, hash,
    hash_bits, hash_with, mix, mix_with, select_tier,
};

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// 64-byte aligned scratch buffer, large enough for several 1024-bit blocks
/// plus an offset.
#[repr(C, align(64))]
struct Aligned([u8; 8192 + 64]);

impl Aligned {
    fn filled(pattern: impl Fn(usize) -> u8) -> Self {
        let mut buf = Aligned([0u8; 8192 + 64]);
        for (i, b) in buf.0.iter_mut().enumerate() {
            *b = pattern(i);
        }
        buf
    }
}

fn pattern(i: usize) -> u8 {
    (i.wrapping_mul(131).wrapping_add(7) & 0xff) as u8
}

fn generated(len: usize) -> Vec<u8> {
    (0..len).map(pattern).collect()
}

#[test]
fn test_known_vectors_empty_input() {
    let expected = [
        (Width::W32, "7647d9bd"),
        (Width::W64, "73711a77d6031b6f"),
        (Width::W128, "fe82e7d9998e9819c7ac954ea0a0ea8e"),
        (
            Width::W256,
            "c87638f19f1778d7ee03dddc5c6677fd0701e532d311bfffddfc21c0ece8910a",
        ),
        (
            Width::W512,
            "280f647d93f843b75627cc8c437084e2668a3cd9e077a2cf3186c67c990983c2\
             8ff8180187d362a79cb02cb49ba350a5e185e0050fc273e836b1db30571cfa66",
        ),
        (
            Width::W1024,
            "c38bd292e55400931e47f4397b5266b3e143ffd918fb944c33ad908458a08c62\
             65e9c28007bf68301ab6f68c82ddcc2fa993ad69556b9ab4d588594ac4d02b5d\
             dd083a4cf1418b6522f06bff90a67bf93faaa719e1dbdbda3592deddbd1a8378\
             f0993653e73c292f338729c1efe01b352e90ed9a0ae01e613ad72736db619b2d",
        ),
    ];

    for (width, hex) in expected {
        let digest = hash(b"", DEFAULT_SEED, width);
        assert_eq!(digest.to_hex(), hex, "empty input vector mismatch for {width}");
    }
}

#[test]
fn test_regression_vectors_generated_input() {
    // Input byte i = (i * 131 + 7) mod 256
    let expected = [
        (1, Width::W32, "e129304c"),
        (1, Width::W64, "f34c8bc5d14aa004"),
        (1, Width::W128, "93f4342b0b93f4e9f79c9cbd6ffb5c7f"),
        (63, Width::W32, "bd961950"),
        (63, Width::W64, "96a52c8b9d702bec"),
        (
            63,
            Width::W256,
            "22867e9aa2fccf51db5afb08a391b1170a50e7ea6c7fe39a224bf531bcd50a95",
        ),
        (256, Width::W32, "348cb3b8"),
        (256, Width::W64, "9e8cafaac7c6b91f"),
        (256, Width::W128, "1d0b73454fee2b86e7b91a95b55c4256"),
        (1000, Width::W32, "c1a4ab08"),
        (1000, Width::W64, "001f668c5ac459f8"),
        (
            1000,
            Width::W256,
            "bb2167a9117a5a332a2a88e6cc53532c8279a7ce591dab40dfbad77748fc3da9",
        ),
        (4096, Width::W32, "ce65d41e"),
        (4096, Width::W128, "46d31892c947fa92d014c7f85f8025f8"),
        (
            4096,
            Width::W512,
            "92e04f5be0021610daaa150a487803c8bf802f0225efecefb26863bc5171bc5f\
             2560ad705deb697fb4d62b4185b122ad5807b45b5c3a3fe842e625b196713066",
        ),
        (
            4096,
            Width::W1024,
            "effb1dccfbf720f31542b7fcf8d5829d8f4187a69571ccc826a8e5bfc1b41618\
             ba312bd82b670cf34967a9ded4f7275edd859a9e7710317609d55214f77d2fd0\
             4eac45befa45c60e377f3300d3f9e4cde78e27a45db8744644253ed8b648f8bf\
             ec1996e6801a58c6f0a7e7068a1592301a2148457fe4a8320234937e3538c6f7",
        ),
    ];

    for (len, width, hex) in expected {
        let input = generated(len);
        let digest = hash(&input, DEFAULT_SEED, width);
        assert_eq!(digest.to_hex(), hex, "len {len} at {width}");
    }
}

#[test]
fn test_seed_changes_digest() {
    assert_eq!(hash(b"", 0, Width::W32).to_hex(), "323a18d6");
    assert_eq!(
        hash(&generated(100), 0, Width::W64).to_hex(),
        "7f99c74a647cfb97"
    );
    assert_eq!(hash(b"abc", 0x1234_5678, Width::W32).to_hex(), "18438b51");
    assert_ne!(
        hash(b"abc", 0x1234_5678, Width::W32),
        hash(b"abc", DEFAULT_SEED, Width::W32)
    );
}

#[test]
fn test_add_wraps() {
    assert_eq!(add(0xffff_ffff, 1), 0);
    assert_eq!(add(0xffff_ffff, 2), 1);
    assert_eq!(add(0x8000_0000, 0x8000_0000), 0);
}

#[test]
fn test_mix_values() {
    assert_eq!(mix(0), 0xdd59_42de);
    assert_eq!(mix(DEFAULT_SEED), 0x91fa_7f93);
    assert_eq!(mix_with(1, 2), 0x0018_6803);
    assert_eq!(mix_with(0xffff_ffff, 0xffff_ffff), 0xffff_ffff);
    assert_eq!(mix(12345), mix(12345), "mix must be deterministic");
}

#[test]
fn test_seed_expansion_distinct_lanes() {
    let state = HashState::new(DEFAULT_SEED, Width::W32);
    let lanes = state.lanes();
    assert_eq!(lanes[0].len(), 16);
    assert!(lanes[0].iter().all(|&w| w == DEFAULT_SEED));
    assert!(lanes[1].iter().all(|&w| w == mix(DEFAULT_SEED)));
    assert!(lanes[2].iter().all(|&w| w == mix(mix(DEFAULT_SEED))));
    assert!(lanes[3].iter().all(|&w| w == mix(mix(mix(DEFAULT_SEED)))));
}

#[test]
fn test_width_parameters() {
    assert_eq!(Width::W32.register_words(), 16);
    assert_eq!(Width::W32.block_bytes(), 256);
    assert_eq!(Width::W32.logical_state_words(), 4);
    assert_eq!(Width::W256.register_words(), 16);
    assert_eq!(Width::W512.register_words(), 32);
    assert_eq!(Width::W512.block_bytes(), 512);
    assert_eq!(Width::W1024.register_words(), 64);
    assert_eq!(Width::W1024.logical_state_words(), 32);

    for width in Width::ALL {
        assert_eq!(Width::from_bits(width.bits()), Ok(width));
    }
    assert_eq!(Width::from_bits(48), Err(Error::InvalidWidth(48)));
    assert_eq!(Width::try_from(2048), Err(Error::InvalidWidth(2048)));
    assert_eq!(Width::W64.to_string(), "VH64");
}

#[test]
fn test_hash_bits_rejects_bad_width() {
    assert_eq!(hash_bits(b"x", DEFAULT_SEED, 0), Err(Error::InvalidWidth(0)));
    assert_eq!(hash_bits(b"x", DEFAULT_SEED, 96), Err(Error::InvalidWidth(96)));
    assert_eq!(
        hash_bits(b"", DEFAULT_SEED, 32).map(|d| d.to_hex()),
        Ok("7647d9bd".to_string())
    );
}

#[test]
fn test_padding_counter() {
    let mut block = [0u8; 8];
    pad_block(b"ab", &mut block);
    assert_eq!(block, [b'a', b'b', 1, 2, 3, 4, 5, 6]);

    let mut long = [0xaau8; 300];
    pad_block(&[], &mut long);
    assert_eq!(long[0], 1);
    assert_eq!(long[254], 255);
    assert_eq!(long[255], 0, "counter wraps to zero at 256");
    assert_eq!(long[256], 1);
}

#[test]
fn test_exact_block_still_padded() {
    // A block-sized input gets a second, fully synthetic block.
    let zeros = vec![0u8; 256];
    assert_eq!(hash(&zeros, DEFAULT_SEED, Width::W32).to_hex(), "67e7c857");
    assert_eq!(hash(&zeros[..255], DEFAULT_SEED, Width::W32).to_hex(), "2c4413c1");

    let blocks = Blocks::new(&zeros, Width::W32, Tier::Scalar);
    assert_eq!(blocks.count(), 2);
    assert_eq!(blocks.full().count(), 1);
    assert_eq!(blocks.tail()[0], 1);
}

#[test]
fn test_length_sensitivity() {
    let input = generated(600);
    for width in Width::ALL {
        let whole = hash(&input, DEFAULT_SEED, width);
        let prefix = hash(&input[..599], DEFAULT_SEED, width);
        assert_ne!(whole, prefix, "prefix collides with whole input at {width}");
    }

    // Trailing zero bytes are not confused with padding
    assert_ne!(
        hash(b"abc", DEFAULT_SEED, Width::W32),
        hash(b"abc\0", DEFAULT_SEED, Width::W32)
    );
}

#[test]
fn test_bytes_past_input_ignored() {
    let mut big = generated(2048);
    let exact = big[..700].to_vec();
    let before = hash(&big[..700], DEFAULT_SEED, Width::W128);
    big[700..].fill(0xee);
    let after = hash(&big[..700], DEFAULT_SEED, Width::W128);

    assert_eq!(before, after);
    assert_eq!(before, hash(&exact, DEFAULT_SEED, Width::W128));
}

#[test]
fn test_digest_byte_order() {
    let digest = hash(b"", DEFAULT_SEED, Width::W32);
    assert_eq!(digest.words(), &[0x7647_d9bd]);
    assert_eq!(digest.to_le_bytes(), vec![0xbd, 0xd9, 0x47, 0x76]);
    assert_eq!(format!("{digest}"), "7647d9bd");
    assert_eq!(format!("{digest:x}"), "7647d9bd");

    let digest = hash(b"", DEFAULT_SEED, Width::W64);
    assert_eq!(digest.words(), &[0x7371_1a77, 0xd603_1b6f]);
    assert_eq!(digest.to_le_bytes().len(), 8);
}

#[test]
fn test_hex_round_trip() {
    for width in Width::ALL {
        let digest = hash(b"round trip", DEFAULT_SEED, width);
        let parsed = Digest::from_hex(width, &digest.to_hex()).expect("valid hex");
        assert_eq!(parsed, digest);
        assert_eq!(parsed.width(), width);
    }

    let upper = Digest::from_hex(Width::W32, "7647D9BD").expect("uppercase hex");
    assert_eq!(upper, hash(b"", DEFAULT_SEED, Width::W32));
}

#[test]
fn test_hex_errors() {
    assert_eq!(
        Digest::from_hex(Width::W64, "7647d9bd"),
        Err(Error::InvalidDigestLength {
            expected: 16,
            actual: 8
        })
    );
    assert!(matches!(
        Digest::from_hex(Width::W32, "7647d9bg"),
        Err(Error::InvalidHex(_))
    ));
    assert_eq!(
        Digest::from_hex(Width::W32, "z647d9bd"),
        Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter {
            c: 'z',
            index: 0
        }))
    );
    // Errors are plain values that can be copied and compared
    let err = Error::InvalidWidth(48);
    let copy = err;
    assert_eq!(err, copy);
    assert_ne!(err, Error::InvalidWidth(64));
}

#[test]
fn test_tier_properties() {
    assert!(Tier::Scalar < Tier::Width128);
    assert!(Tier::Width256 < Tier::Width512);
    for tier in Tier::ALL {
        assert_eq!(tier.alignment_mask(), tier.alignment().saturating_sub(1));
        assert!(tier.is_aligned(0x4000));
    }
    assert_eq!(Tier::Width512.lane_words(), 16);
    assert_eq!(Tier::Width128.name(), "sse2");
    assert_eq!(Tier::Width512.downgrade(), Some(Tier::Width256));
    assert_eq!(Tier::Scalar.downgrade(), None);
}

#[test]
fn test_select_tier_table() {
    let auto = TierRequest::Auto;
    let max = Tier::Width512;

    assert_eq!(select_tier(auto, max, 0x1000), Tier::Width512);
    assert_eq!(select_tier(auto, max, 0x1020), Tier::Width256);
    assert_eq!(select_tier(auto, max, 0x1010), Tier::Width128);
    assert_eq!(select_tier(auto, max, 0x1008), Tier::Scalar);
    assert_eq!(select_tier(auto, max, 0x1001), Tier::Scalar);

    // Auto is bounded by the hardware
    assert_eq!(select_tier(auto, Tier::Width256, 0x1000), Tier::Width256);
    assert_eq!(select_tier(auto, Tier::Scalar, 0x1000), Tier::Scalar);

    // A pinned tier is an upper bound, not a mandate
    let pinned = TierRequest::Pinned(Tier::Width128);
    assert_eq!(select_tier(pinned, max, 0x1000), Tier::Width128);
    assert_eq!(select_tier(pinned, max, 0x1004), Tier::Scalar);

    // and is honoured above the hardware maximum
    let pinned = TierRequest::Pinned(Tier::Width512);
    assert_eq!(select_tier(pinned, Tier::Scalar, 0x1000), Tier::Width512);
    assert_eq!(select_tier(pinned, Tier::Scalar, 0x1030), Tier::Width128);
}

#[test]
fn test_capabilities_only_narrow() {
    let none = Capabilities::scalar_only();
    assert_eq!(none.max_tier(), Tier::Scalar);
    assert_eq!(none.limit_to(Tier::Width512), none);

    let detected = Capabilities::detect();
    for tier in Tier::ALL {
        let limited = detected.limit_to(tier);
        assert!(limited.max_tier() <= tier);
        assert!(limited.max_tier() <= detected.max_tier());
    }
    assert_eq!(detected.limit_to(Tier::Scalar), none);
}

#[test]
fn test_hasher_configuration() {
    let buf = Aligned::filled(pattern);
    let input = &buf.0[..1000];

    let hasher = VectorHash::new(Width::W64);
    assert_eq!(hasher.seed(), DEFAULT_SEED);
    assert_eq!(hasher.hash(input).to_hex(), "001f668c5ac459f8");

    let scalar = hasher.with_tier(Tier::Scalar);
    assert_eq!(scalar.tier_for(input), Tier::Scalar);
    assert_eq!(scalar.hash(input), hasher.hash(input));

    let pinned = hasher
        .with_tier(Tier::Width512)
        .with_capabilities(Capabilities::scalar_only());
    assert_eq!(pinned.tier_for(input), Tier::Width512);
    assert_eq!(pinned.tier_for(&buf.0[16..]), Tier::Width128);
    assert_eq!(pinned.hash(input), hasher.hash(input));

    let reseeded = hasher.with_seed(0);
    assert_eq!(reseeded.hash(&buf.0[..100]).to_hex(), "7f99c74a647cfb97");

    assert_eq!(VectorHash::default().width(), Width::W32);
}

#[test]
fn test_all_tiers_agree_on_aligned_buffer() {
    let buf = Aligned::filled(pattern);
    let caps_sets = [Capabilities::detect(), Capabilities::scalar_only()];

    for width in Width::ALL {
        for len in [0, 1, 255, 256, 257, 1024, 4096, 5000] {
            let input = &buf.0[..len];
            let reference = hash_with(
                input,
                DEFAULT_SEED,
                width,
                TierRequest::Pinned(Tier::Scalar),
                &Capabilities::scalar_only(),
            );
            for caps in &caps_sets {
                for tier in Tier::ALL {
                    let digest = hash_with(input, DEFAULT_SEED, width, tier.into(), caps);
                    assert_eq!(
                        digest, reference,
                        "{tier} disagrees with scalar at {width}, len {len}"
                    );
                }
            }
        }
    }
}

/// Absorb one input into a fresh state with the given group type.
fn absorb_with<L: crate::lanes::Lanes>(input: &[u8], width: Width, tier: Tier) -> HashState {
    let mut state = HashState::new(DEFAULT_SEED, width);
    let blocks = Blocks::new(input, width, tier);
    unsafe { round::absorb::<L>(&mut state, &blocks) };
    state
}

#[test]
fn test_portable_groups_match_scalar_state() {
    let buf = Aligned::filled(|i| (i * 7 + 3) as u8);
    for width in Width::ALL {
        let input = &buf.0[..3000];
        let scalar = absorb_with::<u32>(input, width, Tier::Scalar);
        assert_eq!(absorb_with::<Portable<4>>(input, width, Tier::Width128), scalar);
        assert_eq!(absorb_with::<Portable<8>>(input, width, Tier::Width256), scalar);
        assert_eq!(absorb_with::<Portable<16>>(input, width, Tier::Width512), scalar);
    }
}

#[test]
fn test_native_backends_match_scalar_state() {
    let buf = Aligned::filled(|i| (i * 13 + 1) as u8);
    let caps = Capabilities::detect();

    for width in Width::ALL {
        let input = &buf.0[..2500];
        let scalar = absorb_with::<u32>(input, width, Tier::Scalar);

        let natives: [(Tier, fn(&mut HashState, &Blocks<'_>, &Capabilities) -> bool); 3] = [
            (Tier::Width128, crate::lanes::sse2::absorb),
            (Tier::Width256, crate::lanes::avx2::absorb),
            (Tier::Width512, crate::lanes::avx512::absorb),
        ];
        for (tier, absorb) in natives {
            let mut state = HashState::new(DEFAULT_SEED, width);
            let blocks = Blocks::new(input, width, tier);
            if absorb(&mut state, &blocks, &caps) {
                assert_eq!(state, scalar, "native {tier} state differs at {width}");
            } else {
                assert_eq!(
                    state,
                    HashState::new(DEFAULT_SEED, width),
                    "declined backend must not touch the state"
                );
            }
        }
    }
}

#[test]
#[should_panic(expected = "not aligned")]
fn test_blocks_reject_misaligned_view() {
    let buf = Aligned::filled(pattern);
    let _ = Blocks::new(&buf.0[1..100], Width::W32, Tier::Width128);
}

#[cfg(feature = "std")]
#[test]
fn test_ffi_hash() {
    use crate::{vectorhash, vectorhash_detected_tier, vectorhash_with_tier};

    let mut out = [0u8; 128];
    let rc = unsafe { vectorhash(core::ptr::null(), 0, DEFAULT_SEED, out.as_mut_ptr(), 32) };
    assert_eq!(rc, 0);
    assert_eq!(&out[..4], &[0xbd, 0xd9, 0x47, 0x76]);

    let input = generated(1000);
    let rc = unsafe {
        vectorhash_with_tier(input.as_ptr(), input.len(), DEFAULT_SEED, out.as_mut_ptr(), 64, 0)
    };
    assert_eq!(rc, 0);
    assert_eq!(hex::encode(&out[..8]), "8c661f00f859c45a");

    let rc = unsafe { vectorhash(input.as_ptr(), input.len(), 1, out.as_mut_ptr(), 48) };
    assert_eq!(rc, -1, "invalid width");
    let rc = unsafe { vectorhash(input.as_ptr(), input.len(), 1, core::ptr::null_mut(), 32) };
    assert_eq!(rc, -2, "null output");
    let rc = unsafe { vectorhash(core::ptr::null(), 4, 1, out.as_mut_ptr(), 32) };
    assert_eq!(rc, -2, "null input with nonzero length");
    let rc = unsafe {
        vectorhash_with_tier(input.as_ptr(), input.len(), 1, out.as_mut_ptr(), 32, 7)
    };
    assert_eq!(rc, -3, "invalid tier code");

    let detected = vectorhash_detected_tier();
    assert!((0..=3).contains(&detected));
}

proptest! {
    #[test]
    fn prop_tiers_agree(
        len in 0usize..6000,
        offset in 0usize..64,
        seed in any::<u32>(),
        width_idx in 0usize..6,
        fill in any::<u8>(),
    ) {
        let buf = Aligned::filled(|i| pattern(i) ^ fill);
        let input = &buf.0[offset..offset + len.min(8192 - offset)];
        let width = Width::ALL[width_idx];

        let reference = hash_with(
            input,
            seed,
            width,
            TierRequest::Pinned(Tier::Scalar),
            &Capabilities::scalar_only(),
        );
        for caps in [Capabilities::detect(), Capabilities::scalar_only()] {
            prop_assert_eq!(hash_with(input, seed, width, TierRequest::Auto, &caps), reference);
            for tier in Tier::ALL {
                prop_assert_eq!(hash_with(input, seed, width, tier.into(), &caps), reference);
            }
        }
    }

    #[test]
    fn prop_hex_round_trip(input in proptest::collection::vec(any::<u8>(), 0..700), width_idx in 0usize..6) {
        let width = Width::ALL[width_idx];
        let digest = hash(&input, DEFAULT_SEED, width);
        let hex = digest.to_hex();
        prop_assert_eq!(hex.len(), width.hex_len());
        prop_assert_eq!(Digest::from_hex(width, &hex), Ok(digest));
    }
}
