use argon2d_fixed::hash::{Blake2b, blake2b, blake2b_long};
use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};
use hex_literal::hex;

fn counting_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i & 0xff) as u8).collect()
}

fn reference_blake2b(input: &[u8], out_len: usize) -> Vec<u8> {
    let mut hasher = Blake2bVar::new(out_len).unwrap();
    hasher.update(input);
    let mut out = vec![0u8; out_len];
    hasher.finalize_variable(&mut out).unwrap();
    out
}

/// H′ written directly from RFC 9106 §3.3 on top of the reference crate.
fn reference_blake2b_long(input: &[u8], out_len: usize) -> Vec<u8> {
    let mut prefixed = (out_len as u32).to_le_bytes().to_vec();
    prefixed.extend_from_slice(input);

    if out_len <= 64 {
        return reference_blake2b(&prefixed, out_len);
    }

    let r = out_len.div_ceil(32) - 2;
    let mut v = reference_blake2b(&prefixed, 64);
    let mut out = Vec::with_capacity(out_len);
    for _ in 1..r {
        out.extend_from_slice(&v[..32]);
        v = reference_blake2b(&v, 64);
    }
    out.extend_from_slice(&v[..32]);
    out.extend_from_slice(&reference_blake2b(&v, out_len - 32 * r));
    out
}

fn expect_blake2b_eq(input: &[u8], expected: &[u8; 64]) {
    let got = blake2b(input);

    assert_eq!(
        &got,
        expected,
        "Digest mismatch for {}-byte input\nExpected {:02x?}\nGot      {:02x?}",
        input.len(),
        expected,
        got,
    );
}

// -------------------------------------------------------
// 1. OFFICIAL VECTOR TESTS
// -------------------------------------------------------

#[test]
fn blake2b_empty_vector() {
    expect_blake2b_eq(
        &[],
        &hex!(
            "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419"
            "d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
        ),
    );
}

#[test]
fn blake2b_abc_vector() {
    expect_blake2b_eq(
        b"abc",
        &hex!(
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1"
            "7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
        ),
    );
}

// -------------------------------------------------------
// 2. BLOCK BOUNDARIES
// -------------------------------------------------------

#[test]
fn blake2b_whole_blocks_flush_before_final_block() {
    // a full buffer is compressed as it fills, so the final flag lands on
    // an extra empty block
    expect_blake2b_eq(
        &counting_bytes(128),
        &hex!(
            "3deaa050fcfe069daf2b88b28f8af4f274e5c6ba5fbf6107090288662d563728"
            "8a5661e5e969c6a14e69d413242ee298e581d1e512c2da7ac79d1579bc1efae4"
        ),
    );
    expect_blake2b_eq(
        &counting_bytes(256),
        &hex!(
            "a5865baf83d09694553351e7e5533fc6509ed66dcad2a21e74023b691e310c10"
            "a8e28159ae0efef1227f9d4f89c75f656bcf2ae15359c618a1dcf7c1d56d606f"
        ),
    );

    let mut out = [0u8; 32];
    Blake2b::hash(&mut out, &[&counting_bytes(64), &counting_bytes(128)[64..]]);
    assert_eq!(
        out,
        hex!("29201716883029825ce074ffb01890bf311bf060016c5396e47c2dc097de6957")
    );
    assert_ne!(out.to_vec(), reference_blake2b(&counting_bytes(128), 32));
}

#[test]
fn blake2b_one_past_block() {
    expect_blake2b_eq(
        &counting_bytes(129),
        &hex!(
            "f59711d44a031d5f97a9413c065d1e614c417ede998590325f49bad2fd444d3e"
            "4418be19aec4e11449ac1a57207898bc57d76a1bcf3566292c20c683a5c4648f"
        ),
    );
}

#[test]
fn blake2b_short_digest() {
    let mut out = [0u8; 32];
    Blake2b::hash(&mut out, &[&counting_bytes(300)]);
    assert_eq!(
        out,
        hex!("3a486e3fe3ee414853000269ac020030aeef748cb05cd62ba85939ec298ef25c")
    );
}

#[test]
fn blake2b_matches_reference_off_block_boundaries() {
    for len in [0, 1, 63, 64, 65, 127, 129, 255, 257, 1000, 1023, 1025] {
        let input = counting_bytes(len);
        for out_len in [1, 16, 32, 48, 64] {
            let mut out = vec![0u8; out_len];
            Blake2b::hash(&mut out, &[&input]);
            assert_eq!(
                out,
                reference_blake2b(&input, out_len),
                "input {len}, output {out_len}"
            );
        }
    }
}

// -------------------------------------------------------
// 3. INCREMENTAL INPUT
// -------------------------------------------------------

#[test]
fn blake2b_split_input_is_irrelevant() {
    let input = counting_bytes(777);
    let expected = blake2b(&input);

    for split in [0, 1, 127, 128, 129, 256, 500, 777] {
        let (a, b) = input.split_at(split);
        let mut state = Blake2b::new(64);
        state.update(a);
        state.update(b);

        let mut out = [0u8; 64];
        state.finalize(&mut out);
        assert_eq!(out, expected, "split at {split}");
    }

    let mut state = Blake2b::new(64);
    for byte in &input {
        state.update(core::slice::from_ref(byte));
    }
    let mut out = [0u8; 64];
    state.finalize(&mut out);
    assert_eq!(out, expected);
}

#[test]
fn blake2b_parts_hash_as_concatenation() {
    let mut out = [0u8; 64];
    Blake2b::hash(&mut out, &[b"a", b"", b"bc"]);
    assert_eq!(out, blake2b(b"abc"));
}

// -------------------------------------------------------
// 4. VARIABLE-LENGTH HASH H′
// -------------------------------------------------------

#[test]
fn blake2b_long_vectors() {
    let mut out = [0u8; 32];
    blake2b_long(&mut out, &[b"abc"]);
    assert_eq!(
        out,
        hex!("6cfcbf5d43e547674bfbc009070570bcb84e272d359c1e9277e416d74cbbe1c6")
    );

    let mut out = [0u8; 64];
    blake2b_long(&mut out, &[b"abc"]);
    assert_eq!(
        out,
        hex!(
            "f32577a3172f56657d531faaa43077bb8c9726ada7bb04dd337ec5a65454abff"
            "241ad6b87a72440e5127c6f9caa70327f2a699096e52d163eb52d9cd99620593"
        )
    );

    let mut out = [0u8; 65];
    blake2b_long(&mut out, &[b"abc"]);
    assert_eq!(
        out,
        hex!(
            "77baa447fe6f777c9bcb519545ce80badaf08ecb973fbb4ff45af7d8b569ec7c"
            "aad65f72669d05153cdeaa563a162bb5ae4c42214551593816008dc560c5a653"
            "91"
        )
    );

    let mut out = [0u8; 100];
    blake2b_long(&mut out, &[b"abc"]);
    assert_eq!(
        out,
        hex!(
            "4c9ba23bcafae5e571a5d41673bb8084a4a1de2688416ed390f669d33d364f3d"
            "4d9bfa7fe762680c6b2362711c4ce5b2c60ddcd14c1277ec1369c79f44c28966"
            "98a2b0773a3ce2e410532fa7c72f0bb61ccca0c24c362f337555cbf2998f2d36"
            "01be70d1"
        )
    );
}

#[test]
fn blake2b_long_prefixed_input_on_block_boundary() {
    // LE32(32) || 124 bytes fills exactly one block
    let mut out = [0u8; 32];
    blake2b_long(&mut out, &[&counting_bytes(124)]);
    assert_eq!(
        out,
        hex!("89b4a3c9c307ff9cbdd76e5d2b561f570c9c99ef46ced64f6d900533d1347eb1")
    );
}

#[test]
fn blake2b_long_matches_reference_construction() {
    let input = counting_bytes(72);
    for out_len in [1, 4, 32, 63, 64, 65, 96, 97, 128, 129, 1000, 1024] {
        let mut out = vec![0u8; out_len];
        blake2b_long(&mut out, &[&input]);
        assert_eq!(
            out,
            reference_blake2b_long(&input, out_len),
            "output {out_len}"
        );
    }
}

#[test]
fn blake2b_long_block_seed_shape() {
    // Argon2 seeds each lane block from H0 || LE32(i) || LE32(lane)
    let h0 = blake2b(b"seed");
    let mut split = [0u8; 1024];
    blake2b_long(&mut split, &[&h0, &1u32.to_le_bytes(), &0u32.to_le_bytes()]);

    let mut joined = h0.to_vec();
    joined.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(split.to_vec(), reference_blake2b_long(&joined, 1024));
}
