//! Round-trip and ordering properties of the transforms over generated data.

use oxibwt_transform::{
    CircularSuffixArray, MoveToFront, OxiBwtError, Pipeline, PipelineOptions, Transform, bwt, mtf,
};

/// Deterministic pseudo-random bytes drawn from `alphabet` symbols.
fn lcg_bytes(len: usize, seed: u64, alphabet: u16) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % alphabet as u64) as u8
        })
        .collect()
}

fn sample_inputs() -> Vec<Vec<u8>> {
    let mut inputs = vec![
        Vec::new(),
        vec![0],
        vec![255],
        b"ABRACADABRA!".to_vec(),
        b"mississippi".to_vec(),
        vec![7u8; 1000],
        b"ab".repeat(500),
        b"abcabcabd".repeat(50),
        (0..=255u8).collect(),
    ];
    for (i, &alphabet) in [2u16, 4, 26, 256].iter().enumerate() {
        for &len in &[2usize, 9, 41, 300, 4096] {
            inputs.push(lcg_bytes(len, (i * 1000 + len) as u64, alphabet));
        }
    }
    inputs
}

fn rotation(data: &[u8], start: usize) -> Vec<u8> {
    data[start..].iter().chain(&data[..start]).copied().collect()
}

#[test]
fn test_bwt_roundtrip() {
    for data in sample_inputs() {
        let (first, transformed) = bwt::transform(&data);
        assert_eq!(transformed.len(), data.len());
        let recovered = bwt::inverse_transform(first, &transformed).unwrap();
        assert_eq!(recovered, data, "BWT roundtrip failed for {} bytes", data.len());
    }
}

#[test]
fn test_bwt_stream_roundtrip() {
    for data in sample_inputs() {
        let stream = bwt::encode(&data).unwrap();
        if !data.is_empty() {
            assert_eq!(stream.len(), data.len() + 4);
        }
        assert_eq!(bwt::decode(&stream).unwrap(), data);
    }
}

#[test]
fn test_mtf_roundtrip() {
    for data in sample_inputs() {
        let ranks = mtf::encode(&data);
        assert_eq!(ranks.len(), data.len());
        assert_eq!(mtf::decode(&ranks), data);
    }
}

#[test]
fn test_pipeline_roundtrip() {
    for move_to_front in [true, false] {
        let pipeline = Pipeline::standard(PipelineOptions { move_to_front });
        for data in sample_inputs() {
            let encoded = pipeline.encode(&data).unwrap();
            assert_eq!(pipeline.decode(&encoded).unwrap(), data);
        }
    }
}

#[test]
fn test_rank_permutation_validity() {
    for data in sample_inputs() {
        let csa = CircularSuffixArray::new(&data);
        assert_eq!(csa.len(), data.len());

        let mut sorted = csa.indices().to_vec();
        sorted.sort_unstable();
        assert!(sorted.iter().copied().eq(0..data.len()));

        for pair in csa.indices().windows(2) {
            assert!(
                rotation(&data, pair[0]) <= rotation(&data, pair[1]),
                "rotations {} and {} out of order",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_bwt_matches_naive_sort() {
    for data in sample_inputs().into_iter().filter(|d| d.len() <= 1000) {
        let n = data.len();
        let mut rows: Vec<Vec<u8>> = (0..n).map(|i| rotation(&data, i)).collect();
        rows.sort();
        let expected: Vec<u8> = rows.iter().map(|r| r[n - 1]).collect();

        let (first, transformed) = bwt::transform(&data);
        assert_eq!(transformed, expected);
        if n > 0 {
            assert_eq!(rows[first], data);
        }
    }
}

#[test]
fn test_mtf_state_remains_permutation() {
    let data = lcg_bytes(2000, 5, 256);
    let mut state = MoveToFront::new();
    for &byte in &data {
        state.encode_byte(byte);
        let mut seen = [false; 256];
        for &b in state.order() {
            assert!(!seen[b as usize]);
            seen[b as usize] = true;
        }
    }
}

#[test]
fn test_identity_string() {
    for len in [1usize, 2, 7, 8, 9, 100, 5000] {
        let data = vec![b'q'; len];
        let (first, transformed) = bwt::transform(&data);
        assert_eq!(transformed, data);
        assert!(first < len);
        assert_eq!(bwt::inverse_transform(first, &transformed).unwrap(), data);
    }
}

#[test]
fn test_reference_vectors() {
    let (first, transformed) = bwt::transform(b"ABRACADABRA!");
    assert_eq!(first, 3);
    assert_eq!(transformed, b"ARD!RCAAAABB");
    assert_eq!(
        bwt::inverse_transform(3, b"ARD!RCAAAABB").unwrap(),
        b"ABRACADABRA!"
    );

    assert_eq!(mtf::encode(&[65, 65, 65, 66]), vec![65, 0, 0, 66]);
    assert_eq!(mtf::decode(&[65, 0, 0, 66]), vec![65, 65, 65, 66]);
}

#[test]
fn test_empty_boundaries() {
    assert_eq!(bwt::transform(b""), (0, Vec::new()));
    assert!(bwt::inverse_transform(0, b"").unwrap().is_empty());
    assert!(bwt::encode(b"").unwrap().is_empty());
    assert!(bwt::decode(b"").unwrap().is_empty());
    assert!(mtf::encode(b"").is_empty());
    assert!(mtf::decode(b"").is_empty());
}

#[test]
fn test_corrupt_streams_are_errors() {
    assert!(matches!(
        bwt::inverse_transform(5, b"abc"),
        Err(OxiBwtError::InvalidPrimaryIndex { index: 5, len: 3 })
    ));
    assert!(matches!(
        bwt::decode(&[0x00]),
        Err(OxiBwtError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        mtf::decode_ranks(&[1, 2, 1000]),
        Err(OxiBwtError::InvalidRank { rank: 1000, position: 2 })
    ));
}

#[test]
fn test_large_random_block() {
    // Large enough to split partitions across threads with `parallel`.
    let data = lcg_bytes(200_000, 77, 256);
    let (first, transformed) = bwt::transform(&data);
    assert_eq!(bwt::inverse_transform(first, &transformed).unwrap(), data);
}

#[test]
fn test_large_text_block() {
    let sentence = b"It was the best of times, it was the worst of times, ";
    let mut data = Vec::new();
    let mut seed = 3u64;
    while data.len() < 100_000 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let cut = (seed >> 40) as usize % sentence.len();
        data.extend_from_slice(&sentence[cut..]);
    }

    let pipeline = Pipeline::standard(PipelineOptions::default());
    let encoded = pipeline.encode(&data).unwrap();
    let zeros = encoded.iter().filter(|&&b| b == 0).count();
    assert!(zeros > data.len() / 2, "BWT+MTF should expose long runs");
    assert_eq!(pipeline.decode(&encoded).unwrap(), data);
}
