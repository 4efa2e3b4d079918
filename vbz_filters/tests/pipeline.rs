/// Chunked-dataset scenarios: the same samples stored under different
/// pipelines must read back identically, and batch conversion between them
/// must not let one bad chunk affect the rest.
use proptest::prelude::*;
use vbz_core::{Options, VbzError};
use vbz_filters::{
    pipeline_by_name, recode_all, FilterError, FilterPipeline, FilterRegistry, FilterSpec,
    VBZ_FILTER_ID,
};

/// Generate a deterministic 16-bit signal of `len` samples.
fn signal_chunk(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    let mut level: i16 = 400;
    (0..len)
        .flat_map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            level = level.wrapping_add(((rng >> 59) as i16) - 16);
            level.to_le_bytes()
        })
        .collect()
}

fn representations() -> Vec<(&'static str, FilterPipeline)> {
    ["none", "deflate", "vbz"]
        .into_iter()
        .map(|name| (name, pipeline_by_name(name, Options::new(2)).unwrap()))
        .collect()
}

// ── tests ──────────────────────────────────────────────────────────────────

#[test]
fn test_cross_representation_equivalence() {
    let registry = FilterRegistry::with_defaults();
    let chunks: Vec<Vec<u8>> = (0..6).map(|i| signal_chunk(2048, i)).collect();

    for (name, pipeline) in representations() {
        for (i, chunk) in chunks.iter().enumerate() {
            let stored = pipeline.encode(&registry, chunk).unwrap();
            let back = pipeline.decode(&registry, &stored).unwrap();
            assert_eq!(&back, chunk, "{name} chunk {i} should read back unchanged");
        }
    }
}

#[test]
fn test_convert_between_every_pair() {
    let registry = FilterRegistry::with_defaults();
    let chunks: Vec<Vec<u8>> = (0..4).map(|i| signal_chunk(1000, 100 + i)).collect();

    for (from_name, from) in representations() {
        let stored: Vec<Vec<u8>> = chunks
            .iter()
            .map(|c| from.encode(&registry, c).unwrap())
            .collect();
        for (to_name, to) in representations() {
            let (results, report) = recode_all(&registry, &from, &to, &stored);
            assert!(report.is_clean(), "{from_name} -> {to_name}: {:?}", report.failed);
            for (result, chunk) in results.iter().zip(&chunks) {
                let back = to.decode(&registry, result.as_ref().unwrap()).unwrap();
                assert_eq!(&back, chunk, "{from_name} -> {to_name}");
            }
        }
    }
}

#[test]
fn test_vbz_smaller_than_deflate_on_signal() {
    let registry = FilterRegistry::with_defaults();
    let chunk = signal_chunk(20_000, 9);
    let deflate = pipeline_by_name("deflate", Options::new(2)).unwrap();
    let vbz = pipeline_by_name("vbz", Options::new(2)).unwrap();
    let deflated = deflate.encode(&registry, &chunk).unwrap();
    let packed = vbz.encode(&registry, &chunk).unwrap();
    assert!(
        packed.len() < deflated.len(),
        "vbz ({}) should beat deflate ({}) on a slowly varying signal",
        packed.len(),
        deflated.len()
    );
}

#[test]
fn test_corrupted_chunk_is_isolated() {
    let registry = FilterRegistry::with_defaults();
    let vbz = FilterPipeline::single(FilterSpec::vbz(Options::new(2).with_version(1)));
    let deflate = FilterPipeline::single(FilterSpec::deflate(6));

    let chunks: Vec<Vec<u8>> = (0..10).map(|i| signal_chunk(512, i)).collect();
    let mut stored: Vec<Vec<u8>> = chunks
        .iter()
        .map(|c| vbz.encode(&registry, c).unwrap())
        .collect();
    let middle = stored[3].len() / 2;
    stored[3].truncate(middle);

    let (results, report) = recode_all(&registry, &vbz, &deflate, &stored);
    assert_eq!(report.succeeded, 9);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 3);
    for (i, result) in results.iter().enumerate() {
        if i == 3 {
            continue;
        }
        let back = deflate.decode(&registry, result.as_ref().unwrap()).unwrap();
        assert_eq!(back, chunks[i]);
    }
}

#[test]
fn test_unknown_version_in_stored_params() {
    let registry = FilterRegistry::with_defaults();
    let chunk = signal_chunk(64, 1);
    let stored = FilterPipeline::single(FilterSpec::vbz(Options::new(2)))
        .encode(&registry, &chunk)
        .unwrap();

    let future = FilterPipeline::single(FilterSpec {
        id: VBZ_FILTER_ID,
        params: vec![7, 2, 1, 1],
    });
    assert!(matches!(
        future.decode(&registry, &stored),
        Err(FilterError::Vbz(VbzError::Version(7)))
    ));
}

#[test]
fn test_three_word_params_decode_level_one_data() {
    let registry = FilterRegistry::with_defaults();
    let chunk = signal_chunk(300, 4);
    let filter = registry.get(VBZ_FILTER_ID).unwrap();
    let stored = filter.encode(&chunk, &[0, 2, 1, 1]).unwrap();
    assert_eq!(filter.decode(&stored, &[0, 2, 1]).unwrap(), chunk);
}

#[test]
fn test_unknown_pipeline_name() {
    assert!(matches!(
        pipeline_by_name("lzma", Options::new(2)),
        Err(FilterError::InvalidParams { .. })
    ));
}

proptest! {
    #[test]
    fn prop_vbz_filter_round_trip(
        samples in prop::collection::vec(any::<i32>(), 0..400),
        version in 0u32..=1,
        zigzag in any::<bool>(),
        level in 0u32..=5,
    ) {
        let registry = FilterRegistry::with_defaults();
        let chunk: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let options = Options::new(4)
            .with_version(version)
            .with_delta_zig_zag(zigzag)
            .with_zstd_level(level);
        let pipeline = FilterPipeline::single(FilterSpec::vbz(options)).then(FilterSpec::deflate(1));
        let stored = pipeline.encode(&registry, &chunk).unwrap();
        prop_assert_eq!(pipeline.decode(&registry, &stored).unwrap(), chunk);
    }
}
