use proptest::prelude::*;
use vbz_core::{
    compress, decode_samples, decompress, decompressed_size, encode_samples, max_compressed_size,
    samples::to_bytes, Options, Sample,
};

fn arb_options<T: Sample>() -> impl Strategy<Value = Options> {
    (0u32..=1, any::<bool>(), 0u32..=3).prop_map(|(version, zigzag, level)| {
        Options::for_sample::<T>()
            .with_version(version)
            .with_delta_zig_zag(zigzag)
            .with_zstd_level(level)
    })
}

/// Runs the sized codec through caller-owned buffers and checks every
/// size it reports.
fn check_round_trip<T: Sample + PartialEq + std::fmt::Debug>(
    samples: &[T],
    options: &Options,
) -> Result<(), TestCaseError> {
    let source = to_bytes(samples);
    let bound = max_compressed_size(source.len(), options).unwrap();
    let mut compressed = vec![0u8; bound];
    let written = compress(&source, &mut compressed, options).unwrap();
    prop_assert!(written <= bound);
    compressed.truncate(written);

    prop_assert_eq!(decompressed_size(&compressed, options).unwrap(), source.len());
    let mut out = vec![0u8; source.len()];
    prop_assert_eq!(decompress(&compressed, &mut out, options).unwrap(), source.len());
    prop_assert_eq!(&out, &source);

    let typed = encode_samples(samples, options).unwrap();
    prop_assert_eq!(&typed, &compressed);
    prop_assert_eq!(decode_samples::<T>(&typed, options).unwrap(), samples.to_vec());
    Ok(())
}

proptest! {
    #[test]
    fn prop_round_trip_i8(
        samples in prop::collection::vec(any::<i8>(), 0..600),
        options in arb_options::<i8>(),
    ) {
        check_round_trip(&samples, &options)?;
    }

    #[test]
    fn prop_round_trip_i16(
        samples in prop::collection::vec(any::<i16>(), 0..600),
        options in arb_options::<i16>(),
    ) {
        check_round_trip(&samples, &options)?;
    }

    #[test]
    fn prop_round_trip_i32(
        samples in prop::collection::vec(any::<i32>(), 0..600),
        options in arb_options::<i32>(),
    ) {
        check_round_trip(&samples, &options)?;
    }

    #[test]
    fn prop_round_trip_u16(
        samples in prop::collection::vec(any::<u16>(), 0..600),
        options in arb_options::<u16>(),
    ) {
        check_round_trip(&samples, &options)?;
    }

    /// Small steps are where the half-byte packing earns its keep.
    #[test]
    fn prop_round_trip_small_steps_i8(
        steps in prop::collection::vec(-3i8..=3, 1..2000),
        options in arb_options::<i8>(),
    ) {
        let mut level = 0i8;
        let samples: Vec<i8> = steps.iter().map(|&s| { level = level.wrapping_add(s); level }).collect();
        check_round_trip(&samples, &options)?;
    }

    /// Arbitrary bytes fed to the decoder fail cleanly instead of panicking.
    #[test]
    fn prop_garbage_never_panics(
        garbage in prop::collection::vec(any::<u8>(), 0..256),
        options in arb_options::<i16>(),
    ) {
        let mut out = vec![0u8; 512];
        let _ = decompress(&garbage, &mut out, &options);
        let _ = vbz_core::decompress_bare(&garbage, &mut out, &options);
    }
}
