// Property tests: round-trip and incremental equivalence over arbitrary data,
// block sizes and split points.

use proptest::prelude::*;

use blockfile::{BlockCodec, Compressor, Decompressor, Lz4Codec, StoredCodec};

fn compress_in_parts<C: BlockCodec>(codec: C, data: &[u8], block_size: usize, cuts: &[usize]) -> Vec<u8> {
    let mut c = Compressor::with_codec(codec, block_size).unwrap();
    let mut out = Vec::new();
    let mut start = 0;
    let mut points: Vec<usize> = cuts.iter().map(|&p| p.min(data.len())).collect();
    points.sort_unstable();
    for p in points.into_iter().chain(std::iter::once(data.len())) {
        out.extend(c.compress(&data[start..p]).unwrap());
        start = p;
    }
    out.extend(c.flush().unwrap());
    out
}

proptest! {
    #[test]
    fn round_trip_lz4(data in proptest::collection::vec(any::<u8>(), 0..2048), block_size in 1usize..300) {
        let packed = compress_in_parts(Lz4Codec, &data, block_size, &[]);
        let mut d = Decompressor::new(64).unwrap();
        let out = d.decompress(&packed).unwrap();
        d.close().unwrap();
        prop_assert_eq!(out, data);
    }

    #[test]
    fn round_trip_stored(data in proptest::collection::vec(0u8..4, 0..2048), block_size in 1usize..300) {
        let packed = compress_in_parts(StoredCodec, &data, block_size, &[]);
        let mut d = Decompressor::with_codec(StoredCodec, 64).unwrap();
        prop_assert_eq!(d.decompress(&packed).unwrap(), data);
    }

    #[test]
    fn split_points_do_not_change_output(
        data in proptest::collection::vec(0u8..8, 0..1500),
        block_size in 1usize..200,
        cuts in proptest::collection::vec(0usize..1500, 0..8),
    ) {
        let whole = compress_in_parts(Lz4Codec, &data, block_size, &[]);
        let parts = compress_in_parts(Lz4Codec, &data, block_size, &cuts);
        prop_assert_eq!(parts, whole);
    }
}
