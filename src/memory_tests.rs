use super::*;
use crate::codec::FixedFormat;

fn codec(data_width: u32, integer_bits: u32, bus_width: u32) -> WordCodec {
    WordCodec::new(
        FixedFormat::new(data_width, integer_bits).unwrap(),
        BusLayout::new(data_width, bus_width).unwrap(),
    )
    .unwrap()
}

fn ramp(n: usize) -> Vec<f32> {
    (0..n).map(|i| (i as f32 - n as f32 / 2.0) * 0.37).collect()
}

#[test]
fn test_allocation_rounds_to_whole_beats() {
    let multi = MemoryImage::new(BusLayout::new(32, 128).unwrap(), 6);
    assert_eq!(multi.beats().len(), 2);
    assert_eq!(multi.word_capacity(), 8);

    let wide = MemoryImage::new(BusLayout::new(64, 32).unwrap(), 6);
    assert_eq!(wide.beats().len(), 12);
    assert_eq!(wide.word_capacity(), 6);
}

#[test]
fn test_one_word_many_beats_matches_multi_word_layout() {
    let samples = ramp(16);
    let same_width = codec(32, 14, 32);
    let multi_word = codec(32, 14, 64);

    let mut a = MemoryImage::new(same_width.layout(), samples.len());
    let mut b = MemoryImage::new(multi_word.layout(), samples.len());
    a.load(0, &samples, &same_width).unwrap();
    b.load(0, &samples, &multi_word).unwrap();

    assert_eq!(a.beats().len(), 16);
    assert_eq!(b.beats().len(), 8);

    let from_a = a.dump(0, samples.len(), &same_width).unwrap();
    let from_b = b.dump(0, samples.len(), &multi_word).unwrap();
    assert_eq!(from_a, from_b);
    for (x, y) in samples.iter().zip(&from_a) {
        assert!((x - y).abs() < 1e-5);
    }
}

#[test]
fn test_wide_word_fans_across_beats() {
    let c = codec(64, 42, 16);
    let mut mem = MemoryImage::new(c.layout(), 2);
    mem.load(0, &[1.0, -1.0], &c).unwrap();

    // 1.0 with 22 fractional bits, least significant beat first
    let one: Vec<u128> = mem.beats()[..4].iter().map(|b| b.to_bits()).collect();
    assert_eq!(one, vec![0x0000, 0x0040, 0x0000, 0x0000]);
    let minus_one: Vec<u128> = mem.beats()[4..].iter().map(|b| b.to_bits()).collect();
    assert_eq!(minus_one, vec![0x0000, 0xFFC0, 0xFFFF, 0xFFFF]);
}

#[test]
fn test_multi_word_beat_contents() {
    let c = codec(16, 8, 32);
    let mut mem = MemoryImage::new(c.layout(), 2);
    mem.load(0, &[1.0, 2.0], &c).unwrap();
    assert_eq!(mem.beats()[0].to_bits(), 0x0200_0100);
}

#[test]
fn test_set_word_keeps_neighbours() {
    let c = codec(8, 4, 32);
    let mut mem = MemoryImage::new(c.layout(), 4);
    for (i, bits) in [0xDD, 0xCC, 0xBB, 0xAA].into_iter().enumerate() {
        mem.set_word(i, EncodedWord::from_bits(bits)).unwrap();
    }
    assert_eq!(mem.beats()[0].to_bits(), 0xAABB_CCDD);

    mem.set_word(1, EncodedWord::from_bits(0x11)).unwrap();
    assert_eq!(mem.beats()[0].to_bits(), 0xAABB_11DD);
    assert_eq!(mem.word(3).unwrap().to_bits(), 0xAA);
}

#[test]
fn test_offset_region() {
    let c = codec(32, 14, 64);
    let mut mem = MemoryImage::new(c.layout(), 8);
    mem.load(3, &[0.5, 0.25], &c).unwrap();
    assert_eq!(mem.dump(0, 3, &c).unwrap(), vec![0.0, 0.0, 0.0]);
    assert_eq!(mem.dump(3, 2, &c).unwrap(), vec![0.5, 0.25]);
    assert_eq!(mem.locate(3).unwrap(), WordLocation { beat: 1, lsb: 32 });
}

#[test]
fn test_out_of_range() {
    let c = codec(32, 14, 64);
    let mut mem = MemoryImage::new(c.layout(), 4);
    assert!(matches!(
        mem.load(3, &[1.0, 2.0], &c),
        Err(VerifyError::WordOutOfRange { index: 4, capacity: 4 })
    ));
    assert!(mem.dump(0, 5, &c).is_err());
    assert!(mem.word(4).is_err());
}

#[test]
fn test_layout_mismatch_rejected() {
    let mem = MemoryImage::new(BusLayout::new(32, 64).unwrap(), 4);
    assert!(mem.dump(0, 4, &codec(32, 14, 32)).is_err());
}

#[test]
fn test_load_matches_hand_packed_beats() {
    let c = codec(32, 14, 128);
    let samples = ramp(10);
    let mut mem = MemoryImage::new(c.layout(), samples.len());
    mem.load(0, &samples, &c).unwrap();

    let layout = c.layout();
    let mut words: Vec<EncodedWord> = samples.iter().map(|&x| c.encode(x)).collect();
    words.resize(layout.adjusted_words(words.len()), EncodedWord::default());
    let expected: Vec<BusBeat> = words.chunks(4).map(|w| layout.pack(w).unwrap()).collect();
    assert_eq!(mem.beats(), expected.as_slice());

    for (beat, chunk) in mem.beats().iter().zip(words.chunks(4)) {
        assert_eq!(layout.unpack(*beat).unwrap(), chunk);
    }
}

#[test]
fn test_unaligned_load_keeps_beat_neighbours() {
    let c = codec(16, 8, 64);
    let mut mem = MemoryImage::new(c.layout(), 8);
    mem.load(0, &[1.0; 8], &c).unwrap();
    mem.load(3, &[2.0, 3.0], &c).unwrap();
    assert_eq!(
        mem.dump(0, 8, &c).unwrap(),
        vec![1.0, 1.0, 1.0, 2.0, 3.0, 1.0, 1.0, 1.0]
    );
}
