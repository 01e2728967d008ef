use huffpack::{CodeTable, EncodingTree, FrequencyTable, HuffError, HuffmanCodec, Symbol};
use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use tempfile::{TempDir, tempfile};

fn sample_text() -> Vec<u8> {
    let paragraph = "It was the best of times, it was the worst of times, it was the age of \
                     wisdom, it was the age of foolishness, it was the epoch of belief, it was \
                     the epoch of incredulity.\n";
    paragraph.repeat(40).into_bytes()
}

#[test]
fn test_file_roundtrip() -> huffpack::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("source.txt");
    let packed = temp_dir.path().join("source.huf");
    let restored = temp_dir.path().join("restored.txt");

    let original = sample_text();
    fs::write(&source, &original)?;

    let stats = huffpack::compress(File::open(&source)?, File::create(&packed)?)?;
    assert_eq!(stats.input_len, original.len() as u64);
    assert_eq!(fs::metadata(&packed)?.len(), stats.output_len());
    assert!(stats.output_len() < original.len() as u64);

    let dstats = huffpack::decompress(File::open(&packed)?, File::create(&restored)?)?;
    assert_eq!(dstats.output_len, original.len() as u64);
    assert_eq!(fs::read(&restored)?, original);
    Ok(())
}

#[test]
fn test_empty_file_roundtrip() -> huffpack::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("empty");
    let packed = temp_dir.path().join("empty.huf");
    File::create(&source)?;

    huffpack::compress(File::open(&source)?, File::create(&packed)?)?;
    let mut restored = Vec::new();
    huffpack::decompress(File::open(&packed)?, &mut restored)?;
    assert!(restored.is_empty());
    Ok(())
}

#[test]
fn test_shared_temp_file() -> huffpack::Result<()> {
    // Compressed data in the same handle as the input, written after it.
    let mut file = tempfile()?;
    let binary: Vec<u8> = (0..20_000u32).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
    file.write_all(&binary)?;
    file.seek(SeekFrom::Start(0))?;

    let mut packed = Vec::new();
    HuffmanCodec::new()
        .with_buffer_size(512)
        .compress(&mut file, &mut packed)?;

    let restored = HuffmanCodec::new().decompress_bytes(&packed)?;
    assert_eq!(restored, binary);
    Ok(())
}

#[test]
fn test_codes_from_header_match_encoder() -> huffpack::Result<()> {
    let original = sample_text();
    let packed = huffpack::compress_bytes(&original)?;

    let from_input = FrequencyTable::from_bytes(&original);
    let from_header = huffpack::format::read_header(&mut packed.as_slice())?;
    assert_eq!(from_input, from_header);

    let encoder_codes = CodeTable::from_tree(&EncodingTree::build(&from_input)?);
    let decoder_codes = CodeTable::from_tree(&EncodingTree::build(&from_header)?);
    let listing = |table: &CodeTable| {
        table
            .iter()
            .map(|(symbol, code)| (symbol, code.to_bitvec()))
            .collect::<Vec<_>>()
    };
    assert_eq!(listing(&encoder_codes), listing(&decoder_codes));
    assert!(decoder_codes.is_prefix_free());
    assert!(decoder_codes.code(Symbol::EndOfStream).is_some());
    Ok(())
}

#[test]
fn test_corrupted_header_is_rejected() -> huffpack::Result<()> {
    let mut packed = huffpack::compress_bytes(b"header corruption")?;
    packed[0] = b'x';
    match huffpack::decompress_bytes(&packed) {
        Err(HuffError::MalformedHeader(_)) => Ok(()),
        other => panic!("expected a malformed header, got {:?}", other),
    }
}

#[test]
fn test_truncated_file_is_rejected() -> huffpack::Result<()> {
    let original = sample_text();
    let mut packed = huffpack::compress_bytes(&original)?;
    packed.truncate(packed.len() / 2);
    match huffpack::decompress_bytes(&packed) {
        Err(HuffError::MalformedStream(_)) => Ok(()),
        other => panic!("expected a malformed stream, got {:?}", other.map(|v| v.len())),
    }
}
