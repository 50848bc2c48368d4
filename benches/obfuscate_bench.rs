use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sdfpack::filetype::FileType;
use sdfpack::index::IndexEntry;
use sdfpack::io_stream::SdfWriter;
use sdfpack::obfuscate;
use std::io::Cursor;
use std::path::PathBuf;

fn bench_payload_mask(c: &mut Criterion) {
    let data = vec![0x5au8; 1024 * 1024];

    c.bench_function("mask_payload_1mb", |b| {
        b.iter(|| {
            let mut buf = black_box(data.clone());
            obfuscate::mask_payload(&mut buf);
            buf
        })
    });

    c.bench_function("unmask_payload_1mb", |b| {
        b.iter(|| {
            let mut buf = black_box(data.clone());
            obfuscate::unmask_payload(&mut buf);
            buf
        })
    });
}

fn bench_write_archive(c: &mut Criterion) {
    let data = vec![42u8; 1024 * 1024];
    let entry = IndexEntry {
        path: PathBuf::new(),
        stem: *b"bench\0\0\0",
        file_type: FileType::Raw,
        offset: 0,
        size: data.len() as u32,
    };

    c.bench_function("write_1mb_archive", |b| {
        b.iter(|| {
            let mut writer = SdfWriter::new(Cursor::new(Vec::new()), false);
            writer.write_index(std::slice::from_ref(&entry)).unwrap();
            writer.write_payload(&entry, black_box(data.clone())).unwrap();
            writer.into_inner()
        })
    });
}

criterion_group!(benches, bench_payload_mask, bench_write_archive);
criterion_main!(benches);
