use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kiln::{DirectoryPath, FilePath, FileSystem, InMemoryFileProvider};

/// A site with `count` posts spread over ten sections, plus a theme input
/// path holding a few layouts.
fn site(count: usize) -> FileSystem {
    let memory = InMemoryFileProvider::new();
    for i in 0..count {
        let section = i % 10;
        let path = FilePath::new(&format!("/site/input/section{section}/post{i}.md")).unwrap();
        memory.insert(&path, format!("post {i}"));
        let asset = FilePath::new(&format!("/site/input/section{section}/img{i}.png")).unwrap();
        memory.insert(&asset, vec![0u8; 16]);
    }
    for name in ["base", "post", "list"] {
        let layout = FilePath::new(&format!("/site/theme/layouts/{name}.html")).unwrap();
        memory.insert(&layout, "<html>");
    }

    let mut fs = FileSystem::new(DirectoryPath::new("/site").unwrap()).unwrap();
    fs.register_provider("", Arc::new(memory));
    fs.add_input_path(DirectoryPath::new("theme").unwrap());
    fs
}

fn bench_input_globs(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_globs");

    for count in [100usize, 1000] {
        let fs = site(count);

        group.bench_with_input(BenchmarkId::new("recursive", count), &fs, |b, fs| {
            b.iter(|| fs.get_input_files(black_box(&["**/*.md"])));
        });

        group.bench_with_input(BenchmarkId::new("with_exclusion", count), &fs, |b, fs| {
            b.iter(|| fs.get_input_files(black_box(&["**/*", "!**/*.png", "!section3/**"])));
        });

        group.bench_with_input(BenchmarkId::new("narrow_base", count), &fs, |b, fs| {
            b.iter(|| fs.get_input_files(black_box(&["section1/*.md"])));
        });
    }

    group.finish();
}

fn bench_input_lookup(c: &mut Criterion) {
    let fs = site(1000);
    let hit = FilePath::new("layouts/base.html").unwrap();
    let miss = FilePath::new("missing/page.md").unwrap();

    let mut group = c.benchmark_group("input_lookup");
    group.bench_function("later_root", |b| {
        b.iter(|| fs.get_input_file(black_box(&hit)));
    });
    group.bench_function("fallback", |b| {
        b.iter(|| fs.get_input_file(black_box(&miss)));
    });
    group.finish();
}

criterion_group!(benches, bench_input_globs, bench_input_lookup);
criterion_main!(benches);
