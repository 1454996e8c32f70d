//! Integration tests for input resolution across search roots and providers.

mod common;

use std::sync::Arc;

use common::{dir, file, memory_fs};
use kiln::io::{Directory, DEFAULT_INPUT_PATH};
use kiln::{FileProvider, InMemoryFileProvider};

fn priority_fs(files: &[&str]) -> (InMemoryFileProvider, kiln::FileSystem) {
    let (memory, mut fs) = memory_fs("/a", files);
    fs.set_input_paths(vec![dir("b/c"), dir("b/d"), dir("x"), dir("y")]);
    (memory, fs)
}

#[test]
fn test_input_file_found_in_later_root() {
    let (_, fs) = priority_fs(&["/a/x/bar.txt"]);
    let found = fs.get_input_file(&file("bar.txt")).unwrap();
    assert_eq!(found.path().to_string(), "/a/x/bar.txt");
    assert!(found.exists());
}

#[test]
fn test_input_file_first_root_wins() {
    let (_, fs) = priority_fs(&["/a/x/bar.txt", "/a/b/c/bar.txt", "/a/y/bar.txt"]);
    let found = fs.get_input_file(&file("bar.txt")).unwrap();
    assert_eq!(found.path().to_string(), "/a/b/c/bar.txt");
}

#[test]
fn test_input_file_nested_relative_path() {
    let (_, fs) = priority_fs(&["/a/b/d/posts/2024/one.md"]);
    let found = fs.get_input_file(&file("posts/2024/one.md")).unwrap();
    assert_eq!(found.path().to_string(), "/a/b/d/posts/2024/one.md");
}

#[test]
fn test_missing_input_file_falls_back_to_first_root() {
    let (_, fs) = priority_fs(&[]);
    let guess = fs.get_input_file(&file("new/page.md")).unwrap();
    assert_eq!(guess.path().to_string(), "/a/b/c/new/page.md");
    assert!(!guess.exists());
}

#[test]
fn test_missing_input_file_collapses_parent_segments() {
    let (_, fs) = priority_fs(&[]);
    let guess = fs.get_input_file(&file("../shared/x.css")).unwrap();
    assert_eq!(guess.path().to_string(), "/a/b/shared/x.css");
}

#[test]
fn test_absolute_input_file_returned_directly() {
    let (_, fs) = priority_fs(&[]);
    let direct = fs.get_input_file(&file("/elsewhere/z.txt")).unwrap();
    assert_eq!(direct.path().to_string(), "/elsewhere/z.txt");
}

#[test]
fn test_default_input_path() {
    let (_, fs) = memory_fs("/site", &["/site/input/a.md"]);
    assert_eq!(fs.input_paths()[0].to_string(), DEFAULT_INPUT_PATH);
    assert!(fs.get_input_file(&file("a.md")).unwrap().exists());
}

#[test]
fn test_virtual_directory_union_in_priority_order() {
    let (_, fs) = priority_fs(&["/a/y/p/3.txt", "/a/x/p/2.txt", "/a/b/c/p/1.txt", "/a/b/c/q.txt"]);
    let input = fs.get_input_directory(Some(&dir("p"))).unwrap();
    assert_eq!(input.path().to_string(), "p");

    let files: Vec<String> = input
        .files(false)
        .unwrap()
        .iter()
        .map(|f| f.path().to_string())
        .collect();
    assert_eq!(files, vec!["/a/b/c/p/1.txt", "/a/x/p/2.txt", "/a/y/p/3.txt"]);
}

#[test]
fn test_virtual_directory_root_lists_subdirectories_once() {
    let (_, fs) = priority_fs(&["/a/b/c/p/1.txt", "/a/x/p/2.txt", "/a/y/r/3.txt"]);
    let input = fs.get_input_directory(None).unwrap();
    let subdirs: Vec<String> = input
        .directories(false)
        .unwrap()
        .iter()
        .map(|d| d.path().to_string())
        .collect();
    assert_eq!(subdirs, vec!["p", "r"]);
}

#[test]
fn test_absolute_input_directory_is_concrete() {
    let (_, fs) = priority_fs(&["/a/x/bar.txt"]);
    let concrete = fs.get_input_directory(Some(&dir("/a/x"))).unwrap();
    assert_eq!(concrete.path().to_string(), "/a/x");
    assert_eq!(concrete.files(false).unwrap().len(), 1);
}

#[test]
fn test_input_directories() {
    let (_, fs) = priority_fs(&[]);
    let dirs: Vec<String> = fs
        .get_input_directories()
        .unwrap()
        .iter()
        .map(|d| d.path().to_string())
        .collect();
    assert_eq!(dirs, vec!["/a/b/c", "/a/b/d", "/a/x", "/a/y"]);
}

#[test]
fn test_containing_input_path_prefers_longest() {
    let (_, mut fs) = memory_fs("/a", &[]);
    fs.set_input_paths(vec![dir("b"), dir("b/c")]);

    let contained = fs
        .get_containing_input_path(&file("/a/b/c/d.txt"))
        .unwrap()
        .unwrap();
    assert_eq!(contained.to_string(), "/a/b/c");

    let outer = fs.get_containing_input_path(&file("/a/b/d.txt")).unwrap().unwrap();
    assert_eq!(outer.to_string(), "/a/b");

    assert!(fs.get_containing_input_path(&file("/z/d.txt")).unwrap().is_none());
    assert!(fs.get_containing_input_path(&file("d.txt")).is_err());
}

#[test]
fn test_input_path_on_alternate_provider() {
    let (_, mut fs) = memory_fs("/site", &["/site/input/local.md"]);
    let theme = InMemoryFileProvider::new()
        .with_file("/theme/layout.html", "<html>")
        .unwrap()
        .with_file("/theme/local.md", "shadowed")
        .unwrap();
    fs.register_provider("theme", Arc::new(theme));
    fs.add_input_path(dir("theme::/theme"));

    let layout = fs.get_input_file(&file("layout.html")).unwrap();
    assert_eq!(layout.path().to_string(), "theme::/theme/layout.html");
    assert_eq!(layout.read_string().unwrap(), "<html>");

    let local = fs.get_input_file(&file("local.md")).unwrap();
    assert_eq!(local.path().to_string(), "/site/input/local.md");

    let all: Vec<String> = fs
        .get_input_directory(None)
        .unwrap()
        .files(true)
        .unwrap()
        .iter()
        .map(|f| f.path().to_string())
        .collect();
    assert_eq!(
        all,
        vec!["/site/input/local.md", "theme::/theme/layout.html", "theme::/theme/local.md"]
    );
}

#[test]
fn test_provider_lookup_failure() {
    let (_, fs) = memory_fs("/site", &[]);

    let err = fs.get_file(&file("missing::/a/b.txt")).unwrap_err();
    assert!(err.is_not_found());
    let err = fs.get_directory(&dir("missing::/a")).unwrap_err();
    assert!(err.is_not_found());

    let err = fs.get_file_provider(&file("relative.txt")).unwrap_err();
    assert!(err.is_contract_violation());
}

#[test]
fn test_setters_require_absolute_paths() {
    let (_, mut fs) = memory_fs("/site", &[]);
    assert!(fs.set_output_path(dir("public")).is_err());
    assert!(fs.set_root_path(dir("elsewhere")).is_err());
    fs.set_output_path(dir("/public")).unwrap();
    assert_eq!(fs.output_path().to_string(), "/public");
}

#[test]
fn test_output_and_root_resolution() {
    let (memory, fs) = memory_fs("/site", &["/site/kiln.yaml"]);
    assert!(fs.get_root_file(&file("kiln.yaml")).unwrap().exists());
    assert_eq!(
        fs.get_output_path(&file("a/b.html")).unwrap().to_string(),
        "/site/output/a/b.html"
    );

    let out = fs.get_output_file(&file("index.html")).unwrap();
    out.write_bytes(b"<h1>").unwrap();
    assert!(memory.file_exists(out.path()));

    fs.clean_output_directory().unwrap();
    assert!(!memory.file_exists(out.path()));
    assert!(memory.directory_exists(fs.output_path()));
}
