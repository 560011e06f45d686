// 公共测试辅助函数

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 创建临时测试目录
pub fn test_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write `name` inside `dir` with the given entries.
///
/// Names ending in `/` become directory entries.
pub fn make_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = ZipWriter::new(File::create(&path).expect("create zip"));
    for (entry, content) in entries {
        if entry.ends_with('/') {
            writer
                .add_directory(*entry, SimpleFileOptions::default())
                .expect("add directory");
        } else {
            writer
                .start_file(*entry, SimpleFileOptions::default())
                .expect("start file");
            writer.write_all(content.as_bytes()).expect("write entry");
        }
    }
    writer.finish().expect("finish zip");
    path
}

/// The fixture used throughout: `a.zip` with `x.txt` and `y.txt`.
pub fn make_a_zip(dir: &Path) -> PathBuf {
    make_zip(dir, "a.zip", &[("x.txt", "x\n"), ("y.txt", "y\n")])
}

/// Local file header signature.
pub const LOCAL_HEADER: &[u8] = b"PK\x03\x04";

/// Write `name` with every entry stored uncompressed, so entry data can be
/// found verbatim in the file.
pub fn make_stored_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(File::create(&path).expect("create zip"));
    for (entry, content) in entries {
        writer.start_file(*entry, options).expect("start file");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish zip");
    path
}

/// Flip one byte inside the first occurrence of `needle` in `path`.
pub fn damage_bytes(path: &Path, needle: &[u8]) {
    damage_nth(path, needle, 0);
}

/// Flip the last byte of the `nth` (0-based) occurrence of `needle`.
pub fn damage_nth(path: &Path, needle: &[u8], nth: usize) {
    let mut bytes = fs::read(path).expect("read zip");
    let at = bytes
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .nth(nth)
        .expect("pattern not in archive");
    bytes[at + needle.len() - 1] ^= 0xff;
    fs::write(path, bytes).expect("write zip");
}

/// String form of a path as an installer script would pass it.
pub fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// 标准化临时路径
///
/// Replaces `root` with `<tmp>` and uses `/` everywhere, for snapshots.
pub fn normalize_temp_paths(output: &str, root: &Path) -> String {
    let output = output.replace(&arg(root), "<tmp>");
    let re = regex::Regex::new(r"\\+").unwrap();
    re.replace_all(&output, "/").into_owned()
}

/// Relative paths of every file and directory below `dir`, sorted.
pub fn file_set(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path
                .strip_prefix(base)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            out.push(rel);
            if path.is_dir() {
                walk(base, &path, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}
