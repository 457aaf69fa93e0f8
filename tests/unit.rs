use kslist::{
    Collector, KslistError, Rules, SkipReason, TextEncoding, TraversalBuilder, read_path_list,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn touch(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn collected(collection: &kslist::Collection) -> Vec<PathBuf> {
    collection.paths().cloned().collect()
}

#[test]
fn test_extension_and_ignore_scenario() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "a.py", "print('a')\n");
    touch(root, "b.txt", "b");
    touch(root, "sub/c.py", "print('c')\n");
    touch(root, ".git/x.py", "x");
    let config = TraversalBuilder::new()
        .extensions(vec![".py".into()])
        .ignore_patterns(vec![".git".into()])
        .max_depth(0)
        .build();
    let result = Collector::default().collect_tree(root, &config).unwrap();
    assert_eq!(collected(&result), vec![root.join("a.py"), root.join("sub/c.py")]);
    assert_eq!(result.ignored_dirs, vec![root.join(".git")]);
    assert_eq!(result.files[0].language, "python");
    assert_eq!(result.files[0].content.as_deref(), Some("print('a')\n"));
}

#[test]
fn test_max_depth_one_keeps_root_files_only() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "x.py", "x");
    touch(root, "sub/y.py", "y");
    let config = TraversalBuilder::new().max_depth(1).build();
    let result = Collector::default().collect_tree(root, &config).unwrap();
    assert_eq!(collected(&result), vec![root.join("x.py")]);
}

#[test]
fn test_depth_limit_is_never_exceeded() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "l1.rs", "");
    touch(root, "a/l2.rs", "");
    touch(root, "a/b/l3.rs", "");
    touch(root, "a/b/c/l4.rs", "");
    for limit in 1..=4 {
        let config = TraversalBuilder::new().max_depth(limit).build();
        let result = Collector::default().collect_tree(root, &config).unwrap();
        assert_eq!(result.files.len(), limit);
        for file in &result.files {
            let depth = file.path.strip_prefix(root).unwrap().components().count();
            assert!(depth <= limit, "{} deeper than {}", file.path.display(), limit);
        }
    }
    let unlimited = TraversalBuilder::new().no_limit_depth().build();
    let result = Collector::default().collect_tree(root, &unlimited).unwrap();
    assert_eq!(result.files.len(), 4);
}

#[test]
fn test_files_before_subdirectories_in_name_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "z.md", "");
    touch(root, "a/inner.md", "");
    touch(root, "b.md", "");
    touch(root, "a/aa/deep.md", "");
    touch(root, "c/last.md", "");
    let result = Collector::default()
        .collect_tree(root, &TraversalBuilder::new().build())
        .unwrap();
    assert_eq!(
        collected(&result),
        vec![
            root.join("b.md"),
            root.join("z.md"),
            root.join("a/inner.md"),
            root.join("a/aa/deep.md"),
            root.join("c/last.md"),
        ]
    );
}

#[test]
fn test_sensitive_files_never_collected() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, ".env", "TOKEN=1");
    touch(root, "secrets.json", "{}");
    touch(root, "conf/credentials.json", "{}");
    touch(root, "conf/settings.json", "{}");
    let config = TraversalBuilder::new().extensions(vec!["json".into()]).build();
    let result = Collector::default().collect_tree(root, &config).unwrap();
    assert_eq!(collected(&result), vec![root.join("conf/settings.json")]);

    let all = Collector::default()
        .collect_tree(root, &TraversalBuilder::new().build())
        .unwrap();
    let rules = Rules::default();
    assert!(all.files.iter().all(|f| !rules.is_excluded(&f.path)));
    let sensitive: Vec<_> = all
        .skipped
        .iter()
        .filter(|s| s.reason == SkipReason::Sensitive)
        .collect();
    assert_eq!(sensitive.len(), 3);
}

#[test]
fn test_output_document_is_not_collected() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "notes.md", "notes");
    touch(root, "out.md", "old document");
    let config = TraversalBuilder::new()
        .output_path(root.join("./sub/../out.md"))
        .build();
    let result = Collector::default().collect_tree(root, &config).unwrap();
    assert_eq!(collected(&result), vec![root.join("notes.md")]);
}

#[test]
fn test_empty_ignore_pattern_ignores_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/main.rs", "fn main() {}");
    let config = TraversalBuilder::new().ignore_patterns(vec![String::new()]).build();
    let result = Collector::default().collect_tree(root, &config).unwrap();
    assert_eq!(collected(&result), vec![root.join("src/main.rs")]);
    assert!(result.ignored_dirs.is_empty());
}

#[test]
fn test_latin1_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.txt");
    fs::write(&path, [b'c', b'a', 0xE7, b'a', b'\n']).unwrap();
    let result = Collector::default()
        .collect_tree(dir.path(), &TraversalBuilder::new().build())
        .unwrap();
    assert_eq!(result.files[0].content.as_deref(), Some("caça\n"));
    assert_eq!(result.files[0].encoding, Some(TextEncoding::Latin1));
}

#[test]
fn test_paths_only_reads_no_content() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.rs", "fn a() {}");
    let config = TraversalBuilder::new().paths_only(true).build();
    let result = Collector::default().collect_tree(dir.path(), &config).unwrap();
    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].content.is_none());
    assert_eq!(result.files[0].language, "rust");
}

#[test]
fn test_invalid_root() {
    let dir = tempdir().unwrap();
    let file = touch(dir.path(), "plain.txt", "");
    let config = TraversalBuilder::new().build();
    let err = Collector::default().collect_tree(&file, &config).unwrap_err();
    assert!(matches!(err, KslistError::InvalidRoot(p) if p == file));
    let missing = dir.path().join("nope");
    assert!(Collector::default().collect_tree(&missing, &config).is_err());
}

#[test]
fn test_custom_rules() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "keep.py", "");
    touch(dir.path(), "drop.py", "");
    touch(dir.path(), ".env", "");
    let rules = Rules {
        excluded_files: BTreeSet::from(["drop.py".to_string()]),
        ..Rules::default()
    };
    let result = Collector::new(rules)
        .collect_tree(dir.path(), &TraversalBuilder::new().build())
        .unwrap();
    assert_eq!(
        collected(&result),
        vec![dir.path().join(".env"), dir.path().join("keep.py")]
    );
}

#[test]
fn test_list_skips_missing_entries() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "real.py", "print()\n");
    let result =
        Collector::default().collect_list(["missing.txt", "real.py"], Some(dir.path()), false);
    assert_eq!(collected(&result), vec![dir.path().join("real.py")]);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].path, dir.path().join("missing.txt"));
    assert_eq!(result.skipped[0].reason, SkipReason::NotFound);
}

#[test]
fn test_list_keeps_input_order() {
    let dir = tempdir().unwrap();
    let b = touch(dir.path(), "b.txt", "b");
    let a = touch(dir.path(), "a.txt", "a");
    let c = touch(dir.path(), "nested/c.txt", "c");
    touch(dir.path(), ".env", "SECRET=1");
    let entries = vec![
        format!("  {}  ", c.display()),
        String::new(),
        "b.txt".to_string(),
        ".env".to_string(),
        "   ".to_string(),
        a.display().to_string(),
    ];
    let result = Collector::default().collect_list(&entries, Some(dir.path()), true);
    assert_eq!(collected(&result), vec![c, b, a]);
    assert!(result.files.iter().all(|f| f.content.is_none()));
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, SkipReason::Sensitive);
}

#[test]
fn test_list_rejects_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("folder")).unwrap();
    let result = Collector::default().collect_list(["folder"], Some(dir.path()), false);
    assert!(result.files.is_empty());
    assert_eq!(result.skipped[0].reason, SkipReason::NotFound);
}

#[test]
fn test_read_path_list() {
    let dir = tempdir().unwrap();
    let list = touch(dir.path(), "files.txt", "a.py\n\n   b.py  \r\n\t\nc/d.py");
    assert_eq!(read_path_list(&list).unwrap(), vec!["a.py", "b.py", "c/d.py"]);
    assert!(read_path_list(&dir.path().join("absent.txt")).is_err());
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_reported() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(root, "a.py", "print('a')\n");
    std::os::unix::fs::symlink(root.join("gone.py"), root.join("link.py")).unwrap();

    for paths_only in [false, true] {
        let config = TraversalBuilder::new().paths_only(paths_only).build();
        let result = Collector::default().collect_tree(root, &config).unwrap();
        assert_eq!(collected(&result), vec![root.join("a.py")]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].path, root.join("link.py"));
        assert!(matches!(result.skipped[0].reason, SkipReason::Unreadable(_)));
    }
}
