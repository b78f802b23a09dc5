//! Public declaration scanning.
//!
//! Matches `pub trait|struct|enum|type Name` at the start of a line
//! (leading whitespace allowed). Names must start with an uppercase
//! letter. Restricted visibility such as `pub(crate)` is not public and
//! is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::{ScanError, SourceTree};
use crate::types::{DeclKind, DefinitionIndex, PublicItem};

static PUB_DECL: Lazy<Regex> = Lazy::new(|| {
    crate::compile_pattern(r"(?m)^[ \t]*pub[ \t]+(trait|struct|enum|type)[ \t]+([A-Z][A-Za-z0-9_]*)\b")
});

/// Extracts public declarations from a single file's text.
#[must_use]
pub fn declarations_in(contents: &str, defining_path: &str) -> Vec<PublicItem> {
    PUB_DECL
        .captures_iter(contents)
        .filter_map(|caps| {
            let kind = DeclKind::from_keyword(caps.get(1)?.as_str())?;
            let name = caps.get(2)?.as_str();
            Some(PublicItem::new(name, kind, defining_path))
        })
        .collect()
}

/// Collects every public declaration under `dir`.
///
/// The result is sorted by `(name, path)` and unique per `(name, path)`.
/// A missing directory yields no items.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn collect_public_items(tree: &SourceTree, dir: &Path) -> Result<Vec<PublicItem>, ScanError> {
    let mut items = Vec::new();
    for file in tree.files_under(dir)? {
        let contents = tree.read(&file)?;
        let rel = tree.relative(&file);
        let found = declarations_in(&contents, &rel);
        debug!("{}: {} public declarations", rel, found.len());
        items.extend(found);
    }

    items.sort();
    items.dedup_by(|a, b| a.name == b.name && a.defining_path == b.defining_path);
    Ok(items)
}

/// Picks one definition per name: the first in `(name, path)` order.
#[must_use]
pub fn first_definitions(items: &[PublicItem]) -> BTreeMap<&str, &PublicItem> {
    let mut indexed = BTreeMap::new();
    for item in items {
        indexed.entry(item.name.as_str()).or_insert(item);
    }
    indexed
}

/// Collects data-shape declarations (struct, enum, type alias) under `dir`,
/// keyed by name. Traits are excluded.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn collect_type_definitions(
    tree: &SourceTree,
    dir: &Path,
) -> Result<DefinitionIndex, ScanError> {
    let mut index = DefinitionIndex::new();
    for file in tree.files_under(dir)? {
        let contents = tree.read(&file)?;
        let rel = tree.relative(&file);
        for item in declarations_in(&contents, &rel) {
            if item.kind.is_data_shape() {
                index.entry(item.name).or_default().insert(item.defining_path);
            }
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extracts_all_four_kinds() {
        let src = "pub struct Foo;\npub enum Bar { A }\npub trait Baz {}\npub type Qux = X;\n";
        let items = declarations_in(src, "lib.rs");
        let got: Vec<(&str, DeclKind)> = items.iter().map(|i| (i.name.as_str(), i.kind)).collect();
        assert_eq!(
            got,
            vec![
                ("Foo", DeclKind::Struct),
                ("Bar", DeclKind::Enum),
                ("Baz", DeclKind::Trait),
                ("Qux", DeclKind::TypeAlias),
            ]
        );
    }

    #[test]
    fn allows_indentation_and_generics() {
        let src = "mod inner {\n    pub trait Port<T>: Send {}\n\tpub struct Wrapper<'a>(&'a str);\n}\n";
        let names: Vec<String> = declarations_in(src, "a.rs").into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Port", "Wrapper"]);
    }

    #[test]
    fn ignores_restricted_and_non_leading() {
        let src = "pub(crate) struct Hidden;\nstruct Private;\n// pub struct Commented;\nlet s = \"pub struct InString\";\npub struct lowercase;\npub fn Func() {}\n";
        assert!(declarations_in(src, "a.rs").is_empty());
    }

    #[test]
    fn keyword_must_be_exact() {
        let src = "pub structure Nope;\npub enumerate Nope2;\n";
        assert!(declarations_in(src, "a.rs").is_empty());
    }

    #[test]
    fn same_name_in_two_files_is_kept_twice() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("ports");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.rs"), "pub struct Dup;\n").unwrap();
        fs::write(dir.join("a.rs"), "pub struct Dup;\npub struct Dup;\n").unwrap();

        let tree = SourceTree::new(tmp.path());
        let items = collect_public_items(&tree, Path::new("ports")).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].defining_path, "ports/a.rs");
        assert_eq!(items[1].defining_path, "ports/b.rs");

        let first = first_definitions(&items);
        assert_eq!(first.len(), 1);
        assert_eq!(first["Dup"].defining_path, "ports/a.rs");
    }

    #[test]
    fn type_definitions_exclude_traits() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dto");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("lib.rs"),
            "pub struct Shape;\npub trait Behaviour {}\npub type Alias = u8;\n",
        )
        .unwrap();

        let tree = SourceTree::new(tmp.path());
        let index = collect_type_definitions(&tree, Path::new("dto")).unwrap();
        let names: Vec<&String> = index.keys().collect();
        assert_eq!(names, vec!["Alias", "Shape"]);
    }

    #[test]
    fn struct_sharing_a_file_with_same_named_trait_is_indexed() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dto");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("lib.rs"),
            "mod a {\n    pub trait Shared {}\n}\nmod b {\n    pub struct Shared;\n}\n",
        )
        .unwrap();

        let tree = SourceTree::new(tmp.path());
        let index = collect_type_definitions(&tree, Path::new("dto")).unwrap();
        let paths: Vec<&String> = index["Shared"].iter().collect();
        assert_eq!(paths, vec!["dto/lib.rs"]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let tree = SourceTree::new(tmp.path());
        assert!(collect_public_items(&tree, Path::new("absent")).unwrap().is_empty());
    }
}
