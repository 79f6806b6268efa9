//! Package loading from a directory of Go sources

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result, SourceError};
use crate::package::{ObjectKind, Package, TypeCatalog};
use crate::parser::{parse_file, parse_package_clause, ParsedFile};
use crate::types::PackageRef;

/// Load the single package declared by the `.go` files in `dir`.
///
/// Test files and files excluded with an `ignore` build constraint are
/// skipped. Fails if the directory holds no package, more than one package,
/// or sources with syntax errors.
pub fn load_package(dir: &Path) -> Result<Package> {
    let import_path = resolve_import_path(dir)?;

    let entries = fs::read_dir(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !is_go_source(&path) {
            continue;
        }

        let contents = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        sources.push((file_name, contents));
    }
    sources.sort_by(|a, b| a.0.cmp(&b.0));

    debug!(
        dir = %dir.display(),
        import_path = %import_path,
        files = sources.len(),
        "Loading Go package"
    );

    build_package(dir, &import_path, &sources)
}

/// Build a package from in-memory `(file name, contents)` pairs
pub fn load_sources(import_path: &str, sources: &[(String, String)]) -> Result<Package> {
    build_package(Path::new(import_path), import_path, sources)
}

fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.is_file() && name.ends_with(".go") && !name.ends_with("_test.go") && !name.starts_with('.')
}

/// Whether a build constraint before the package clause excludes the file
fn is_build_ignored(source: &str) -> bool {
    for line in source.lines() {
        let line = line.trim();
        if line.starts_with("package ") {
            return false;
        }
        if let Some(expr) = line.strip_prefix("//go:build") {
            if expr.split_whitespace().any(|term| term == "ignore") {
                return true;
            }
        }
        if let Some(expr) = line.strip_prefix("// +build") {
            if expr.split_whitespace().any(|term| term == "ignore") {
                return true;
            }
        }
    }
    false
}

fn build_package(dir: &Path, import_path: &str, sources: &[(String, String)]) -> Result<Package> {
    let mut errors = Vec::new();
    let mut by_package: BTreeMap<String, Vec<(&str, &str)>> = BTreeMap::new();

    for (file, contents) in sources {
        if is_build_ignored(contents) {
            debug!(file = %file, "Skipping file excluded by build constraint");
            continue;
        }
        match parse_package_clause(file, contents) {
            Ok(name) => by_package
                .entry(name)
                .or_default()
                .push((file.as_str(), contents.as_str())),
            Err(err) => errors.push(err),
        }
    }

    if !errors.is_empty() {
        return Err(Error::Source { errors });
    }

    if by_package.len() > 1 {
        return Err(Error::TooManyPackages {
            dir: dir.to_path_buf(),
            names: by_package.into_keys().collect(),
        });
    }

    let Some((name, files)) = by_package.into_iter().next() else {
        return Err(Error::NoPackages {
            dir: dir.to_path_buf(),
        });
    };

    let mut parsed: Vec<ParsedFile> = files
        .iter()
        .filter_map(|(file, contents)| match parse_file(file, contents, import_path) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                errors.push(err);
                None
            }
        })
        .collect();

    // Package scope: whether each declared name is a type
    let mut scope: HashMap<String, bool> = HashMap::new();
    for file in &parsed {
        for declaration in &file.declarations {
            let is_type = matches!(
                declaration.object.kind,
                ObjectKind::TypeName { .. } | ObjectKind::Unsupported { .. }
            );
            match scope.entry(declaration.object.name.clone()) {
                Entry::Occupied(_) => errors.push(SourceError::new(
                    file.file.clone(),
                    declaration.line,
                    declaration.column,
                    format!("{} redeclared in this block", declaration.object.name),
                )),
                Entry::Vacant(entry) => {
                    entry.insert(is_type);
                }
            }
        }
    }

    for file in &mut parsed {
        resolve_references(file, &scope, import_path, &mut errors);
    }

    let mut package = Package::new(PackageRef::new(import_path, name));
    for file in parsed {
        for declaration in file.declarations {
            package.insert(declaration.object);
        }
    }

    if !errors.is_empty() {
        return Err(Error::Source { errors });
    }

    debug!(
        package = %package.package().name,
        objects = package.len(),
        "Loaded Go package"
    );

    Ok(package)
}

/// Check the unqualified type names used by `file` against the package scope.
///
/// A name the package doesn't declare may come from the file's dot import;
/// with exactly one dot import such names are requalified to that package.
fn resolve_references(
    file: &mut ParsedFile,
    scope: &HashMap<String, bool>,
    import_path: &str,
    errors: &mut Vec<SourceError>,
) {
    let dot_imports: Vec<PackageRef> = file
        .imports
        .iter()
        .filter(|import| import.alias.as_deref() == Some("."))
        .map(|import| import.package.clone())
        .collect();

    let mut imported = BTreeSet::new();
    for reference in &file.references {
        let message = match scope.get(&reference.name) {
            Some(true) => continue,
            Some(false) => format!("{} is not a type", reference.name),
            None => match dot_imports.len() {
                0 => format!("undefined: {}", reference.name),
                1 => {
                    imported.insert(reference.name.clone());
                    continue;
                }
                _ => format!(
                    "undefined: {} (can't tell which dot import declares it)",
                    reference.name
                ),
            },
        };
        errors.push(SourceError::new(
            file.file.clone(),
            reference.line,
            reference.column,
            message,
        ));
    }

    let [dot] = dot_imports.as_slice() else {
        return;
    };
    if imported.is_empty() {
        return;
    }

    debug!(
        file = %file.file,
        package = %dot.path,
        names = imported.len(),
        "Resolved names through dot import"
    );

    for declaration in &mut file.declarations {
        if let ObjectKind::TypeName { ty, .. } = &mut declaration.object.kind {
            ty.requalify(&mut |package: &mut PackageRef, name: &str| {
                if package.path == import_path && imported.contains(name) {
                    *package = dot.clone();
                }
            });
        }
    }
}

/// Resolve the import path of the package in `dir`.
///
/// Walks up to the nearest `go.mod` and joins its module path with the
/// directory's relative location. The directory itself does not need to
/// exist. Without a module file the normalized absolute path is returned, so
/// every spelling of one directory resolves to the same package.
pub fn resolve_import_path(dir: &Path) -> Result<String> {
    let absolute = absolute_path(dir)?;

    for ancestor in absolute.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }

        let contents = fs::read_to_string(&go_mod).map_err(|source| Error::Io {
            path: go_mod.clone(),
            source,
        })?;
        let Some(module) = parse_module_directive(&contents) else {
            continue;
        };

        let relative = absolute.strip_prefix(ancestor).unwrap_or(Path::new(""));
        let mut import_path = module;
        for component in relative.components() {
            if let Component::Normal(part) = component {
                import_path.push('/');
                import_path.push_str(&part.to_string_lossy());
            }
        }
        return Ok(import_path);
    }

    Ok(clean_path(&absolute))
}

/// Extract the module path from the contents of a `go.mod` file
pub fn parse_module_directive(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }
        let module = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!module.is_empty()).then(|| module.to_string())
    })
}

fn absolute_path(dir: &Path) -> Result<PathBuf> {
    let joined = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .join(dir)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Slash-separated path without `.` elements or trailing separators
fn clean_path(dir: &Path) -> String {
    let parts: Vec<String> = dir
        .components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect();

    match parts.as_slice() {
        [] => ".".to_string(),
        [root] if root.is_empty() => "/".to_string(),
        _ => parts.join("/"),
    }
}
