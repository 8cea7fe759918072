//! Glob-based input resolution.

use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use todo_gate_ports::{FileResolverPort, Language, ResolveRequest, SourceFile};
use todo_gate_shared::{ErrorCode, ErrorEnvelope, Result};
use walkdir::WalkDir;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Resolves include/exclude globs against the local filesystem.
///
/// `*` and `?` never cross a path separator; `**` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobFileResolver;

impl GlobFileResolver {
    /// Create a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileResolverPort for GlobFileResolver {
    fn resolve(&self, request: &ResolveRequest) -> Result<Vec<SourceFile>> {
        let root = absolute_root(&request.root)?;
        let excludes = ExcludeSet::new(&root, &request.excludes)?;

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for include in &request.includes {
            let pattern = PatternPath::split(&root, include);
            let matched = if pattern.is_glob() {
                pattern.expand_glob(include)?
            } else {
                pattern.expand_literal(include)?
            };
            tracing::debug!(include = %include, matched = matched.len(), "expanded include");

            for path in matched {
                if excludes.is_excluded(&path) {
                    tracing::trace!(path = %path.display(), "excluded");
                    continue;
                }
                if !seen.insert(path.clone()) {
                    continue;
                }
                let display = display_path(&root, &path, pattern.absolute);
                files.push(SourceFile::new(path, display));
            }
        }

        Ok(files)
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(ErrorEnvelope::from)?;
    Ok(cwd.join(root))
}

/// A pattern split into its literal directory base and the remaining segments.
struct PatternPath {
    absolute: bool,
    base: PathBuf,
    rest: Vec<String>,
}

impl PatternPath {
    fn split(root: &Path, pattern: &str) -> Self {
        let unified = pattern.replace('\\', "/");
        let absolute = Path::new(&unified).is_absolute();
        let mut base = if absolute {
            PathBuf::from("/")
        } else {
            root.to_path_buf()
        };

        let segments = unified
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".");
        let mut rest = Vec::new();
        for segment in segments {
            if rest.is_empty() && !segment.contains(GLOB_META) {
                base.push(segment);
            } else {
                rest.push(segment.to_owned());
            }
        }

        Self {
            absolute,
            base,
            rest,
        }
    }

    fn is_glob(&self) -> bool {
        !self.rest.is_empty()
    }

    fn glob_text(&self) -> String {
        let base = self.base.to_string_lossy().replace('\\', "/");
        let base = globset::escape(base.trim_end_matches('/'));
        format!("{base}/{}", self.rest.join("/"))
    }

    fn expand_glob(&self, include: &str) -> Result<Vec<PathBuf>> {
        let matcher = compile_glob(&self.glob_text(), include)?;
        if !self.base.is_dir() {
            return Ok(Vec::new());
        }

        let mut matched: Vec<PathBuf> = walk_files(&self.base)
            .filter(|path| matcher.is_match(path))
            .collect();
        matched.sort();
        Ok(matched)
    }

    fn expand_literal(&self, include: &str) -> Result<Vec<PathBuf>> {
        if self.base.is_file() {
            return Ok(vec![self.base.clone()]);
        }
        if self.base.is_dir() {
            let mut matched: Vec<PathBuf> = walk_files(&self.base)
                .filter(|path| Language::from_path(path).is_source())
                .collect();
            matched.sort();
            return Ok(matched);
        }

        Err(ErrorEnvelope::expected(
            ErrorCode::new("scan", "input_not_found"),
            format!("input does not exist: {include}"),
        )
        .with_path(self.base.display().to_string()))
    }
}

fn walk_files(base: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(base = %base.display(), %error, "skipping unreadable entry");
                None
            },
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
}

fn compile_glob(text: &str, source: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(text)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|error| invalid_glob(source, &error))
}

fn invalid_glob(pattern: &str, error: &globset::Error) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("config", "invalid_glob"),
        format!("invalid glob {pattern}: {error}"),
    )
    .with_metadata("pattern", pattern.to_owned())
}

/// Exclude patterns; each also excludes everything below a matching directory.
struct ExcludeSet {
    set: GlobSet,
}

impl ExcludeSet {
    fn new(root: &Path, excludes: &[Box<str>]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for exclude in excludes {
            let pattern = PatternPath::split(root, exclude);
            let text = pattern.glob_text();
            let text = text.trim_end_matches('/');
            for variant in [text.to_owned(), format!("{text}/**")] {
                let glob = GlobBuilder::new(&variant)
                    .literal_separator(true)
                    .build()
                    .map_err(|error| invalid_glob(exclude, &error))?;
                builder.add(glob);
            }
        }
        let set = builder
            .build()
            .map_err(|error| invalid_glob("<excludes>", &error))?;
        Ok(Self { set })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.set.is_match(path)
    }
}

fn display_path(root: &Path, path: &Path, absolute: bool) -> String {
    let relative = if absolute {
        None
    } else {
        path.strip_prefix(root).ok()
    };
    relative.map_or_else(
        || path.display().to_string(),
        |relative| {
            relative
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part.to_string_lossy()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/")
        },
    )
}
