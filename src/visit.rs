use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions picked up when scanning directories. Explicitly named files are
/// always taken as-is.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "wav", "flac", "ogg", "aac"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    fn new(input: PathBuf, extension: &str) -> Self {
        let output = input.with_extension(extension);
        Self { input, output }
    }
}

/// Files found for the given inputs plus everything that went wrong on the
/// way. A broken input does not stop the others from being expanded.
#[derive(Debug, Default)]
pub struct Expansion {
    pub jobs: Vec<Job>,
    pub errors: Vec<anyhow::Error>,
}

/// Resolves input paths into jobs whose output path carries `extension`.
pub fn expand(paths: &[PathBuf], recursive: bool, extension: &str) -> Expansion {
    let mut expansion = Expansion::default();

    for path in paths {
        if path.exists() {
            expand_path(path, recursive, extension, &mut expansion);
            continue;
        }
        match glob(path) {
            Ok(matches) if !matches.is_empty() => {
                for found in matches {
                    expand_path(&found, recursive, extension, &mut expansion);
                }
            }
            Ok(_) => expansion
                .errors
                .push(anyhow!("the path {} does not exist", path.display())),
            Err(err) => expansion.errors.push(err),
        }
    }

    if expansion.jobs.is_empty() && expansion.errors.is_empty() {
        expansion.errors.push(anyhow!(
            "no audio files found, supported extensions are {}",
            SUPPORTED_EXTENSIONS.join(", ")
        ));
    }
    expansion
}

fn expand_path(path: &Path, recursive: bool, extension: &str, expansion: &mut Expansion) {
    if path.is_dir() {
        let mut found = Vec::new();
        match scan_dir(path, recursive, &mut found) {
            Ok(()) => {
                found.sort();
                expansion
                    .jobs
                    .extend(found.into_iter().map(|p| Job::new(p, extension)));
            }
            Err(err) => expansion.errors.push(err),
        }
    } else {
        expansion.jobs.push(Job::new(path.to_path_buf(), extension));
    }
}

/// Expands `*` and `?` in any component of `pattern`, the way a shell would
/// for a quoted argument. Hidden entries only match a pattern starting with a
/// dot. A pattern without wildcards matches nothing.
fn glob(pattern: &Path) -> Result<Vec<PathBuf>> {
    if !pattern.to_string_lossy().contains(['*', '?']) {
        return Ok(Vec::new());
    }

    let mut candidates = vec![PathBuf::new()];
    for component in pattern.components() {
        let part = component.as_os_str().to_string_lossy();
        if !part.contains(['*', '?']) {
            for candidate in &mut candidates {
                candidate.push(component);
            }
            continue;
        }

        let mut next = Vec::new();
        for base in &candidates {
            let dir = if base.as_os_str().is_empty() { Path::new(".") } else { base.as_path() };
            if !dir.is_dir() {
                continue;
            }
            let entries = fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
            for entry in entries {
                let file_name = entry
                    .with_context(|| format!("Failed to read {}", dir.display()))?
                    .file_name();
                let name = file_name.to_string_lossy();
                if name.starts_with('.') && !part.starts_with('.') {
                    continue;
                }
                if wildcard_match(&part, &name) {
                    next.push(base.join(&file_name));
                }
            }
        }
        candidates = next;
    }

    let mut matches: Vec<PathBuf> = candidates.into_iter().filter(|p| p.exists()).collect();
    matches.sort();
    Ok(matches)
}

/// Matches `name` against `pattern`, where `*` is any run of characters and
/// `?` exactly one.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                // Let the last star swallow one more character
                Some((star, matched)) => {
                    p = star + 1;
                    n = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

fn scan_dir(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .path();
        if path.is_dir() {
            if recursive {
                scan_dir(&path, recursive, found)?;
            }
        } else if is_supported(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
