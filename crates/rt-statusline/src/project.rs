//! Cheap project facts: package manager, line estimate, display name

use std::path::Path;

/// Lockfile/manifest probes in priority order
const PACKAGE_MANAGERS: &[(&str, &str)] = &[
    ("pnpm-lock.yaml", "pnpm"),
    ("package-lock.json", "npm"),
    ("yarn.lock", "yarn"),
    ("Cargo.toml", "cargo"),
    ("requirements.txt", "pip"),
];

/// `📦 <name>` for the first probe found among the first `probes` entries, else `📦`
pub fn package_manager(dir: &Path, probes: usize) -> String {
    PACKAGE_MANAGERS
        .iter()
        .take(probes)
        .find(|(marker, _)| dir.join(marker).exists())
        .map(|(_, name)| format!("📦 {}", name))
        .unwrap_or_else(|| "📦".to_string())
}

/// Last path component as given, or the path itself (`.` stays `.`)
pub fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .unwrap_or(dir.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Extrapolate a total line count from the first `sample` tracked files.
/// With `lossy` unset, files that are not valid UTF-8 count as zero lines.
pub fn estimate_lines(
    dir: &Path,
    files: &[String],
    file_count: usize,
    sample: usize,
    lossy: bool,
) -> u64 {
    let sampled: Vec<&String> = files.iter().take(sample).collect();
    if sampled.is_empty() {
        return 0;
    }

    let total: u64 = sampled
        .iter()
        .map(|relative| count_lines(&dir.join(relative), lossy))
        .sum();

    (total as f64 / sampled.len() as f64 * file_count as f64) as u64
}

fn count_lines(path: &Path, lossy: bool) -> u64 {
    let Ok(bytes) = std::fs::read(path) else {
        return 0;
    };
    if !lossy && std::str::from_utf8(&bytes).is_err() {
        return 0;
    }

    // `\n`, `\r\n` and a lone `\r` each end a line
    let mut breaks = 0u64;
    let mut iter = bytes.iter().peekable();
    while let Some(byte) = iter.next() {
        match byte {
            b'\n' => breaks += 1,
            b'\r' => {
                if iter.peek() == Some(&&b'\n') {
                    iter.next();
                }
                breaks += 1;
            }
            _ => {}
        }
    }

    match bytes.last() {
        Some(b'\n' | b'\r') | None => breaks,
        Some(_) => breaks + 1,
    }
}

/// `"<n> lines"` below a thousand, `"<n/1000>k lines"` above
pub fn format_lines(lines: u64) -> String {
    if lines < 1_000 {
        format!("{} lines", lines)
    } else {
        format!("{}k lines", lines / 1_000)
    }
}
