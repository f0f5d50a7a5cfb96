//! Pure rewriting of the runtime's `DOCKER_OPTS` option line.
//!
//! No I/O. The infra layer reads the file, calls [`point_at`], and writes the
//! result back.

use std::sync::LazyLock;

use regex::Regex;

/// Suffix appended to the runtime config path for its backup copy.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Active option line previously written by dem: `DOCKER_OPTS="-g <path> ...`.
static MANAGED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"^(?P<lead>\s*DOCKER_OPTS=")-g (?P<path>[^\s"]+) ?"#).expect("valid regex")
});

/// Commented-out option line shipped by the distribution: `#DOCKER_OPTS="...`.
static COMMENTED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"^(?P<indent>\s*)#\s*DOCKER_OPTS=""#).expect("valid regex")
});

/// Result of rewriting the config text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The text changed; holds the new file contents.
    Patched(String),
    /// The managed line already points at the requested data root.
    AlreadySet,
    /// Neither a managed nor a commented `DOCKER_OPTS` line exists.
    OptionNotFound,
}

/// Point the runtime's data root at `data_root`.
///
/// Rewrites the first managed `DOCKER_OPTS="-g <path>` line if one exists,
/// otherwise uncomments the first `#DOCKER_OPTS="` line and prepends
/// `-g <data_root>` to its value. All other lines are left byte-for-byte
/// intact, including line endings.
#[must_use]
pub fn point_at(text: &str, data_root: &str) -> PatchOutcome {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    if let Some((idx, caps)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| MANAGED_LINE_RE.captures(line).map(|c| (i, c)))
    {
        if &caps["path"] == data_root {
            return PatchOutcome::AlreadySet;
        }
        let rest = &lines[idx][caps.get(0).map_or(0, |m| m.end())..];
        let line = format!("{}-g {data_root} {rest}", &caps["lead"]);
        return PatchOutcome::Patched(replace_line(&lines, idx, &line));
    }

    if let Some((idx, caps)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| COMMENTED_LINE_RE.captures(line).map(|c| (i, c)))
    {
        let rest = &lines[idx][caps.get(0).map_or(0, |m| m.end())..];
        let line = format!("{}DOCKER_OPTS=\"-g {data_root} {rest}", &caps["indent"]);
        return PatchOutcome::Patched(replace_line(&lines, idx, &line));
    }

    PatchOutcome::OptionNotFound
}

fn replace_line(lines: &[&str], idx: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len()).sum::<usize>() + 64);
    for (i, line) in lines.iter().enumerate() {
        out.push_str(if i == idx { replacement } else { line });
    }
    out
}
