//! Turning user-supplied path strings into the absolute form the analyzer
//! expects, for either path syntax regardless of the host.

const FALLBACK_DRIVE: &str = "C:";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OsFamily {
    Unix,
    Windows,
}

impl OsFamily {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Drive letter (`"D:"`) of the current working directory, if it has one.
pub fn current_drive() -> Option<String> {
    let cwd = std::env::current_dir().ok()?;
    drive_of(&cwd.to_string_lossy()).map(str::to_owned)
}

/// The path analysed when the caller gives none.
pub fn default_root(family: OsFamily, cwd_drive: Option<&str>) -> String {
    match family {
        OsFamily::Unix => "/".to_owned(),
        OsFamily::Windows => format!("{}\\", cwd_drive.unwrap_or(FALLBACK_DRIVE)),
    }
}

/// Normalize `raw` into an absolute, lexically clean path for `family`.
///
/// Unix paths are forced to start at `/`. Windows paths get `/` converted to
/// `\` and are anchored on `cwd_drive` (or `C:`) when they carry no drive
/// letter. The filesystem is never consulted.
pub fn normalize_path(raw: &str, family: OsFamily, cwd_drive: Option<&str>) -> String {
    let path = raw.trim();
    match family {
        OsFamily::Unix => {
            if path.is_empty() {
                return "/".to_owned();
            }
            clean(path, '/', true, "")
        }
        OsFamily::Windows => {
            let path = path.replace('/', "\\");
            if path.is_empty() || path == "\\" {
                return default_root(family, cwd_drive);
            }

            let (drive, rest) = match drive_of(&path) {
                Some(drive) => (drive.to_owned(), path[2..].to_owned()),
                None => {
                    let drive = cwd_drive.unwrap_or(FALLBACK_DRIVE).to_owned();
                    if path.starts_with('\\') {
                        (drive, path)
                    } else {
                        (drive, format!("\\{path}"))
                    }
                }
            };
            let rooted = rest.starts_with('\\');
            clean(&rest, '\\', rooted, &drive)
        }
    }
}

fn drive_of(path: &str) -> Option<&str> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        Some(&path[..2])
    } else {
        None
    }
}

/// Collapse repeated separators, drop `.` and resolve `..` lexically.
/// Rooted paths never climb above the root.
fn clean(path: &str, separator: char, rooted: bool, prefix: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(separator) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let joined = parts.join(&separator.to_string());
    match (rooted, joined.is_empty()) {
        (true, _) => format!("{prefix}{separator}{joined}"),
        (false, true) => format!("{prefix}."),
        (false, false) => format!("{prefix}{joined}"),
    }
}
