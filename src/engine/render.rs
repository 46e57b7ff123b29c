use std::io::{self, Write};

use crate::models::{Entry, UsageResult};

/// Write `result` as an ASCII tree: the root with its total, then every
/// returned entry with its formatted size.
pub fn write_result<W: Write>(writer: &mut W, result: &UsageResult) -> io::Result<()> {
    if let Some(error) = result.error.as_ref() {
        return writeln!(writer, "{} [error: {error}]", result.root_path.display());
    }

    writeln!(writer, "{} ({})", result.root_path.display(), result.total_str)?;
    write_children(writer, &result.items)?;

    if let Some(warnings) = result.warnings.as_ref().filter(|w| !w.is_empty()) {
        writeln!(writer)?;
        for warning in warnings {
            writeln!(writer, "warning: {}: {}", warning.path.display(), warning.reason)?;
        }
    }

    Ok(())
}

pub fn write_children<W: Write>(writer: &mut W, children: &[Entry]) -> io::Result<()> {
    write_children_inner(writer, children, &[])
}

fn write_children_inner<W: Write>(
    writer: &mut W,
    children: &[Entry],
    ancestor_has_more: &[bool],
) -> io::Result<()> {
    for (index, entry) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();

        for &has_more in ancestor_has_more {
            if has_more {
                writer.write_all(b"|   ")?;
            } else {
                writer.write_all(b"    ")?;
            }
        }

        if is_last {
            writer.write_all(b"`-- ")?;
        } else {
            writer.write_all(b"|-- ")?;
        }

        writer.write_all(entry.name.as_bytes())?;
        if entry.is_dir {
            writer.write_all(b"/")?;
        }
        writeln!(writer, " ({})", entry.size_str)?;

        if let Some(grandchildren) = entry.children.as_ref().filter(|c| !c.is_empty()) {
            let mut next_ancestor_has_more = ancestor_has_more.to_vec();
            next_ancestor_has_more.push(!is_last);
            write_children_inner(writer, grandchildren, &next_ancestor_has_more)?;
        }
    }

    Ok(())
}
