use roadnet_core::{Error, NodeId, Result, Vehicle};

/// One line of the delimited record format.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Node { id: NodeId, name: String },
    Edge { from: NodeId, to: NodeId, weight: f32 },
    Vehicle(Vehicle),
}

fn invalid(line: &str, reason: &str) -> Error {
    Error::InvalidRecord {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

fn field<'a>(fields: &[&'a str], idx: usize, line: &str) -> Result<&'a str> {
    fields
        .get(idx)
        .copied()
        .ok_or_else(|| invalid(line, "missing field"))
}

fn int_field(fields: &[&str], idx: usize, line: &str) -> Result<NodeId> {
    field(fields, idx, line)?
        .parse()
        .map_err(|_| invalid(line, "expected a junction id"))
}

/// Parse one line of a record file.
///
/// All whitespace is stripped before parsing, even inside names; the format
/// has never allowed spaces in a field. Blank lines and `#` comments yield
/// `Ok(None)`. Fields beyond the ones a record kind needs are ignored.
pub fn parse_line(line: &str) -> Result<Option<Record>> {
    let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() || stripped.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = stripped.split(';').collect();
    let record = match fields[0] {
        "N" => {
            let id = int_field(&fields, 1, line)?;
            let name = field(&fields, 2, line)?;
            if name.is_empty() {
                return Err(invalid(line, "empty node name"));
            }
            Record::Node {
                id,
                name: name.to_string(),
            }
        }
        "E" => Record::Edge {
            from: int_field(&fields, 1, line)?,
            to: int_field(&fields, 2, line)?,
            weight: field(&fields, 3, line)?
                .parse()
                .map_err(|_| invalid(line, "expected an edge weight"))?,
        },
        "V" => Record::Vehicle(Vehicle {
            id: field(&fields, 1, line)?.to_string(),
            category: field(&fields, 2, line)?.to_string(),
            plate: field(&fields, 3, line)?.to_string(),
            origin: int_field(&fields, 4, line)?,
            destination: int_field(&fields, 5, line)?,
            entered_at: field(&fields, 6, line)?.to_string(),
        }),
        tag => return Err(invalid(line, &format!("unknown record tag '{}'", tag))),
    };

    Ok(Some(record))
}

pub fn format_node(id: NodeId, name: &str) -> String {
    format!("N;{};{}", id, name)
}

pub fn format_edge(from: NodeId, to: NodeId, weight: f32) -> String {
    format!("E;{};{};{}", from, to, weight)
}

pub fn format_vehicle(v: &Vehicle) -> String {
    format!(
        "V;{};{};{};{};{};{}",
        v.id, v.category, v.plate, v.origin, v.destination, v.entered_at
    )
}
