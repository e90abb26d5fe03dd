use crate::query::{CompiledQuery, Direction, Operator};
use crate::utils::json::to_wire_string;
use serde_json::Value;
use std::cmp::Ordering;

const MAX_PATH_DEPTH: usize = 32;

/// True when `doc` satisfies every compiled filter entry.
#[must_use]
pub fn eval_query(doc: &Value, query: &CompiledQuery) -> bool {
    query
        .filters
        .iter()
        .all(|(column, entries)| entries.iter().all(|e| eval_entry(doc, column, e)))
}

/// Evaluate one `operator[:operand]` entry against `doc[column]`.
#[must_use]
pub fn eval_entry(doc: &Value, column: &str, entry: &str) -> bool {
    let (op_name, operand) = match entry.split_once(':') {
        Some((op, rest)) => (op, Some(rest)),
        None => (entry, None),
    };
    let Ok(op) = op_name.parse::<Operator>() else {
        log::warn!("unknown filter operator `{op_name}` on `{column}`");
        return false;
    };
    let field = get_path(doc, column);
    match op {
        Operator::Empty => is_empty(field),
        Operator::NotEmpty => !is_empty(field),
        Operator::Eq => matches_eq(field, operand),
        Operator::Ne => !matches_eq(field, operand),
        Operator::Lt => ordering(field, operand) == Some(Ordering::Less),
        Operator::Gt => ordering(field, operand) == Some(Ordering::Greater),
        Operator::Lte => matches!(ordering(field, operand), Some(Ordering::Less | Ordering::Equal)),
        Operator::Gte => {
            matches!(ordering(field, operand), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::StartsWith => text_test(field, operand, |s, p| s.starts_with(p)),
        Operator::EndsWith => text_test(field, operand, |s, p| s.ends_with(p)),
        Operator::Contains => text_test(field, operand, |s, p| s.contains(p)),
        Operator::NotStartsWith => !text_test(field, operand, |s, p| s.starts_with(p)),
        Operator::NotEndsWith => !text_test(field, operand, |s, p| s.ends_with(p)),
        Operator::NotContains => !text_test(field, operand, |s, p| s.contains(p)),
        Operator::In => in_set(field, operand),
        Operator::NotIn => !in_set(field, operand),
        Operator::Between => between(field, operand),
        Operator::NotBetween => !between(field, operand),
    }
}

/// Order two documents by the compiled sort columns.
#[must_use]
pub fn compare_docs(a: &Value, b: &Value, sort: &[(String, Direction)]) -> Ordering {
    for (column, dir) in sort {
        let ord = match (get_path(a, column), get_path(b, column)) {
            (Some(x), Some(y)) => compare_json(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return if matches!(dir, Direction::Asc) { ord } else { ord.reverse() };
        }
    }
    Ordering::Equal
}

pub fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let fx = x.as_f64().unwrap_or(f64::NAN);
            let fy = y.as_f64().unwrap_or(f64::NAN);
            fx.total_cmp(&fy)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() || path.len() > 1024 {
        return None;
    }
    let mut cur = doc;
    for (depth, part) in path.split('.').enumerate() {
        if depth >= MAX_PATH_DEPTH {
            return None;
        }
        cur = cur.as_object()?.get(part)?;
    }
    Some(cur)
}

fn is_empty(field: Option<&Value>) -> bool {
    match field {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(_)) => false,
    }
}

fn matches_eq(field: Option<&Value>, operand: Option<&str>) -> bool {
    match operand {
        None => matches!(field, None | Some(Value::Null)),
        Some(_) => ordering(field, operand) == Some(Ordering::Equal),
    }
}

/// Compare a field against a wire operand: numerically when both sides are numbers, otherwise by
/// the field's wire form.
fn ordering(field: Option<&Value>, operand: Option<&str>) -> Option<Ordering> {
    let field = field?;
    let operand = operand?;
    if field.is_null() {
        return None;
    }
    if let Value::Number(n) = field
        && let (Some(x), Ok(y)) = (n.as_f64(), operand.trim().parse::<f64>())
    {
        return Some(x.total_cmp(&y));
    }
    Some(to_wire_string(field).as_str().cmp(operand))
}

fn text_test(field: Option<&Value>, operand: Option<&str>, f: impl Fn(&str, &str) -> bool) -> bool {
    match (field, operand) {
        (Some(v), Some(p)) if !v.is_null() => f(&to_wire_string(v), p),
        _ => false,
    }
}

fn in_set(field: Option<&Value>, operand: Option<&str>) -> bool {
    operand.is_some_and(|set| set.split(',').any(|item| matches_eq(field, Some(item))))
}

fn between(field: Option<&Value>, operand: Option<&str>) -> bool {
    let Some((low, high)) = operand.and_then(|o| o.split_once(',')) else {
        return false;
    };
    matches!(ordering(field, Some(low)), Some(Ordering::Greater | Ordering::Equal))
        && matches!(ordering(field, Some(high)), Some(Ordering::Less | Ordering::Equal))
}
