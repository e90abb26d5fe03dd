use crate::errors::SdkError;
use crate::utils::json::to_wire_string;
use regex::{NoExpand, Regex};
use serde_json::Value;

use super::types::{CompiledQuery, Filter, Sort};

/// Substitute `{name}` and `{name:pattern}` placeholders in `template`.
///
/// Every occurrence of each named placeholder is replaced; the pattern suffix is accepted and
/// dropped. Placeholders with no matching parameter stay in the output verbatim.
///
/// # Errors
/// Returns `InvalidArgument` if a placeholder matcher cannot be built for a parameter name.
pub fn compile_url<'a, I>(template: &str, params: I) -> Result<String, SdkError>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut path = template.to_string();
    for (name, value) in params {
        let re = Regex::new(&format!(r"\{{{}(:[^}}]+)?\}}", regex::escape(name)))
            .map_err(|e| SdkError::InvalidArgument(format!("path parameter `{name}`: {e}")))?;
        let replacement = to_wire_string(value);
        path = re.replace_all(&path, NoExpand(&replacement)).into_owned();
    }
    Ok(path)
}

pub(crate) fn compile_query(
    filters: &[Filter],
    sorts: &[Sort],
    limit: Option<u64>,
    offset: Option<u64>,
) -> CompiledQuery {
    let mut out = CompiledQuery { limit, offset, ..CompiledQuery::default() };
    for f in filters {
        let rendered = f.render();
        match out.filters.iter_mut().find(|(c, _)| *c == f.column) {
            Some((_, entries)) => entries.push(rendered),
            None => out.filters.push((f.column.clone(), vec![rendered])),
        }
    }
    for s in sorts {
        match out.sort.iter_mut().find(|(c, _)| *c == s.column) {
            Some((_, dir)) => *dir = s.direction,
            None => out.sort.push((s.column.clone(), s.direction)),
        }
    }
    out
}
