use serde_json::Value;

use crate::elements::Elements;

/// Reconcile a positional raw-value array against an element list that may
/// contain readonly elements the remote client omitted from its response.
///
/// When the lengths already match (older clients echo every element) the raw
/// array passes through unchanged. Otherwise a separate read cursor advances
/// over the raw array only at interactive positions, yielding an output of
/// the element list's length with `None` at every readonly position.
pub fn align_response(elements: &Elements, raw: &[Value]) -> Vec<Option<Value>> {
    if elements.len() == raw.len() {
        return raw.iter().cloned().map(Some).collect();
    }

    let mut cursor = 0;
    elements
        .iter()
        .map(|element| {
            if element.is_readonly() {
                None
            } else {
                let value = raw.get(cursor).cloned();
                cursor += 1;
                value
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matching_lengths_pass_through() {
        let mut elements = Elements::new();
        elements.add_input("Name", "").add_toggle("Subscribe");
        let raw = vec![json!("Steve"), json!(true)];
        let aligned = align_response(&elements, &raw);
        assert_eq!(aligned, vec![Some(json!("Steve")), Some(json!(true))]);
    }

    #[test]
    fn readonly_gaps_are_filled_with_none() {
        let mut elements = Elements::new();
        elements
            .add_header("Profile")
            .add_input("Name", "")
            .add_divider()
            .add_toggle("Subscribe")
            .add_label("fine print");
        let raw = vec![json!("Steve"), json!(false)];
        let aligned = align_response(&elements, &raw);
        assert_eq!(aligned.len(), elements.len());
        assert_eq!(
            aligned,
            vec![None, Some(json!("Steve")), None, Some(json!(false)), None]
        );
    }

    #[test]
    fn short_responses_leave_trailing_interactive_positions_empty() {
        let mut elements = Elements::new();
        elements.add_label("intro").add_input("A", "").add_input("B", "");
        let raw = vec![json!("only one")];
        let aligned = align_response(&elements, &raw);
        assert_eq!(aligned, vec![None, Some(json!("only one")), None]);
    }
}
