use std::io::{BufRead, Write};

use serde_json::{Value, json};

use formgate::{Form, Outcome, Session, Transport};

/// Holds the most recent payload so the console loop can pick it up after
/// the session call returns.
#[derive(Default)]
pub struct ConsoleTransport {
    pending: Option<Value>,
}

impl Transport for ConsoleTransport {
    fn send(&mut self, _recipient: &str, payload: &Value) {
        self.pending = Some(payload.clone());
    }
}

/// What the user typed didn't fit the element; the message explains what was
/// expected.
#[derive(Debug)]
pub struct AnswerParseError(pub String);

/// Runs one form (including any validation resends and confirm dialogs) as a
/// line-oriented prompt session over the given reader/writer pair.
pub fn run_flow(
    form: Form,
    recipient: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let mut session = Session::new(ConsoleTransport::default());
    session.open(recipient, form)?;

    let mut outcome = Outcome::Closed;
    while session.is_active(recipient) {
        let Some(payload) = session.transport_mut().pending.take() else {
            break;
        };
        let answer = prompt(&payload, input, out)?;
        outcome = session.handle_event(recipient, answer)?;
    }
    Ok(outcome)
}

/// Presents one wire payload and collects the raw answer. An empty line on a
/// form-level prompt closes the form (`None`).
fn prompt(
    payload: &Value,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if let Some(title) = payload["title"].as_str() {
        writeln!(out, "== {title} ==")?;
    }

    match payload["type"].as_str() {
        Some("modal") => {
            if let Some(body) = payload["content"].as_str()
                && !body.is_empty()
            {
                writeln!(out, "{body}")?;
            }
            let button1 = payload["button1"].as_str().unwrap_or("yes");
            let button2 = payload["button2"].as_str().unwrap_or("no");
            let line = read_line(input, out, &format!("[y] {button1} / [n] {button2}"))?;
            match line.as_deref() {
                None => Ok(None),
                Some(text) => match parse_bool(text) {
                    Ok(value) => Ok(Some(Value::Bool(value))),
                    Err(AnswerParseError(message)) => {
                        writeln!(out, "{message}")?;
                        prompt(payload, input, out)
                    }
                },
            }
        }
        Some("form") => {
            if let Some(body) = payload["content"].as_str()
                && !body.is_empty()
            {
                writeln!(out, "{body}")?;
            }
            let mut buttons = 0;
            for element in payload["buttons"].as_array().into_iter().flatten() {
                if element["type"] == "button" {
                    let caption = element["text"].as_str().unwrap_or_default();
                    writeln!(out, "  [{buttons}] {caption}")?;
                    buttons += 1;
                } else if let Some(text) = element["text"].as_str() {
                    writeln!(out, "  -- {text}")?;
                }
            }
            match read_line(input, out, "choice")? {
                None => Ok(None),
                Some(text) => match text.trim().parse::<u64>() {
                    Ok(index) => Ok(Some(json!(index))),
                    Err(_) => {
                        writeln!(out, "Please enter a button number.")?;
                        prompt(payload, input, out)
                    }
                },
            }
        }
        Some("custom_form") => {
            let mut answers = Vec::new();
            for element in payload["content"].as_array().into_iter().flatten() {
                match ask_element(element, input, out)? {
                    ElementAnswer::Value(value) => answers.push(value),
                    ElementAnswer::Skipped => {}
                    ElementAnswer::Closed => return Ok(None),
                }
            }
            Ok(Some(Value::Array(answers)))
        }
        other => Err(format!("unsupported payload type {other:?}").into()),
    }
}

enum ElementAnswer {
    Value(Value),
    /// Read-only row; nothing collected, which mirrors clients that omit
    /// such rows from the response array.
    Skipped,
    Closed,
}

fn ask_element(
    element: &Value,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<ElementAnswer, Box<dyn std::error::Error>> {
    let label = element["text"].as_str().unwrap_or_default();
    match element["type"].as_str() {
        Some("label") | Some("header") => {
            writeln!(out, "{label}")?;
            Ok(ElementAnswer::Skipped)
        }
        Some("divider") => {
            writeln!(out, "----")?;
            Ok(ElementAnswer::Skipped)
        }
        Some(kind) => {
            describe(element, kind, out)?;
            loop {
                let Some(line) = read_line(input, out, label)? else {
                    return Ok(ElementAnswer::Closed);
                };
                match parse_answer(element, kind, &line) {
                    Ok(value) => return Ok(ElementAnswer::Value(value)),
                    Err(AnswerParseError(message)) => writeln!(out, "{message}")?,
                }
            }
        }
        None => Err(format!("element without a type: {element}").into()),
    }
}

fn describe(element: &Value, kind: &str, out: &mut impl Write) -> std::io::Result<()> {
    match kind {
        "dropdown" | "step_slider" => {
            for (index, option) in element["options"]
                .as_array()
                .or_else(|| element["steps"].as_array())
                .into_iter()
                .flatten()
                .enumerate()
            {
                writeln!(out, "  [{index}] {}", render_option(option))?;
            }
        }
        "slider" => {
            let min = element["min"].as_i64().unwrap_or_default();
            let max = element["max"].as_i64().unwrap_or_default();
            writeln!(out, "  ({min}..{max})")?;
        }
        _ => {}
    }
    Ok(())
}

fn render_option(option: &Value) -> String {
    match option {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Turns one line of console input into the raw wire value the element kind
/// expects. Defaults apply when the line is blank.
pub fn parse_answer(element: &Value, kind: &str, line: &str) -> Result<Value, AnswerParseError> {
    let line = line.trim();
    if line.is_empty()
        && let Some(default) = element.get("default")
    {
        return Ok(default.clone());
    }
    match kind {
        "input" => Ok(Value::String(line.to_string())),
        "toggle" => parse_bool(line).map(Value::Bool),
        "slider" => line
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| AnswerParseError("Please enter a whole number.".to_string())),
        "dropdown" | "step_slider" => {
            let count = element["options"]
                .as_array()
                .or_else(|| element["steps"].as_array())
                .map(Vec::len)
                .unwrap_or_default();
            match line.parse::<usize>() {
                Ok(index) if index < count => Ok(Value::from(index)),
                _ => Err(AnswerParseError(format!(
                    "Please pick an option index below {count}."
                ))),
            }
        }
        other => Err(AnswerParseError(format!(
            "No console input for element kind {other}."
        ))),
    }
}

fn parse_bool(line: &str) -> Result<bool, AnswerParseError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        _ => Err(AnswerParseError("Please answer y or n.".to_string())),
    }
}

fn read_line(
    input: &mut impl BufRead,
    out: &mut impl Write,
    caption: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    write!(out, "{caption}> ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        // EOF closes the form.
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_answer_blank_uses_default() {
        let element = json!({"type": "toggle", "text": "On?", "default": true});
        assert_eq!(parse_answer(&element, "toggle", "  ").unwrap(), json!(true));
    }

    #[test]
    fn parse_answer_rejects_out_of_range_dropdown_index() {
        let element = json!({"type": "dropdown", "text": "Color", "options": ["Red", "Blue"]});
        assert_eq!(parse_answer(&element, "dropdown", "1").unwrap(), json!(1));
        assert!(parse_answer(&element, "dropdown", "2").is_err());
        assert!(parse_answer(&element, "dropdown", "first").is_err());
    }

    #[test]
    fn parse_answer_slider_needs_a_number() {
        let element = json!({"type": "slider", "text": "Age", "min": 0, "max": 5});
        assert_eq!(parse_answer(&element, "slider", "3").unwrap(), json!(3));
        assert!(parse_answer(&element, "slider", "three").is_err());
    }

    #[test]
    fn run_flow_drives_a_custom_form_to_completion() {
        use formgate::{CustomForm, Input, Validator};
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let form = CustomForm::new("Sign up")
            .with_element(Input::new("Age").with_validator(Validator::number()))
            .on_submit(move |_, values| sink.lock().unwrap().push(values));

        // First answer fails validation, second one passes.
        let mut input = b"abc\n42\n".as_slice();
        let mut out = Vec::new();
        let outcome = run_flow(form.into(), "console", &mut input, &mut out).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(seen.lock().unwrap().len(), 1);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Please enter a valid Number."));
    }
}
