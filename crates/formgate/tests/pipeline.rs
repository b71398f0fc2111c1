use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use formgate::{
    Button, ConfirmForm, CustomForm, FieldValue, FlowError, Input, MenuForm, Outcome, Session,
    Toggle, Transport, Validator,
};

#[derive(Default)]
struct Recorder {
    sent: Vec<(String, Value)>,
}

impl Transport for Recorder {
    fn send(&mut self, recipient: &str, payload: &Value) {
        self.sent.push((recipient.to_string(), payload.clone()));
    }
}

fn session() -> Session<Recorder> {
    Session::new(Recorder::default())
}

fn signup_form(submissions: Arc<Mutex<Vec<Vec<FieldValue>>>>) -> CustomForm {
    CustomForm::new("Sign up")
        .with_element(Input::new("Age").with_validator(Validator::number()))
        .with_element(Toggle::new("Subscribe").with_default(true))
        .on_submit(move |_, values| submissions.lock().unwrap().push(values))
}

#[test]
fn invalid_submission_resends_annotated_form() {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let mut session = session();
    session
        .open("alice", signup_form(submissions.clone()))
        .unwrap();

    assert_eq!(
        session.transport().sent[0].1,
        json!({
            "type": "custom_form",
            "title": "Sign up",
            "submit": "gui.submit",
            "content": [
                {"type": "input", "text": "Age", "placeholder": ""},
                {"type": "toggle", "text": "Subscribe", "default": true},
            ],
        })
    );

    let outcome = session
        .handle_event("alice", Some(json!(["abc", true])))
        .unwrap();
    assert_eq!(outcome, Outcome::Resent);
    assert!(submissions.lock().unwrap().is_empty());
    assert!(session.is_active("alice"));

    // The resend carries the error directly above the failing input and the
    // entered values as defaults.
    assert_eq!(
        session.transport().sent[1].1,
        json!({
            "type": "custom_form",
            "title": "Sign up",
            "submit": "gui.submit",
            "content": [
                {"type": "label", "text": "Please enter a valid Number."},
                {"type": "input", "text": "Age", "placeholder": "", "default": "abc"},
                {"type": "toggle", "text": "Subscribe", "default": true},
            ],
        })
    );
}

#[test]
fn corrected_resubmission_completes() {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let mut session = session();
    session
        .open("alice", signup_form(submissions.clone()))
        .unwrap();

    session
        .handle_event("alice", Some(json!(["abc", true])))
        .unwrap();
    // The corrected answer has no slot for the error label; alignment skips
    // it.
    let outcome = session
        .handle_event("alice", Some(json!(["42", false])))
        .unwrap();
    assert_eq!(outcome, Outcome::Completed);
    assert!(!session.is_active("alice"));
    assert_eq!(
        *submissions.lock().unwrap(),
        vec![vec![FieldValue::Int(42), FieldValue::Bool(false)]]
    );
}

#[test]
fn repeated_failure_keeps_a_single_annotation() {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let mut session = session();
    session.open("alice", signup_form(submissions)).unwrap();

    session
        .handle_event("alice", Some(json!(["abc", true])))
        .unwrap();
    session
        .handle_event("alice", Some(json!(["still not a number", true])))
        .unwrap();

    let content = session.transport().sent[2].1["content"].as_array().unwrap();
    assert_eq!(content.len(), 3);
    assert_eq!(content[0]["type"], "label");
    assert_eq!(content[1]["default"], "still not a number");
}

#[test]
fn dropdown_answer_maps_to_option_text() {
    let picks = Arc::new(Mutex::new(Vec::new()));
    let sink = picks.clone();
    let form = CustomForm::new("Pick").with_element(formgate::Dropdown::new(
        "Color",
        vec!["Red".into(), "Green".into(), "Blue".into()],
    ));
    let form = form.on_submit(move |_, values| sink.lock().unwrap().push(values));

    let mut session = session();
    session.open("bob", form).unwrap();
    let outcome = session.handle_event("bob", Some(json!([2]))).unwrap();
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        *picks.lock().unwrap(),
        vec![vec![FieldValue::Text("Blue".into())]]
    );
}

#[test]
fn custom_form_confirm_gate_accepts() {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let sink = submissions.clone();
    let form = CustomForm::new("Wire transfer")
        .with_element(Input::new("Amount").with_validator(Validator::number()))
        .with_confirm("Are you sure?", "This cannot be undone.", "Send", "Back")
        .on_submit(move |_, values| sink.lock().unwrap().push(values));

    let mut session = session();
    session.open("carol", form).unwrap();

    let outcome = session.handle_event("carol", Some(json!(["250"]))).unwrap();
    assert_eq!(outcome, Outcome::ConfirmRequested);
    assert_eq!(
        session.transport().sent[1].1,
        json!({
            "type": "modal",
            "title": "Are you sure?",
            "content": "This cannot be undone.",
            "button1": "Send",
            "button2": "Back",
        })
    );
    assert!(submissions.lock().unwrap().is_empty());

    let outcome = session.handle_event("carol", Some(json!(true))).unwrap();
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        *submissions.lock().unwrap(),
        vec![vec![FieldValue::Int(250)]]
    );
}

#[test]
fn custom_form_confirm_gate_declined_runs_nothing() {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let sink = submissions.clone();
    let form = CustomForm::new("Wire transfer")
        .with_element(Input::new("Amount"))
        .with_confirm("Are you sure?", "", "Send", "Back")
        .on_submit(move |_, values| sink.lock().unwrap().push(values));

    let mut session = session();
    session.open("carol", form).unwrap();
    session.handle_event("carol", Some(json!(["250"]))).unwrap();

    let outcome = session.handle_event("carol", Some(json!(false))).unwrap();
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(submissions.lock().unwrap().is_empty());
    assert!(!session.is_active("carol"));
}

#[test]
fn menu_click_handler_takes_precedence_over_select() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let clicks = log.clone();
    let selects = log.clone();
    let form = MenuForm::new("Main menu")
        .with_element(Button::new("Play"))
        .with_element(
            Button::new("Quit").on_click(move |who| clicks.lock().unwrap().push(format!("quit:{who}"))),
        )
        .on_select(move |_, choice| selects.lock().unwrap().push(format!("select:{}", choice.caption)));

    let mut session = session();
    session.open("dave", form).unwrap();
    let outcome = session.handle_event("dave", Some(json!(1))).unwrap();
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(*log.lock().unwrap(), vec!["quit:dave".to_string()]);
}

#[test]
fn menu_select_handler_receives_the_choice() {
    let choices = Arc::new(Mutex::new(Vec::new()));
    let sink = choices.clone();
    let form = MenuForm::new("Main menu")
        .with_element(Button::new("Play"))
        .with_element(Button::new("Settings").with_id("settings"))
        .on_select(move |_, choice| sink.lock().unwrap().push(choice));

    let mut session = session();
    session.open("dave", form).unwrap();
    session.handle_event("dave", Some(json!(1))).unwrap();

    let choices = choices.lock().unwrap();
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].index, 1);
    assert_eq!(choices[0].caption, "Settings");
    assert_eq!(choices[0].id.as_deref(), Some("settings"));
}

#[test]
fn menu_button_indices_skip_readonly_rows() {
    let choices = Arc::new(Mutex::new(Vec::new()));
    let sink = choices.clone();
    let form = MenuForm::new("Main menu")
        .with_element(formgate::Header::new("Actions"))
        .with_element(Button::new("Play"))
        .with_element(formgate::Divider::new())
        .with_element(Button::new("Quit"))
        .on_select(move |_, choice| sink.lock().unwrap().push(choice.caption));

    let mut session = session();
    session.open("dave", form).unwrap();
    // Button index 1 is the second button, not the second element.
    session.handle_event("dave", Some(json!(1))).unwrap();
    assert_eq!(*choices.lock().unwrap(), vec!["Quit".to_string()]);
}

#[test]
fn menu_button_confirm_gates_the_action() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let clicks = log.clone();
    let form = MenuForm::new("Main menu").with_element(
        Button::new("Delete world")
            .with_confirm("Delete?", "Everything will be lost.", "Delete", "Keep")
            .on_click(move |_| clicks.lock().unwrap().push("deleted")),
    );

    let mut session = session();
    session.open("erin", form).unwrap();

    let outcome = session.handle_event("erin", Some(json!(0))).unwrap();
    assert_eq!(outcome, Outcome::ConfirmRequested);
    assert_eq!(session.transport().sent[1].1["type"], "modal");
    assert!(log.lock().unwrap().is_empty());

    let outcome = session.handle_event("erin", Some(json!(true))).unwrap();
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(*log.lock().unwrap(), vec!["deleted"]);
}

#[test]
fn menu_button_confirm_declined_runs_nothing() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let clicks = log.clone();
    let form = MenuForm::new("Main menu").with_element(
        Button::new("Delete world")
            .with_confirm("Delete?", "", "Delete", "Keep")
            .on_click(move |_| clicks.lock().unwrap().push("deleted")),
    );

    let mut session = session();
    session.open("erin", form).unwrap();
    session.handle_event("erin", Some(json!(0))).unwrap();

    let outcome = session.handle_event("erin", Some(json!(false))).unwrap();
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(log.lock().unwrap().is_empty());
    assert!(!session.is_active("erin"));
}

#[test]
fn standalone_confirm_delivers_both_choices() {
    let answers = Arc::new(Mutex::new(Vec::new()));
    let sink = answers.clone();
    let mut session = session();
    session
        .open(
            "frank",
            ConfirmForm::ask("Restart?", "Restart the server now?", move |_, yes| {
                sink.lock().unwrap().push(yes)
            }),
        )
        .unwrap();
    let outcome = session.handle_event("frank", Some(json!(false))).unwrap();
    assert_eq!(outcome, Outcome::Completed);

    let sink = answers.clone();
    session
        .open(
            "frank",
            ConfirmForm::ask("Restart?", "", move |_, yes| sink.lock().unwrap().push(yes)),
        )
        .unwrap();
    session.handle_event("frank", Some(json!(true))).unwrap();

    assert_eq!(*answers.lock().unwrap(), vec![false, true]);
}

#[test]
fn close_invokes_the_close_handler() {
    let closed = Arc::new(Mutex::new(Vec::new()));
    let sink = closed.clone();
    let form = CustomForm::new("Sign up")
        .with_element(Input::new("Age"))
        .on_close(move |who| sink.lock().unwrap().push(who.to_string()));

    let mut session = session();
    session.open("gia", form).unwrap();
    let outcome = session.handle_event("gia", None).unwrap();
    assert_eq!(outcome, Outcome::Closed);
    assert_eq!(*closed.lock().unwrap(), vec!["gia".to_string()]);
    assert!(!session.is_active("gia"));
}

#[test]
fn closing_the_confirm_dialog_skips_the_close_handler() {
    let closed = Arc::new(Mutex::new(Vec::new()));
    let sink = closed.clone();
    let form = CustomForm::new("Wire transfer")
        .with_element(Input::new("Amount"))
        .with_confirm("Sure?", "", "Send", "Back")
        .on_close(move |who| sink.lock().unwrap().push(who.to_string()));

    let mut session = session();
    session.open("gia", form).unwrap();
    session.handle_event("gia", Some(json!(["10"]))).unwrap();

    // The original form was already answered; dismissing the gate only
    // cancels.
    let outcome = session.handle_event("gia", None).unwrap();
    assert_eq!(outcome, Outcome::Closed);
    assert!(closed.lock().unwrap().is_empty());
}

#[test]
fn event_without_a_pending_form_is_an_error() {
    let mut session = session();
    let err = session.handle_event("nobody", Some(json!(true))).unwrap_err();
    assert!(matches!(err, FlowError::NoPendingForm(who) if who == "nobody"));
}

#[test]
fn malformed_data_drops_the_pending_form() {
    let mut session = session();
    session
        .open(
            "henk",
            CustomForm::new("Sign up")
                .with_element(Input::new("Age"))
                .on_submit(|_, _| {}),
        )
        .unwrap();

    let err = session
        .handle_event("henk", Some(json!("not an array")))
        .unwrap_err();
    assert!(matches!(err, FlowError::UnexpectedResponse { .. }));
    assert!(!session.is_active("henk"));
}

#[test]
fn out_of_range_button_index_is_an_error() {
    let mut session = session();
    session
        .open(
            "iva",
            MenuForm::with_buttons("Menu", "", vec!["Only".into()]).on_select(|_, _| {}),
        )
        .unwrap();

    let err = session.handle_event("iva", Some(json!(5))).unwrap_err();
    assert!(matches!(err, FlowError::UnexpectedResponse { .. }));
}
