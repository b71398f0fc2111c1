mod console;

use std::io::{self, Write};

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::to_string_pretty;
use tracing_subscriber::EnvFilter;

use formgate::{
    Button, ConfirmForm, CountryCodes, CustomForm, Divider, Dropdown, Form, Header, Input,
    MenuForm, Slider, Toggle, Validator,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Console runner for formgate dialog flows",
    long_about = "Drives the bundled demo forms through the full submit/validate/confirm \
                  pipeline on the terminal, or dumps their wire payloads."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DemoFlow {
    /// A multi-field registration form with validation and a confirm gate.
    Signup,
    /// A button menu with a gated destructive action.
    Menu,
    /// A bare yes/no dialog.
    Restart,
}

#[derive(Subcommand)]
enum Command {
    /// Run one of the demo flows interactively.
    Demo {
        /// Which flow to run.
        #[arg(long, value_enum, default_value_t = DemoFlow::Signup)]
        flow: DemoFlow,
        /// Recipient name passed through to the handlers.
        #[arg(long, default_value = "console")]
        recipient: String,
    },
    /// Print the wire payload of a demo flow without running it.
    Render {
        #[arg(long, value_enum, default_value_t = DemoFlow::Signup)]
        flow: DemoFlow,
    },
    /// Look up the country behind an international phone number.
    Phone {
        /// Full number including the leading + and country code.
        number: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Demo { flow, recipient } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            let outcome = console::run_flow(demo_form(flow)?, &recipient, &mut input, &mut out)?;
            writeln!(out, "-> {outcome:?}")?;
            Ok(())
        }
        Command::Render { flow } => {
            println!("{}", to_string_pretty(&demo_form(flow)?.build()?)?);
            Ok(())
        }
        Command::Phone { number } => {
            let codes = CountryCodes::builtin()?;
            match codes.lookup(&number) {
                Some(country) => {
                    println!("{} ({}, +{})", country.name, country.iso, country.code)
                }
                None => println!("no matching country code"),
            }
            Ok(())
        }
    }
}

fn demo_form(flow: DemoFlow) -> CliResult<Form> {
    let form = match flow {
        DemoFlow::Signup => signup_form()?.into(),
        DemoFlow::Menu => menu_form().into(),
        DemoFlow::Restart => ConfirmForm::ask(
            "Restart?",
            "Restart the service now?",
            |recipient, yes| println!("{recipient} answered {}", if yes { "yes" } else { "no" }),
        )
        .into(),
    };
    Ok(form)
}

fn signup_form() -> CliResult<CustomForm> {
    let codes = CountryCodes::builtin()?;
    let form = CustomForm::new("Sign up")
        .with_element(Header::new("Account"))
        .with_element(Input::new("Email").with_validator(Validator::email()))
        .with_element(
            Input::new("Phone")
                .with_placeholder("+62812345678")
                .with_validator(Validator::phone(&codes, true, true)?),
        )
        .with_element(Divider::new())
        .with_element(Slider::new("Age", 13, 120).with_default(18))
        .with_element(Dropdown::new(
            "Plan",
            vec!["Free".into(), "Pro".into(), "Team".into()],
        ))
        .with_element(Toggle::new("Subscribe to the newsletter").with_default(true))
        .with_confirm("Create account?", "You can edit it later.", "Create", "Back")
        .on_submit(|recipient, values| {
            println!("{recipient} registered:");
            for value in values {
                println!("  {value}");
            }
        })
        .on_close(|recipient| println!("{recipient} walked away"));
    Ok(form)
}

fn menu_form() -> MenuForm {
    MenuForm::new("Server admin")
        .with_body("Pick an action.")
        .with_element(Header::new("Safe"))
        .with_element(Button::new("Show status").with_id("status"))
        .with_element(Button::new("Rotate logs").with_id("rotate"))
        .with_element(Divider::new())
        .with_element(Header::new("Destructive"))
        .with_element(
            Button::new("Wipe cache")
                .with_confirm("Wipe cache?", "All cached entries go away.", "Wipe", "Keep")
                .on_click(|recipient| println!("{recipient} wiped the cache")),
        )
        .on_select(|recipient, choice| {
            println!(
                "{recipient} picked {} ({})",
                choice.caption,
                choice.id.as_deref().unwrap_or("no id")
            )
        })
        .on_close(|recipient| println!("{recipient} left the menu"))
}
