use std::{env, io};

use anyhow::Context;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use contact_relay::configuration::Settings;
use contact_relay::contact_form::{ContactForm, FormState};
use contact_relay::domain::Field;
use contact_relay::telemetry::{get_subscriber, init_subscriber};
use contact_relay::transport::Transport;

type Input = Lines<BufReader<Stdin>>;

/// Fill in and send the contact form from a terminal
///
/// By default the submission goes to the configured form relay; pass `--api` to post it
/// to the contact endpoint instead.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, keeping stdout for the form itself
    let subscriber = get_subscriber("contact-form".into(), "warn".into(), io::stderr);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config().context("Failed to load configuration")?;

    // Pick the transport
    match env::args().nth(1).as_deref() {
        None | Some("--form-relay") => {
            let client = config
                .form_relay
                .client()
                .context("Invalid form relay configuration")?;
            run(&client).await
        }
        Some("--api") => {
            let client = config
                .contact_api
                .client()
                .context("Invalid contact API configuration")?;
            run(&client).await
        }
        Some(other) => {
            anyhow::bail!("Unknown option `{other}`: use `--form-relay` (default) or `--api`")
        }
    }
}

/// Prompt for every field until the form is sent, then wait for it to close
async fn run<T: Transport>(transport: &T) -> anyhow::Result<()> {
    let mut input = BufReader::new(stdin()).lines();
    let mut form = ContactForm::new();

    loop {
        for field in Field::ALL {
            let Some(value) = prompt(&mut input, &form, field).await? else {
                // End of input: leave without sending
                return Ok(());
            };
            form.set_field(field, value);
        }

        println!("Sending...");
        if form.submit(transport).await == FormState::Success {
            println!("Message sent! Thank you for reaching out. We'll get back to you soon.");
            form.wait_for_auto_close().await;
            return Ok(());
        }
        if let Some(error) = form.error() {
            println!("{error}");
        }
        println!("Press enter to keep a value as it is.");
    }
}

/// Read one field value; an empty answer keeps the current value
async fn prompt(input: &mut Input, form: &ContactForm, field: Field) -> io::Result<Option<String>> {
    let current = form.draft().get(field);
    let label = match field {
        Field::Name => "Name",
        Field::Email => "Email",
        Field::Phone => "Phone",
        Field::Message => "Message (end with a line containing a single `.`)",
    };
    if current.is_empty() {
        println!("{label} *");
    } else {
        println!("{label} * [{current}]");
    }

    let answer = if field == Field::Message {
        read_message(input).await?
    } else {
        input.next_line().await?
    };

    Ok(answer.map(|value| {
        if value.is_empty() {
            current.to_owned()
        } else {
            value
        }
    }))
}

/// Read lines until a lone `.`, keeping line breaks
async fn read_message(input: &mut Input) -> io::Result<Option<String>> {
    let mut lines = Vec::new();
    while let Some(line) = input.next_line().await? {
        if line == "." {
            return Ok(Some(lines.join("\n")));
        }
        lines.push(line);
    }
    Ok(None)
}
