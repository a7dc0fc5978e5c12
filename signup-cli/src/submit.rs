//! `signup submit`: drive the form from command-line values.

use std::process::ExitCode;
use std::time::Duration;

use signup_lib::form::{Field, FormEvent, SignupForm};
use signup_lib::{ClientConfig, SignupClient};

use crate::cli::SubmitArgs;
use crate::report;

/// Feeds each value in as typed input, then presses submit.
fn fill(args: &SubmitArgs) -> SignupForm {
    let mut inputs = vec![
        (Field::Username, args.username.clone()),
        (Field::Email, args.email.clone()),
        (Field::Password, args.password.clone()),
        (Field::PasswordConfirmation, args.confirm.clone()),
    ];
    if let Some(nickname) = &args.nickname {
        inputs.push((Field::Nickname, nickname.clone()));
    }

    inputs
        .into_iter()
        .fold(SignupForm::new(), |form, (field, text)| {
            form.update(FormEvent::Input(field, text))
        })
        .update(FormEvent::Submit)
}

fn print_form(form: &SignupForm, json: bool) {
    if json {
        match serde_json::to_string_pretty(form) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else {
        print!("{}", report::render(form));
    }
}

pub async fn run(args: SubmitArgs) -> ExitCode {
    let mut form = fill(&args);

    if args.offline {
        print_form(&form, args.json);
        return if form.is_submittable() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let config = ClientConfig::new()
        .with_base_url(args.server.as_str())
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = match SignupClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Only ask the backend about names that already pass the local rules.
    if let Some(username) = form.username.valid_value().cloned() {
        match client.check_username(&username).await {
            Ok(errors) => form = form.update(FormEvent::UsernameChecked(errors)),
            Err(e) => log::warn!("Username check failed, continuing without it: {}", e),
        }
    }

    print_form(&form, args.json);

    let Some(request) = form.submission() else {
        return ExitCode::FAILURE;
    };

    match client.sign_up(&request).await {
        Ok(welcome) => {
            println!("{}", welcome.message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
