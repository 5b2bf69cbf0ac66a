//! The interactive search loop.

use anyhow::Result;
use inquire::{
    Confirm, CustomUserError, InquireError, Text,
    autocompletion::{Autocomplete, Replacement},
};
use skycast_core::{Config, SearchSession, ViewState};

use crate::{cli::build_session, render};

/// Completes partial input from the recent-search list.
#[derive(Debug, Clone, Default)]
struct RecentCities {
    cities: Vec<String>,
}

impl Autocomplete for RecentCities {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let needle = input.to_lowercase();
        Ok(self
            .cities
            .iter()
            .filter(|city| city.to_lowercase().starts_with(&needle))
            .cloned()
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

/// Run the prompt loop until the user quits (Esc or Ctrl-C).
pub async fn interactive(start_city: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let mut session = build_session(&config)?;

    render::render(session.state());

    if let Some(city) = start_city {
        search(&mut session, &city).await;
    }

    loop {
        let completer = RecentCities { cities: session.recent().to_vec() };
        let field = Text::new("City:")
            .with_autocomplete(completer)
            .with_help_message("letters, spaces and hyphens; Esc to quit");

        match field.prompt() {
            Ok(input) => search(&mut session, &input).await,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// One search round: validate, show the loading line, fetch, render, and
/// offer retries while the lookup keeps failing.
async fn search(session: &mut SearchSession, raw: &str) {
    let pending = match session.begin(raw) {
        Ok(pending) => pending,
        Err(invalid) => {
            println!("✗ {invalid}");
            return;
        }
    };

    render::render(session.state());
    let outcome = session.fetch(&pending).await;
    render::render(session.finish(pending, outcome));

    while matches!(session.state(), ViewState::Error(_)) && offer_retry() {
        match session.retry().await {
            Ok(state) => render::render(state),
            Err(invalid) => {
                println!("✗ {invalid}");
                render::render(session.state());
            }
        }
    }

    share_line(session);
}

fn offer_retry() -> bool {
    Confirm::new("Try again?")
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

fn share_line(session: &SearchSession) {
    if let (ViewState::Content(_), Some(city)) = (session.state(), session.active_city()) {
        println!("\n(rerun anytime: skycast show \"{city}\")");
    }
}
