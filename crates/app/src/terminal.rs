use std::error::Error;
use std::time::Duration;

use chrono::NaiveDate;
use dayguess_core::model::Mode;
use dayguess_core::model::calendar::parse_weekday;
use services::{GameController, Screen, SessionError};
use tokio::io::{AsyncBufReadExt, BufReader};
use ui::AppContext;
use ui::views::{
    ViewState, render_game, render_leaderboard, render_menu, render_results, render_setup,
    render_tutorial, view_state_from_result,
};
use ui::vm::{
    DoomsdayWalkthrough, GameVm, LeaderboardVm, MenuAction, ResultsVm, SetupVm, example_date,
    load_leaderboard, parse_menu_choice, walkthrough,
};

const TICK: Duration = Duration::from_millis(250);

enum Flow {
    Continue,
    Quit,
}

/// Line-based front end: one command per line on stdin, screens on stdout.
pub struct Terminal {
    game: GameController,
    ctx: AppContext,
    setup: SetupVm,
    tutorial: Option<DoomsdayWalkthrough>,
    leaderboard: ViewState<LeaderboardVm>,
}

fn report<T>(result: Result<T, SessionError>) {
    if let Err(err) = result {
        println!("{err}");
    }
}

fn save_prompt(default_name: Option<&str>) -> String {
    match default_name {
        Some(name) => format!("Type a name to save your score (Enter for {name}), or [m] Menu"),
        None => "Type a name to save your score, or [m] Menu".to_string(),
    }
}

fn is_key(input: &str, key: &str) -> bool {
    input.eq_ignore_ascii_case(key)
}

impl Terminal {
    #[must_use]
    pub fn new(game: GameController, ctx: AppContext) -> Self {
        Self {
            game,
            ctx,
            setup: SetupVm::default(),
            tutorial: None,
            leaderboard: ViewState::Idle,
        }
    }

    /// Run until the player quits or stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub async fn run(mut self, start: Option<Mode>) -> Result<(), Box<dyn Error>> {
        if let Some(mode) = start {
            report(self.game.start_session(mode));
        }
        self.render();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut tick = tokio::time::interval(TICK);
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match self.handle(line.trim()).await {
                        Flow::Quit => break,
                        Flow::Continue => self.render(),
                    }
                }
                _ = tick.tick() => match self.game.poll_timer() {
                    Ok(true) => self.render(),
                    Ok(false) => {}
                    Err(err) => println!("{err}"),
                },
            }
        }
        self.game.return_to_menu();
        Ok(())
    }

    async fn handle(&mut self, input: &str) -> Flow {
        match self.game.screen() {
            Screen::Menu => return self.on_menu(input).await,
            Screen::ModeSetup => self.on_setup(input),
            Screen::Tutorial => self.on_tutorial(input),
            Screen::Leaderboard => self.on_leaderboard(input).await,
            Screen::Playing => self.on_playing(input),
            Screen::Results => self.on_results(input).await,
        }
        Flow::Continue
    }

    async fn on_menu(&mut self, input: &str) -> Flow {
        match parse_menu_choice(input) {
            Some(MenuAction::Start(mode)) => report(self.game.start_session(mode)),
            Some(MenuAction::Setup) => report(self.game.open_setup()),
            Some(MenuAction::Tutorial) => {
                self.tutorial = walkthrough(example_date()).ok();
                report(self.game.open_tutorial());
            }
            Some(MenuAction::Leaderboard) => {
                report(self.game.open_leaderboard());
                self.reload_leaderboard().await;
            }
            Some(MenuAction::Quit) => return Flow::Quit,
            None => println!("Pick one of the listed keys."),
        }
        Flow::Continue
    }

    fn on_setup(&mut self, input: &str) {
        match input {
            "+" => self.setup.increase(),
            "-" => self.setup.decrease(),
            _ if is_key(input, "m") => self.game.return_to_menu(),
            _ if input.is_empty() || is_key(input, "s") => {
                report(self.game.start_session(self.setup.mode()));
            }
            _ => match input.parse::<u32>() {
                Ok(secs) => {
                    self.setup.set(secs);
                    report(self.game.start_session(self.setup.mode()));
                }
                Err(_) => println!("Use +, -, s, m, or a number of seconds."),
            },
        }
    }

    fn on_tutorial(&mut self, input: &str) {
        if is_key(input, "m") {
            self.game.return_to_menu();
            return;
        }
        let steps = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| walkthrough(date).ok());
        match steps {
            Some(steps) => self.tutorial = Some(steps),
            None => println!("Enter a date between 1900-01-01 and 2100-12-31 as YYYY-MM-DD."),
        }
    }

    async fn on_leaderboard(&mut self, input: &str) {
        if is_key(input, "m") {
            self.game.return_to_menu();
        } else if is_key(input, "r") {
            self.reload_leaderboard().await;
        }
    }

    fn on_playing(&mut self, input: &str) {
        if is_key(input, "m") {
            self.game.return_to_menu();
            return;
        }
        if self.game.snapshot().is_showing_outcome() {
            if input.is_empty() || is_key(input, "n") {
                report(self.game.advance());
            } else {
                println!("Press n for the next date.");
            }
            return;
        }
        match parse_weekday(input) {
            Ok(day) => report(self.game.record_guess(day)),
            Err(err) => println!("{err}"),
        }
    }

    async fn on_results(&mut self, input: &str) {
        if is_key(input, "m") {
            self.game.return_to_menu();
            return;
        }
        let can_save = self
            .game
            .summary()
            .is_some_and(|s| ResultsVm::new(s, self.game.save_state()).can_save);
        if !can_save {
            println!("Press m for the menu.");
            return;
        }
        let name = match (input.is_empty(), self.ctx.default_player_name()) {
            (true, Some(default)) => default.to_string(),
            _ => input.to_string(),
        };
        let gateway = self.ctx.leaderboard();
        report(self.game.save_score(gateway.as_ref(), &name).await);
    }

    async fn reload_leaderboard(&mut self) {
        self.leaderboard = ViewState::Loading;
        println!("\n{}", render_leaderboard(&self.leaderboard));
        let gateway = self.ctx.leaderboard();
        let result = load_leaderboard(gateway.as_ref()).await;
        if let Err(err) = &result {
            tracing::warn!(error = err.message(), "leaderboard unavailable");
        }
        self.leaderboard = view_state_from_result(result);
    }

    fn render(&self) {
        let text = match self.game.screen() {
            Screen::Menu => render_menu(),
            Screen::ModeSetup => render_setup(&self.setup),
            Screen::Tutorial => {
                let body = self.tutorial.as_ref().map(render_tutorial).unwrap_or_default();
                format!("{body}\nType a date (YYYY-MM-DD) to work through it, or [m] Menu")
            }
            Screen::Leaderboard => {
                format!("{}[r] Refresh   [m] Menu", render_leaderboard(&self.leaderboard))
            }
            Screen::Playing => GameVm::from_snapshot(&self.game.snapshot())
                .map(|vm| render_game(&vm))
                .unwrap_or_default(),
            Screen::Results => self.results_text(),
        };
        println!("\n{text}");
    }

    fn results_text(&self) -> String {
        let Some(summary) = self.game.summary() else {
            return String::new();
        };
        let vm = ResultsVm::new(summary, self.game.save_state());
        let mut text = render_results(&vm);
        if vm.can_save {
            text.push_str(&save_prompt(self.ctx.default_player_name()));
        } else {
            text.push_str("[m] Menu");
        }
        text
    }
}
