use chromaverse::destroyable::Destroyable;
use chromaverse::events::{Channel, EventHandler};
use chromaverse::game::settings::Settings;
use chromaverse::game::{FileStore, GameSession, MemoryStore, Store, NEXT_ROUND_DELAY};
use chromaverse::model::{
    Color, Difficulty, DisplayMode, FeedbackKind, SessionCommand, SessionEvent, SessionView,
    SettingsChange,
};
use std::io::{self, BufRead, Write};
use std::time::Instant;

const HELP: &str = "\
commands: <n> pick option n | h hint | p pause | r restart
          d <easy|medium|hard> | m <rgb|hex|hsl> | sound <on|off> | q quit";

fn init_logging() {
    env_logger::init();
}

fn swatch(color: Color) -> String {
    format!("\x1b[48;2;{};{};{}m      \x1b[0m", color.r, color.g, color.b)
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::Feedback { message, kind } => {
            let marker = match kind {
                FeedbackKind::Success => "✔",
                FeedbackKind::Error => "✘",
            };
            println!("{} {}", marker, message);
        }
        SessionEvent::Popup { icon, text } => println!("{} {}", icon, text),
        SessionEvent::Combo(streak) => println!("{}x Combo!", streak),
        SessionEvent::PauseChanged(true) => println!("-- paused --"),
        SessionEvent::PauseChanged(false) => println!("-- resumed --"),
        SessionEvent::SessionEnded(summary) => {
            println!(
                "Final score {} (best {}), accuracy {}%, level {}. Type r to play again.",
                summary.final_score, summary.best_score, summary.accuracy, summary.level
            );
        }
        _ => (),
    }
}

fn print_high_scores(session: &GameSession) {
    println!("high scores:");
    for (rank, summary) in session.records().high_scores().iter().enumerate() {
        println!(
            "  {:>2}. {:>6}  level {}  {}",
            rank + 1,
            summary.final_score,
            summary.level,
            summary.difficulty
        );
    }
}

fn open_store() -> Box<dyn Store> {
    match FileStore::default_data_dir() {
        Some(dir) => {
            log::info!("Data directory: {}", dir.display());
            Box::new(FileStore::new(dir))
        }
        None => {
            log::warn!("No data directory available; progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn parse_switch(argument: &str) -> Result<bool, String> {
    match argument {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(format!("expected on or off, got {:?}", other)),
    }
}

fn render(view: &SessionView) {
    println!();
    println!(
        "score {}  streak {}  level {}  best {}  time {}s",
        view.score, view.streak, view.level, view.best_score, view.time_left_secs
    );
    if view.is_over() {
        return;
    }
    if let Some(round) = &view.round {
        println!("target: {}   ({})", view.target_label, view.hint_text);
        for (index, color) in round.options.iter().enumerate() {
            if view.eliminated.contains(&index) {
                println!("  {:>2}  ------", index + 1);
            } else {
                println!("  {:>2}  {}", index + 1, swatch(*color));
            }
        }
    }
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let argument = words.next().unwrap_or("");
    let command = match head {
        "h" => SessionCommand::UseHint,
        "p" => SessionCommand::TogglePause,
        "r" => SessionCommand::Restart,
        "d" => SessionCommand::SetDifficulty(
            argument
                .parse::<Difficulty>()
                .map_err(|e| e.to_string())?,
        ),
        "m" => SessionCommand::SetDisplayMode(DisplayMode::parse_or_default(argument)),
        "sound" => SessionCommand::ChangeSettings(SettingsChange {
            sound_enabled: Some(parse_switch(argument)?),
            animations_enabled: None,
        }),
        number => match number.parse::<usize>() {
            Ok(n) if n > 0 => SessionCommand::SelectOption(n - 1),
            _ => return Err(format!("unknown command {:?}", number)),
        },
    };
    Ok(Some(command))
}

fn main() {
    init_logging();

    let (event_emitter, event_observer) = Channel::<SessionEvent>::new();
    let (command_emitter, command_observer) = Channel::<SessionCommand>::new();

    let view = SessionView::new();
    let view_handler = view.clone();
    let _view_subscription = event_observer.subscribe(move |event| {
        view_handler.borrow_mut().handle_event(event);
    });
    let _printer_subscription = event_observer.subscribe(print_event);

    let session = GameSession::new(open_store(), event_emitter, None).attach(command_observer);
    if Settings::is_debug_mode() {
        println!("seed: {}", session.borrow().seed());
    }
    println!("{}", HELP);
    render(&view.borrow());

    let mut last_advance = Instant::now();
    let stdin = io::stdin();
    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::warn!("Could not flush stdout: {}", e);
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => (),
        }
        if line.trim() == "q" {
            break;
        }

        // catch the session clock up with the time spent at the prompt
        command_emitter.emit(&SessionCommand::Advance(last_advance.elapsed()));
        last_advance = Instant::now();

        match parse_command(&line) {
            Ok(Some(command)) => {
                let answered = matches!(command, SessionCommand::SelectOption(_));
                command_emitter.emit(&command);
                if answered && session.borrow().is_active() {
                    std::thread::sleep(NEXT_ROUND_DELAY);
                    command_emitter.emit(&SessionCommand::Advance(last_advance.elapsed()));
                    last_advance = Instant::now();
                }
            }
            Ok(None) => (),
            Err(message) => println!("{}\n{}", message, HELP),
        }
        let snapshot = view.borrow();
        render(&snapshot);
        if snapshot.is_over() {
            print_high_scores(&session.borrow());
        }
    }

    session.borrow_mut().destroy();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_switch_rejects_unknown_values() {
        assert!(matches!(
            parse_command("sound off"),
            Ok(Some(SessionCommand::ChangeSettings(SettingsChange {
                sound_enabled: Some(false),
                ..
            })))
        ));
        assert!(matches!(
            parse_command("sound on"),
            Ok(Some(SessionCommand::ChangeSettings(SettingsChange {
                sound_enabled: Some(true),
                ..
            })))
        ));
        assert!(parse_command("sound loud").is_err());
        assert!(parse_command("sound").is_err());
    }

    #[test]
    fn test_option_numbers_are_one_based() {
        assert!(matches!(
            parse_command("3"),
            Ok(Some(SessionCommand::SelectOption(2)))
        ));
        assert!(parse_command("0").is_err());
        assert!(matches!(parse_command("   "), Ok(None)));
    }
}
