use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver},
    thread,
};

use shared_definitions::controller::{Axis, TuneDirection, TuneParameter, TuningAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Recalibrate,
    Tune(TuningAction),
    Quit,
}

/// `r` recalibrates, `q` quits. Tuning is axis (`r`/`p`), parameter
/// (`a` amplification, `d` decay) and `+`/`-`, e.g. `ra+` or `pd-`.
pub fn parse_command(line: &str) -> Option<ShellCommand> {
    let line = line.trim();
    match line {
        "r" | "reset" => return Some(ShellCommand::Recalibrate),
        "q" | "quit" => return Some(ShellCommand::Quit),
        _ => {}
    }

    let mut chars = line.chars();
    let axis = match chars.next()? {
        'r' => Axis::Roll,
        'p' => Axis::Pitch,
        _ => return None,
    };
    let parameter = match chars.next()? {
        'a' => TuneParameter::BaseAmplification,
        'd' => TuneParameter::DecayFactor,
        _ => return None,
    };
    let direction = match chars.next()? {
        '+' => TuneDirection::Increase,
        '-' => TuneDirection::Decrease,
        _ => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(ShellCommand::Tune(TuningAction::new(axis, parameter, direction)))
}

pub fn spawn_stdin_reader() -> io::Result<Receiver<ShellCommand>> {
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    return;
                };
                match parse_command(&line) {
                    Some(command) => {
                        if sender.send(command).is_err() {
                            return;
                        }
                    }
                    None => log::warn!("Unknown command {:?}", line),
                }
            }
        })?;
    Ok(receiver)
}
