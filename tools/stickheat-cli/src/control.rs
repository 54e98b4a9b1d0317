//! Line-oriented control commands for the tick loop.
//!
//! Commands are read from stdin by a background thread and drained by the
//! loop between ticks, so every effect lands on a tick boundary.

use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;

use stickheat_core::tuning::TuningAction;
use tokio::sync::mpsc;

/// A parsed control command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Tune(TuningAction),
    Reset,
    Save(PathBuf),
    Load(PathBuf),
    Status,
    Quit,
}

impl FromStr for ControlCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let path_arg = |verb: &str| {
            if rest.is_empty() {
                Err(format!("'{verb}' needs a file path"))
            } else {
                Ok(PathBuf::from(rest))
            }
        };

        let command = match word {
            "scale+" => Self::Tune(TuningAction::ScaleUp),
            "scale-" => Self::Tune(TuningAction::ScaleDown),
            "radius+" => Self::Tune(TuningAction::RadiusUp),
            "radius-" => Self::Tune(TuningAction::RadiusDown),
            "sat+" => Self::Tune(TuningAction::SaturationUp),
            "sat-" => Self::Tune(TuningAction::SaturationDown),
            "mode" => Self::Tune(TuningAction::CycleToneMode),
            "reset" => Self::Reset,
            "save" => Self::Save(path_arg("save")?),
            "load" => Self::Load(path_arg("load")?),
            "status" => Self::Status,
            "quit" | "exit" => Self::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{other}'")),
        };

        let takes_arg = matches!(command, Self::Save(_) | Self::Load(_));
        if !takes_arg && !rest.is_empty() {
            return Err(format!("'{word}' takes no arguments"));
        }
        Ok(command)
    }
}

pub const HELP: &str = "commands: scale+ scale- radius+ radius- sat+ sat- mode reset save <path> load <path> status quit";

/// Forward stdin lines as commands until stdin closes or the loop goes away.
pub fn spawn_stdin_reader(tx: mpsc::Sender<ControlCommand>) -> std::thread::JoinHandle<()> {
    spawn_line_reader(std::io::BufReader::new(std::io::stdin()), tx)
}

/// Parse lines from `reader` on a dedicated thread.
///
/// The thread is never joined: a read blocked on an open input must not
/// hold up process exit.
pub fn spawn_line_reader<R>(reader: R, tx: mpsc::Sender<ControlCommand>) -> std::thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Stopped reading control commands");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ControlCommand>() {
                Ok(command) => {
                    if tx.blocking_send(command).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{e}; {HELP}"),
            }
        }
        tracing::debug!("Control input closed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_words() {
        assert_eq!(
            "scale+".parse(),
            Ok(ControlCommand::Tune(TuningAction::ScaleUp))
        );
        assert_eq!(
            " radius- ".parse(),
            Ok(ControlCommand::Tune(TuningAction::RadiusDown))
        );
        assert_eq!(
            "mode".parse(),
            Ok(ControlCommand::Tune(TuningAction::CycleToneMode))
        );
    }

    #[test]
    fn save_and_load_take_a_path() {
        assert_eq!(
            "save /tmp/heat map.bin".parse(),
            Ok(ControlCommand::Save(PathBuf::from("/tmp/heat map.bin")))
        );
        assert_eq!(
            "load heat.bin".parse(),
            Ok(ControlCommand::Load(PathBuf::from("heat.bin")))
        );
        assert!("save".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn rejects_unknown_and_extra_arguments() {
        assert!("zoom".parse::<ControlCommand>().is_err());
        assert!("reset now".parse::<ControlCommand>().is_err());
        assert!("".parse::<ControlCommand>().is_err());
    }

    /// Yields one line, then blocks until the test drops its handle.
    struct HeldOpen {
        first: Option<&'static [u8]>,
        block: std::sync::mpsc::Receiver<()>,
    }

    impl std::io::Read for HeldOpen {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if let Some(bytes) = self.first.take() {
                buf[..bytes.len()].copy_from_slice(bytes);
                return Ok(bytes.len());
            }
            let _ = self.block.recv();
            Ok(0)
        }
    }

    #[test]
    fn runtime_exits_while_input_stays_open() {
        let (hold, block) = std::sync::mpsc::channel::<()>();
        let input = std::io::BufReader::new(HeldOpen {
            first: Some(b"status\n"),
            block,
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let started = std::time::Instant::now();
        let received = runtime.block_on(async {
            let (tx, mut rx) = mpsc::channel(4);
            spawn_line_reader(input, tx);
            rx.recv().await
        });
        drop(runtime);

        assert_eq!(received, Some(ControlCommand::Status));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        drop(hold);
    }

    #[test]
    fn reader_stops_when_the_loop_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let input = std::io::Cursor::new("reset\nstatus\n");
        spawn_line_reader(input, tx).join().unwrap();
    }

    #[test]
    fn quit_aliases() {
        assert_eq!("quit".parse(), Ok(ControlCommand::Quit));
        assert_eq!("exit".parse(), Ok(ControlCommand::Quit));
    }
}
