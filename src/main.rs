use clap::Parser;
use color_eyre::Result;
use paydash::{App, AppEvent, ConfigManager, OpenOptions, APP_NAME};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::sync::mpsc::channel;

#[derive(Parser, Debug)]
#[command(version, about = "paydash")]
struct Args {
    /// CSV of salary records: a local path or an HTTP/HTTPS URL
    path: PathBuf,

    /// Specify the delimiter to use when reading the file
    #[arg(long = "delimiter")]
    delimiter: Option<u8>,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    debug: bool,
}

impl From<&Args> for OpenOptions {
    fn from(args: &Args) -> Self {
        let mut opts = OpenOptions::new();
        if let Some(delimiter) = args.delimiter {
            opts = opts.with_delimiter(delimiter);
        }
        opts
    }
}

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, args: &Args) -> Result<()> {
    let config = ConfigManager::new(APP_NAME)?.load_config()?;
    let (tx, rx) = channel::<AppEvent>();
    let mut app = App::with_config(tx.clone(), config);
    if args.debug {
        app.enable_debug();
    }
    let opts: OpenOptions = args.into();
    render(&mut terminal, &mut app)?;
    tx.send(AppEvent::Open(args.path.clone(), opts))?;

    loop {
        if crossterm::event::poll(std::time::Duration::from_millis(25))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(std::time::Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    AppEvent::Crash(msg) => {
                        return Err(color_eyre::eyre::eyre!(msg));
                    }
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    let terminal = ratatui::init();
    let result = run(terminal, &args);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_open_options() {
        let args = Args {
            path: PathBuf::new(),
            delimiter: Some(b';'),
            debug: false,
        };
        let opts: OpenOptions = (&args).into();
        assert_eq!(opts.delimiter, Some(b';'));

        let args = Args {
            path: PathBuf::new(),
            delimiter: None,
            debug: true,
        };
        let opts: OpenOptions = (&args).into();
        assert_eq!(opts, OpenOptions::new());
    }
}
