// cminus: C- front end with syntax tree listing and viewer

use std::fs;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cminus::listing::Listing;
use cminus::options::{Mode, Options};
use cminus::parser::lexer::Lexer;
use cminus::parser::parse::Parser;
use cminus::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "cminus".to_string());

    let options = match Options::from_args(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Usage: {} [--scan | --view] <file.c>", program_name);
            eprintln!();
            eprintln!("  (default)  print the syntax tree listing");
            eprintln!("  --scan     print one row per token without parsing");
            eprintln!("  --view     browse the source and syntax tree in the terminal");
            std::process::exit(1);
        }
    };

    if !options.path.exists() {
        eprintln!("Error: File '{}' not found", options.path.display());
        std::process::exit(1);
    }

    let source = fs::read_to_string(&options.path)?;
    let source_name = options.source_name();

    match options.mode {
        Mode::Scan => {
            let mut listing = Listing::new(&source_name);
            listing.tokens(&mut Lexer::new(&source));
            print!("{}", listing);
        }
        Mode::Parse => {
            eprintln!("Parsing {}...", source_name);
            let mut listing = Listing::new(&source_name);

            match Parser::new(&source).parse_program() {
                Ok(program) => {
                    eprintln!(
                        "Parsed successfully. Found {} top-level declarations.",
                        program.declarations.len()
                    );
                    listing.syntax_tree(&program);
                    print!("{}", listing);
                }
                Err(e) => {
                    listing.syntax_error(&e);
                    print!("{}", listing);
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        Mode::View => {
            let result = Parser::new(&source).parse_program();
            if let Err(e) = &result {
                eprintln!("{}", e);
            }

            // Set up terminal
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;

            let mut app = App::new(source_name, source, result);
            let res = app.run(&mut terminal);

            // Restore terminal
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;

            if let Err(err) = res {
                eprintln!("Error: {:?}", err);
            }
        }
    }

    Ok(())
}
