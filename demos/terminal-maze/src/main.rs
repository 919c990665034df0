use std::path::Path;

use mazeway::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  generate [ROWS COLS]   new maze (g)
  w a s d                move (or up/left/down/right)
  solve                  fetch and draw the solution
  restart                back to the start cell
  save NAME / load NAME  saved mazes
  list                   saved maze names
  show                   redraw
  quit                   exit (q)";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Generate(MazeDimensions),
    Move(Direction),
    Solve,
    Restart,
    Save(String),
    Load(String),
    List,
    Show,
    Help,
    Quit,
}

fn parse(line: &str, default_dims: MazeDimensions) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let cmd = match words.as_slice() {
        ["generate" | "g"] => Command::Generate(default_dims),
        ["generate" | "g", rows, cols] => {
            let rows = rows.parse().map_err(|_| format!("bad row count {rows:?}"))?;
            let cols = cols.parse().map_err(|_| format!("bad column count {cols:?}"))?;
            Command::Generate(MazeDimensions::new(rows, cols).map_err(|e| e.to_string())?)
        }
        ["w" | "up"] => Command::Move(Direction::Up),
        ["s" | "down"] => Command::Move(Direction::Down),
        ["a" | "left"] => Command::Move(Direction::Left),
        ["d" | "right"] => Command::Move(Direction::Right),
        ["solve"] => Command::Solve,
        ["restart"] => Command::Restart,
        ["save", name] => Command::Save(name.to_string()),
        ["load", name] => Command::Load(name.to_string()),
        ["list"] => Command::List,
        ["show"] | [] => Command::Show,
        ["help" | "?"] => Command::Help,
        ["quit" | "q" | "exit"] => Command::Quit,
        _ => return Err(format!("unknown command {line:?}, try `help`")),
    };
    Ok(cmd)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn render(snapshot: &SessionSnapshot) -> String {
    let Some(maze) = &snapshot.maze else {
        return "no maze loaded, try `generate`".to_string();
    };
    let on_path = |p: Position| {
        snapshot
            .solution
            .as_ref()
            .is_some_and(|path| path.positions().contains(&p))
    };

    let mut out = String::with_capacity((maze.cols() * 2 + 1) * maze.rows());
    for row in 0..maze.rows() {
        for col in 0..maze.cols() {
            let p = Position::new(row, col);
            let ch = if snapshot.player == Some(p) {
                '@'
            } else if p == maze.goal() {
                'G'
            } else if p == maze.start() {
                'S'
            } else if !maze.is_open(p) {
                '#'
            } else if on_path(p) {
                '*'
            } else {
                '.'
            };
            out.push(ch);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::MazeGenerated { rows, cols } => println!("-- new {rows}x{cols} maze"),
        SessionEvent::PlayerMoved { position } => println!("-- player at {position}"),
        SessionEvent::MazeSolved { steps } => println!("-- solved in {steps} steps"),
    }
}

// ---------------------------------------------------------------------------
// Game loop
// ---------------------------------------------------------------------------

enum Flow {
    Continue,
    Quit,
}

async fn run(session: &MazewaySession, command: Command) -> Result<Flow, MazewayError> {
    match command {
        Command::Generate(dims) => {
            session.generate(dims).await?;
        }
        Command::Move(direction) => match session.move_player(direction).await? {
            MoveOutcome::Rejected => println!("blocked"),
            MoveOutcome::Moved { .. } => {}
            MoveOutcome::ReachedGoal { .. } => println!("you reached the goal!"),
        },
        Command::Solve => {
            session.solve().await?;
        }
        Command::Restart => {
            session.restart().await?;
        }
        Command::Save(name) => {
            let path = session.save(&name).await?;
            println!("saved to {}", path.display());
            return Ok(Flow::Continue);
        }
        Command::Load(name) => {
            session.load(&name).await?;
        }
        Command::List => {
            for name in session.saved_mazes().await? {
                println!("  {name}");
            }
            return Ok(Flow::Continue);
        }
        Command::Show => {}
        Command::Help => {
            println!("{HELP}");
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    print!("{}", render(&session.snapshot().await));
    Ok(Flow::Continue)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "mazeway.json".into());
    let config = MazewayConfig::load_or_default(Path::new(&config_path))?;
    init_tracing(&config.log_level);

    let default_dims = config.default_dimensions()?;
    eprintln!(
        "generator {}, solver {}",
        config.generator_endpoint(),
        config.solver_endpoint()
    );
    let session = MazewayBuilder::new()
        .config(config)
        .subscribe(print_event)
        .build();

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line, default_dims) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        match run(&session, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}
